//! Bluetooth CAPI facade.
//!
//! This crate provides the callback-registration and event-dispatch layer that
//! sits between API consumers and an external Bluetooth daemon. The daemon
//! owns all actual Bluetooth protocol logic (pairing, SDP, GATT, radio
//! control) and is consumed through the [`daemon::DaemonInterface`] trait;
//! this crate demultiplexes the daemon's single event stream into typed,
//! per-kind callbacks and marshals daemon-native payloads into API-native
//! records.

pub mod adapter;
pub mod adv;
pub mod callbacks;
pub mod config;
pub mod daemon;
pub mod device;
pub mod dispatcher;
pub mod logging;
pub mod status;
pub mod telephony;
pub mod uuid;

use std::fmt::{Debug, Display, Formatter, Result};

/// Represents a Bluetooth device address.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct BtAddress {
    val: [u8; 6],
}

impl Debug for BtAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Display::fmt(self, f)
    }
}

impl Default for BtAddress {
    fn default() -> Self {
        Self { val: [0; 6] }
    }
}

impl Display for BtAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_fmt(format_args!(
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.val[0], self.val[1], self.val[2], self.val[3], self.val[4], self.val[5]
        ))
    }
}

impl BtAddress {
    pub fn new(val: [u8; 6]) -> BtAddress {
        BtAddress { val }
    }

    /// Constructs a BtAddress from a slice of exactly 6 bytes.
    pub fn from_bytes(raw_addr: &[u8]) -> Option<BtAddress> {
        if let Ok(val) = raw_addr.try_into() {
            return Some(BtAddress { val });
        }
        None
    }

    /// Parses the colon-separated `XX:XX:XX:XX:XX:XX` form. Upper and lower
    /// case hex digits are both accepted; anything else is rejected.
    pub fn from_string<S: Into<String>>(addr: S) -> Option<BtAddress> {
        let addr: String = addr.into();
        let s = addr.split(':').collect::<Vec<&str>>();

        if s.len() != 6 {
            return None;
        }

        let mut raw: [u8; 6] = [0; 6];
        for i in 0..s.len() {
            if s[i].len() != 2 {
                return None;
            }
            raw[i] = match u8::from_str_radix(s[i], 16) {
                Ok(res) => res,
                Err(_) => {
                    return None;
                }
            };
        }

        Some(BtAddress { val: raw })
    }

    pub fn to_byte_arr(&self) -> [u8; 6] {
        self.val
    }
}
