//! Service UUID helpers.
//!
//! The API contract formats UUIDs uppercase; the daemon's lowercase strings
//! are canonicalized on the way through the marshalling layer.

use lazy_static::lazy_static;
use num_derive::{FromPrimitive, ToPrimitive};
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};

pub type Uuid128Bit = [u8; 16];

// Well-known profile uuids.
pub const A2DP_SINK: &str = "0000110B-0000-1000-8000-00805F9B34FB";
pub const A2DP_SOURCE: &str = "0000110A-0000-1000-8000-00805F9B34FB";
pub const HSP: &str = "00001108-0000-1000-8000-00805F9B34FB";
pub const HFP: &str = "0000111E-0000-1000-8000-00805F9B34FB";
pub const AVRCP_CONTROLLER: &str = "0000110E-0000-1000-8000-00805F9B34FB";
pub const AVRCP_TARGET: &str = "0000110C-0000-1000-8000-00805F9B34FB";
pub const OBEX_OBJECT_PUSH: &str = "00001105-0000-1000-8000-00805F9B34FB";
pub const HID: &str = "00001124-0000-1000-8000-00805F9B34FB";
pub const PANU: &str = "00001115-0000-1000-8000-00805F9B34FB";
pub const NAP: &str = "00001116-0000-1000-8000-00805F9B34FB";
pub const HDP_SOURCE: &str = "00001401-0000-1000-8000-00805F9B34FB";

// Unsigned integer representation of the Bluetooth base UUID.
pub const BASE_UUID_NUM: u128 = 0x0000000000001000800000805f9b34fbu128;
pub const BASE_UUID_MASK: u128 = !(0xffffffffu128 << 96);

/// Profiles with known uuids.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum Profile {
    A2dpSink,
    A2dpSource,
    Hsp,
    Hfp,
    AvrcpController,
    AvrcpTarget,
    ObexObjectPush,
    Hid,
    Panu,
    Nap,
    HdpSource,
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

lazy_static! {
    static ref PROFILES: HashMap<Uuid128Bit, Profile> = [
        (UuidHelper::from_string(A2DP_SINK).unwrap(), Profile::A2dpSink),
        (UuidHelper::from_string(A2DP_SOURCE).unwrap(), Profile::A2dpSource),
        (UuidHelper::from_string(HSP).unwrap(), Profile::Hsp),
        (UuidHelper::from_string(HFP).unwrap(), Profile::Hfp),
        (UuidHelper::from_string(AVRCP_CONTROLLER).unwrap(), Profile::AvrcpController),
        (UuidHelper::from_string(AVRCP_TARGET).unwrap(), Profile::AvrcpTarget),
        (UuidHelper::from_string(OBEX_OBJECT_PUSH).unwrap(), Profile::ObexObjectPush),
        (UuidHelper::from_string(HID).unwrap(), Profile::Hid),
        (UuidHelper::from_string(PANU).unwrap(), Profile::Panu),
        (UuidHelper::from_string(NAP).unwrap(), Profile::Nap),
        (UuidHelper::from_string(HDP_SOURCE).unwrap(), Profile::HdpSource),
    ]
    .iter()
    .cloned()
    .collect();
}

pub struct UuidHelper {}

impl UuidHelper {
    /// Converts a UUID to a known profile enum.
    pub fn is_known_profile(uuid: &Uuid128Bit) -> Option<Profile> {
        PROFILES.get(uuid).cloned()
    }

    /// Formats a UUID byte array into the canonical uppercase string.
    pub fn to_string(uuid: &Uuid128Bit) -> String {
        format!(
            "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            uuid[0], uuid[1], uuid[2], uuid[3], uuid[4], uuid[5], uuid[6], uuid[7],
            uuid[8], uuid[9], uuid[10], uuid[11], uuid[12], uuid[13], uuid[14], uuid[15]
        )
    }

    /// Converts a well-formatted UUID string to a UUID byte array. The string
    /// should be in the format:
    /// 12345678-1234-1234-1234-123456789012
    pub fn from_string<S: Into<String>>(raw: S) -> Option<Uuid128Bit> {
        let raw: String = raw.into();

        // Make sure input is valid length and formatting
        let s = raw.split('-').collect::<Vec<&str>>();
        if s.len() != 5 || raw.len() != 36 {
            return None;
        }
        // The dashes must sit exactly at the 8-4-4-4-12 boundaries; a
        // misplaced dash passes the length checks above.
        if s[0].len() != 8 || s[1].len() != 4 || s[2].len() != 4 || s[3].len() != 4 {
            return None;
        }

        let mut uuid: Uuid128Bit = [0; 16];
        let mut idx = 0;
        for section in s.iter() {
            for i in (0..section.len()).step_by(2) {
                uuid[idx] = match u8::from_str_radix(&section[i..i + 2], 16) {
                    Ok(res) => res,
                    Err(_) => {
                        return None;
                    }
                };
                idx += 1;
            }
        }

        Some(uuid)
    }

    /// Re-formats a UUID string into the canonical uppercase form.
    pub fn canonicalize<S: Into<String>>(raw: S) -> Option<String> {
        Some(UuidHelper::to_string(&UuidHelper::from_string(raw)?))
    }

    /// Expands a 16-bit assigned number onto the Bluetooth base UUID.
    pub fn from_uuid16(uuid16: u16) -> Uuid128Bit {
        (BASE_UUID_NUM | ((uuid16 as u128) << 96)).to_be_bytes()
    }

    /// Parses an 128-bit UUID into a byte array of shortest representation.
    pub fn get_shortest_slice(uuid: &Uuid128Bit) -> &[u8] {
        if UuidHelper::in_16bit_uuid_range(uuid) {
            &uuid[2..4]
        } else if UuidHelper::in_32bit_uuid_range(uuid) {
            &uuid[0..4]
        } else {
            &uuid[..]
        }
    }

    /// Checks whether the UUID value is in the 16-bit Bluetooth UUID range.
    fn in_16bit_uuid_range(uuid: &Uuid128Bit) -> bool {
        if !UuidHelper::in_32bit_uuid_range(uuid) {
            return false;
        }
        uuid[0] == 0 && uuid[1] == 0
    }

    /// Checks whether the UUID value is in the 32-bit Bluetooth UUID range.
    fn in_32bit_uuid_range(uuid: &Uuid128Bit) -> bool {
        let num = u128::from_be_bytes(*uuid);
        (num & BASE_UUID_MASK) == BASE_UUID_NUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_profiles() {
        for (uuid, _) in PROFILES.iter() {
            let converted = UuidHelper::from_string(UuidHelper::to_string(uuid));
            assert_eq!(converted, Some(*uuid));
        }
    }

    #[test]
    fn misplaced_dashes_are_rejected() {
        // Correct total length and section count, wrong section lengths.
        assert!(UuidHelper::from_string("000001108-000-1000-8000-00805F9B34FB").is_none());
        assert!(UuidHelper::from_string("0000110-80000-1000-8000-00805F9B34FB").is_none());
        assert!(UuidHelper::from_string("00001108-00001-000-8000-00805F9B34FB").is_none());
    }

    #[test]
    fn canonical_form_is_uppercase() {
        assert_eq!(
            UuidHelper::canonicalize("0000110b-0000-1000-8000-00805f9b34fb").as_deref(),
            Some("0000110B-0000-1000-8000-00805F9B34FB")
        );
        assert!(UuidHelper::canonicalize("not a uuid").is_none());
    }

    #[test]
    fn uuid16_expands_onto_base() {
        let uuid = UuidHelper::from_uuid16(0x110b);
        assert_eq!(UuidHelper::to_string(&uuid), A2DP_SINK);
        assert_eq!(UuidHelper::is_known_profile(&uuid), Some(Profile::A2dpSink));
    }

    #[test]
    fn shortest_slice() {
        let uuid_16 = UuidHelper::from_string("0000fef3-0000-1000-8000-00805f9b34fb").unwrap();
        assert_eq!(UuidHelper::get_shortest_slice(&uuid_16), [0xfe, 0xf3]);

        let uuid_32 = UuidHelper::from_string("00112233-0000-1000-8000-00805f9b34fb").unwrap();
        assert_eq!(UuidHelper::get_shortest_slice(&uuid_32), [0x00, 0x11, 0x22, 0x33]);

        let uuid_128 = UuidHelper::from_string("00112233-4455-6677-8899-aabbccddeeff").unwrap();
        assert_eq!(UuidHelper::get_shortest_slice(&uuid_128).len(), 16);
    }
}
