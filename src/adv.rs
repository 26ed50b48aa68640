//! Legacy advertising and scan-response payload builders.
//!
//! Each buffer is a concatenation of `[length][type][payload]` AD triplets.
//! The 31-byte legacy PDU cap is enforced on append: an append that would
//! overflow fails and leaves the buffer untouched.

use crate::status::BtStatus;
use crate::uuid::UuidHelper;

/// Legacy advertising PDU payload limit.
pub const ADV_DATA_LENGTH_MAX: usize = 31;

// Advertising data types.
pub const FLAGS: u8 = 0x01;
pub const COMPLETE_LIST_16_BIT_SERVICE_UUIDS: u8 = 0x03;
pub const COMPLETE_LIST_128_BIT_SERVICE_UUIDS: u8 = 0x07;
pub const SHORTENED_LOCAL_NAME: u8 = 0x08;
pub const COMPLETE_LOCAL_NAME: u8 = 0x09;
pub const TX_POWER_LEVEL: u8 = 0x0a;
pub const SERVICE_DATA_16_BIT_UUID: u8 = 0x16;
pub const MANUFACTURER_SPECIFIC_DATA: u8 = 0xff;

// Name bytes that fit one triplet after length and type.
const LOCAL_NAME_MAX: usize = ADV_DATA_LENGTH_MAX - 2;

/// Which of the advertiser's two buffers an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvSlot {
    Advertising,
    ScanResponse,
}

/// Owns the advertising and scan-response buffers of one advertising set.
#[derive(Debug, Default)]
pub struct Advertiser {
    adv_data: Vec<u8>,
    scan_rsp_data: Vec<u8>,
}

impl Advertiser {
    pub fn new() -> Self {
        Self { adv_data: Vec::new(), scan_rsp_data: Vec::new() }
    }

    fn buffer(&self, slot: AdvSlot) -> &Vec<u8> {
        match slot {
            AdvSlot::Advertising => &self.adv_data,
            AdvSlot::ScanResponse => &self.scan_rsp_data,
        }
    }

    fn buffer_mut(&mut self, slot: AdvSlot) -> &mut Vec<u8> {
        match slot {
            AdvSlot::Advertising => &mut self.adv_data,
            AdvSlot::ScanResponse => &mut self.scan_rsp_data,
        }
    }

    pub fn advertising_data(&self) -> &[u8] {
        &self.adv_data
    }

    pub fn scan_response_data(&self) -> &[u8] {
        &self.scan_rsp_data
    }

    /// Appends one `[length][type][payload]` triplet.
    ///
    /// Fails with `QuotaExceeded` when the triplet would push the buffer past
    /// [`ADV_DATA_LENGTH_MAX`]; the buffer is left unchanged in that case.
    pub fn append(&mut self, slot: AdvSlot, ad_type: u8, payload: &[u8]) -> Result<(), BtStatus> {
        if payload.len() > ADV_DATA_LENGTH_MAX - 2 {
            return Err(BtStatus::InvalidParameter);
        }

        let buf = self.buffer_mut(slot);
        if buf.len() + 2 + payload.len() > ADV_DATA_LENGTH_MAX {
            return Err(BtStatus::QuotaExceeded);
        }

        buf.push((payload.len() + 1) as u8);
        buf.push(ad_type);
        buf.extend_from_slice(payload);
        Ok(())
    }

    /// Removes every triplet of the given AD type.
    ///
    /// Returns true if at least one triplet was removed.
    pub fn remove(&mut self, slot: AdvSlot, ad_type: u8) -> bool {
        let buf = self.buffer_mut(slot);
        let mut out = Vec::with_capacity(buf.len());
        let mut removed = false;

        let mut i = 0;
        while i < buf.len() {
            let len = buf[i] as usize;
            // A zero length or a truncated tail means the buffer is no longer
            // a well-formed AD sequence; keep the remainder as-is.
            if len == 0 || i + 1 + len > buf.len() {
                out.extend_from_slice(&buf[i..]);
                break;
            }
            if buf[i + 1] == ad_type {
                removed = true;
            } else {
                out.extend_from_slice(&buf[i..i + 1 + len]);
            }
            i += 1 + len;
        }

        *buf = out;
        removed
    }

    /// Appends the local name, shortening it when the full form does not fit.
    pub fn append_local_name(&mut self, slot: AdvSlot, name: &str) -> Result<(), BtStatus> {
        let bytes = name.as_bytes();
        if bytes.len() <= LOCAL_NAME_MAX {
            return self.append(slot, COMPLETE_LOCAL_NAME, bytes);
        }
        self.append(slot, SHORTENED_LOCAL_NAME, &bytes[..LOCAL_NAME_MAX])
    }

    /// Appends a complete list of 16-bit service UUIDs. UUID strings outside
    /// the 16-bit Bluetooth base range are rejected.
    pub fn append_service_uuids(
        &mut self,
        slot: AdvSlot,
        uuids: &[String],
    ) -> Result<(), BtStatus> {
        let mut payload = Vec::with_capacity(uuids.len() * 2);
        for s in uuids {
            let uuid = UuidHelper::from_string(s).ok_or(BtStatus::InvalidParameter)?;
            let short = UuidHelper::get_shortest_slice(&uuid);
            if short.len() != 2 {
                return Err(BtStatus::InvalidParameter);
            }
            // AD payloads are little-endian.
            payload.push(short[1]);
            payload.push(short[0]);
        }
        self.append(slot, COMPLETE_LIST_16_BIT_SERVICE_UUIDS, &payload)
    }

    pub fn clear(&mut self, slot: AdvSlot) {
        self.buffer_mut(slot).clear();
    }

    /// Remaining capacity of a buffer, in bytes.
    pub fn remaining(&self, slot: AdvSlot) -> usize {
        ADV_DATA_LENGTH_MAX - self.buffer(slot).len()
    }
}
