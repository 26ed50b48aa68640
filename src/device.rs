//! API-native device records and marshalling from daemon-native structs.
//!
//! The constructors deep-copy everything they touch: the resulting records
//! share no storage with the daemon struct they were built from, and
//! construction either fully succeeds or builds nothing. Service UUIDs are
//! uppercased on copy (the daemon delivers lowercase, the API contract is
//! uppercase).

use bitflags::bitflags;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::cast::FromPrimitive;

use crate::daemon::{DaemonDeviceInfo, DaemonSdpInfo};
use crate::BtAddress;

bitflags! {
    /// Major service class bits of the class-of-device field.
    pub struct ServiceClass: u32 {
        const LIMITED_DISCOVERABILITY = 0x00_2000;
        const POSITIONING = 0x01_0000;
        const NETWORKING = 0x02_0000;
        const RENDERING = 0x04_0000;
        const CAPTURING = 0x08_0000;
        const OBJECT_TRANSFER = 0x10_0000;
        const AUDIO = 0x20_0000;
        const TELEPHONY = 0x40_0000;
        const INFORMATION = 0x80_0000;
    }
}

#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(u32)]
pub enum MajorClass {
    Miscellaneous = 0x00,
    Computer = 0x01,
    Phone = 0x02,
    LanAccessPoint = 0x03,
    AudioVideo = 0x04,
    Peripheral = 0x05,
    Imaging = 0x06,
    Wearable = 0x07,
    Toy = 0x08,
    Health = 0x09,
    Uncategorized = 0x1f,
}

/// Decoded class-of-device field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceClass {
    pub major: MajorClass,
    /// Minor class bits, major-class specific.
    pub minor: u32,
    pub service: ServiceClass,
}

impl From<u32> for DeviceClass {
    fn from(cod: u32) -> Self {
        DeviceClass {
            major: MajorClass::from_u32((cod & 0x1f00) >> 8)
                .unwrap_or(MajorClass::Uncategorized),
            minor: (cod & 0xfc) >> 2,
            service: ServiceClass::from_bits_truncate(cod),
        }
    }
}

/// A bonded or connected remote device.
#[derive(Clone, Debug)]
pub struct DeviceInfo {
    pub address: BtAddress,
    /// `None` when the daemon has no name for the device.
    pub name: Option<String>,
    pub class: DeviceClass,
    pub service_uuids: Vec<String>,
    pub is_bonded: bool,
    pub is_connected: bool,
    pub is_authorized: bool,
}

impl DeviceInfo {
    pub fn from_daemon(info: &DaemonDeviceInfo) -> DeviceInfo {
        DeviceInfo {
            address: BtAddress::new(info.address),
            name: non_empty(&info.name),
            class: DeviceClass::from(info.class_of_device),
            service_uuids: uppercase_uuids(&info.service_uuids),
            is_bonded: info.paired,
            is_connected: info.connected,
            is_authorized: info.trusted,
        }
    }
}

/// Result of an SDP service search on a remote device.
#[derive(Clone, Debug)]
pub struct SdpInfo {
    pub address: BtAddress,
    pub service_uuids: Vec<String>,
}

impl SdpInfo {
    pub fn from_daemon(info: &DaemonSdpInfo) -> SdpInfo {
        SdpInfo {
            address: BtAddress::new(info.address),
            service_uuids: uppercase_uuids(&info.service_uuids),
        }
    }
}

/// A device reported during discovery.
#[derive(Clone, Debug)]
pub struct DiscoveryInfo {
    pub address: BtAddress,
    pub name: Option<String>,
    pub class: DeviceClass,
    pub rssi: i32,
    pub service_uuids: Vec<String>,
    pub is_bonded: bool,
}

impl DiscoveryInfo {
    pub fn from_daemon(info: &DaemonDeviceInfo) -> DiscoveryInfo {
        DiscoveryInfo {
            address: BtAddress::new(info.address),
            name: non_empty(&info.name),
            class: DeviceClass::from(info.class_of_device),
            rssi: info.rssi,
            service_uuids: uppercase_uuids(&info.service_uuids),
            is_bonded: info.paired,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn uppercase_uuids(uuids: &[String]) -> Vec<String> {
    uuids.iter().map(|u| u.to_ascii_uppercase()).collect()
}
