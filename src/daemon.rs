//! The consumed daemon boundary.
//!
//! Everything behind [`DaemonInterface`] is owned by the external Bluetooth
//! daemon: the pairing state machine, SDP, the GATT attribute tree and radio
//! power management. This module only defines the request surface the facade
//! delegates to and the event stream the daemon delivers back, in
//! daemon-native shape. Marshalling into API-native records happens in
//! `dispatcher` and `device`.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::status::{DaemonStatus, TelephonyStatus};
use crate::telephony::CallState;

/// Discoverability mode of the local adapter.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(u32)]
pub enum VisibilityMode {
    NonDiscoverable = 0,
    GeneralDiscoverable,
    LimitedDiscoverable,
}

/// Audio profile carried in audio connection events.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(u32)]
pub enum AudioProfile {
    All = 0,
    Hsp,
    A2dp,
    A2dpSink,
}

/// AVRCP setting notifications from the remote controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvrcpControl {
    EqualizerChanged(bool),
    RepeatChanged(u32),
    ShuffleChanged(u32),
    ScanChanged(u32),
}

/// Device record as the daemon delivers it. Service UUIDs arrive in the
/// daemon's lowercase convention.
#[derive(Clone, Debug, Default)]
pub struct DaemonDeviceInfo {
    pub address: [u8; 6],
    /// Empty when the daemon has no name for the device.
    pub name: String,
    pub class_of_device: u32,
    pub rssi: i32,
    pub paired: bool,
    pub connected: bool,
    pub trusted: bool,
    pub service_uuids: Vec<String>,
}

/// SDP search result as the daemon delivers it.
#[derive(Clone, Debug, Default)]
pub struct DaemonSdpInfo {
    pub address: [u8; 6],
    pub service_uuids: Vec<String>,
}

/// One discovered GATT characteristic handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GattCharacteristic {
    pub handle: u32,
    pub uuid: String,
}

/// The daemon's event stream. One value per daemon-side state change,
/// payloads carried in the variants.
#[derive(Clone, Debug)]
pub enum DaemonEvent {
    Enabled(DaemonStatus),
    Disabled(DaemonStatus),
    NameChanged(String),
    VisibilityModeChanged(DaemonStatus, VisibilityMode),
    VisibilityDurationChanged(i32),
    DiscoveryStarted(DaemonStatus),
    DiscoveryFinished(DaemonStatus),
    DeviceFound(DaemonStatus, DaemonDeviceInfo),
    BondCreated(DaemonStatus, DaemonDeviceInfo),
    BondDestroyed(DaemonStatus, [u8; 6]),
    AuthorizationChanged(DaemonStatus, [u8; 6], bool),
    ServiceSearched(DaemonStatus, DaemonSdpInfo),
    DeviceConnected([u8; 6]),
    DeviceDisconnected([u8; 6]),
    RfcommConnected(DaemonStatus, [u8; 6], String),
    RfcommDisconnected(DaemonStatus, [u8; 6]),
    RfcommDataReceived(i32, Vec<u8>),
    OppClientPushResponded(DaemonStatus, [u8; 6]),
    OppClientPushProgress(String, i64, i32),
    OppClientPushFinished(DaemonStatus, [u8; 6]),
    OppServerTransferProgress(String, i64, i32),
    OppServerTransferFinished(DaemonStatus, String),
    AudioConnected(DaemonStatus, [u8; 6], AudioProfile),
    AudioDisconnected(DaemonStatus, [u8; 6], AudioProfile),
    AvrcpConnected([u8; 6]),
    AvrcpDisconnected([u8; 6]),
    AvrcpSettingChanged(AvrcpControl),
    HidConnected(DaemonStatus, [u8; 6]),
    HidDisconnected(DaemonStatus, [u8; 6]),
    GattCharacteristicsDiscovered(DaemonStatus, Vec<GattCharacteristic>),
    GattValueChanged(u32, Vec<u8>),
    CallStateChanged(TelephonyStatus, u32, CallState),
}

/// Dispatch object handed to the daemon at initialization. The daemon calls
/// `dispatch` once per event, on its own delivery thread.
pub struct EventDispatcher {
    pub dispatch: Box<dyn Fn(DaemonEvent) + Send>,
}

/// Request surface of the daemon. Implementations translate these into the
/// daemon's IPC transport; tests substitute a scripted fake.
pub trait DaemonInterface: Send {
    /// Registers the process-wide event dispatcher. Must be called before any
    /// other request.
    fn initialize(&mut self, dispatcher: EventDispatcher) -> DaemonStatus;

    /// Drops the event dispatcher and releases daemon-side resources.
    fn cleanup(&mut self) -> DaemonStatus;

    fn enable(&mut self) -> DaemonStatus;

    fn disable(&mut self) -> DaemonStatus;

    fn local_address(&self) -> [u8; 6];

    fn local_name(&self) -> String;

    fn set_local_name(&mut self, name: &str) -> DaemonStatus;

    fn set_visibility(&mut self, mode: VisibilityMode, duration: i32) -> DaemonStatus;

    fn start_discovery(&mut self) -> DaemonStatus;

    fn stop_discovery(&mut self) -> DaemonStatus;

    fn create_bond(&mut self, address: &[u8; 6]) -> DaemonStatus;

    fn cancel_bond(&mut self, address: &[u8; 6]) -> DaemonStatus;

    fn destroy_bond(&mut self, address: &[u8; 6]) -> DaemonStatus;

    fn search_services(&mut self, address: &[u8; 6]) -> DaemonStatus;

    fn set_advertising_data(&mut self, adv_data: &[u8], scan_rsp_data: &[u8]) -> DaemonStatus;
}
