//! Typed event model and the per-kind callback registry.
//!
//! The registry is an explicitly-owned object: whoever owns the daemon
//! connection constructs one and shares it (behind a mutex) with the
//! dispatcher. There is no process-wide table. At most one callback is
//! registered per event kind; setting replaces silently, unsetting clears.

use std::collections::{HashMap, HashSet};

use num_derive::{FromPrimitive, ToPrimitive};

use crate::daemon::{AudioProfile, AvrcpControl, VisibilityMode};
use crate::device::{DiscoveryInfo, SdpInfo};
use crate::status::BtStatus;
use crate::telephony::CallState;
use crate::BtAddress;

/// The dense internal event kinds consumers register callbacks for.
///
/// Several daemon events fold into one kind here (adapter enabled and
/// disabled are both `AdapterStateChanged`; discovery start, finish and each
/// found device are all `DeviceDiscoveryStateChanged`) with the distinction
/// carried in the [`BtEvent`] payload.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BtEventType {
    AdapterStateChanged = 0,
    AdapterNameChanged,
    VisibilityModeChanged,
    VisibilityDurationChanged,
    DeviceDiscoveryStateChanged,
    BondCreated,
    BondDestroyed,
    AuthorizationChanged,
    ServiceSearched,
    DeviceConnectionStateChanged,
    RfcommConnectionStateChanged,
    RfcommDataReceived,
    OppClientPushResponded,
    OppClientPushProgress,
    OppClientPushFinished,
    OppServerTransferProgress,
    OppServerTransferFinished,
    AudioConnectionStateChanged,
    AvrcpConnectionStateChanged,
    AvrcpSettingChanged,
    HidConnectionStateChanged,
    GattCharacteristicDiscovered,
    GattValueChanged,
    CallStateChanged,
}

/// Power state of the local adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterState {
    Disabled = 0,
    Enabled,
}

/// Progress of a device discovery session.
#[derive(Clone, Debug)]
pub enum DiscoveryState {
    Started,
    Finished,
    Found(DiscoveryInfo),
}

/// An event delivered to a registered callback. Payloads are borrowed by the
/// callback for its synchronous extent only; the dispatcher owns the value.
#[derive(Clone, Debug)]
pub enum BtEvent {
    AdapterStateChanged { status: BtStatus, state: AdapterState },
    AdapterNameChanged { name: String },
    VisibilityModeChanged { status: BtStatus, mode: VisibilityMode },
    VisibilityDurationChanged { duration: i32 },
    DeviceDiscoveryStateChanged { status: BtStatus, state: DiscoveryState },
    BondCreated { status: BtStatus, device: crate::device::DeviceInfo },
    BondDestroyed { status: BtStatus, address: BtAddress },
    AuthorizationChanged { status: BtStatus, address: BtAddress, authorized: bool },
    ServiceSearched { status: BtStatus, sdp: SdpInfo },
    DeviceConnectionStateChanged { connected: bool, address: BtAddress },
    RfcommConnectionStateChanged { status: BtStatus, connected: bool, address: BtAddress, service_uuid: Option<String> },
    RfcommDataReceived { socket_fd: i32, data: Vec<u8> },
    OppClientPushResponded { status: BtStatus, address: BtAddress },
    OppClientPushProgress { file: String, size: i64, percent: i32 },
    OppClientPushFinished { status: BtStatus, address: BtAddress },
    OppServerTransferProgress { file: String, size: i64, percent: i32 },
    OppServerTransferFinished { status: BtStatus, file: String },
    AudioConnectionStateChanged { status: BtStatus, connected: bool, address: BtAddress, profile: AudioProfile },
    AvrcpConnectionStateChanged { connected: bool, address: BtAddress },
    AvrcpSettingChanged { setting: AvrcpControl },
    HidConnectionStateChanged { status: BtStatus, connected: bool, address: BtAddress },
    GattCharacteristicDiscovered { status: BtStatus, index: i32, total: i32, handle: u32, uuid: String },
    GattValueChanged { handle: u32, value: Vec<u8> },
    CallStateChanged { status: BtStatus, call_id: u32, state: CallState },
}

impl BtEvent {
    /// The registry kind this event is delivered under.
    pub fn event_type(&self) -> BtEventType {
        match self {
            BtEvent::AdapterStateChanged { .. } => BtEventType::AdapterStateChanged,
            BtEvent::AdapterNameChanged { .. } => BtEventType::AdapterNameChanged,
            BtEvent::VisibilityModeChanged { .. } => BtEventType::VisibilityModeChanged,
            BtEvent::VisibilityDurationChanged { .. } => BtEventType::VisibilityDurationChanged,
            BtEvent::DeviceDiscoveryStateChanged { .. } => BtEventType::DeviceDiscoveryStateChanged,
            BtEvent::BondCreated { .. } => BtEventType::BondCreated,
            BtEvent::BondDestroyed { .. } => BtEventType::BondDestroyed,
            BtEvent::AuthorizationChanged { .. } => BtEventType::AuthorizationChanged,
            BtEvent::ServiceSearched { .. } => BtEventType::ServiceSearched,
            BtEvent::DeviceConnectionStateChanged { .. } => {
                BtEventType::DeviceConnectionStateChanged
            }
            BtEvent::RfcommConnectionStateChanged { .. } => {
                BtEventType::RfcommConnectionStateChanged
            }
            BtEvent::RfcommDataReceived { .. } => BtEventType::RfcommDataReceived,
            BtEvent::OppClientPushResponded { .. } => BtEventType::OppClientPushResponded,
            BtEvent::OppClientPushProgress { .. } => BtEventType::OppClientPushProgress,
            BtEvent::OppClientPushFinished { .. } => BtEventType::OppClientPushFinished,
            BtEvent::OppServerTransferProgress { .. } => BtEventType::OppServerTransferProgress,
            BtEvent::OppServerTransferFinished { .. } => BtEventType::OppServerTransferFinished,
            BtEvent::AudioConnectionStateChanged { .. } => BtEventType::AudioConnectionStateChanged,
            BtEvent::AvrcpConnectionStateChanged { .. } => BtEventType::AvrcpConnectionStateChanged,
            BtEvent::AvrcpSettingChanged { .. } => BtEventType::AvrcpSettingChanged,
            BtEvent::HidConnectionStateChanged { .. } => BtEventType::HidConnectionStateChanged,
            BtEvent::GattCharacteristicDiscovered { .. } => {
                BtEventType::GattCharacteristicDiscovered
            }
            BtEvent::GattValueChanged { .. } => BtEventType::GattValueChanged,
            BtEvent::CallStateChanged { .. } => BtEventType::CallStateChanged,
        }
    }
}

/// Callback closures capture their own context; the event payload is a
/// borrow valid only while the callback runs.
pub type EventCallback = Box<dyn FnMut(&BtEvent) + Send>;

/// Utility for managing per-kind event callbacks.
///
/// While a callback is being dispatched its slot is vacated and the kind is
/// tracked as in flight, so the registry lock does not need to be held across
/// the invocation. Registration changes made during dispatch (including a
/// callback unsetting itself) take effect when the dispatch finishes.
pub struct EventCallbacks {
    slots: HashMap<BtEventType, EventCallback>,
    in_flight: HashSet<BtEventType>,
    retired: HashSet<BtEventType>,
}

impl Default for EventCallbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCallbacks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { slots: HashMap::new(), in_flight: HashSet::new(), retired: HashSet::new() }
    }

    /// Stores a callback for the event kind, replacing any previous one
    /// silently.
    pub fn set_callback(&mut self, event_type: BtEventType, callback: EventCallback) {
        self.retired.remove(&event_type);
        self.slots.insert(event_type, callback);
    }

    /// Clears the callback for the event kind.
    ///
    /// Returns true if a callback was present, false otherwise (clearing an
    /// empty slot is a no-op). Unsetting the kind currently being dispatched
    /// retires it: the in-flight callback is not restored afterwards.
    pub fn unset_callback(&mut self, event_type: BtEventType) -> bool {
        let removed = self.slots.remove(&event_type).is_some();
        if self.in_flight.contains(&event_type) {
            self.retired.insert(event_type);
            return true;
        }
        removed
    }

    /// Returns true iff a callback is registered for the event kind.
    pub fn has_callback(&self, event_type: BtEventType) -> bool {
        self.slots.contains_key(&event_type)
            || (self.in_flight.contains(&event_type) && !self.retired.contains(&event_type))
    }

    /// Takes the callback for the event kind out of its slot and marks the
    /// kind in flight. Pair with [`EventCallbacks::finish_dispatch`].
    pub(crate) fn begin_dispatch(&mut self, event_type: BtEventType) -> Option<EventCallback> {
        let callback = self.slots.remove(&event_type)?;
        self.in_flight.insert(event_type);
        Some(callback)
    }

    /// Ends a dispatch. The callback is restored unless it was retired during
    /// dispatch or a replacement was registered; passing `None` drops the
    /// registration (one-shot kinds).
    pub(crate) fn finish_dispatch(
        &mut self,
        event_type: BtEventType,
        callback: Option<EventCallback>,
    ) {
        self.in_flight.remove(&event_type);
        let retired = self.retired.remove(&event_type);
        if let Some(cb) = callback {
            if !retired {
                self.slots.entry(event_type).or_insert(cb);
            }
        }
    }

    /// Invokes the registered callback with the event, if one is present.
    ///
    /// Returns true if a callback ran.
    pub fn invoke(&mut self, event: &BtEvent) -> bool {
        match self.slots.get_mut(&event.event_type()) {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }

    /// Drops every registration, retiring any dispatch in flight.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.retired.extend(self.in_flight.iter().copied());
    }
}
