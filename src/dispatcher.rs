//! Demultiplexes the daemon's event stream into registered callbacks.
//!
//! The relay is the single entry point the daemon drives. For each daemon
//! event it resolves the internal event kind, marshals the payload into a
//! [`BtEvent`] and invokes the registered callback exactly once, synchronously
//! on the calling thread. Events with no registered callback are dropped;
//! there is no queue, no retry and no ordering beyond daemon delivery order.
//!
//! The registry lock is not held while a callback runs: the callback is taken
//! out of its slot for the duration, so callbacks may register, replace or
//! unset registrations (including their own).

use std::sync::{Arc, Mutex};

use log::debug;

use crate::callbacks::{AdapterState, BtEvent, BtEventType, DiscoveryState, EventCallbacks};
use crate::daemon::{DaemonEvent, EventDispatcher};
use crate::device::{DeviceInfo, DiscoveryInfo, SdpInfo};
use crate::status::BtStatus;
use crate::BtAddress;

/// Resolves the internal event kind a daemon event is delivered under.
///
/// Total and pure. Several daemon events share one kind; the distinction
/// survives in the marshalled payload.
pub fn relay_target(event: &DaemonEvent) -> BtEventType {
    match event {
        DaemonEvent::Enabled(_) | DaemonEvent::Disabled(_) => BtEventType::AdapterStateChanged,
        DaemonEvent::NameChanged(_) => BtEventType::AdapterNameChanged,
        DaemonEvent::VisibilityModeChanged(_, _) => BtEventType::VisibilityModeChanged,
        DaemonEvent::VisibilityDurationChanged(_) => BtEventType::VisibilityDurationChanged,
        DaemonEvent::DiscoveryStarted(_)
        | DaemonEvent::DiscoveryFinished(_)
        | DaemonEvent::DeviceFound(_, _) => BtEventType::DeviceDiscoveryStateChanged,
        DaemonEvent::BondCreated(_, _) => BtEventType::BondCreated,
        DaemonEvent::BondDestroyed(_, _) => BtEventType::BondDestroyed,
        DaemonEvent::AuthorizationChanged(_, _, _) => BtEventType::AuthorizationChanged,
        DaemonEvent::ServiceSearched(_, _) => BtEventType::ServiceSearched,
        DaemonEvent::DeviceConnected(_) | DaemonEvent::DeviceDisconnected(_) => {
            BtEventType::DeviceConnectionStateChanged
        }
        DaemonEvent::RfcommConnected(_, _, _) | DaemonEvent::RfcommDisconnected(_, _) => {
            BtEventType::RfcommConnectionStateChanged
        }
        DaemonEvent::RfcommDataReceived(_, _) => BtEventType::RfcommDataReceived,
        DaemonEvent::OppClientPushResponded(_, _) => BtEventType::OppClientPushResponded,
        DaemonEvent::OppClientPushProgress(_, _, _) => BtEventType::OppClientPushProgress,
        DaemonEvent::OppClientPushFinished(_, _) => BtEventType::OppClientPushFinished,
        DaemonEvent::OppServerTransferProgress(_, _, _) => BtEventType::OppServerTransferProgress,
        DaemonEvent::OppServerTransferFinished(_, _) => BtEventType::OppServerTransferFinished,
        DaemonEvent::AudioConnected(_, _, _) | DaemonEvent::AudioDisconnected(_, _, _) => {
            BtEventType::AudioConnectionStateChanged
        }
        DaemonEvent::AvrcpConnected(_) | DaemonEvent::AvrcpDisconnected(_) => {
            BtEventType::AvrcpConnectionStateChanged
        }
        DaemonEvent::AvrcpSettingChanged(_) => BtEventType::AvrcpSettingChanged,
        DaemonEvent::HidConnected(_, _) | DaemonEvent::HidDisconnected(_, _) => {
            BtEventType::HidConnectionStateChanged
        }
        DaemonEvent::GattCharacteristicsDiscovered(_, _) => {
            BtEventType::GattCharacteristicDiscovered
        }
        DaemonEvent::GattValueChanged(_, _) => BtEventType::GattValueChanged,
        DaemonEvent::CallStateChanged(_, _, _) => BtEventType::CallStateChanged,
    }
}

/// Marshals one daemon event into the invocations it produces. Every event
/// maps to exactly one, except characteristic discovery which fans out to one
/// per discovered handle.
fn marshal(event: DaemonEvent) -> Vec<BtEvent> {
    match event {
        DaemonEvent::Enabled(st) => {
            vec![BtEvent::AdapterStateChanged { status: st.into(), state: AdapterState::Enabled }]
        }
        DaemonEvent::Disabled(st) => {
            vec![BtEvent::AdapterStateChanged { status: st.into(), state: AdapterState::Disabled }]
        }
        DaemonEvent::NameChanged(name) => vec![BtEvent::AdapterNameChanged { name }],
        DaemonEvent::VisibilityModeChanged(st, mode) => {
            vec![BtEvent::VisibilityModeChanged { status: st.into(), mode }]
        }
        DaemonEvent::VisibilityDurationChanged(duration) => {
            vec![BtEvent::VisibilityDurationChanged { duration }]
        }
        DaemonEvent::DiscoveryStarted(st) => vec![BtEvent::DeviceDiscoveryStateChanged {
            status: st.into(),
            state: DiscoveryState::Started,
        }],
        DaemonEvent::DiscoveryFinished(st) => vec![BtEvent::DeviceDiscoveryStateChanged {
            status: st.into(),
            state: DiscoveryState::Finished,
        }],
        DaemonEvent::DeviceFound(st, info) => vec![BtEvent::DeviceDiscoveryStateChanged {
            status: st.into(),
            state: DiscoveryState::Found(DiscoveryInfo::from_daemon(&info)),
        }],
        DaemonEvent::BondCreated(st, info) => vec![BtEvent::BondCreated {
            status: st.into(),
            device: DeviceInfo::from_daemon(&info),
        }],
        DaemonEvent::BondDestroyed(st, addr) => vec![BtEvent::BondDestroyed {
            status: st.into(),
            address: BtAddress::new(addr),
        }],
        DaemonEvent::AuthorizationChanged(st, addr, authorized) => {
            vec![BtEvent::AuthorizationChanged {
                status: st.into(),
                address: BtAddress::new(addr),
                authorized,
            }]
        }
        DaemonEvent::ServiceSearched(st, info) => vec![BtEvent::ServiceSearched {
            status: st.into(),
            sdp: SdpInfo::from_daemon(&info),
        }],
        DaemonEvent::DeviceConnected(addr) => vec![BtEvent::DeviceConnectionStateChanged {
            connected: true,
            address: BtAddress::new(addr),
        }],
        DaemonEvent::DeviceDisconnected(addr) => vec![BtEvent::DeviceConnectionStateChanged {
            connected: false,
            address: BtAddress::new(addr),
        }],
        DaemonEvent::RfcommConnected(st, addr, uuid) => {
            vec![BtEvent::RfcommConnectionStateChanged {
                status: st.into(),
                connected: true,
                address: BtAddress::new(addr),
                service_uuid: Some(uuid.to_ascii_uppercase()),
            }]
        }
        DaemonEvent::RfcommDisconnected(st, addr) => {
            vec![BtEvent::RfcommConnectionStateChanged {
                status: st.into(),
                connected: false,
                address: BtAddress::new(addr),
                service_uuid: None,
            }]
        }
        DaemonEvent::RfcommDataReceived(socket_fd, data) => {
            vec![BtEvent::RfcommDataReceived { socket_fd, data }]
        }
        DaemonEvent::OppClientPushResponded(st, addr) => vec![BtEvent::OppClientPushResponded {
            status: st.into(),
            address: BtAddress::new(addr),
        }],
        DaemonEvent::OppClientPushProgress(file, size, percent) => {
            vec![BtEvent::OppClientPushProgress { file, size, percent }]
        }
        DaemonEvent::OppClientPushFinished(st, addr) => vec![BtEvent::OppClientPushFinished {
            status: st.into(),
            address: BtAddress::new(addr),
        }],
        DaemonEvent::OppServerTransferProgress(file, size, percent) => {
            vec![BtEvent::OppServerTransferProgress { file, size, percent }]
        }
        DaemonEvent::OppServerTransferFinished(st, file) => {
            vec![BtEvent::OppServerTransferFinished { status: st.into(), file }]
        }
        DaemonEvent::AudioConnected(st, addr, profile) => {
            vec![BtEvent::AudioConnectionStateChanged {
                status: st.into(),
                connected: true,
                address: BtAddress::new(addr),
                profile,
            }]
        }
        DaemonEvent::AudioDisconnected(st, addr, profile) => {
            vec![BtEvent::AudioConnectionStateChanged {
                status: st.into(),
                connected: false,
                address: BtAddress::new(addr),
                profile,
            }]
        }
        DaemonEvent::AvrcpConnected(addr) => vec![BtEvent::AvrcpConnectionStateChanged {
            connected: true,
            address: BtAddress::new(addr),
        }],
        DaemonEvent::AvrcpDisconnected(addr) => vec![BtEvent::AvrcpConnectionStateChanged {
            connected: false,
            address: BtAddress::new(addr),
        }],
        DaemonEvent::AvrcpSettingChanged(setting) => {
            vec![BtEvent::AvrcpSettingChanged { setting }]
        }
        DaemonEvent::HidConnected(st, addr) => vec![BtEvent::HidConnectionStateChanged {
            status: st.into(),
            connected: true,
            address: BtAddress::new(addr),
        }],
        DaemonEvent::HidDisconnected(st, addr) => vec![BtEvent::HidConnectionStateChanged {
            status: st.into(),
            connected: false,
            address: BtAddress::new(addr),
        }],
        DaemonEvent::GattCharacteristicsDiscovered(st, characteristics) => {
            let status: BtStatus = st.into();
            let total = characteristics.len() as i32;
            characteristics
                .into_iter()
                .enumerate()
                .map(|(i, ch)| BtEvent::GattCharacteristicDiscovered {
                    status,
                    index: (i + 1) as i32,
                    total,
                    handle: ch.handle,
                    uuid: ch.uuid.to_ascii_uppercase(),
                })
                .collect()
        }
        DaemonEvent::GattValueChanged(handle, value) => {
            vec![BtEvent::GattValueChanged { handle, value }]
        }
        DaemonEvent::CallStateChanged(st, call_id, state) => {
            vec![BtEvent::CallStateChanged { status: st.into(), call_id, state }]
        }
    }
}

/// The event relay. Shares the callback registry with the facade that
/// registered the callbacks.
#[derive(Clone)]
pub struct EventRelay {
    callbacks: Arc<Mutex<EventCallbacks>>,
}

impl EventRelay {
    pub fn new(callbacks: Arc<Mutex<EventCallbacks>>) -> Self {
        Self { callbacks }
    }

    /// Builds the dispatch object handed to the daemon.
    pub fn into_dispatcher(self) -> EventDispatcher {
        EventDispatcher { dispatch: Box::new(move |event| self.relay(event)) }
    }

    /// Delivers one daemon event. Invoked on the daemon's delivery thread.
    pub fn relay(&self, event: DaemonEvent) {
        let target = relay_target(&event);
        let mut callback = match self.callbacks.lock().unwrap().begin_dispatch(target) {
            Some(callback) => callback,
            None => {
                debug!("Dropping {:?} event: no callback registered", target);
                return;
            }
        };

        for ev in marshal(event) {
            callback(&ev);
        }

        // Characteristic discovery registrations are one-shot: once the full
        // result set has been delivered the slot stays cleared.
        let survivor = if target == BtEventType::GattCharacteristicDiscovered {
            None
        } else {
            Some(callback)
        };
        self.callbacks.lock().unwrap().finish_dispatch(target, survivor);
    }
}
