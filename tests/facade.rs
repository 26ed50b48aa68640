//! End-to-end tests of the adapter facade against a scripted daemon.

use std::sync::{Arc, Mutex};

use btcapi::adapter::{Adapter, DEVICE_NAME_LENGTH_MAX};
use btcapi::callbacks::{AdapterState, BtEvent, BtEventType, DiscoveryState};
use btcapi::daemon::{
    DaemonDeviceInfo, DaemonEvent, DaemonInterface, EventDispatcher, VisibilityMode,
};
use btcapi::status::{BtStatus, DaemonStatus};

/// Records requests and hands out the dispatcher for event injection.
#[derive(Default)]
struct FakeDaemon {
    dispatcher: Option<EventDispatcher>,
    calls: Vec<String>,
    name: String,
    next_status: Option<DaemonStatus>,
}

impl FakeDaemon {
    fn new() -> Self {
        FakeDaemon { name: "fake".to_string(), ..Default::default() }
    }

    fn status(&mut self) -> DaemonStatus {
        self.next_status.take().unwrap_or(DaemonStatus::Success)
    }
}

impl DaemonInterface for FakeDaemon {
    fn initialize(&mut self, dispatcher: EventDispatcher) -> DaemonStatus {
        self.dispatcher = Some(dispatcher);
        self.calls.push("initialize".to_string());
        self.status()
    }

    fn cleanup(&mut self) -> DaemonStatus {
        self.dispatcher = None;
        self.calls.push("cleanup".to_string());
        self.status()
    }

    fn enable(&mut self) -> DaemonStatus {
        self.calls.push("enable".to_string());
        self.status()
    }

    fn disable(&mut self) -> DaemonStatus {
        self.calls.push("disable".to_string());
        self.status()
    }

    fn local_address(&self) -> [u8; 6] {
        [0x00, 0x1b, 0x66, 0x01, 0x02, 0x03]
    }

    fn local_name(&self) -> String {
        self.name.clone()
    }

    fn set_local_name(&mut self, name: &str) -> DaemonStatus {
        self.name = name.to_string();
        self.calls.push("set_local_name".to_string());
        self.status()
    }

    fn set_visibility(&mut self, _mode: VisibilityMode, _duration: i32) -> DaemonStatus {
        self.calls.push("set_visibility".to_string());
        self.status()
    }

    fn start_discovery(&mut self) -> DaemonStatus {
        self.calls.push("start_discovery".to_string());
        self.status()
    }

    fn stop_discovery(&mut self) -> DaemonStatus {
        self.calls.push("stop_discovery".to_string());
        self.status()
    }

    fn create_bond(&mut self, _address: &[u8; 6]) -> DaemonStatus {
        self.calls.push("create_bond".to_string());
        self.status()
    }

    fn cancel_bond(&mut self, _address: &[u8; 6]) -> DaemonStatus {
        self.calls.push("cancel_bond".to_string());
        self.status()
    }

    fn destroy_bond(&mut self, _address: &[u8; 6]) -> DaemonStatus {
        self.calls.push("destroy_bond".to_string());
        self.status()
    }

    fn search_services(&mut self, _address: &[u8; 6]) -> DaemonStatus {
        self.calls.push("search_services".to_string());
        self.status()
    }

    fn set_advertising_data(&mut self, _adv: &[u8], _scan_rsp: &[u8]) -> DaemonStatus {
        self.calls.push("set_advertising_data".to_string());
        self.status()
    }
}

fn adapter_with_fake() -> (Adapter, Arc<Mutex<FakeDaemon>>) {
    let fake = Arc::new(Mutex::new(FakeDaemon::new()));
    (Adapter::new(fake.clone()), fake)
}

fn take_dispatcher(fake: &Arc<Mutex<FakeDaemon>>) -> EventDispatcher {
    fake.lock().unwrap().dispatcher.take().unwrap()
}

#[test]
fn operations_fail_before_initialize() {
    let (adapter, fake) = adapter_with_fake();

    assert_eq!(adapter.enable(), Err(BtStatus::NotInitialized));
    assert_eq!(adapter.start_discovery(), Err(BtStatus::NotInitialized));
    assert_eq!(
        adapter.register_event(BtEventType::AdapterStateChanged, Box::new(|_| {})),
        Err(BtStatus::NotInitialized)
    );
    assert_eq!(
        adapter.is_event_registered(BtEventType::AdapterStateChanged),
        Err(BtStatus::NotInitialized)
    );
    assert!(fake.lock().unwrap().calls.is_empty());
}

#[test]
fn initialize_is_not_reentrant() {
    let (mut adapter, _fake) = adapter_with_fake();
    assert!(adapter.initialize().is_ok());
    assert_eq!(adapter.initialize(), Err(BtStatus::AlreadyDone));
}

#[test]
fn facade_delegates_and_translates() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    assert!(adapter.enable().is_ok());
    assert_eq!(adapter.get_address().unwrap().to_string(), "00:1B:66:01:02:03");

    fake.lock().unwrap().next_status = Some(DaemonStatus::NotEnabled);
    assert_eq!(adapter.start_discovery(), Err(BtStatus::NotEnabled));

    fake.lock().unwrap().next_status = Some(DaemonStatus::NotPaired);
    assert_eq!(
        adapter.search_services("11:22:33:44:55:66"),
        Err(BtStatus::RemoteDeviceNotBonded)
    );

    let calls = fake.lock().unwrap().calls.clone();
    assert_eq!(calls, vec!["initialize", "enable", "start_discovery", "search_services"]);
}

#[test]
fn bad_address_never_reaches_daemon() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    assert_eq!(adapter.create_bond("not-an-address"), Err(BtStatus::InvalidParameter));
    assert_eq!(adapter.destroy_bond(""), Err(BtStatus::InvalidParameter));

    let calls = fake.lock().unwrap().calls.clone();
    assert_eq!(calls, vec!["initialize"]);
}

#[test]
fn long_name_is_truncated_not_rejected() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    assert!(adapter.set_name(&"a".repeat(300)).is_ok());
    assert_eq!(fake.lock().unwrap().name.len(), DEVICE_NAME_LENGTH_MAX);

    assert_eq!(adapter.set_name(""), Err(BtStatus::InvalidParameter));
}

#[test]
fn adapter_state_event_reaches_registered_callback() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    adapter
        .register_event(
            BtEventType::AdapterStateChanged,
            Box::new(move |ev| {
                if let BtEvent::AdapterStateChanged { status, state } = ev {
                    s.lock().unwrap().push((*status, *state));
                }
            }),
        )
        .unwrap();

    let dispatcher = take_dispatcher(&fake);
    (dispatcher.dispatch)(DaemonEvent::Enabled(DaemonStatus::Success));

    assert_eq!(*seen.lock().unwrap(), vec![(BtStatus::None, AdapterState::Enabled)]);
}

#[test]
fn discovery_session_delivers_in_daemon_order() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    adapter
        .register_event(
            BtEventType::DeviceDiscoveryStateChanged,
            Box::new(move |ev| {
                if let BtEvent::DeviceDiscoveryStateChanged { state, .. } = ev {
                    s.lock().unwrap().push(match state {
                        DiscoveryState::Started => "started".to_string(),
                        DiscoveryState::Finished => "finished".to_string(),
                        DiscoveryState::Found(info) => info.address.to_string(),
                    });
                }
            }),
        )
        .unwrap();

    adapter.start_discovery().unwrap();
    let dispatcher = take_dispatcher(&fake);
    (dispatcher.dispatch)(DaemonEvent::DiscoveryStarted(DaemonStatus::Success));
    (dispatcher.dispatch)(DaemonEvent::DeviceFound(
        DaemonStatus::Success,
        DaemonDeviceInfo {
            address: [0x11, 0x22, 0x33, 0x44, 0x55, 0x66],
            name: "peer".to_string(),
            ..Default::default()
        },
    ));
    (dispatcher.dispatch)(DaemonEvent::DiscoveryFinished(DaemonStatus::Success));

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["started".to_string(), "11:22:33:44:55:66".to_string(), "finished".to_string()]
    );
}

#[test]
fn callback_may_unregister_itself_during_delivery() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    let registry = adapter.callbacks();
    adapter
        .register_event(
            BtEventType::AdapterNameChanged,
            Box::new(move |_| {
                registry.lock().unwrap().unset_callback(BtEventType::AdapterNameChanged);
            }),
        )
        .unwrap();

    let dispatcher = take_dispatcher(&fake);
    (dispatcher.dispatch)(DaemonEvent::NameChanged("adapter".to_string()));

    assert!(!adapter.is_event_registered(BtEventType::AdapterNameChanged).unwrap());
    // A second event of the kind is dropped.
    (dispatcher.dispatch)(DaemonEvent::NameChanged("adapter".to_string()));
}

#[test]
fn deinitialize_clears_registrations() {
    let (mut adapter, fake) = adapter_with_fake();
    adapter.initialize().unwrap();

    adapter.register_event(BtEventType::BondCreated, Box::new(|_| {})).unwrap();
    assert!(adapter.is_event_registered(BtEventType::BondCreated).unwrap());

    adapter.deinitialize().unwrap();
    assert_eq!(
        adapter.is_event_registered(BtEventType::BondCreated),
        Err(BtStatus::NotInitialized)
    );
    assert_eq!(adapter.enable(), Err(BtStatus::NotInitialized));
    assert!(fake.lock().unwrap().dispatcher.is_none());
}
