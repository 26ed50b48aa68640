//! Adapter facade: parameter validation, callback registration and
//! delegation to the daemon.
//!
//! Every operation validates locally, fails fast with
//! [`BtStatus::NotInitialized`] outside the initialize/deinitialize window,
//! delegates to exactly one daemon request and translates its return code.
//! No retries happen here; asynchronous completion arrives as a daemon event
//! on the dispatcher thread.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::callbacks::{BtEventType, EventCallback, EventCallbacks};
use crate::daemon::{DaemonInterface, VisibilityMode};
use crate::dispatcher::EventRelay;
use crate::status::{to_result, BtStatus};
use crate::BtAddress;

/// Maximum length of the local adapter name, in bytes.
pub const DEVICE_NAME_LENGTH_MAX: usize = 128;

/// Implementation of the adapter API.
pub struct Adapter {
    daemon: Arc<Mutex<dyn DaemonInterface>>,
    callbacks: Arc<Mutex<EventCallbacks>>,
    is_init: bool,
}

impl Adapter {
    /// Constructs the facade around a daemon connection. The registry is
    /// created fresh per instance; nothing here is process-global.
    pub fn new(daemon: Arc<Mutex<dyn DaemonInterface>>) -> Adapter {
        Adapter { daemon, callbacks: Arc::new(Mutex::new(EventCallbacks::new())), is_init: false }
    }

    /// The shared callback registry, for wiring additional facades onto the
    /// same event stream.
    pub fn callbacks(&self) -> Arc<Mutex<EventCallbacks>> {
        self.callbacks.clone()
    }

    /// Wires the event relay into the daemon and opens the operating window.
    pub fn initialize(&mut self) -> Result<(), BtStatus> {
        if self.is_init {
            return Err(BtStatus::AlreadyDone);
        }

        let relay = EventRelay::new(self.callbacks.clone());
        to_result(self.daemon.lock().unwrap().initialize(relay.into_dispatcher()))?;
        self.is_init = true;
        Ok(())
    }

    /// Releases the daemon connection and drops every callback registration.
    pub fn deinitialize(&mut self) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        to_result(self.daemon.lock().unwrap().cleanup())?;
        self.callbacks.lock().unwrap().clear();
        self.is_init = false;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.is_init
    }

    fn ensure_initialized(&self) -> Result<(), BtStatus> {
        if self.is_init {
            Ok(())
        } else {
            Err(BtStatus::NotInitialized)
        }
    }

    /// Registers a callback for an event kind, replacing any previous one.
    /// Callbacks may change registrations from within their own invocation,
    /// including unsetting themselves.
    pub fn register_event(
        &self,
        event_type: BtEventType,
        callback: EventCallback,
    ) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        self.callbacks.lock().unwrap().set_callback(event_type, callback);
        Ok(())
    }

    /// Clears the callback for an event kind. Clearing an empty slot is not
    /// an error.
    pub fn unregister_event(&self, event_type: BtEventType) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        if !self.callbacks.lock().unwrap().unset_callback(event_type) {
            debug!("unregister_event: no callback was registered for {:?}", event_type);
        }
        Ok(())
    }

    pub fn is_event_registered(&self, event_type: BtEventType) -> Result<bool, BtStatus> {
        self.ensure_initialized()?;
        Ok(self.callbacks.lock().unwrap().has_callback(event_type))
    }

    /// Requests adapter power-on. Completion arrives as an
    /// `AdapterStateChanged` event.
    pub fn enable(&self) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        to_result(self.daemon.lock().unwrap().enable())
    }

    /// Requests adapter power-off.
    pub fn disable(&self) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        to_result(self.daemon.lock().unwrap().disable())
    }

    /// Returns the Bluetooth address of the local adapter.
    pub fn get_address(&self) -> Result<BtAddress, BtStatus> {
        self.ensure_initialized()?;
        Ok(BtAddress::new(self.daemon.lock().unwrap().local_address()))
    }

    pub fn get_name(&self) -> Result<String, BtStatus> {
        self.ensure_initialized()?;
        Ok(self.daemon.lock().unwrap().local_name())
    }

    /// Sets the local adapter name. Names longer than
    /// [`DEVICE_NAME_LENGTH_MAX`] bytes are truncated on a character
    /// boundary, never rejected.
    pub fn set_name(&self, name: &str) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        if name.is_empty() {
            return Err(BtStatus::InvalidParameter);
        }
        to_result(self.daemon.lock().unwrap().set_local_name(truncate_name(name)))
    }

    pub fn set_visibility(&self, mode: VisibilityMode, duration: i32) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        if duration < 0 {
            return Err(BtStatus::InvalidParameter);
        }
        to_result(self.daemon.lock().unwrap().set_visibility(mode, duration))
    }

    /// Starts BREDR inquiry. Results arrive as
    /// `DeviceDiscoveryStateChanged` events.
    pub fn start_discovery(&self) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        to_result(self.daemon.lock().unwrap().start_discovery())
    }

    /// Cancels a running inquiry; the only way to halt one mid-flight.
    pub fn stop_discovery(&self) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        to_result(self.daemon.lock().unwrap().stop_discovery())
    }

    /// Initiates pairing with a remote device given its address string.
    pub fn create_bond(&self, address: &str) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        let addr = BtAddress::from_string(address).ok_or(BtStatus::InvalidParameter)?;
        to_result(self.daemon.lock().unwrap().create_bond(&addr.to_byte_arr()))
    }

    pub fn cancel_bonding(&self, address: &str) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        let addr = BtAddress::from_string(address).ok_or(BtStatus::InvalidParameter)?;
        to_result(self.daemon.lock().unwrap().cancel_bond(&addr.to_byte_arr()))
    }

    pub fn destroy_bond(&self, address: &str) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        let addr = BtAddress::from_string(address).ok_or(BtStatus::InvalidParameter)?;
        to_result(self.daemon.lock().unwrap().destroy_bond(&addr.to_byte_arr()))
    }

    /// Starts an SDP search against a bonded device. Results arrive as a
    /// `ServiceSearched` event.
    pub fn search_services(&self, address: &str) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        let addr = BtAddress::from_string(address).ok_or(BtStatus::InvalidParameter)?;
        to_result(self.daemon.lock().unwrap().search_services(&addr.to_byte_arr()))
    }

    /// Hands the advertiser's current AD buffers to the daemon.
    pub fn set_advertising_data(&self, adv: &crate::adv::Advertiser) -> Result<(), BtStatus> {
        self.ensure_initialized()?;
        to_result(
            self.daemon
                .lock()
                .unwrap()
                .set_advertising_data(adv.advertising_data(), adv.scan_response_data()),
        )
    }
}

/// Truncates to the name length cap on a character boundary.
fn truncate_name(name: &str) -> &str {
    if name.len() <= DEVICE_NAME_LENGTH_MAX {
        return name;
    }
    let mut end = DEVICE_NAME_LENGTH_MAX;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        assert_eq!(truncate_name("adapter"), "adapter");
    }

    #[test]
    fn long_names_truncate_to_cap() {
        let name = "a".repeat(300);
        assert_eq!(truncate_name(&name).len(), DEVICE_NAME_LENGTH_MAX);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 3-byte characters leave the cap mid-character.
        let name = "\u{1F4E1}".to_string() + &"\u{00E9}".repeat(120);
        let truncated = truncate_name(&name);
        assert!(truncated.len() <= DEVICE_NAME_LENGTH_MAX);
        assert!(name.is_char_boundary(truncated.len()));
    }
}
