//! Telephony call bookkeeping shared with the audio gateway role.

use num_derive::{FromPrimitive, ToPrimitive};

/// State of a single call as reported over the headset profile.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(u32)]
pub enum CallState {
    Idle = 0,
    Incoming,
    Dialing,
    Alerting,
    Active,
    Held,
}

/// One tracked call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallInfo {
    pub id: u32,
    pub state: CallState,
}

/// Ordered, insertion-order-preserving list of call records.
///
/// Append-only except for [`CallList::reset`], which empties it. Dropping the
/// list releases everything.
#[derive(Debug, Default)]
pub struct CallList {
    calls: Vec<CallInfo>,
}

impl CallList {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    /// Appends a call record.
    pub fn add(&mut self, id: u32, state: CallState) {
        self.calls.push(CallInfo { id, state });
    }

    /// Empties the list.
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[CallInfo] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut list = CallList::new();
        list.add(2, CallState::Incoming);
        list.add(1, CallState::Active);
        list.add(3, CallState::Held);

        let ids: Vec<u32> = list.calls().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn reset_empties() {
        let mut list = CallList::new();
        list.add(1, CallState::Dialing);
        assert_eq!(list.len(), 1);
        list.reset();
        assert!(list.is_empty());
    }
}
