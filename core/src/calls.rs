//! Boundary to the call-model collaborator.
//!
//! The screen never caches call references: every decision re-queries these
//! traits at the moment it is made.

use incall_types::{CallSnapshot, CallState};

/// Read-only view of the current calls.
pub trait CallList {
    /// Ringing call, if any (incoming or call-waiting).
    fn incoming_call(&self) -> Option<&CallSnapshot>;

    /// Outgoing call that telecom already created and is dialing.
    fn outgoing_call(&self) -> Option<&CallSnapshot>;

    /// Outgoing call still being set up by telecom.
    fn pending_outgoing_call(&self) -> Option<&CallSnapshot>;

    /// Call blocked until the user picks a phone account.
    fn waiting_for_account_call(&self) -> Option<&CallSnapshot>;

    /// Active call, or the held one when nothing is active.
    fn active_or_background_call(&self) -> Option<&CallSnapshot>;

    /// Number of calls that have not disconnected yet.
    fn live_call_count(&self) -> usize;
}

/// Microphone state owned by the audio collaborator.
pub trait AudioState {
    fn is_muted(&self) -> bool;
}

/// Plain list of calls answering [`CallList`] queries by state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallListSnapshot {
    calls: Vec<CallSnapshot>,
}

impl CallListSnapshot {
    #[must_use]
    pub fn new(calls: Vec<CallSnapshot>) -> Self {
        Self { calls }
    }

    #[must_use]
    pub fn calls(&self) -> &[CallSnapshot] {
        &self.calls
    }

    fn first_with_state(&self, state: CallState) -> Option<&CallSnapshot> {
        self.calls.iter().find(|call| call.state == state)
    }

    fn first_with_states(&self, states: &[CallState]) -> Option<&CallSnapshot> {
        states.iter().find_map(|state| self.first_with_state(*state))
    }
}

impl CallList for CallListSnapshot {
    fn incoming_call(&self) -> Option<&CallSnapshot> {
        self.first_with_states(&[CallState::Incoming, CallState::CallWaiting])
    }

    fn outgoing_call(&self) -> Option<&CallSnapshot> {
        self.first_with_states(&[CallState::Dialing, CallState::Redialing])
    }

    fn pending_outgoing_call(&self) -> Option<&CallSnapshot> {
        self.first_with_state(CallState::Connecting)
    }

    fn waiting_for_account_call(&self) -> Option<&CallSnapshot> {
        self.first_with_state(CallState::SelectPhoneAccount)
    }

    fn active_or_background_call(&self) -> Option<&CallSnapshot> {
        self.first_with_states(&[CallState::Active, CallState::OnHold])
    }

    fn live_call_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| call.state != CallState::Disconnected)
            .count()
    }
}
