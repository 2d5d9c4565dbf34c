//! Interpreting a launch intent against the current call list.
//!
//! [`IntentResolver::resolve`] is a planner: it reads the intent and the call
//! list and returns the ordered actions the screen should take. It owns the
//! one piece of state that outlives a single intent, the call waiting for the
//! user to pick an account.

use incall_types::{
    CallCommand, CallId, CallState, IntentAction, IntentParams, PhoneAccountHandle, Point,
};

use crate::TouchPointTracker;
use crate::calls::CallList;

/// One step of an intent's resolution, in the order it must be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Immediate, non-animated dialpad show or hide.
    SetDialpad { show: bool },
    Call(CallCommand),
    StartCircularReveal { origin: Option<Point> },
    DismissKeyguard,
    ShowCallCard(bool),
    RequestAccountSelection {
        call_id: CallId,
        accounts: Vec<PhoneAccountHandle>,
    },
}

/// Facts gathered about a freshly placed outgoing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingCallContext {
    pub touch_origin: Option<Point>,
    pub has_valid_accounts: bool,
}

/// Call blocked until the user chooses an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAccountSelection {
    pub call_id: CallId,
}

#[derive(Debug, Default)]
pub struct IntentResolver {
    pending_account: Option<PendingAccountSelection>,
}

impl IntentResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending_account(&self) -> Option<&PendingAccountSelection> {
        self.pending_account.as_ref()
    }

    /// Plan the response to `intent`.
    ///
    /// Consumes the intent's new-outgoing-call marker, so a given intent
    /// must only be resolved once.
    pub fn resolve(
        &mut self,
        intent: &mut IntentParams,
        calls: &dyn CallList,
        touch: &TouchPointTracker,
    ) -> Vec<ResolvedAction> {
        let mut actions = Vec::new();
        if intent.action != IntentAction::Main {
            tracing::debug!(action = ?intent.action, "Ignoring non-main intent");
            return actions;
        }

        if let Some(show) = intent.show_dialpad {
            actions.push(ResolvedAction::SetDialpad { show });
            if show
                && calls.live_call_count() == 1
                && let Some(call) = calls.active_or_background_call()
                && call.state == CallState::OnHold
            {
                tracing::info!(call_id = %call.id, "Unholding the only call to dial into it");
                actions.push(ResolvedAction::Call(CallCommand::Unhold {
                    call_id: call.id.clone(),
                }));
            }
        }

        let new_outgoing_call = intent.take_new_outgoing_call();
        if new_outgoing_call {
            Self::plan_outgoing_call(calls, touch, &mut actions);
        }

        if let Some(call) = calls.waiting_for_account_call() {
            tracing::info!(call_id = %call.id, "Call is waiting for an account");
            self.pending_account = Some(PendingAccountSelection {
                call_id: call.id.clone(),
            });
            actions.push(ResolvedAction::ShowCallCard(false));
            actions.push(ResolvedAction::RequestAccountSelection {
                call_id: call.id.clone(),
                accounts: call.available_accounts.clone().unwrap_or_default(),
            });
        } else if !new_outgoing_call {
            actions.push(ResolvedAction::ShowCallCard(true));
        }

        actions
    }

    fn plan_outgoing_call(
        calls: &dyn CallList,
        touch: &TouchPointTracker,
        actions: &mut Vec<ResolvedAction>,
    ) {
        let call = calls.outgoing_call().or_else(|| calls.pending_outgoing_call());
        if call.is_none() {
            tracing::warn!("New outgoing call intent without an outgoing call");
        }

        let context = OutgoingCallContext {
            touch_origin: touch
                .valid_point()
                .or_else(|| call.and_then(|c| c.touch_point)),
            has_valid_accounts: call.is_none_or(|c| c.has_valid_accounts()),
        };

        actions.push(ResolvedAction::StartCircularReveal {
            origin: context.touch_origin,
        });

        if !context.has_valid_accounts
            && let Some(call) = call
        {
            tracing::info!(call_id = %call.id, "No account can place this call, disconnecting");
            actions.push(ResolvedAction::Call(CallCommand::Disconnect {
                call_id: call.id.clone(),
            }));
        }

        actions.push(ResolvedAction::DismissKeyguard);
    }

    /// Re-bind an account-selection dialog the host restored after
    /// recreating the screen.
    pub fn rebind_account_selection(&mut self, call_id: CallId) {
        tracing::debug!(%call_id, "Re-binding restored account selection");
        self.pending_account = Some(PendingAccountSelection { call_id });
    }

    /// The user picked `account` in the account-selection dialog.
    pub fn on_account_selected(
        &mut self,
        account: PhoneAccountHandle,
        set_default: bool,
    ) -> Option<CallCommand> {
        let pending = self.take_pending("selected")?;
        Some(CallCommand::SelectAccount {
            call_id: pending.call_id,
            account,
            set_default,
        })
    }

    /// The user backed out of the account-selection dialog.
    pub fn on_account_selection_cancelled(&mut self) -> Option<CallCommand> {
        let pending = self.take_pending("cancelled")?;
        Some(CallCommand::CancelAccountSelection {
            call_id: pending.call_id,
        })
    }

    fn take_pending(&mut self, outcome: &str) -> Option<PendingAccountSelection> {
        let pending = self.pending_account.take();
        if pending.is_none() {
            tracing::debug!(outcome, "Account selection response with nothing pending");
        }
        pending
    }

    /// Forget a pending selection whose call left the waiting state.
    ///
    /// Returns whether the selection was dropped.
    pub fn on_call_list_changed(&mut self, calls: &dyn CallList) -> bool {
        let Some(pending) = &self.pending_account else {
            return false;
        };
        let still_waiting = calls
            .waiting_for_account_call()
            .is_some_and(|call| call.id == pending.call_id);
        if still_waiting {
            return false;
        }
        tracing::debug!(call_id = %pending.call_id, "Account selection no longer needed");
        self.pending_account = None;
        true
    }
}
