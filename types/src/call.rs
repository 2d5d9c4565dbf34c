//! Read-only call data handed to the screen by the call-list collaborator.

use serde::{Deserialize, Serialize};

use crate::CallId;

/// Call lifecycle state, as far as the screen cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    Incoming,
    CallWaiting,
    Dialing,
    Redialing,
    Connecting,
    PreDialWait,
    SelectPhoneAccount,
    Active,
    OnHold,
    Disconnecting,
    Disconnected,
}

/// Screen-space point, typically the last touch before a call started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opaque reference to an account that can originate calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneAccountHandle {
    pub component: String,
    pub id: String,
}

impl PhoneAccountHandle {
    #[must_use]
    pub fn new(component: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            id: id.into(),
        }
    }
}

/// Snapshot of one call's details.
///
/// Fields mirror what the telecom layer attaches to a call as extras; any of
/// them may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSnapshot {
    pub id: CallId,
    pub state: CallState,
    /// Account the call is placed on, if one was already chosen.
    #[serde(default)]
    pub account: Option<PhoneAccountHandle>,
    /// Candidate accounts offered for this call.
    #[serde(default)]
    pub available_accounts: Option<Vec<PhoneAccountHandle>>,
    /// Touch point recorded by whoever placed the call.
    #[serde(default)]
    pub touch_point: Option<Point>,
    #[serde(default)]
    pub emergency: bool,
}

impl CallSnapshot {
    #[must_use]
    pub fn new(id: impl Into<CallId>, state: CallState) -> Self {
        Self {
            id: id.into(),
            state,
            account: None,
            available_accounts: None,
            touch_point: None,
            emergency: false,
        }
    }

    #[must_use]
    pub fn with_account(mut self, account: PhoneAccountHandle) -> Self {
        self.account = Some(account);
        self
    }

    #[must_use]
    pub fn with_available_accounts(mut self, accounts: Vec<PhoneAccountHandle>) -> Self {
        self.available_accounts = Some(accounts);
        self
    }

    #[must_use]
    pub fn with_touch_point(mut self, point: Point) -> Self {
        self.touch_point = Some(point);
        self
    }

    #[must_use]
    pub fn emergency(mut self) -> Self {
        self.emergency = true;
        self
    }

    /// Whether there is any way to place this call.
    ///
    /// Emergency calls never need an account. Other calls need either a
    /// chosen account or at least one candidate.
    #[must_use]
    pub fn has_valid_accounts(&self) -> bool {
        if self.emergency || self.account.is_some() {
            return true;
        }
        self.available_accounts
            .as_ref()
            .is_some_and(|accounts| !accounts.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectCode {
    Unknown,
    Error,
    Local,
    Remote,
    Canceled,
    Missed,
    Rejected,
    Busy,
    Restricted,
    Other,
}

/// Why a call ended, with the user-facing description supplied upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectCause {
    pub code: DisconnectCode,
    #[serde(default)]
    pub description: String,
}

impl DisconnectCause {
    #[must_use]
    pub fn new(code: DisconnectCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    /// Only hard failures with an explanation get an error dialog.
    #[must_use]
    pub fn warrants_error_dialog(&self) -> bool {
        !self.description.trim().is_empty()
            && matches!(self.code, DisconnectCode::Error | DisconnectCode::Restricted)
    }
}
