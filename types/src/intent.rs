//! Parameters carried by an intent that (re)launches the in-call screen.

use serde::{Deserialize, Serialize};

/// What the launcher asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    /// The normal way to bring up the in-call screen.
    #[default]
    Main,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntentParams {
    #[serde(default)]
    pub action: IntentAction,
    /// Explicit dialpad visibility. `None` leaves the dialpad as it was.
    #[serde(default)]
    pub show_dialpad: Option<bool>,
    /// Set when the launcher just placed a new outgoing call.
    ///
    /// Cleared by the resolver once handled.
    #[serde(default)]
    pub new_outgoing_call: bool,
}

impl IntentParams {
    #[must_use]
    pub fn main() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dialpad(mut self, show: bool) -> Self {
        self.show_dialpad = Some(show);
        self
    }

    #[must_use]
    pub fn new_outgoing_call(mut self) -> Self {
        self.new_outgoing_call = true;
        self
    }

    /// Consume the outgoing-call marker, returning whether it was set.
    pub fn take_new_outgoing_call(&mut self) -> bool {
        std::mem::take(&mut self.new_outgoing_call)
    }
}
