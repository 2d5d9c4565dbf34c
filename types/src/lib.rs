//! Core domain types for the in-call screen.
//!
//! Pure data with no IO, no logging and minimal dependencies. Everything here
//! can be used from any layer: the core state machines, the screen adapter and
//! hosts that replay or render effects.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod animation;
mod call;
mod effect;
mod ids;
mod intent;
mod key;
mod panel;
mod rotation;

pub use animation::{AnimPhase, AnimationState};
pub use call::{CallSnapshot, CallState, DisconnectCause, DisconnectCode, PhoneAccountHandle, Point};
pub use effect::{CallCommand, DialogKind, UiEffect};
pub use ids::{CallId, DialogHandle};
pub use intent::{IntentAction, IntentParams};
pub use key::{KeyCode, KeyPhase, UnknownKeyCode};
pub use panel::{
    ContainerSlot, HostScope, PanelEffect, PanelEffectKind, PanelId, SlideEdge, UnknownPanelTag,
};
pub use rotation::{Rotation, RotationSample};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("text must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::ops::Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
