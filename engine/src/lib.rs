//! The in-call screen adapter.
//!
//! Wires the `incall-core` state machines behind a single [`InCallScreen`]
//! that the host lifecycle drives, plus configuration loading and the state
//! persisted across screen recreation.

mod config;
mod persistence;
mod screen;

pub use config::{
    ConfigError, LayoutDirection, RotationConfig, ScreenConfig, ScreenOptions, ScreenOrientation,
    UiConfig, config_path,
};
pub use persistence::{SavedScreenState, StateError};
pub use screen::InCallScreen;

pub use incall_core::{AudioState, CallList, CallListSnapshot, EffectQueue, RotationState};
