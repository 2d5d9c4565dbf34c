//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use incall_engine::{
    AudioState, CallListSnapshot, InCallScreen, RotationState, ScreenConfig, ScreenOptions,
};
use incall_types::{CallSnapshot, IntentParams, PanelId, UiEffect};

pub struct Audio {
    pub muted: bool,
}

impl AudioState for Audio {
    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Screen with its own rotation state so tests do not share the global one.
pub fn screen() -> InCallScreen {
    screen_with(&ScreenConfig::default())
}

pub fn screen_with(config: &ScreenConfig) -> InCallScreen {
    InCallScreen::with_rotation_state(
        config,
        ScreenOptions::default(),
        Arc::new(RotationState::new()),
    )
}

pub fn calls(calls: Vec<CallSnapshot>) -> CallListSnapshot {
    CallListSnapshot::new(calls)
}

/// Foreground screen showing the call card, with effects drained.
pub fn showing_screen() -> InCallScreen {
    let mut screen = screen();
    screen.on_foreground(true);
    screen.resolve_intent(IntentParams::main(), &CallListSnapshot::default());
    screen.take_effects();
    screen
}

pub fn created_count(effects: &[UiEffect], id: PanelId) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, UiEffect::PanelCreated { panel, .. } if *panel == id))
        .count()
}

pub fn position(effects: &[UiEffect], pred: impl Fn(&UiEffect) -> bool) -> Option<usize> {
    effects.iter().position(pred)
}
