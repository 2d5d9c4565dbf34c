//! Rotation debouncing across screens.

use std::sync::Arc;

use incall_engine::{InCallScreen, RotationState, ScreenConfig, ScreenOptions};
use incall_types::{Rotation, RotationSample, UiEffect};

use crate::common::screen;

fn rotation_effects(effects: &[UiEffect]) -> Vec<Rotation> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            UiEffect::RotationChanged { rotation } => Some(*rotation),
            _ => None,
        })
        .collect()
}

#[test]
fn samples_within_one_window_notify_once() {
    let mut screen = screen();
    for degrees in [10, 15, 5] {
        screen.on_rotation_sample(RotationSample::Degrees(degrees));
    }
    assert_eq!(
        screen.take_effects(),
        vec![
            UiEffect::RotationChanged {
                rotation: Rotation::Rotation0
            },
            UiEffect::OrientationChanged {
                rotation: Rotation::Rotation0
            },
        ]
    );
}

#[test]
fn diagonal_sample_changes_nothing() {
    let mut screen = screen();
    screen.on_rotation_sample(RotationSample::Degrees(180));
    screen.take_effects();

    screen.on_rotation_sample(RotationSample::Degrees(45));
    screen.on_rotation_sample(RotationSample::Unknown);
    assert!(screen.take_effects().is_empty());
    assert_eq!(
        screen.rotation().state().committed(),
        Some(Rotation::Rotation180)
    );
}

#[test]
fn recreated_screen_does_not_repeat_rotation() {
    let state = Arc::new(RotationState::new());
    let config = ScreenConfig::default();

    let mut first =
        InCallScreen::with_rotation_state(&config, ScreenOptions::default(), Arc::clone(&state));
    first.on_rotation_sample(RotationSample::Degrees(270));
    assert_eq!(rotation_effects(&first.take_effects()), vec![Rotation::Rotation90]);
    first.on_destroy();

    let mut second = InCallScreen::with_rotation_state(&config, ScreenOptions::default(), state);
    second.on_rotation_sample(RotationSample::Degrees(280));
    assert!(second.take_effects().is_empty());
    second.on_rotation_sample(RotationSample::Degrees(0));
    assert_eq!(rotation_effects(&second.take_effects()), vec![Rotation::Rotation0]);
}
