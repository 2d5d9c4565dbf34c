//! Panel visibility through the screen adapter.

use incall_engine::{CallListSnapshot, ScreenConfig};
use incall_types::{AnimationState, CallSnapshot, CallState, PanelId, UiEffect};

use crate::common::{calls, created_count, screen_with, showing_screen};

#[test]
fn showing_twice_creates_once() {
    let mut screen = showing_screen();
    screen.set_visible(PanelId::Dialpad, true, false);
    screen.set_visible(PanelId::Dialpad, true, false);
    let effects = screen.take_effects();
    assert_eq!(created_count(&effects, PanelId::Dialpad), 1);
    assert!(screen.panels().is_visible(PanelId::Dialpad));
}

#[test]
fn dialpad_and_answer_never_share_the_slot() {
    let mut screen = showing_screen();
    for (id, animate) in [
        (PanelId::Dialpad, true),
        (PanelId::Answer, false),
        (PanelId::Dialpad, false),
        (PanelId::Answer, false),
    ] {
        screen.set_visible(id, true, animate);
        let other = if id == PanelId::Dialpad {
            PanelId::Answer
        } else {
            PanelId::Dialpad
        };
        assert!(screen.panels().is_visible(id));
        assert!(!screen.panels().is_visible(other));
    }
}

#[test]
fn back_closes_overlays_in_precedence_order() {
    let mut screen = showing_screen();
    screen.show_dialpad(true, false);
    screen.show_conference_manager(true);
    assert!(screen.panels().is_shown(PanelId::Dialpad));
    assert!(screen.panels().is_shown(PanelId::ConferenceManager));
    let idle = CallListSnapshot::default();

    assert!(screen.on_back_signal(&idle));
    assert!(!screen.panels().is_shown(PanelId::Dialpad));
    assert!(screen.panels().is_shown(PanelId::ConferenceManager));
    screen.on_animation_finished(PanelId::Dialpad);

    assert!(screen.on_back_signal(&idle));
    assert!(!screen.panels().is_shown(PanelId::ConferenceManager));

    assert!(!screen.on_back_signal(&idle));
}

#[test]
fn ringing_call_swallows_back() {
    let mut screen = showing_screen();
    let ringing = calls(vec![CallSnapshot::new("r", CallState::CallWaiting)]);
    assert!(screen.on_back_signal(&ringing));
    assert!(screen.take_effects().is_empty());
}

#[test]
fn back_hide_is_two_phase() {
    let mut screen = showing_screen();
    screen.show_dialpad(true, false);
    screen.take_effects();

    assert!(screen.on_back_signal(&CallListSnapshot::default()));
    let effects = screen.take_effects();
    assert_eq!(effects[0], UiEffect::DialpadVisibilityChanged { visible: false });
    assert!(screen.panels().is_visible(PanelId::Dialpad));
    assert_eq!(
        screen.panels().animation_state(PanelId::Dialpad),
        AnimationState::AnimatingOut
    );

    screen.on_animation_finished(PanelId::Dialpad);
    assert!(!screen.panels().is_visible(PanelId::Dialpad));
}

#[test]
fn back_during_exit_slide_is_consumed() {
    let mut screen = showing_screen();
    screen.show_dialpad(true, false);
    let idle = CallListSnapshot::default();
    assert!(screen.on_back_signal(&idle));
    screen.take_effects();

    assert!(screen.on_back_signal(&idle));
    assert!(screen.take_effects().is_empty());
    assert!(screen.panels().is_visible(PanelId::Dialpad));
    assert_eq!(
        screen.panels().animation_state(PanelId::Dialpad),
        AnimationState::AnimatingOut
    );

    screen.on_animation_finished(PanelId::Dialpad);
    assert!(!screen.on_back_signal(&idle));
}

#[test]
fn reduced_motion_hides_immediately() {
    let mut config = ScreenConfig::default();
    config.ui.reduced_motion = true;
    let mut screen = screen_with(&config);
    screen.on_foreground(true);
    screen.on_panel_attached(PanelId::CallCard, true);
    screen.show_dialpad(true, true);

    assert!(screen.on_back_signal(&CallListSnapshot::default()));
    assert!(!screen.panels().is_visible(PanelId::Dialpad));
    assert!(
        !screen
            .take_effects()
            .iter()
            .any(|e| matches!(e, UiEffect::StartTransition { .. }))
    );
}

#[test]
fn conference_manager_keeps_call_card_attached() {
    let mut screen = showing_screen();
    screen.show_conference_manager(true);
    let card = screen.panels().call_card().unwrap();
    assert!(!card.is_interactive());
    assert!(screen.panels().is_attached(PanelId::CallCard));
}
