//! Dialog deferral and finish gating.

use incall_types::{CallId, DialogHandle, DialogKind, NonEmptyString, UiEffect};

use crate::common::{screen, showing_screen};

#[test]
fn only_latest_background_post_char_dialog_is_shown() {
    let mut screen = screen();
    screen.request_post_char_dialog(CallId::new("c1"), "1,2,3");
    screen.request_post_char_dialog(CallId::new("c2"), "9");
    assert!(screen.take_effects().is_empty());

    screen.on_foreground(true);
    let dialogs: Vec<_> = screen
        .take_effects()
        .into_iter()
        .filter_map(|effect| match effect {
            UiEffect::ShowDialog { dialog, .. } => Some(dialog),
            _ => None,
        })
        .collect();
    assert_eq!(
        dialogs,
        vec![DialogKind::PostCharWait {
            call_id: CallId::new("c2"),
            chars: "9".to_string(),
        }]
    );

    screen.on_foreground(false);
    screen.on_foreground(true);
    assert!(
        !screen
            .take_effects()
            .iter()
            .any(|e| matches!(e, UiEffect::ShowDialog { .. }))
    );
}

#[test]
fn error_dialog_replaces_post_char_dialog() {
    let mut screen = showing_screen();
    screen.request_post_char_dialog(CallId::new("c1"), "5");
    screen.show_error(NonEmptyString::new("Network lost").unwrap());
    let effects = screen.take_effects();
    assert_eq!(
        effects[1],
        UiEffect::DismissDialog {
            handle: DialogHandle::new(1)
        }
    );
    assert_eq!(
        screen.dialogs().active().map(|d| d.handle),
        Some(DialogHandle::new(2))
    );
}

#[test]
fn finish_is_emitted_once_after_last_dialog() {
    let mut screen = showing_screen();
    screen.show_error(NonEmptyString::new("Busy").unwrap());
    assert!(!screen.request_finish());
    assert!(!screen.request_finish());
    screen.take_effects();

    screen.on_dialog_dismissed(DialogHandle::new(1));
    screen.on_dialog_dismissed(DialogHandle::new(1));
    let finishes = screen
        .take_effects()
        .into_iter()
        .filter(|e| *e == UiEffect::Finish)
        .count();
    assert_eq!(finishes, 1);
    assert!(screen.is_finishing());
}
