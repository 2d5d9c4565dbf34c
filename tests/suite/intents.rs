//! Intent resolution end to end.

use incall_types::{
    CallCommand, CallId, CallSnapshot, CallState, IntentAction, IntentParams, PanelId,
    PhoneAccountHandle, Point, UiEffect,
};

use crate::common::{calls, position, screen};

#[test]
fn outgoing_call_without_accounts_disconnects_before_any_call_card() {
    let mut screen = screen();
    screen.on_foreground(true);
    let list = calls(vec![CallSnapshot::new("o", CallState::Dialing)]);
    screen.resolve_intent(IntentParams::main().new_outgoing_call(), &list);
    let effects = screen.take_effects();

    let disconnects = effects
        .iter()
        .filter(|e| {
            **e == UiEffect::Call(CallCommand::Disconnect {
                call_id: CallId::new("o"),
            })
        })
        .count();
    assert_eq!(disconnects, 1);

    let reveal = position(&effects, |e| matches!(e, UiEffect::StartCircularReveal { .. }));
    let card = position(&effects, |e| {
        matches!(
            e,
            UiEffect::PanelVisibility {
                panel: PanelId::CallCard,
                visible: true
            }
        )
    });
    assert!(reveal.is_some());
    assert!(card.is_none() || card > reveal);
    assert!(screen.is_keyguard_dismissed());
}

#[test]
fn touch_point_anchors_one_reveal() {
    let mut screen = screen();
    let list = calls(vec![
        CallSnapshot::new("p", CallState::Connecting)
            .with_account(PhoneAccountHandle::new("sim", "1"))
            .with_touch_point(Point::new(3, 4)),
    ]);
    screen.resolve_intent(IntentParams::main().new_outgoing_call(), &list);
    assert!(screen.take_effects().contains(&UiEffect::StartCircularReveal {
        origin: Some(Point::new(3, 4))
    }));

    screen.record_touch(Point::new(40, 50));
    screen.resolve_intent(IntentParams::main().new_outgoing_call(), &list);
    assert!(screen.take_effects().contains(&UiEffect::StartCircularReveal {
        origin: Some(Point::new(40, 50))
    }));

    screen.resolve_intent(IntentParams::main().new_outgoing_call(), &list);
    assert!(screen.take_effects().contains(&UiEffect::StartCircularReveal {
        origin: Some(Point::new(3, 4))
    }));
}

#[test]
fn outgoing_intent_without_call_still_reveals() {
    let mut screen = screen();
    screen.resolve_intent(IntentParams::main().new_outgoing_call(), &calls(Vec::new()));
    let effects = screen.take_effects();
    assert_eq!(
        effects,
        vec![
            UiEffect::StartCircularReveal { origin: None },
            UiEffect::DismissKeyguard { dismiss: true },
        ]
    );
}

#[test]
fn dialpad_intent_unholds_only_line() {
    let mut screen = screen();
    screen.on_foreground(true);
    let list = calls(vec![CallSnapshot::new("h", CallState::OnHold)]);
    screen.resolve_intent(IntentParams::main().with_dialpad(true), &list);
    let effects = screen.take_effects();
    assert!(effects.contains(&UiEffect::Call(CallCommand::Unhold {
        call_id: CallId::new("h")
    })));
    // Call card comes up after the intent; the parked dialpad follows it.
    assert!(screen.panels().is_shown(PanelId::CallCard));
    assert!(screen.panels().is_shown(PanelId::Dialpad));
}

#[test]
fn account_selection_hides_call_card_and_resumes() {
    let mut screen = screen();
    screen.on_foreground(true);
    screen.on_panel_attached(PanelId::CallCard, true);
    let list = calls(vec![CallSnapshot::new("w", CallState::SelectPhoneAccount)]);
    screen.resolve_intent(IntentParams::main(), &list);
    assert!(!screen.panels().is_shown(PanelId::CallCard));
    assert!(screen.take_effects().contains(&UiEffect::ShowAccountSelection {
        call_id: CallId::new("w"),
        accounts: Vec::new(),
    }));

    screen.on_account_selection_cancelled();
    assert_eq!(
        screen.take_effects(),
        vec![
            UiEffect::Call(CallCommand::CancelAccountSelection {
                call_id: CallId::new("w")
            }),
            UiEffect::PanelVisibility {
                panel: PanelId::CallCard,
                visible: true
            },
        ]
    );
}

#[test]
fn foreign_intent_is_ignored() {
    let mut screen = screen();
    let intent = IntentParams {
        action: IntentAction::Other("android.intent.action.VIEW".to_string()),
        ..IntentParams::main()
    };
    screen.resolve_intent(intent, &calls(Vec::new()));
    assert!(screen.take_effects().is_empty());
}
