//! A scripted stand-in for the platform host.
//!
//! Owns the call list and microphone state the screen's collaborators would
//! normally provide, and plays slide transitions itself: each `tick` advances
//! their timers and reports completed ones back to the screen.

use std::time::Duration;

use anyhow::{Context, Result};
use incall_engine::{
    AudioState, CallListSnapshot, InCallScreen, SavedScreenState, ScreenConfig, ScreenOptions,
};
use incall_types::{
    AnimPhase, CallCommand, DialogHandle, IntentParams, KeyCode, KeyPhase, PanelEffect, PanelId,
    Point, RotationSample, UiEffect,
};

use crate::script::ScriptEvent;

#[derive(Debug, Clone, Copy, Default)]
struct Microphone {
    muted: bool,
}

impl AudioState for Microphone {
    fn is_muted(&self) -> bool {
        self.muted
    }
}

pub struct SimHost {
    screen: InCallScreen,
    calls: CallListSnapshot,
    microphone: Microphone,
    transitions: Vec<PanelEffect>,
    saved: Option<SavedScreenState>,
}

impl SimHost {
    pub fn new(config: &ScreenConfig, options: ScreenOptions) -> Self {
        Self {
            screen: InCallScreen::new(config, options),
            calls: CallListSnapshot::default(),
            microphone: Microphone::default(),
            transitions: Vec::new(),
            saved: None,
        }
    }

    #[cfg(test)]
    pub fn with_screen(screen: InCallScreen) -> Self {
        Self {
            screen,
            calls: CallListSnapshot::default(),
            microphone: Microphone::default(),
            transitions: Vec::new(),
            saved: None,
        }
    }

    /// Feed one event and return the effects it produced, in order.
    pub fn dispatch(&mut self, event: ScriptEvent) -> Result<Vec<UiEffect>> {
        self.apply(event)?;
        let effects = self.screen.take_effects();
        self.observe(&effects);
        Ok(effects)
    }

    fn apply(&mut self, event: ScriptEvent) -> Result<()> {
        match event {
            ScriptEvent::Start => self.screen.on_start(),
            ScriptEvent::Stop => self.screen.on_stop(),
            ScriptEvent::Destroy => {
                self.transitions.clear();
                self.screen.on_destroy();
            }
            ScriptEvent::Foreground { foreground } => self.screen.on_foreground(foreground),
            ScriptEvent::Intent { params } => self.resolve_intent(params),
            ScriptEvent::Rotation { degrees } => {
                let sample = degrees.map_or(RotationSample::Unknown, RotationSample::Degrees);
                self.screen.on_rotation_sample(sample);
            }
            ScriptEvent::Back => {
                let consumed = self.screen.on_back_signal(&self.calls);
                tracing::info!(consumed, "Back");
            }
            ScriptEvent::Up => {
                let consumed = self.screen.on_up_navigation(&self.calls);
                tracing::info!(consumed, "Up navigation");
            }
            ScriptEvent::Key { key, up, repeat } => {
                let code: KeyCode = key.parse()?;
                let phase = if up {
                    KeyPhase::Up
                } else {
                    KeyPhase::Down { repeat }
                };
                let consumed = self.screen.on_hardware_key(code, phase, &self.microphone);
                tracing::info!(?code, ?phase, consumed, "Key");
            }
            ScriptEvent::Touch { x, y } => self.screen.record_touch(Point::new(x, y)),
            ScriptEvent::Calls { calls } => {
                self.calls = CallListSnapshot::new(calls);
                self.screen.on_call_list_changed(&self.calls);
            }
            ScriptEvent::PostChar { call_id, chars } => {
                self.screen.request_post_char_dialog(call_id, chars);
            }
            ScriptEvent::Error { cause } => self.screen.maybe_show_error_on_disconnect(&cause),
            ScriptEvent::Dismiss { handle } => match handle {
                Some(handle) => self.screen.on_dialog_dismissed(DialogHandle::new(handle)),
                None => self.screen.dismiss_all_dialogs(),
            },
            ScriptEvent::Dialpad { show, animate } => self.screen.show_dialpad(show, animate),
            ScriptEvent::Answer { show } => self.screen.show_answer(show),
            ScriptEvent::Conference { show } => self.screen.show_conference_manager(show),
            ScriptEvent::AnswerDialog { open } => {
                if open {
                    self.screen.on_answer_dialog_opened();
                } else {
                    self.screen.on_answer_dialog_closed();
                }
            }
            ScriptEvent::AnimationFinished { panel } => self.finish_transition(panel),
            ScriptEvent::Tick { ms } => self.tick(Duration::from_millis(ms)),
            ScriptEvent::Attach { tag, visible } => {
                // An unknown tag is a host bug; stop the run.
                self.screen
                    .on_panel_tag_attached(&tag, visible)
                    .context("cannot attach panel")?;
            }
            ScriptEvent::AccountSelected {
                account,
                set_default,
            } => self.screen.on_account_selected(account, set_default),
            ScriptEvent::AccountCancelled => self.screen.on_account_selection_cancelled(),
            ScriptEvent::AccountDialogRestored { call_id } => {
                self.screen.on_account_dialog_restored(call_id);
            }
            ScriptEvent::Finish => {
                let finished = self.screen.request_finish();
                tracing::info!(finished, "Finish requested");
            }
            ScriptEvent::Save { path } => {
                let state = self.screen.save_state();
                if let Some(path) = path {
                    state.save_to(&path)?;
                }
                self.saved = Some(state);
            }
            ScriptEvent::Restore { path } => {
                let state = match path {
                    Some(path) => Some(SavedScreenState::load_from(&path)?),
                    None => self.saved.take(),
                };
                match state {
                    Some(state) => self.screen.restore_state(state),
                    None => tracing::warn!("Nothing saved to restore"),
                }
            }
        }
        Ok(())
    }

    fn resolve_intent(&mut self, params: IntentParams) {
        self.screen.resolve_intent(params, &self.calls);
    }

    fn finish_transition(&mut self, panel: PanelId) {
        self.transitions.retain(|t| t.panel() != panel);
        self.screen.on_animation_finished(panel);
    }

    fn tick(&mut self, delta: Duration) {
        let mut completed = Vec::new();
        for transition in &mut self.transitions {
            transition.advance(delta);
            if transition.phase() == AnimPhase::Completed {
                completed.push(transition.panel());
            }
        }
        for panel in completed {
            self.finish_transition(panel);
        }
    }

    /// Track what the host would act on: running transitions and mute state.
    fn observe(&mut self, effects: &[UiEffect]) {
        for effect in effects {
            match effect {
                UiEffect::StartTransition { transition } => {
                    let panel = transition.panel();
                    self.transitions.retain(|t| t.panel() != panel);
                    self.transitions.push(transition.clone());
                }
                UiEffect::CancelTransition { panel } => {
                    self.transitions.retain(|t| t.panel() != *panel);
                }
                UiEffect::Call(CallCommand::Mute { muted }) => self.microphone.muted = *muted,
                _ => {}
            }
        }
    }

    #[cfg(test)]
    pub fn running_transitions(&self) -> usize {
        self.transitions.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::SimHost;
    use crate::script::ScriptEvent;
    use incall_engine::{InCallScreen, RotationState, ScreenConfig, ScreenOptions};
    use incall_types::{CallCommand, PanelId, UiEffect};

    fn host() -> SimHost {
        SimHost::with_screen(InCallScreen::with_rotation_state(
            &ScreenConfig::default(),
            ScreenOptions::default(),
            Arc::new(RotationState::new()),
        ))
    }

    fn run(host: &mut SimHost, events: Vec<ScriptEvent>) -> Vec<UiEffect> {
        events
            .into_iter()
            .flat_map(|event| host.dispatch(event).unwrap())
            .collect()
    }

    #[test]
    fn tick_completes_dialpad_slide_out() {
        let mut host = host();
        run(
            &mut host,
            vec![
                ScriptEvent::Foreground { foreground: true },
                ScriptEvent::Attach {
                    tag: PanelId::CallCard.tag().to_string(),
                    visible: true,
                },
                ScriptEvent::Dialpad {
                    show: true,
                    animate: false,
                },
                ScriptEvent::Back,
            ],
        );
        assert_eq!(host.running_transitions(), 1);

        let effects = run(&mut host, vec![ScriptEvent::Tick { ms: 100 }]);
        assert!(effects.is_empty());
        let effects = run(&mut host, vec![ScriptEvent::Tick { ms: 200 }]);
        assert_eq!(
            effects,
            vec![UiEffect::PanelVisibility {
                panel: PanelId::Dialpad,
                visible: false
            }]
        );
        assert_eq!(host.running_transitions(), 0);
    }

    #[test]
    fn mute_key_uses_host_microphone_state() {
        let mut host = host();
        let key = || ScriptEvent::Key {
            key: "mute".to_string(),
            up: false,
            repeat: 0,
        };
        let effects = run(&mut host, vec![key(), key()]);
        assert_eq!(
            effects,
            vec![
                UiEffect::Call(CallCommand::Mute { muted: true }),
                UiEffect::Call(CallCommand::Mute { muted: false }),
            ]
        );
    }

    #[test]
    fn unknown_tag_stops_the_run() {
        let mut host = host();
        let result = host.dispatch(ScriptEvent::Attach {
            tag: "tag_nope".to_string(),
            visible: true,
        });
        assert!(result.is_err());
    }

    #[test]
    fn save_and_restore_in_memory() {
        let mut host = host();
        run(
            &mut host,
            vec![
                ScriptEvent::Attach {
                    tag: PanelId::CallCard.tag().to_string(),
                    visible: true,
                },
                ScriptEvent::Dialpad {
                    show: true,
                    animate: false,
                },
                ScriptEvent::Key {
                    key: "7".to_string(),
                    up: false,
                    repeat: 0,
                },
                ScriptEvent::Save { path: None },
                ScriptEvent::Destroy,
                ScriptEvent::Restore { path: None },
                ScriptEvent::Attach {
                    tag: PanelId::CallCard.tag().to_string(),
                    visible: true,
                },
            ],
        );
        let effects = run(&mut host, vec![ScriptEvent::Foreground { foreground: true }]);
        assert!(effects.contains(&UiEffect::SetDtmfText {
            text: "7".to_string()
        }));
    }
}
