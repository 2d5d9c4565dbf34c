//! The in-call screen as seen by its host.
//!
//! [`InCallScreen`] is the boundary the host lifecycle talks to. It owns the
//! core state machines, routes lifecycle, input, rotation, call-list and
//! dialog events into them, and collects everything they emit into a single
//! ordered effect queue the host drains after each call.
//!
//! Call-list and audio state belong to collaborators and are passed in per
//! call; the screen never holds on to them.

use std::sync::Arc;

use incall_core::{
    AudioState, CallList, DialogQueue, DialpadRequest, EffectQueue, IntentResolver,
    PanelRegistry, PanelVisibilityCoordinator, ResolvedAction, RotationState, RotationTracker,
    TouchPointTracker,
};
use incall_types::{
    CallCommand, CallId, DialogHandle, DisconnectCause, IntentParams, KeyCode, KeyPhase,
    NonEmptyString, PanelId, PhoneAccountHandle, Point, RotationSample, UiEffect,
    UnknownPanelTag,
};

use crate::config::{ScreenConfig, ScreenOptions};
use crate::persistence::SavedScreenState;

#[derive(Debug)]
pub struct InCallScreen {
    panels: PanelVisibilityCoordinator,
    dialogs: DialogQueue,
    resolver: IntentResolver,
    rotation: RotationTracker,
    touch: TouchPointTracker,
    effects: EffectQueue,
    foreground: bool,
    finishing: bool,
    keyguard_dismissed: bool,
    /// Dialpad request waiting for the next foreground transition.
    pending_dialpad: Option<DialpadRequest>,
}

impl InCallScreen {
    /// New screen sharing the process-wide rotation state.
    #[must_use]
    pub fn new(config: &ScreenConfig, options: ScreenOptions) -> Self {
        Self::with_rotation_state(config, options, RotationState::global())
    }

    #[must_use]
    pub fn with_rotation_state(
        config: &ScreenConfig,
        options: ScreenOptions,
        rotation_state: Arc<RotationState>,
    ) -> Self {
        let mut rotation = RotationTracker::new(rotation_state);
        if config.rotation.enabled {
            rotation.enable();
        }
        Self {
            panels: PanelVisibilityCoordinator::new(
                PanelRegistry::default(),
                config.transition_style(options),
            ),
            dialogs: DialogQueue::new(),
            resolver: IntentResolver::new(),
            rotation,
            touch: TouchPointTracker::default(),
            effects: EffectQueue::new(),
            foreground: false,
            finishing: false,
            keyguard_dismissed: false,
            pending_dialpad: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn effects(&self) -> &EffectQueue {
        &self.effects
    }

    /// Hand every queued effect to the host, oldest first.
    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        self.effects.drain()
    }

    #[must_use]
    pub fn panels(&self) -> &PanelVisibilityCoordinator {
        &self.panels
    }

    #[must_use]
    pub fn dialogs(&self) -> &DialogQueue {
        &self.dialogs
    }

    #[must_use]
    pub fn resolver(&self) -> &IntentResolver {
        &self.resolver
    }

    #[must_use]
    pub fn rotation(&self) -> &RotationTracker {
        &self.rotation
    }

    #[must_use]
    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    #[must_use]
    pub fn is_finishing(&self) -> bool {
        self.finishing
    }

    #[must_use]
    pub fn is_keyguard_dismissed(&self) -> bool {
        self.keyguard_dismissed
    }

    #[must_use]
    pub fn pending_dialpad(&self) -> Option<&DialpadRequest> {
        self.pending_dialpad.as_ref()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn on_start(&mut self) {
        tracing::debug!("Screen started");
        self.effects.push(UiEffect::ScreenStarted);
    }

    pub fn on_stop(&mut self) {
        tracing::debug!("Screen stopped");
        self.effects.push(UiEffect::ScreenStopped);
    }

    /// The host destroyed the screen. Panels and their state go with it; the
    /// committed rotation does not.
    pub fn on_destroy(&mut self) {
        tracing::debug!("Screen destroyed");
        self.rotation.disable();
        self.panels.release_panels();
        self.pending_dialpad = None;
        self.effects.push(UiEffect::ScreenReleased);
    }

    pub fn on_foreground(&mut self, foreground: bool) {
        tracing::debug!(foreground, "Screen foreground changed");
        self.foreground = foreground;

        if !foreground {
            self.panels.stop_dtmf_tone(&mut self.effects);
            self.effects.push(UiEffect::UiShowing { showing: false });
            return;
        }

        self.effects.push(UiEffect::UiShowing { showing: true });
        if let Some(request) = self.pending_dialpad.take() {
            self.panels.request_dialpad(request, &mut self.effects);
        }
        self.dialogs.on_foreground(&mut self.effects);
    }

    /// The host attached a panel it built on its own.
    pub fn on_panel_attached(&mut self, id: PanelId, visible: bool) {
        self.panels.attach(id, visible, &mut self.effects);
    }

    /// Same as [`InCallScreen::on_panel_attached`] for hosts that only know
    /// the panel's tag.
    pub fn on_panel_tag_attached(
        &mut self,
        tag: &str,
        visible: bool,
    ) -> Result<(), UnknownPanelTag> {
        let id: PanelId = tag.parse()?;
        self.on_panel_attached(id, visible);
        Ok(())
    }

    // ========================================================================
    // Panels
    // ========================================================================

    pub fn set_visible(&mut self, id: PanelId, show: bool, animate: bool) {
        self.panels.set_visible(id, show, animate, &mut self.effects);
    }

    pub fn show_answer(&mut self, show: bool) {
        self.panels.show_answer(show, &mut self.effects);
    }

    pub fn show_dialpad(&mut self, show: bool, animate: bool) {
        self.panels.show_dialpad(show, animate, &mut self.effects);
    }

    pub fn show_conference_manager(&mut self, show: bool) {
        self.panels.show_conference_manager(show, &mut self.effects);
    }

    pub fn on_animation_finished(&mut self, id: PanelId) {
        self.panels.on_animation_finished(id, &mut self.effects);
    }

    fn request_dialpad(&mut self, request: DialpadRequest) {
        if self.foreground {
            self.panels.request_dialpad(request, &mut self.effects);
        } else {
            self.pending_dialpad = Some(request);
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Back navigation. Returns whether the host should skip its default
    /// back behavior.
    pub fn on_back_signal(&mut self, calls: &dyn CallList) -> bool {
        let ringing = calls.incoming_call().is_some();
        self.panels.on_back_signal(ringing, &mut self.effects)
    }

    /// The "up" item in the host's navigation bar behaves like back.
    pub fn on_up_navigation(&mut self, calls: &dyn CallList) -> bool {
        self.on_back_signal(calls)
    }

    /// Hardware key event. Returns whether it was consumed.
    pub fn on_hardware_key(
        &mut self,
        code: KeyCode,
        phase: KeyPhase,
        audio: &dyn AudioState,
    ) -> bool {
        match phase {
            KeyPhase::Down { repeat } => self.on_key_down(code, repeat, audio),
            KeyPhase::Up => self.on_key_up(code),
        }
    }

    fn on_key_down(&mut self, code: KeyCode, repeat: u32, audio: &dyn AudioState) -> bool {
        match code {
            KeyCode::Call => {
                self.effects.push(UiEffect::CallKeyPressed);
                return true;
            }
            // Camera is disabled while in a call.
            KeyCode::Camera => return true,
            KeyCode::Mute => {
                let muted = !audio.is_muted();
                self.effects.push(UiEffect::Call(CallCommand::Mute { muted }));
                return true;
            }
            // Ringer silencing happens system-wide.
            KeyCode::VolumeUp | KeyCode::VolumeDown | KeyCode::VolumeMute | KeyCode::Char(_) => {}
        }

        if repeat != 0 {
            return false;
        }
        code.dtmf_char()
            .is_some_and(|digit| self.panels.dialer_key_down(digit, &mut self.effects))
    }

    fn on_key_up(&mut self, code: KeyCode) -> bool {
        if self.panels.dialer_key_up(&mut self.effects) {
            return true;
        }
        code == KeyCode::Call
    }

    /// Remember where the user touched last; anchors the outgoing-call reveal.
    pub fn record_touch(&mut self, point: Point) {
        self.touch.record(point);
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    pub fn on_rotation_sample(&mut self, sample: RotationSample) {
        if let Some(change) = self.rotation.on_sample(sample) {
            self.effects.extend(change.effects());
        }
    }

    /// Feed a batch of sensor samples in order.
    pub fn on_rotation_samples(&mut self, samples: impl IntoIterator<Item = RotationSample>) {
        for change in self.rotation.changes(samples) {
            self.effects.extend(change.effects());
        }
    }

    pub fn set_rotation_detection(&mut self, enabled: bool) {
        if enabled {
            self.rotation.enable();
        } else {
            self.rotation.disable();
        }
    }

    // ========================================================================
    // Intents and calls
    // ========================================================================

    /// Act on a launch intent. Each intent must be resolved only once.
    pub fn resolve_intent(&mut self, mut intent: IntentParams, calls: &dyn CallList) {
        let actions = self.resolver.resolve(&mut intent, calls, &self.touch);
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: ResolvedAction) {
        match action {
            ResolvedAction::SetDialpad { show } => {
                self.request_dialpad(DialpadRequest::immediate(show));
            }
            ResolvedAction::Call(command) => self.effects.push(UiEffect::Call(command)),
            ResolvedAction::StartCircularReveal { origin } => {
                // A touch anchors one reveal only.
                self.touch.clear();
                self.effects.push(UiEffect::StartCircularReveal { origin });
            }
            ResolvedAction::DismissKeyguard => self.dismiss_keyguard(true),
            ResolvedAction::ShowCallCard(show) => {
                self.panels.show_call_card(show, &mut self.effects);
            }
            ResolvedAction::RequestAccountSelection { call_id, accounts } => {
                self.effects
                    .push(UiEffect::ShowAccountSelection { call_id, accounts });
            }
        }
    }

    /// The call list changed. Drops an account selection that is no longer
    /// needed.
    pub fn on_call_list_changed(&mut self, calls: &dyn CallList) {
        if self.resolver.on_call_list_changed(calls) {
            self.effects.push(UiEffect::DismissAccountSelection);
        }
    }

    pub fn on_account_selected(&mut self, account: PhoneAccountHandle, set_default: bool) {
        if let Some(command) = self.resolver.on_account_selected(account, set_default) {
            self.finish_account_selection(command);
        }
    }

    pub fn on_account_selection_cancelled(&mut self) {
        if let Some(command) = self.resolver.on_account_selection_cancelled() {
            self.finish_account_selection(command);
        }
    }

    fn finish_account_selection(&mut self, command: CallCommand) {
        self.effects.push(UiEffect::Call(command));
        self.panels.show_call_card(true, &mut self.effects);
    }

    /// The host recreated the account-selection dialog after recreation.
    pub fn on_account_dialog_restored(&mut self, call_id: CallId) {
        self.resolver.rebind_account_selection(call_id);
    }

    /// Idempotent: nothing is emitted when the flag does not change.
    pub fn dismiss_keyguard(&mut self, dismiss: bool) {
        if self.keyguard_dismissed == dismiss {
            return;
        }
        self.keyguard_dismissed = dismiss;
        self.effects.push(UiEffect::DismissKeyguard { dismiss });
    }

    // ========================================================================
    // Dialogs and finishing
    // ========================================================================

    pub fn request_post_char_dialog(&mut self, call_id: CallId, chars: impl Into<String>) {
        self.dialogs
            .request_post_char_dialog(call_id, chars, self.foreground, &mut self.effects);
    }

    /// Show an error dialog in place of every dialog currently up,
    /// including the answer panel's own.
    pub fn show_error(&mut self, message: NonEmptyString) {
        if let Some(answer) = self.panels.answer_mut() {
            answer.dismiss_pending_dialogs(&mut self.effects);
        }
        self.dialogs.show_error(message, &mut self.effects);
    }

    /// Show the disconnect cause's description when it describes a failure
    /// the user should see.
    pub fn maybe_show_error_on_disconnect(&mut self, cause: &DisconnectCause) {
        if self.finishing || !cause.warrants_error_dialog() {
            return;
        }
        match NonEmptyString::new(cause.description.clone()) {
            Ok(message) => self.show_error(message),
            Err(_) => tracing::debug!(code = ?cause.code, "Disconnect cause has no description"),
        }
    }

    /// The user closed the dialog identified by `handle`.
    pub fn on_dialog_dismissed(&mut self, handle: DialogHandle) {
        if self.dialogs.on_dismissed(handle, &mut self.effects) {
            self.retry_deferred_finish();
        }
    }

    /// Take down the active dialog and any dialogs the answer panel owns.
    pub fn dismiss_all_dialogs(&mut self) {
        self.dialogs.dismiss_active(&mut self.effects);
        if let Some(answer) = self.panels.answer_mut() {
            answer.dismiss_pending_dialogs(&mut self.effects);
        }
        self.retry_deferred_finish();
    }

    pub fn on_answer_dialog_opened(&mut self) {
        match self.panels.answer_mut() {
            Some(answer) => answer.dialog_opened(),
            None => tracing::warn!("Answer panel not attached, ignoring its dialog"),
        }
    }

    pub fn on_answer_dialog_closed(&mut self) {
        if let Some(answer) = self.panels.answer_mut() {
            answer.dialog_closed();
        }
        self.retry_deferred_finish();
    }

    /// Close the screen, or defer until no dialog is pending.
    ///
    /// Returns whether the screen finished now.
    pub fn request_finish(&mut self) -> bool {
        let answer_has_dialogs = self.panels.answer_has_pending_dialogs();
        let finished = self.dialogs.request_finish(answer_has_dialogs, &mut self.effects);
        self.finishing |= finished;
        finished
    }

    fn retry_deferred_finish(&mut self) {
        if !self.dialogs.is_finish_deferred() {
            return;
        }
        let answer_has_dialogs = self.panels.answer_has_pending_dialogs();
        self.dialogs
            .retry_deferred_finish(answer_has_dialogs, &mut self.effects);
        if !self.dialogs.is_finish_deferred() {
            tracing::debug!("Deferred finish released");
            self.finishing = true;
        }
    }

    // ========================================================================
    // Save / restore
    // ========================================================================

    #[must_use]
    pub fn save_state(&self) -> SavedScreenState {
        SavedScreenState {
            show_dialpad: self.panels.is_shown(PanelId::Dialpad),
            dtmf_text: self
                .panels
                .dialpad()
                .map(|dialpad| dialpad.dtmf_text().to_string())
                .unwrap_or_default(),
        }
    }

    /// Queue the saved dialpad for the next foreground transition.
    pub fn restore_state(&mut self, state: SavedScreenState) {
        if !state.show_dialpad {
            return;
        }
        tracing::debug!("Restoring dialpad on next foreground");
        self.pending_dialpad = Some(DialpadRequest {
            show: true,
            animate: false,
            dtmf_text: Some(state.dtmf_text),
        });
    }
}
