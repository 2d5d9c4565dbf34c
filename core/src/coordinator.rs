//! Panel visibility state machine.
//!
//! Owns every panel's visibility and transition state and turns show/hide
//! requests into ordered [`UiEffect`]s. Rules enforced here:
//!
//! - Panels sharing an exclusive container slot (dialpad, answer) are never
//!   visible together; showing one hides the other first.
//! - Showing the conference manager keeps the call card attached but takes it
//!   out of interaction, so accessibility focus cannot land on it.
//! - An animated dialpad hide is two-phase: the call card hears about it
//!   immediately, but the dialpad only stops being visible once the host
//!   reports the exit transition finished.
//! - Panels whose host panel is not attached yet cannot be shown; such
//!   requests are logged and dropped.

use std::collections::BTreeMap;
use std::time::Duration;

use incall_types::{AnimationState, HostScope, PanelEffect, PanelId, SlideEdge, UiEffect};

use crate::EffectQueue;
use crate::registry::{
    AnswerPanel, CallCardPanel, DialpadPanel, PanelContent, PanelRegistration, PanelRegistry,
};

/// How animated dialpad transitions look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionStyle {
    /// When false every request is treated as non-animated.
    pub animations_enabled: bool,
    pub edge: SlideEdge,
    pub duration: Duration,
}

impl Default for TransitionStyle {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            edge: SlideEdge::Bottom,
            duration: Duration::from_millis(250),
        }
    }
}

/// Dialpad show/hide that may have to wait for the call card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialpadRequest {
    pub show: bool,
    pub animate: bool,
    /// DTMF text to put back into the dialpad once shown.
    pub dtmf_text: Option<String>,
}

impl DialpadRequest {
    #[must_use]
    pub fn immediate(show: bool) -> Self {
        Self {
            show,
            animate: false,
            dtmf_text: None,
        }
    }
}

#[derive(Debug, Clone)]
struct AttachedPanel {
    content: PanelContent,
    visible: bool,
    animation: AnimationState,
}

#[derive(Debug)]
pub struct PanelVisibilityCoordinator {
    registry: PanelRegistry,
    panels: BTreeMap<PanelId, AttachedPanel>,
    style: TransitionStyle,
    pending_dialpad: Option<DialpadRequest>,
}

impl Default for PanelVisibilityCoordinator {
    fn default() -> Self {
        Self::new(PanelRegistry::default(), TransitionStyle::default())
    }
}

impl PanelVisibilityCoordinator {
    #[must_use]
    pub fn new(registry: PanelRegistry, style: TransitionStyle) -> Self {
        Self {
            registry,
            panels: BTreeMap::new(),
            style,
            pending_dialpad: None,
        }
    }

    #[must_use]
    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    #[must_use]
    pub fn is_attached(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    /// Raw visibility flag. Stays true while an exit transition runs.
    #[must_use]
    pub fn is_visible(&self, id: PanelId) -> bool {
        self.panels.get(&id).is_some_and(|p| p.visible)
    }

    /// Visible and not on its way out.
    #[must_use]
    pub fn is_shown(&self, id: PanelId) -> bool {
        self.panels
            .get(&id)
            .is_some_and(|p| p.visible && p.animation != AnimationState::AnimatingOut)
    }

    #[must_use]
    pub fn animation_state(&self, id: PanelId) -> AnimationState {
        self.panels
            .get(&id)
            .map_or(AnimationState::Idle, |p| p.animation)
    }

    #[must_use]
    pub fn pending_dialpad(&self) -> Option<&DialpadRequest> {
        self.pending_dialpad.as_ref()
    }

    #[must_use]
    pub fn call_card(&self) -> Option<&CallCardPanel> {
        match self.panels.get(&PanelId::CallCard).map(|p| &p.content) {
            Some(PanelContent::CallCard(card)) => Some(card),
            _ => None,
        }
    }

    fn call_card_mut(&mut self) -> Option<&mut CallCardPanel> {
        match self.panels.get_mut(&PanelId::CallCard).map(|p| &mut p.content) {
            Some(PanelContent::CallCard(card)) => Some(card),
            _ => None,
        }
    }

    #[must_use]
    pub fn dialpad(&self) -> Option<&DialpadPanel> {
        match self.panels.get(&PanelId::Dialpad).map(|p| &p.content) {
            Some(PanelContent::Dialpad(dialpad)) => Some(dialpad),
            _ => None,
        }
    }

    pub fn dialpad_mut(&mut self) -> Option<&mut DialpadPanel> {
        match self.panels.get_mut(&PanelId::Dialpad).map(|p| &mut p.content) {
            Some(PanelContent::Dialpad(dialpad)) => Some(dialpad),
            _ => None,
        }
    }

    #[must_use]
    pub fn answer(&self) -> Option<&AnswerPanel> {
        match self.panels.get(&PanelId::Answer).map(|p| &p.content) {
            Some(PanelContent::Answer(answer)) => Some(answer),
            _ => None,
        }
    }

    pub fn answer_mut(&mut self) -> Option<&mut AnswerPanel> {
        match self.panels.get_mut(&PanelId::Answer).map(|p| &mut p.content) {
            Some(PanelContent::Answer(answer)) => Some(answer),
            _ => None,
        }
    }

    #[must_use]
    pub fn answer_has_pending_dialogs(&self) -> bool {
        self.answer().is_some_and(AnswerPanel::has_pending_dialogs)
    }

    /// The host attached a panel it built itself (e.g. after recreation).
    ///
    /// Attaching the call card releases a parked dialpad request.
    pub fn attach(&mut self, id: PanelId, visible: bool, out: &mut EffectQueue) {
        if self.is_attached(id) {
            tracing::debug!(panel = ?id, "Panel already attached");
        } else {
            let content = self.registry.create(id);
            self.panels.insert(
                id,
                AttachedPanel {
                    content,
                    visible,
                    animation: AnimationState::Idle,
                },
            );
            tracing::debug!(panel = ?id, visible, "Panel attached");
        }

        if id == PanelId::CallCard {
            self.flush_pending_dialpad(out);
        }
    }

    fn flush_pending_dialpad(&mut self, out: &mut EffectQueue) {
        if let Some(request) = self.pending_dialpad.take() {
            self.apply_dialpad_request(request, out);
        }
    }

    /// Drop every panel and its retained state.
    pub fn release_panels(&mut self) {
        self.panels.clear();
        self.pending_dialpad = None;
    }

    /// Request a visibility change for `id`.
    ///
    /// `animate` only applies to the dialpad. Requests that match the
    /// panel's current state are no-ops.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the registry.
    pub fn set_visible(&mut self, id: PanelId, show: bool, animate: bool, out: &mut EffectQueue) {
        let registration = *self.registry.lookup(id);

        if let HostScope::Panel(host) = registration.host
            && !self.is_attached(host)
        {
            tracing::warn!(panel = ?id, host = ?host, show, "Host panel not attached, ignoring");
            return;
        }

        if show == self.is_shown(id) {
            return;
        }

        let animate = animate && id == PanelId::Dialpad && self.style.animations_enabled;
        if show {
            self.show_panel(registration, animate, out);
        } else {
            self.hide_panel(id, animate, out);
        }

        if id == PanelId::Dialpad {
            out.push(UiEffect::ProximityDialpadVisible { visible: show });
        }
        if show && id == PanelId::CallCard {
            self.flush_pending_dialpad(out);
        }
    }

    fn show_panel(&mut self, registration: PanelRegistration, animate: bool, out: &mut EffectQueue) {
        let id = registration.id;

        // A show that lands while the exit transition is still running wins:
        // the transition is cancelled and the panel simply stays visible.
        if let Some(panel) = self.panels.get_mut(&id)
            && panel.animation == AnimationState::AnimatingOut
        {
            panel.animation = AnimationState::Idle;
            out.push(UiEffect::CancelTransition { panel: id });
            if id == PanelId::Dialpad {
                out.push(UiEffect::DialpadVisibilityChanged { visible: true });
            }
            return;
        }

        if registration.slot.is_exclusive() {
            let siblings: Vec<PanelId> = self.registry.slot_siblings(id).collect();
            for sibling in siblings {
                if self.is_visible(sibling) {
                    self.cancel_transition(sibling, out);
                    self.commit_hidden(sibling, out);
                    if sibling == PanelId::Dialpad {
                        out.push(UiEffect::ProximityDialpadVisible { visible: false });
                    }
                }
            }
        }

        let registry = &self.registry;
        let panel = self.panels.entry(id).or_insert_with(|| {
            out.push(UiEffect::PanelCreated {
                panel: id,
                slot: registration.slot,
            });
            AttachedPanel {
                content: registry.create(id),
                visible: false,
                animation: AnimationState::Idle,
            }
        });
        panel.visible = true;
        panel.animation = AnimationState::Idle;
        out.push(UiEffect::PanelVisibility {
            panel: id,
            visible: true,
        });

        if animate {
            panel.animation = AnimationState::AnimatingIn;
            out.push(UiEffect::DialpadAnimateShow);
            out.push(UiEffect::DialpadVisibilityChanged { visible: true });
            out.push(UiEffect::StartTransition {
                transition: PanelEffect::slide_in(id, self.style.edge, self.style.duration),
            });
        }
    }

    fn hide_panel(&mut self, id: PanelId, animate: bool, out: &mut EffectQueue) {
        self.cancel_transition(id, out);

        if !animate {
            self.commit_hidden(id, out);
            return;
        }

        // The call card re-lays out now; the dialpad goes away when the
        // exit transition reports back.
        out.push(UiEffect::DialpadVisibilityChanged { visible: false });
        if let Some(panel) = self.panels.get_mut(&id) {
            panel.animation = AnimationState::AnimatingOut;
        }
        out.push(UiEffect::StartTransition {
            transition: PanelEffect::slide_out(id, self.style.edge, self.style.duration),
        });
    }

    fn cancel_transition(&mut self, id: PanelId, out: &mut EffectQueue) {
        if let Some(panel) = self.panels.get_mut(&id)
            && panel.animation.is_in_flight()
        {
            panel.animation = AnimationState::Idle;
            out.push(UiEffect::CancelTransition { panel: id });
        }
    }

    fn commit_hidden(&mut self, id: PanelId, out: &mut EffectQueue) {
        let Some(panel) = self.panels.get_mut(&id) else {
            return;
        };
        panel.visible = false;
        panel.animation = AnimationState::Idle;
        out.push(UiEffect::PanelVisibility {
            panel: id,
            visible: false,
        });
    }

    /// The host finished playing the transition for `id`.
    pub fn on_animation_finished(&mut self, id: PanelId, out: &mut EffectQueue) {
        match self.animation_state(id) {
            AnimationState::AnimatingOut => self.commit_hidden(id, out),
            AnimationState::AnimatingIn => {
                if let Some(panel) = self.panels.get_mut(&id) {
                    panel.animation = AnimationState::Idle;
                }
            }
            AnimationState::Idle => {
                tracing::debug!(panel = ?id, "Transition finished after it was cancelled");
            }
        }
    }

    pub fn show_call_card(&mut self, show: bool, out: &mut EffectQueue) {
        self.set_visible(PanelId::CallCard, show, false, out);
    }

    pub fn show_answer(&mut self, show: bool, out: &mut EffectQueue) {
        self.set_visible(PanelId::Answer, show, false, out);
    }

    pub fn show_dialpad(&mut self, show: bool, animate: bool, out: &mut EffectQueue) {
        self.set_visible(PanelId::Dialpad, show, animate, out);
    }

    /// Show or hide the conference manager over the call card.
    pub fn show_conference_manager(&mut self, show: bool, out: &mut EffectQueue) {
        if show == self.is_shown(PanelId::ConferenceManager) {
            return;
        }
        self.set_visible(PanelId::ConferenceManager, show, false, out);
        out.push(UiEffect::ConferenceManagerVisibilityChanged { visible: show });

        if let Some(card) = self.call_card_mut() {
            card.set_interactive(!show);
            out.push(UiEffect::CallCardInteractive {
                interactive: !show,
            });
        } else {
            tracing::warn!(show, "Call card not attached, cannot toggle its interactivity");
        }
    }

    /// Apply `request` now, or park it until the call card is attached.
    pub fn request_dialpad(&mut self, request: DialpadRequest, out: &mut EffectQueue) {
        if self.is_attached(PanelId::CallCard) {
            self.apply_dialpad_request(request, out);
        } else {
            tracing::debug!(show = request.show, "Call card not attached, parking dialpad request");
            self.pending_dialpad = Some(request);
        }
    }

    fn apply_dialpad_request(&mut self, request: DialpadRequest, out: &mut EffectQueue) {
        self.show_dialpad(request.show, request.animate, out);
        if let Some(text) = request.dtmf_text
            && let Some(dialpad) = self.dialpad_mut()
        {
            dialpad.set_dtmf_text(text.clone());
            out.push(UiEffect::SetDtmfText { text });
        }
    }

    /// Back navigation. Returns whether the signal was consumed.
    ///
    /// Closes the topmost overlay (dialpad, then conference manager). With
    /// no overlay up the signal is still swallowed while a call is ringing,
    /// and when neither the call card nor the conference manager is on
    /// screen at all.
    pub fn on_back_signal(&mut self, incoming_ringing: bool, out: &mut EffectQueue) -> bool {
        let conference_shown = self.is_shown(PanelId::ConferenceManager);
        if !conference_shown && !self.is_shown(PanelId::CallCard) {
            tracing::debug!("Back pressed with no call card on screen, consuming");
            return true;
        }

        // A dialpad sliding out is still on screen and keeps the signal.
        if self.is_visible(PanelId::Dialpad) {
            self.show_dialpad(false, true, out);
            return true;
        }
        if conference_shown {
            self.show_conference_manager(false, out);
            return true;
        }

        if incoming_ringing {
            tracing::info!("Consuming back press for an incoming call");
            return true;
        }
        false
    }

    /// Route a dialable key press to the dialpad. Returns whether consumed.
    pub fn dialer_key_down(&mut self, digit: char, out: &mut EffectQueue) -> bool {
        if !self.is_shown(PanelId::Dialpad) {
            return false;
        }
        self.dialpad_mut()
            .is_some_and(|dialpad| dialpad.key_down(digit, out))
    }

    /// Route a key release to the dialpad. Returns whether consumed.
    pub fn dialer_key_up(&mut self, out: &mut EffectQueue) -> bool {
        if !self.is_shown(PanelId::Dialpad) {
            return false;
        }
        self.stop_dtmf_tone(out)
    }

    /// Stop any playing DTMF tone regardless of dialpad visibility.
    pub fn stop_dtmf_tone(&mut self, out: &mut EffectQueue) -> bool {
        self.dialpad_mut()
            .is_some_and(|dialpad| dialpad.key_up(out))
    }
}
