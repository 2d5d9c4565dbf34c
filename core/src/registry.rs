//! Static panel table: where each panel lives and how it is built.
//!
//! Each panel type registers itself against its [`PanelId`]; the coordinator
//! only ever looks panels up by identifier.

use std::collections::BTreeMap;

use incall_types::{ContainerSlot, HostScope, PanelId, UiEffect};

use crate::EffectQueue;

/// The call card. Hosts the answer/dialpad container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallCardPanel {
    /// False while the conference manager covers the card.
    interactive: bool,
}

impl Default for CallCardPanel {
    fn default() -> Self {
        Self { interactive: true }
    }
}

impl CallCardPanel {
    #[must_use]
    pub fn registration() -> PanelRegistration {
        PanelRegistration {
            id: PanelId::CallCard,
            slot: ContainerSlot::Main,
            host: HostScope::Screen,
            factory: || PanelContent::CallCard(Self::default()),
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub(crate) fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }
}

/// The DTMF dialpad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialpadPanel {
    dtmf_text: String,
    /// Digit whose tone is currently playing.
    tone: Option<char>,
}

impl DialpadPanel {
    #[must_use]
    pub fn registration() -> PanelRegistration {
        PanelRegistration {
            id: PanelId::Dialpad,
            slot: ContainerSlot::AnswerAndDialpad,
            host: HostScope::Panel(PanelId::CallCard),
            factory: || PanelContent::Dialpad(Self::default()),
        }
    }

    #[must_use]
    pub fn dtmf_text(&self) -> &str {
        &self.dtmf_text
    }

    pub fn set_dtmf_text(&mut self, text: impl Into<String>) {
        self.dtmf_text = text.into();
    }

    #[must_use]
    pub fn playing_tone(&self) -> Option<char> {
        self.tone
    }

    /// Start the tone for a dialable key. Returns whether the key was used.
    pub fn key_down(&mut self, digit: char, out: &mut EffectQueue) -> bool {
        if self.tone.is_some() {
            self.key_up(out);
        }
        self.dtmf_text.push(digit);
        self.tone = Some(digit);
        out.push(UiEffect::DtmfToneStarted { digit });
        true
    }

    /// Stop the playing tone. Returns whether a tone was playing.
    pub fn key_up(&mut self, out: &mut EffectQueue) -> bool {
        if self.tone.take().is_none() {
            return false;
        }
        out.push(UiEffect::DtmfToneStopped);
        true
    }
}

/// Incoming-call answer controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerPanel {
    /// Dialogs the answer panel itself has open (e.g. quick responses).
    open_dialogs: usize,
}

impl AnswerPanel {
    #[must_use]
    pub fn registration() -> PanelRegistration {
        PanelRegistration {
            id: PanelId::Answer,
            slot: ContainerSlot::AnswerAndDialpad,
            host: HostScope::Panel(PanelId::CallCard),
            factory: || PanelContent::Answer(Self::default()),
        }
    }

    #[must_use]
    pub fn has_pending_dialogs(&self) -> bool {
        self.open_dialogs > 0
    }

    pub fn dialog_opened(&mut self) {
        self.open_dialogs = self.open_dialogs.saturating_add(1);
    }

    pub fn dialog_closed(&mut self) {
        self.open_dialogs = self.open_dialogs.saturating_sub(1);
    }

    pub fn dismiss_pending_dialogs(&mut self, out: &mut EffectQueue) {
        if self.open_dialogs == 0 {
            return;
        }
        self.open_dialogs = 0;
        out.push(UiEffect::DismissAnswerDialogs);
    }
}

/// Conference participant manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConferenceManagerPanel;

impl ConferenceManagerPanel {
    #[must_use]
    pub fn registration() -> PanelRegistration {
        PanelRegistration {
            id: PanelId::ConferenceManager,
            slot: ContainerSlot::Main,
            host: HostScope::Screen,
            factory: || PanelContent::ConferenceManager(Self),
        }
    }
}

/// Per-panel state that survives hide/show cycles until the panel is destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    CallCard(CallCardPanel),
    Dialpad(DialpadPanel),
    Answer(AnswerPanel),
    ConferenceManager(ConferenceManagerPanel),
}

impl PanelContent {
    #[must_use]
    pub fn id(&self) -> PanelId {
        match self {
            Self::CallCard(_) => PanelId::CallCard,
            Self::Dialpad(_) => PanelId::Dialpad,
            Self::Answer(_) => PanelId::Answer,
            Self::ConferenceManager(_) => PanelId::ConferenceManager,
        }
    }
}

/// How to place and build one panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelRegistration {
    pub id: PanelId,
    pub slot: ContainerSlot,
    pub host: HostScope,
    pub factory: fn() -> PanelContent,
}

#[derive(Debug, Clone)]
pub struct PanelRegistry {
    entries: BTreeMap<PanelId, PanelRegistration>,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::from_registrations([
            CallCardPanel::registration(),
            DialpadPanel::registration(),
            AnswerPanel::registration(),
            ConferenceManagerPanel::registration(),
        ])
    }
}

impl PanelRegistry {
    #[must_use]
    pub fn from_registrations(registrations: impl IntoIterator<Item = PanelRegistration>) -> Self {
        Self {
            entries: registrations.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Registration for `id`.
    ///
    /// # Panics
    ///
    /// Panics when `id` was never registered. Asking for a panel the screen
    /// does not know is a programming error.
    #[must_use]
    pub fn lookup(&self, id: PanelId) -> &PanelRegistration {
        match self.entries.get(&id) {
            Some(registration) => registration,
            None => panic!("unexpected panel: {id}"),
        }
    }

    /// Build a fresh instance of `id`.
    #[must_use]
    pub fn create(&self, id: PanelId) -> PanelContent {
        let content = (self.lookup(id).factory)();
        debug_assert_eq!(content.id(), id, "factory registered under the wrong id");
        content
    }

    /// Other panels that share a container slot with `id`.
    pub fn slot_siblings(&self, id: PanelId) -> impl Iterator<Item = PanelId> + '_ {
        let slot = self.lookup(id).slot;
        self.entries
            .values()
            .filter(move |r| r.slot == slot && r.id != id)
            .map(|r| r.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnswerPanel, CallCardPanel, DialpadPanel, PanelContent, PanelRegistry};
    use crate::EffectQueue;
    use incall_types::{ContainerSlot, HostScope, PanelId, UiEffect};

    #[test]
    fn default_registry_places_panels() {
        let registry = PanelRegistry::default();
        assert_eq!(registry.lookup(PanelId::CallCard).slot, ContainerSlot::Main);
        assert_eq!(
            registry.lookup(PanelId::ConferenceManager).slot,
            ContainerSlot::Main
        );
        assert_eq!(
            registry.lookup(PanelId::Dialpad).slot,
            ContainerSlot::AnswerAndDialpad
        );
        assert_eq!(
            registry.lookup(PanelId::Answer).host,
            HostScope::Panel(PanelId::CallCard)
        );
    }

    #[test]
    fn dialpad_and_answer_are_slot_siblings() {
        let registry = PanelRegistry::default();
        let siblings: Vec<_> = registry.slot_siblings(PanelId::Dialpad).collect();
        assert_eq!(siblings, vec![PanelId::Answer]);
    }

    #[test]
    fn factory_builds_matching_variant() {
        let registry = PanelRegistry::default();
        for id in PanelId::ALL {
            assert_eq!(registry.create(id).id(), id);
        }
        assert_eq!(
            registry.create(PanelId::CallCard),
            PanelContent::CallCard(CallCardPanel::default())
        );
    }

    #[test]
    #[should_panic(expected = "unexpected panel")]
    fn unregistered_panel_is_fatal() {
        let registry = PanelRegistry::from_registrations([CallCardPanel::registration()]);
        let _ = registry.lookup(PanelId::Dialpad);
    }

    #[test]
    fn dialpad_tones_append_and_stop() {
        let mut dialpad = DialpadPanel::default();
        let mut out = EffectQueue::new();
        assert!(dialpad.key_down('1', &mut out));
        assert!(dialpad.key_down('2', &mut out));
        assert!(dialpad.key_up(&mut out));
        assert!(!dialpad.key_up(&mut out));
        assert_eq!(dialpad.dtmf_text(), "12");
        assert_eq!(
            out.drain(),
            vec![
                UiEffect::DtmfToneStarted { digit: '1' },
                UiEffect::DtmfToneStopped,
                UiEffect::DtmfToneStarted { digit: '2' },
                UiEffect::DtmfToneStopped,
            ]
        );
    }

    #[test]
    fn answer_dialogs_are_counted() {
        let mut answer = AnswerPanel::default();
        answer.dialog_opened();
        assert!(answer.has_pending_dialogs());
        let mut out = EffectQueue::new();
        answer.dismiss_pending_dialogs(&mut out);
        assert!(!answer.has_pending_dialogs());
        assert_eq!(out.drain(), vec![UiEffect::DismissAnswerDialogs]);
    }
}
