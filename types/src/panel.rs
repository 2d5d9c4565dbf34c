//! Panel identifiers and the slide effects used to move them on and off screen.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{AnimPhase, EffectTimer};

/// A distinct overlay region of the in-call screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    CallCard,
    Dialpad,
    Answer,
    ConferenceManager,
}

impl PanelId {
    pub const ALL: [PanelId; 4] = [
        PanelId::CallCard,
        PanelId::Dialpad,
        PanelId::Answer,
        PanelId::ConferenceManager,
    ];

    /// Host-side tag the panel is registered under.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::CallCard => "tag_callcard_fragment",
            Self::Dialpad => "tag_dialpad_fragment",
            Self::Answer => "tag_answer_fragment",
            Self::ConferenceManager => "tag_conference_manager_fragment",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The host handed us a panel tag we never registered.
///
/// This is a programming error on the host side; callers are expected to
/// treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected panel tag: {0}")]
pub struct UnknownPanelTag(pub String);

impl FromStr for PanelId {
    type Err = UnknownPanelTag;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|id| id.tag() == tag)
            .ok_or_else(|| UnknownPanelTag(tag.to_string()))
    }
}

/// Container a panel is placed into when it is first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerSlot {
    /// Root content area shared by the call card and the conference manager.
    Main,
    /// Area inside the call card shared by the dialpad and the answer panel.
    AnswerAndDialpad,
}

impl ContainerSlot {
    /// Whether panels in this slot hide each other when shown.
    #[must_use]
    pub const fn is_exclusive(self) -> bool {
        matches!(self, Self::AnswerAndDialpad)
    }
}

/// Who owns the container a panel lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostScope {
    /// Owned by the screen itself; always available.
    Screen,
    /// Owned by another panel, which must be attached first.
    Panel(PanelId),
}

/// Edge a dialpad slides from/to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideEdge {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelEffectKind {
    SlideIn,
    SlideOut,
}

/// A timed slide transition for a panel.
///
/// The coordinator only describes the transition; the host plays it and
/// reports completion. Hosts without their own animation clock can drive
/// the embedded timer with [`PanelEffect::advance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEffect {
    panel: PanelId,
    kind: PanelEffectKind,
    edge: SlideEdge,
    timer: EffectTimer,
}

impl PanelEffect {
    #[must_use]
    pub fn slide_in(panel: PanelId, edge: SlideEdge, duration: Duration) -> Self {
        Self {
            panel,
            kind: PanelEffectKind::SlideIn,
            edge,
            timer: EffectTimer::new(duration),
        }
    }

    #[must_use]
    pub fn slide_out(panel: PanelId, edge: SlideEdge, duration: Duration) -> Self {
        Self {
            panel,
            kind: PanelEffectKind::SlideOut,
            edge,
            timer: EffectTimer::new(duration),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.timer.phase()
    }

    #[must_use]
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    #[must_use]
    pub fn kind(&self) -> PanelEffectKind {
        self.kind
    }

    #[must_use]
    pub fn edge(&self) -> SlideEdge {
        self.edge
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }
}
