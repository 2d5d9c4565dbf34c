//! Animation bookkeeping shared by panel transitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where a panel sits in its show/hide transition.
///
/// `AnimatingOut` keeps the panel logically visible: the hide is committed
/// only when the host reports that the exit transition finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    #[default]
    Idle,
    AnimatingIn,
    AnimatingOut,
}

impl AnimationState {
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Progress of a timed effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    Running { progress: f32 },
    Completed,
}

pub(crate) fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub(crate) fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub(crate) fn phase(&self) -> AnimPhase {
        if self.elapsed >= self.duration {
            AnimPhase::Completed
        } else {
            AnimPhase::Running {
                progress: normalized_progress(self.elapsed, self.duration),
            }
        }
    }
}
