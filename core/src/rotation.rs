//! Orientation sensor debouncing.
//!
//! Raw sensor readings arrive continuously while the screen is up. They are
//! quantized into four display rotations, and only an actual change of the
//! committed rotation reaches the rest of the system.
//!
//! The committed rotation outlives any single screen instance: a screen that
//! is torn down and recreated must not re-announce a rotation that was
//! already delivered. It therefore lives in a process-wide [`RotationState`].

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Instant;

use incall_types::{Rotation, RotationSample, UiEffect};

/// Half-width of the window around each quarter turn, in degrees.
///
/// Readings between windows (around 45 degrees and so on) are ignored so the
/// display does not flip back and forth while the device is held diagonally.
pub const ROTATION_TOLERANCE_DEGREES: i32 = 23;

#[derive(Debug, Default)]
struct RotationInner {
    committed: Option<Rotation>,
    last_sample_at: Option<Instant>,
}

/// Last committed rotation, shared by every screen in the process.
///
/// Starts out unknown and is never torn down. Only [`RotationTracker`]
/// writes it.
#[derive(Debug, Default)]
pub struct RotationState {
    inner: Mutex<RotationInner>,
}

static GLOBAL_ROTATION: OnceLock<Arc<RotationState>> = OnceLock::new();

impl RotationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL_ROTATION.get_or_init(|| Arc::new(Self::new())))
    }

    #[must_use]
    pub fn committed(&self) -> Option<Rotation> {
        self.lock().committed
    }

    #[must_use]
    pub fn last_sample_at(&self) -> Option<Instant> {
        self.lock().last_sample_at
    }

    fn lock(&self) -> MutexGuard<'_, RotationInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn note_sample(&self, at: Instant) {
        self.lock().last_sample_at = Some(at);
    }

    /// Store `rotation`, returning whether it differs from what was stored.
    fn commit(&self, rotation: Rotation) -> bool {
        let mut inner = self.lock();
        if inner.committed == Some(rotation) {
            return false;
        }
        inner.committed = Some(rotation);
        true
    }
}

/// A committed rotation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationChange {
    pub previous: Option<Rotation>,
    pub rotation: Rotation,
}

impl RotationChange {
    /// The two notifications produced by one change, in delivery order.
    ///
    /// Consumers may treat the orientation notification as confirmation of
    /// the rotation notification, so the order must not change.
    #[must_use]
    pub fn effects(self) -> [UiEffect; 2] {
        [
            UiEffect::RotationChanged {
                rotation: self.rotation,
            },
            UiEffect::OrientationChanged {
                rotation: self.rotation,
            },
        ]
    }
}

/// Map a sensor reading in degrees to a display rotation.
///
/// Sensor orientation and display rotation turn in opposite directions, so a
/// device turned 90 degrees clockwise needs the display rotated by 270.
#[must_use]
pub fn quantize(degrees: i32) -> Option<Rotation> {
    let degrees = degrees.rem_euclid(360);
    let near = |target: i32| (degrees - target).abs() <= ROTATION_TOLERANCE_DEGREES;

    if near(0) || near(360) {
        Some(Rotation::Rotation0)
    } else if near(90) {
        Some(Rotation::Rotation270)
    } else if near(180) {
        Some(Rotation::Rotation180)
    } else if near(270) {
        Some(Rotation::Rotation90)
    } else {
        None
    }
}

/// Turns raw orientation samples into rotation changes.
#[derive(Debug)]
pub struct RotationTracker {
    state: Arc<RotationState>,
    enabled: bool,
}

impl RotationTracker {
    /// New tracker writing to `state`. Starts disabled.
    #[must_use]
    pub fn new(state: Arc<RotationState>) -> Self {
        Self {
            state,
            enabled: false,
        }
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            tracing::debug!("Orientation detection enabled");
        }
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        if self.enabled {
            tracing::debug!("Orientation detection disabled");
        }
        self.enabled = false;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn state(&self) -> &Arc<RotationState> {
        &self.state
    }

    /// Feed one sample; returns the change it caused, if any.
    pub fn on_sample(&mut self, sample: RotationSample) -> Option<RotationChange> {
        if !self.enabled {
            return None;
        }

        let RotationSample::Degrees(degrees) = sample else {
            // Device is flat.
            return None;
        };
        self.state.note_sample(Instant::now());

        let Some(rotation) = quantize(degrees) else {
            tracing::trace!(degrees, "Orientation between quarter turns, ignoring");
            return None;
        };

        let previous = self.state.committed();
        if !self.state.commit(rotation) {
            return None;
        }

        tracing::debug!(?previous, ?rotation, "Device rotation changed");
        Some(RotationChange { previous, rotation })
    }

    /// Lazily map a sample stream to the changes it produces.
    ///
    /// The returned iterator is as long as `samples`; for a live sensor feed
    /// that is effectively unbounded.
    pub fn changes<'a, I>(&'a mut self, samples: I) -> impl Iterator<Item = RotationChange> + 'a
    where
        I: IntoIterator<Item = RotationSample>,
        I::IntoIter: 'a,
    {
        samples
            .into_iter()
            .filter_map(move |sample| self.on_sample(sample))
    }
}
