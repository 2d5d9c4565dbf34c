//! Ordered effect buffer shared by every state machine in a screen.

use incall_types::UiEffect;

/// Effects waiting to be applied by the host, with a monotonic revision.
///
/// All components of a screen push into one queue so the host sees a single
/// total order. The revision is bumped on every push and lets hosts cheaply
/// detect whether anything new arrived since they last looked.
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    items: Vec<UiEffect>,
    revision: usize,
}

impl EffectQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[UiEffect] {
        &self.items
    }

    #[inline]
    #[must_use]
    pub fn revision(&self) -> usize {
        self.revision
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, effect: UiEffect) {
        self.items.push(effect);
        self.bump();
    }

    pub fn extend(&mut self, effects: impl IntoIterator<Item = UiEffect>) {
        let before = self.items.len();
        self.items.extend(effects);
        if self.items.len() != before {
            self.bump();
        }
    }

    /// Hand every queued effect to the host, oldest first.
    pub fn drain(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.items)
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a EffectQueue {
    type Item = &'a UiEffect;
    type IntoIter = std::slice::Iter<'a, UiEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
