//! Modal dialogs owned by the screen.
//!
//! At most one modal dialog is on screen at a time. A post-character-wait
//! prompt that arrives while the screen is in the background is parked and
//! shown once the screen comes back; only the most recent request is kept.

use incall_types::{CallId, DialogHandle, DialogKind, NonEmptyString, UiEffect};

use crate::EffectQueue;

/// A post-char-wait prompt waiting for the screen to come to the foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDialogRequest {
    pub call_id: CallId,
    pub chars: String,
}

/// The modal dialog currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDialog {
    pub handle: DialogHandle,
    pub kind: DialogKind,
}

#[derive(Debug, Default)]
pub struct DialogQueue {
    next_handle: u64,
    active: Option<ActiveDialog>,
    pending: Option<PendingDialogRequest>,
    finish_deferred: bool,
}

impl DialogQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveDialog> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingDialogRequest> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_finish_deferred(&self) -> bool {
        self.finish_deferred
    }

    /// Ask for the post-char-wait prompt for `call_id`.
    ///
    /// Shown right away when `foreground`, otherwise parked until
    /// [`DialogQueue::on_foreground`], replacing any earlier parked request.
    pub fn request_post_char_dialog(
        &mut self,
        call_id: CallId,
        chars: impl Into<String>,
        foreground: bool,
        out: &mut EffectQueue,
    ) {
        let chars = chars.into();
        if foreground {
            self.pending = None;
            self.show(DialogKind::PostCharWait { call_id, chars }, out);
            return;
        }

        if let Some(dropped) = self.pending.replace(PendingDialogRequest {
            call_id: call_id.clone(),
            chars,
        }) {
            tracing::debug!(
                dropped_call_id = %dropped.call_id,
                %call_id,
                "Replacing parked post-char dialog"
            );
        } else {
            tracing::debug!(%call_id, "Parking post-char dialog until foreground");
        }
    }

    /// Show the parked post-char-wait prompt, if any. Runs at most once per
    /// parked request.
    pub fn on_foreground(&mut self, out: &mut EffectQueue) {
        if let Some(PendingDialogRequest { call_id, chars }) = self.pending.take() {
            self.show(DialogKind::PostCharWait { call_id, chars }, out);
        }
    }

    /// Replace whatever dialog is up with an error dialog.
    ///
    /// `message` is shown verbatim.
    pub fn show_error(&mut self, message: NonEmptyString, out: &mut EffectQueue) {
        tracing::info!(%message, "Showing error dialog");
        self.show(DialogKind::Error { message }, out);
    }

    fn show(&mut self, kind: DialogKind, out: &mut EffectQueue) {
        self.dismiss_active(out);

        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = DialogHandle::new(self.next_handle);
        self.active = Some(ActiveDialog {
            handle,
            kind: kind.clone(),
        });
        out.push(UiEffect::ShowDialog {
            handle,
            dialog: kind,
        });
    }

    /// Programmatically take down the active dialog. Does not notify the
    /// presenter.
    pub fn dismiss_active(&mut self, out: &mut EffectQueue) {
        if let Some(active) = self.active.take() {
            out.push(UiEffect::DismissDialog {
                handle: active.handle,
            });
        }
    }

    /// The user closed dialog `handle` (button or cancel).
    ///
    /// The active slot is cleared before the presenter hears about it, so
    /// a dialog shown in reaction to the notification is not clobbered.
    /// Returns whether `handle` was the active dialog.
    pub fn on_dismissed(&mut self, handle: DialogHandle, out: &mut EffectQueue) -> bool {
        match &self.active {
            Some(active) if active.handle == handle => {
                self.active = None;
                out.push(UiEffect::DialogDismissed);
                true
            }
            _ => {
                tracing::debug!(%handle, "Ignoring dismissal of a dialog that is no longer shown");
                false
            }
        }
    }

    #[must_use]
    pub fn has_pending_dialogs(&self, answer_has_dialogs: bool) -> bool {
        self.active.is_some() || answer_has_dialogs
    }

    /// Close the screen unless a dialog is still pending.
    ///
    /// A refused finish is remembered and re-attempted by
    /// [`DialogQueue::retry_deferred_finish`]. Returns whether the screen
    /// finished now.
    pub fn request_finish(&mut self, answer_has_dialogs: bool, out: &mut EffectQueue) -> bool {
        if self.has_pending_dialogs(answer_has_dialogs) {
            tracing::info!(
                dialog_showing = self.active.is_some(),
                answer_has_dialogs,
                "Deferring finish until dialogs clear"
            );
            self.finish_deferred = true;
            return false;
        }
        self.finish_deferred = false;
        out.push(UiEffect::Finish);
        true
    }

    /// Emit the deferred finish once nothing is pending any more.
    pub fn retry_deferred_finish(&mut self, answer_has_dialogs: bool, out: &mut EffectQueue) {
        if self.finish_deferred && !self.has_pending_dialogs(answer_has_dialogs) {
            self.finish_deferred = false;
            out.push(UiEffect::Finish);
        }
    }
}
