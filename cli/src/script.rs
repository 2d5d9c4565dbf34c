//! JSON-lines event scripts.
//!
//! One event per line, tagged by `"event"`. Blank lines and lines starting
//! with `#` are skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use incall_types::{
    CallId, CallSnapshot, DisconnectCause, IntentParams, PanelId, PhoneAccountHandle,
};
use serde::Deserialize;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ScriptEvent {
    Start,
    Stop,
    Destroy,
    Foreground {
        foreground: bool,
    },
    Intent {
        #[serde(default)]
        params: IntentParams,
    },
    /// Sensor reading; a missing `degrees` means the device is flat.
    Rotation {
        #[serde(default)]
        degrees: Option<i32>,
    },
    Back,
    Up,
    /// `key` uses host key names (`call`, `mute`, `5`, ...).
    Key {
        key: String,
        #[serde(default)]
        up: bool,
        #[serde(default)]
        repeat: u32,
    },
    Touch {
        x: i32,
        y: i32,
    },
    /// Replace the call list.
    Calls {
        calls: Vec<CallSnapshot>,
    },
    PostChar {
        call_id: CallId,
        chars: String,
    },
    /// A call disconnected.
    Error {
        cause: DisconnectCause,
    },
    /// User dismissed dialog `handle`; without a handle every dialog goes.
    Dismiss {
        #[serde(default)]
        handle: Option<u64>,
    },
    Dialpad {
        show: bool,
        #[serde(default)]
        animate: bool,
    },
    Answer {
        show: bool,
    },
    Conference {
        show: bool,
    },
    AnswerDialog {
        open: bool,
    },
    AnimationFinished {
        panel: PanelId,
    },
    /// Advance running slide transitions.
    Tick {
        ms: u64,
    },
    /// Host attached a panel by tag.
    Attach {
        tag: String,
        #[serde(default = "default_true")]
        visible: bool,
    },
    AccountSelected {
        account: PhoneAccountHandle,
        #[serde(default)]
        set_default: bool,
    },
    AccountCancelled,
    AccountDialogRestored {
        call_id: CallId,
    },
    Finish,
    /// Save screen state, to `path` when given.
    Save {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// Restore the last saved state, from `path` when given.
    Restore {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

/// Parse a whole script, reporting the offending line on failure.
pub fn parse_script(content: &str) -> Result<Vec<ScriptEvent>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("line {}: invalid event", index + 1))
        })
        .collect()
}
