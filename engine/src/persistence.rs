//! Screen state that survives the host tearing the screen down and
//! recreating it (configuration changes, process trimming).
//!
//! Only the dialpad is persisted: whether it was shown and what had been
//! dialed into it. Everything else is rebuilt from the call list.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedScreenState {
    #[serde(default)]
    pub show_dialpad: bool,
    #[serde(default)]
    pub dtmf_text: String,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to encode saved screen state")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode saved screen state")]
    Decode(#[source] serde_json::Error),
    #[error("failed to access saved screen state at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SavedScreenState {
    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string(self).map_err(StateError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        serde_json::from_str(json).map_err(StateError::Decode)
    }

    /// Write to `path`, replacing it atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), StateError> {
        let io_err = |source| StateError::Io {
            path: path.display().to_string(),
            source,
        };
        let json = self.to_json()?;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::Builder::new()
            .prefix("incall_state_")
            .tempfile_in(parent)
            .map_err(io_err)?;
        temp.write_all(json.as_bytes()).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(path).map_err(|e| io_err(e.error))?;
        tracing::debug!(path = %path.display(), "Saved screen state");
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, StateError> {
        let json = std::fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::{SavedScreenState, StateError};

    #[test]
    fn missing_fields_default() {
        let state = SavedScreenState::from_json("{}").unwrap();
        assert_eq!(state, SavedScreenState::default());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = SavedScreenState::from_json("not json").unwrap_err();
        assert!(matches!(err, StateError::Decode(_)));
    }

    #[test]
    fn file_round_trip_replaces_previous() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("state.json");

        SavedScreenState {
            show_dialpad: false,
            dtmf_text: String::new(),
        }
        .save_to(&path)
        .unwrap();
        let state = SavedScreenState {
            show_dialpad: true,
            dtmf_text: "*31#".to_string(),
        };
        state.save_to(&path).unwrap();

        assert_eq!(SavedScreenState::load_from(&path).unwrap(), state);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let err = SavedScreenState::load_from(&tmp_dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StateError::Io { .. }));
    }
}
