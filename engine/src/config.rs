use std::path::{Path, PathBuf};
use std::time::Duration;

use incall_core::TransitionStyle;
use incall_types::SlideEdge;
use serde::Deserialize;
use thiserror::Error;

// Default value functions for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

const fn default_dialpad_animation_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ScreenConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Disable dialpad slide transitions.
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub layout_direction: LayoutDirection,
    /// Length of the dialpad slide, in milliseconds.
    #[serde(default = "default_dialpad_animation_ms")]
    pub dialpad_animation_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            layout_direction: LayoutDirection::Ltr,
            dialpad_animation_ms: default_dialpad_animation_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RotationConfig {
    /// Whether the device can report its orientation at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Orientation the host created the screen in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScreenOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// Facts about the host window known at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenOptions {
    pub orientation: ScreenOrientation,
}

impl ScreenConfig {
    /// Load `~/.incall/config.toml`. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Edge the dialpad slides from for a screen created with `options`.
    #[must_use]
    pub fn slide_edge(&self, options: ScreenOptions) -> SlideEdge {
        match (options.orientation, self.ui.layout_direction) {
            (ScreenOrientation::Portrait, _) => SlideEdge::Bottom,
            (ScreenOrientation::Landscape, LayoutDirection::Ltr) => SlideEdge::Right,
            (ScreenOrientation::Landscape, LayoutDirection::Rtl) => SlideEdge::Left,
        }
    }

    #[must_use]
    pub fn transition_style(&self, options: ScreenOptions) -> TransitionStyle {
        TransitionStyle {
            animations_enabled: !self.ui.reduced_motion,
            edge: self.slide_edge(options),
            duration: Duration::from_millis(self.ui.dialpad_animation_ms),
        }
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".incall").join("config.toml"))
}
