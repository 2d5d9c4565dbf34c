//! Hardware key events delivered by the host.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    Call,
    Camera,
    VolumeUp,
    VolumeDown,
    VolumeMute,
    Mute,
    /// A printable key: digits, `*`, `#`, letters.
    Char(char),
}

impl KeyCode {
    /// The DTMF tone this key produces, if any.
    #[must_use]
    pub fn dtmf_char(self) -> Option<char> {
        match self {
            Self::Char(c) if c.is_ascii_digit() || c == '*' || c == '#' => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key code: {0}")]
pub struct UnknownKeyCode(pub String);

impl FromStr for KeyCode {
    type Err = UnknownKeyCode;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let code = match name {
            "call" => Self::Call,
            "camera" => Self::Camera,
            "volume_up" => Self::VolumeUp,
            "volume_down" => Self::VolumeDown,
            "volume_mute" => Self::VolumeMute,
            "mute" => Self::Mute,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(UnknownKeyCode(other.to_string())),
                }
            }
        };
        Ok(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPhase {
    /// `repeat` counts auto-repeat events while the key is held.
    Down { repeat: u32 },
    Up,
}
