//! Display rotation values.

use serde::{Deserialize, Serialize};

/// Display rotation in fixed 90 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

/// One raw reading from the orientation sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationSample {
    /// Device is lying flat; no usable orientation.
    Unknown,
    /// Clockwise device orientation in degrees.
    Degrees(i32),
}
