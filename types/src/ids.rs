use std::fmt;

/// Telecom-assigned call identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CallId(String);

impl CallId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CallId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CallId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifies one shown modal dialog.
///
/// Handles are never reused, so a dismissal for a dialog that was already
/// replaced can be told apart from one for the current dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DialogHandle(u64);

impl DialogHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DialogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
