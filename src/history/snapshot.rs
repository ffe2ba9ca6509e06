use std::sync::Arc;

/// Serialized state of a whole document at one point in time.
///
/// Opaque to the history: snapshots are only compared for equality and
/// handed back to the engine. Cloning shares the underlying text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(Arc<str>);

impl Snapshot {
    pub fn new(data: impl Into<Arc<str>>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Snapshot {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for Snapshot {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for Snapshot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
