//! Dataset handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a remote tabular resource.
///
/// Created when the storage collaborator enumerates available datasets and
/// never modified afterwards. The `id` is the collaborator's key for the
/// resource (an object path for object-store backends); the `name` is what
/// gets shown to the reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetIdentity {
    /// Collaborator-scoped resource key.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
}

impl DatasetIdentity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DatasetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
