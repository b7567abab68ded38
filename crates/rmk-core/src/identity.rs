//! Reviewer identity passed between crates.

use serde::{Deserialize, Serialize};

/// Lightweight authenticated reviewer identity for cross-crate passing.
///
/// Produced by the identity-provider collaborator in `rmk-remote`, consumed
/// by the CLI for display. Contains only data fields — no auth logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerIdentity {
    /// Reviewer email address.
    pub email: String,
    /// Opaque credential issued by the identity provider. Never inspected
    /// by Rowmark, only forwarded to collaborators that require it.
    pub credential: String,
}
