//! Error types for the remote collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `rmk auth set` or set ROWMARK_AUTH__EMAIL / ROWMARK_AUTH__TOKEN")]
    NotAuthenticated,

    #[error("credential store error: {0}")]
    CredentialStore(String),
}

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote storage is not configured (set remote.root or remote.bucket)")]
    NotConfigured,

    #[error("invalid object path: {0}")]
    InvalidPath(#[from] object_store::path::Error),

    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),
}
