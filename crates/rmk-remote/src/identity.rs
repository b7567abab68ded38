//! Identity provider contract and stored-credential implementation.
//!
//! Rowmark never performs the identity-provider handshake itself — the
//! handshake happens out-of-band and Rowmark only stores and resolves the
//! resulting credential. Resolution priority: config/env (via
//! [`AuthConfig`]) → credentials file (`~/.config/rowmark/credentials`).

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rmk_config::AuthConfig;
use rmk_core::ReviewerIdentity;

use crate::error::AuthError;

const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Opaque "authenticate the reviewer" operation.
///
/// Failures are terminal: the caller surfaces them and the reviewer signs in
/// again. No retry logic lives behind this trait.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self) -> Result<ReviewerIdentity, AuthError>;
}

/// Identity provider backed by stored credentials.
#[derive(Debug, Clone, Default)]
pub struct StoredIdentity {
    auth: AuthConfig,
    /// Credentials file override; `None` uses the user config dir.
    credentials_file: Option<PathBuf>,
}

impl StoredIdentity {
    #[must_use]
    pub const fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            credentials_file: None,
        }
    }

    /// Use an explicit credentials file instead of the default location.
    #[must_use]
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    fn resolve_file(&self) -> Result<PathBuf, AuthError> {
        self.credentials_file
            .clone()
            .map_or_else(credentials_path, Ok)
    }
}

#[async_trait]
impl IdentityProvider for StoredIdentity {
    async fn authenticate(&self) -> Result<ReviewerIdentity, AuthError> {
        // 1. Config (already layered over ROWMARK_AUTH__* env vars)
        if self.auth.is_configured() {
            return Ok(ReviewerIdentity {
                email: self.auth.email.clone(),
                credential: self.auth.token.clone(),
            });
        }

        // 2. Credentials file
        let path = self.resolve_file()?;
        load_from(&path).ok_or(AuthError::NotAuthenticated)
    }
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    let base = dirs::config_dir().ok_or_else(|| {
        AuthError::CredentialStore("could not determine user config directory".to_string())
    })?;
    Ok(base.join("rowmark").join(CREDENTIALS_FILE_NAME))
}

fn load_from(path: &Path) -> Option<ReviewerIdentity> {
    let body = fs::read_to_string(path).ok()?;
    serde_json::from_str(&body).ok()
}

/// Persist credentials to the user config dir.
///
/// # Errors
///
/// Returns [`AuthError::CredentialStore`] if the file cannot be written.
pub fn store(identity: &ReviewerIdentity) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AuthError::CredentialStore(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    let body =
        serde_json::to_string(identity).map_err(|e| AuthError::CredentialStore(e.to_string()))?;
    fs::write(&path, body).map_err(|e| {
        AuthError::CredentialStore(format!("failed to write {}: {e}", path.display()))
    })
}

/// Load stored credentials, if any.
#[must_use]
pub fn load() -> Option<ReviewerIdentity> {
    let path = credentials_path().ok()?;
    load_from(&path)
}

/// Delete stored credentials.
///
/// # Errors
///
/// Returns [`AuthError::CredentialStore`] if the credentials file exists but
/// cannot be removed.
pub fn clear() -> Result<(), AuthError> {
    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::CredentialStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}
