//! Reviewer credential configuration.

use serde::{Deserialize, Serialize};

/// Credentials obtained out-of-band from the identity provider.
///
/// Rowmark never performs an identity-provider handshake itself; the reviewer
/// supplies an email and an opaque credential (via env, config file, or
/// `rmk auth set`) and Rowmark only stores and forwards them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub email: String,

    /// Opaque credential token. Never logged.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.email.is_empty() && !self.token.is_empty()
    }
}
