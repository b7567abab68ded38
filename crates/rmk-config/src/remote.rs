//! Remote blob storage configuration.

use serde::{Deserialize, Serialize};

/// Where dataset files live.
///
/// Two backends: a local directory (`root` set) for single-machine use and
/// tests, or any S3-compatible endpoint (`bucket` + keys set). When both are
/// configured the local directory wins — it is the more explicit choice.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Local directory holding dataset CSVs. Takes precedence when set.
    #[serde(default)]
    pub root: String,

    /// S3-compatible bucket name.
    #[serde(default)]
    pub bucket: String,

    /// Custom endpoint URL for S3-compatible stores (R2, MinIO, ...).
    /// Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    /// Region passed to the S3 client. Empty means the provider default.
    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Key prefix under which dataset objects are listed and written.
    #[serde(default)]
    pub prefix: String,
}

impl RemoteConfig {
    /// Check if the config names a usable backend.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.root.is_empty()
            || (!self.bucket.is_empty()
                && !self.access_key_id.is_empty()
                && !self.secret_access_key.is_empty())
    }
}
