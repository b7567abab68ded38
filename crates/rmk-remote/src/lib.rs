//! # rmk-remote
//!
//! Contracts for the opaque external collaborators — the identity provider
//! and the remote blob storage — plus the production implementations:
//! stored credentials for identity, and an [`object_store`]-backed dataset
//! catalog (local directory, S3-compatible bucket, or in-memory for tests).
//!
//! Everything behind these traits is replaceable; the session and
//! persistence crates only see [`IdentityProvider`] and [`DatasetCatalog`].

pub mod catalog;
pub mod error;
pub mod identity;

pub use catalog::{DatasetCatalog, ObjectStoreCatalog};
pub use error::{AuthError, RemoteError};
pub use identity::{IdentityProvider, StoredIdentity};
