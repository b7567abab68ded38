//! # rmk-core
//!
//! Core domain types shared across all Rowmark crates:
//! - [`DatasetIdentity`] — opaque handle to a remote tabular resource
//! - [`LabelValue`] — the closed label enumeration (reject / accept / unsure)
//! - [`ReviewerIdentity`] — authenticated reviewer passed between crates
//! - [`ProgressSnapshot`] — the progress surface read by the UI layer
//!
//! No I/O and no business logic live here — only data.

pub mod dataset;
pub mod identity;
pub mod label;
pub mod progress;

pub use dataset::DatasetIdentity;
pub use identity::ReviewerIdentity;
pub use label::LabelValue;
pub use progress::ProgressSnapshot;
