pub mod auth;
pub mod datasets;
pub mod label;
pub mod progress;

use std::sync::Arc;

use anyhow::Context;
use rmk_config::RowmarkConfig;
use rmk_core::DatasetIdentity;
use rmk_remote::{DatasetCatalog, IdentityProvider, ObjectStoreCatalog, StoredIdentity};
use rmk_session::SessionOptions;

/// Build the configured catalog as a trait object.
pub fn catalog(config: &RowmarkConfig) -> anyhow::Result<Arc<dyn DatasetCatalog>> {
    let catalog = ObjectStoreCatalog::from_config(&config.remote)
        .context("could not open remote dataset storage")?;
    Ok(Arc::new(catalog))
}

/// Authenticate the reviewer (terminal on failure).
pub async fn authenticate(config: &RowmarkConfig) -> anyhow::Result<rmk_core::ReviewerIdentity> {
    StoredIdentity::new(config.auth.clone())
        .authenticate()
        .await
        .context("authentication failed")
}

/// Resolve a dataset by display name (or full id) from the catalog listing.
pub async fn resolve_dataset(
    catalog: &Arc<dyn DatasetCatalog>,
    name: &str,
) -> anyhow::Result<DatasetIdentity> {
    let datasets = catalog.list().await?;
    tracing::debug!(candidates = datasets.len(), "resolving dataset by name");
    datasets
        .into_iter()
        .find(|d| d.name == name || d.id == name)
        .with_context(|| format!("dataset '{name}' not found — run `rmk datasets` to list them"))
}

pub fn session_options(config: &RowmarkConfig) -> SessionOptions {
    SessionOptions {
        label_column: config.labeling.label_column.clone(),
        unsure_budget: config.labeling.unsure_budget,
    }
}
