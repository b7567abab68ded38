//! Dataset catalog contract and object-store implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use object_store::path::Path;
use object_store::{ObjectStore, aws::AmazonS3Builder, local::LocalFileSystem};
use rmk_config::RemoteConfig;
use rmk_core::DatasetIdentity;
use tracing::debug;

use crate::error::RemoteError;

/// Opaque storage collaborator: enumerate, fetch, and persist dataset blobs.
///
/// `store` failures are returned, never panicked — the persistence
/// coordinator catches and logs them so the labeling loop keeps running.
#[async_trait]
pub trait DatasetCatalog: Send + Sync {
    /// Enumerate candidate datasets (tabular files only, non-deleted).
    async fn list(&self) -> Result<Vec<DatasetIdentity>, RemoteError>;

    /// Download the raw bytes of a dataset.
    async fn fetch(&self, dataset: &DatasetIdentity) -> Result<Vec<u8>, RemoteError>;

    /// Overwrite the dataset's remote bytes.
    async fn store(&self, dataset: &DatasetIdentity, bytes: Vec<u8>) -> Result<(), RemoteError>;
}

/// [`DatasetCatalog`] over any [`ObjectStore`] backend.
///
/// The backend is chosen by [`RemoteConfig`]: a local directory, or an
/// S3-compatible bucket (AWS, R2, MinIO). Tests use
/// `object_store::memory::InMemory`.
#[derive(Debug)]
pub struct ObjectStoreCatalog {
    store: Arc<dyn ObjectStore>,
    prefix: Option<Path>,
}

impl ObjectStoreCatalog {
    /// Wrap an existing object store, listing/writing under `prefix`
    /// (empty = whole store).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidPath`] if `prefix` is not a valid
    /// object path.
    pub fn new(store: Arc<dyn ObjectStore>, prefix: &str) -> Result<Self, RemoteError> {
        let prefix = if prefix.is_empty() {
            None
        } else {
            Some(Path::parse(prefix)?)
        };
        Ok(Self { store, prefix })
    }

    /// Build the backend named by the config.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotConfigured`] when neither a local root nor
    /// an S3 bucket is configured, or [`RemoteError::ObjectStore`] when the
    /// backend cannot be constructed.
    pub fn from_config(remote: &RemoteConfig) -> Result<Self, RemoteError> {
        let store: Arc<dyn ObjectStore> = if !remote.root.is_empty() {
            Arc::new(LocalFileSystem::new_with_prefix(&remote.root)?)
        } else if !remote.bucket.is_empty() {
            let mut builder = AmazonS3Builder::new()
                .with_bucket_name(&remote.bucket)
                .with_access_key_id(&remote.access_key_id)
                .with_secret_access_key(&remote.secret_access_key);
            if !remote.endpoint.is_empty() {
                builder = builder.with_endpoint(&remote.endpoint);
            }
            if !remote.region.is_empty() {
                builder = builder.with_region(&remote.region);
            }
            Arc::new(builder.build()?)
        } else {
            return Err(RemoteError::NotConfigured);
        };

        Self::new(store, &remote.prefix)
    }
}

#[async_trait]
impl DatasetCatalog for ObjectStoreCatalog {
    async fn list(&self) -> Result<Vec<DatasetIdentity>, RemoteError> {
        let mut stream = self.store.list(self.prefix.as_ref());
        let mut datasets = Vec::new();

        while let Some(meta) = stream.next().await {
            let meta = meta?;
            if meta.location.extension() != Some("csv") {
                continue;
            }
            let name = meta
                .location
                .filename()
                .unwrap_or_else(|| meta.location.as_ref())
                .to_string();
            datasets.push(DatasetIdentity::new(meta.location.to_string(), name));
        }

        datasets.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = datasets.len(), "listed candidate datasets");
        Ok(datasets)
    }

    async fn fetch(&self, dataset: &DatasetIdentity) -> Result<Vec<u8>, RemoteError> {
        let path = Path::parse(&dataset.id)?;
        let bytes = self.store.get(&path).await?.bytes().await?;
        debug!(dataset = %dataset.name, size = bytes.len(), "fetched dataset bytes");
        Ok(bytes.to_vec())
    }

    async fn store(&self, dataset: &DatasetIdentity, bytes: Vec<u8>) -> Result<(), RemoteError> {
        let path = Path::parse(&dataset.id)?;
        let size = bytes.len();
        self.store.put(&path, bytes.into()).await?;
        debug!(dataset = %dataset.name, size, "stored dataset bytes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn seed(store: &InMemory, key: &str, body: &str) {
        store
            .put(&Path::parse(key).unwrap(), body.as_bytes().to_vec().into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_filters_to_csv_objects() {
        let store = InMemory::new();
        seed(&store, "datasets/animals.csv", "id\n1\n").await;
        seed(&store, "datasets/notes.txt", "not tabular").await;
        seed(&store, "datasets/plants.csv", "id\n2\n").await;

        let catalog = ObjectStoreCatalog::new(Arc::new(store), "datasets").unwrap();
        let datasets = catalog.list().await.unwrap();

        let names: Vec<&str> = datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["animals.csv", "plants.csv"]);
    }

    #[tokio::test]
    async fn fetch_and_store_round_trip() {
        let store = InMemory::new();
        seed(&store, "animals.csv", "id\n1\n").await;

        let catalog = ObjectStoreCatalog::new(Arc::new(store), "").unwrap();
        let dataset = DatasetIdentity::new("animals.csv", "animals.csv");

        assert_eq!(catalog.fetch(&dataset).await.unwrap(), b"id\n1\n");

        catalog
            .store(&dataset, b"id\n1\n2\n".to_vec())
            .await
            .unwrap();
        assert_eq!(catalog.fetch(&dataset).await.unwrap(), b"id\n1\n2\n");
    }

    #[tokio::test]
    async fn fetch_missing_dataset_is_an_error() {
        let catalog = ObjectStoreCatalog::new(Arc::new(InMemory::new()), "").unwrap();
        let dataset = DatasetIdentity::new("ghost.csv", "ghost.csv");
        assert!(catalog.fetch(&dataset).await.is_err());
    }

    #[test]
    fn unconfigured_remote_is_rejected() {
        let err = ObjectStoreCatalog::from_config(&RemoteConfig::default()).unwrap_err();
        assert!(matches!(err, RemoteError::NotConfigured));
    }
}
