// src/sink/object.rs
// =============================================================================
// Object store sink: every key becomes an object below a root prefix in a
// bucket (S3 in production, object_store's InMemory in tests).
//
// - The root prefix is the configured save path, so "data/raw" plus the key
//   "1/report_<token>.pdf" lands at "data/raw/1/report_<token>.pdf"
// - An existing object is never replaced: put checks with HEAD first
// - Keys may not contain empty, "." or ".." segments
// =============================================================================

use super::Sink;
use crate::error::SinkError;
use async_trait::async_trait;
use object_store::path::{Path as ObjectPath, PathPart};
use object_store::{ObjectStore, PutPayload};
use std::path::Path;
use std::sync::Arc;

/// Writes artifacts to an object store bucket
#[derive(Debug, Clone)]
pub struct ObjectStoreSink {
    store: Arc<dyn ObjectStore>,
    root: ObjectPath,
}

impl ObjectStoreSink {
    pub fn new(store: Arc<dyn ObjectStore>, root: &Path) -> Self {
        let root = root.to_string_lossy();
        let root = root
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .map(PathPart::from)
            .collect();

        ObjectStoreSink { store, root }
    }

    // Maps a key onto an object path below the root
    fn resolve(&self, key: &str) -> Result<ObjectPath, SinkError> {
        let valid = !key.is_empty()
            && key
                .split('/')
                .all(|part| !part.is_empty() && part != "." && part != "..");
        if !valid {
            return Err(SinkError::InvalidKey(key.to_string()));
        }

        Ok(self
            .root
            .parts()
            .chain(key.split('/').map(PathPart::from))
            .collect())
    }
}

#[async_trait]
impl Sink for ObjectStoreSink {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), SinkError> {
        let location = self.resolve(key)?;
        let store_err = |source: object_store::Error| SinkError::Store {
            key: location.to_string(),
            source,
        };

        match self.store.head(&location).await {
            Ok(_) => return Err(SinkError::Exists(key.to_string())),
            Err(object_store::Error::NotFound { .. }) => {}
            Err(e) => return Err(store_err(e)),
        }

        self.store
            .put(&location, PutPayload::from(content.to_vec()))
            .await
            .map_err(store_err)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.store, self.root)
    }
}
