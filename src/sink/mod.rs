// src/sink/mod.rs
// =============================================================================
// Storage sinks: where downloaded PDFs end up.
//
// The crawler only needs one operation, `put(key, bytes)`. Keys are
// relative, '/'-separated paths such as "data/raw/1/report_<token>.pdf".
// A sink is append-only by distinct key: it never overwrites.
//
// Currently implements:
// - FsSink: writes under a root directory on the local filesystem
// - ObjectStoreSink: writes below a prefix in an object store bucket (S3)
// =============================================================================

mod fs;
mod object;

pub use fs::FsSink;
pub use object::ObjectStoreSink;

use crate::error::SinkError;
use async_trait::async_trait;

/// A destination for downloaded artifacts
#[async_trait]
pub trait Sink: Send + Sync {
    /// Stores `content` under `key`; fails if the key already exists
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), SinkError>;

    /// Human-readable location for log lines
    fn describe(&self) -> String;
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Keeps artifacts in a map so tests can inspect what was stored
    #[derive(Default)]
    pub struct MemorySink {
        objects: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemorySink {
        pub fn keys(&self) -> Vec<String> {
            let mut keys: Vec<_> = self.objects.lock().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        }

        pub fn get(&self, key: &str) -> Option<Vec<u8>> {
            self.objects.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl Sink for MemorySink {
        async fn put(&self, key: &str, content: &[u8]) -> Result<(), SinkError> {
            let mut objects = self.objects.lock().unwrap();
            if objects.contains_key(key) {
                return Err(SinkError::Exists(key.to_string()));
            }
            objects.insert(key.to_string(), content.to_vec());
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    /// Rejects every write, like a full disk
    #[derive(Default)]
    pub struct FailingSink;

    #[async_trait]
    impl Sink for FailingSink {
        async fn put(&self, key: &str, _content: &[u8]) -> Result<(), SinkError> {
            Err(SinkError::Io {
                path: key.into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }
}
