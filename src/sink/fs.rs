// src/sink/fs.rs
// =============================================================================
// Filesystem sink: every key becomes a file below a root directory.
//
// - Parent directories are created on demand
// - Files are opened with create_new, so an existing file is never clobbered
// - Keys may not be absolute or climb out of the root with ".."
// =============================================================================

use super::Sink;
use crate::error::SinkError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writes artifacts to the local filesystem
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsSink { root: root.into() }
    }

    // Maps a key onto a path below the root, rejecting escapes
    fn resolve(&self, key: &str) -> Result<PathBuf, SinkError> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if key.is_empty() || !safe {
            return Err(SinkError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Sink for FsSink {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), SinkError> {
        let path = self.resolve(key)?;
        let io_err = |source: std::io::Error| SinkError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(SinkError::Exists(key.to_string()));
            }
            Err(e) => return Err(io_err(e)),
        };

        file.write_all(content).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_creates_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());

        sink.put("data/raw/1/report_abc.pdf", b"%PDF-1.4").await.unwrap();

        let written = std::fs::read(dir.path().join("data/raw/1/report_abc.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_put_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());

        sink.put("a.pdf", b"first").await.unwrap();
        let err = sink.put("a.pdf", b"second").await.unwrap_err();

        assert!(matches!(err, SinkError::Exists(_)));
        assert_eq!(std::fs::read(dir.path().join("a.pdf")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_put_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());

        for key in ["../evil.pdf", "/etc/evil.pdf", ""] {
            let err = sink.put(key, b"x").await.unwrap_err();
            assert!(matches!(err, SinkError::InvalidKey(_)), "key {:?}", key);
        }
    }
}
