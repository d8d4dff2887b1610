//! Local directory retrieval
//!
//! Reads snapshots straight from the directory the generators write to,
//! without a dev server in between.

use crate::error::LoadError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a resource path maps to. The leading `/` is dropped so that
    /// resource paths stay relative to the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// Read a resource path and return its raw contents
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let file = self.resolve(path);
        tracing::debug!("READ {}", file.display());

        match tokio::fs::read(&file).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::error!("{} not found at {}", path, file.display());
                Err(LoadError::Missing {
                    path: path.to_string(),
                    status: None,
                })
            }
            Err(source) => Err(LoadError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}
