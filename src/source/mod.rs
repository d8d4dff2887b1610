//! Snapshot sources
//!
//! A [`Source`] turns a resource path into the raw document bytes, or a
//! [`LoadError`] when the retrieval does not succeed. Parsing is left to the
//! loader.
//!
//! - [`http`] - Fetches from the dashboard's web server
//! - [`dir`] - Reads from a local directory

pub mod dir;
pub mod http;

use crate::error::LoadError;
pub use dir::DirSource;
pub use http::HttpSource;

/// Where snapshots are retrieved from
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    Dir(DirSource),
}

impl Source {
    /// Retrieve the raw body for a resource path
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        match self {
            Source::Http(source) => source.fetch(path).await,
            Source::Dir(source) => source.fetch(path).await,
        }
    }

    /// Where a path would be retrieved from, for display
    pub fn describe(&self, path: &str) -> String {
        match self {
            Source::Http(source) => source
                .resolve(path)
                .map(|url| url.to_string())
                .unwrap_or_else(|e| e.to_string()),
            Source::Dir(source) => source.resolve(path).display().to_string(),
        }
    }
}

impl From<HttpSource> for Source {
    fn from(source: HttpSource) -> Self {
        Source::Http(source)
    }
}

impl From<DirSource> for Source {
    fn from(source: DirSource) -> Self {
        Source::Dir(source)
    }
}
