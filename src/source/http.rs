//! HTTP retrieval of snapshot documents

use crate::error::LoadError;
use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

const USER_AGENT: &str = concat!("dashdata/", env!("CARGO_PKG_VERSION"));

/// Truncate a response body and strip control characters for logging
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Fetches resource paths relative to the dashboard server
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    /// Create a source for the given base URL (`http://localhost:5173`)
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Self::with_client(client, base_url)
    }

    /// Use an existing client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL '{}'", base_url))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource path against the base URL. Absolute paths replace
    /// the base URL's path, the same way a browser resolves them.
    pub fn resolve(&self, path: &str) -> Result<Url, LoadError> {
        self.base_url
            .join(path)
            .map_err(|source| LoadError::InvalidUrl {
                path: path.to_string(),
                source,
            })
    }

    /// GET a resource path and return its body bytes. The body is not
    /// decoded here, so invalid UTF-8 reaches the JSON parser untouched.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.resolve(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            tracing::error!(
                "{} returned {} - {}",
                path,
                status,
                sanitize_for_log(&String::from_utf8_lossy(&body))
            );
            return Err(LoadError::Missing {
                path: path.to_string(),
                status: Some(status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|source| LoadError::Transport {
            path: path.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(logged.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("Not\nFound\t!"), "NotFound!");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = format!("{}é{}", "a".repeat(MAX_LOG_BODY_LENGTH - 1), "b".repeat(50));
        let logged = sanitize_for_log(&body);
        assert!(logged.contains("[truncated"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let source = HttpSource::new("http://localhost:5173").unwrap();
        let url = source.resolve("/src/data/kpi_snapshot.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/src/data/kpi_snapshot.json");
    }

    #[test]
    fn test_resolve_relative_path_keeps_base_directory() {
        let source = HttpSource::new("http://localhost:5173/app/").unwrap();
        let url = source.resolve("data/kpi_snapshot.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/app/data/kpi_snapshot.json");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpSource::new("not a url").is_err());
    }
}
