//! Load errors
//!
//! Every failure carries the resource path it was raised for, so callers can
//! tell which snapshot went wrong without inspecting the transport.

use thiserror::Error;

/// Failure to load a dashboard resource
#[derive(Debug, Error)]
pub enum LoadError {
    /// The retrieval completed but did not succeed (non-2xx status, or no
    /// such file in a directory source)
    #[error("Missing: {path}")]
    Missing { path: String, status: Option<u16> },

    /// The body was retrieved but is not valid JSON for the requested shape
    #[error("Malformed data at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced a response
    #[error("Failed to retrieve {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local read failure other than not-found
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource path cannot be joined onto the base URL
    #[error("Invalid URL for {path}: {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl LoadError {
    /// Path of the resource that failed
    pub fn path(&self) -> &str {
        match self {
            LoadError::Missing { path, .. }
            | LoadError::Malformed { path, .. }
            | LoadError::Transport { path, .. }
            | LoadError::Io { path, .. }
            | LoadError::InvalidUrl { path, .. } => path,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LoadError::Missing { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, LoadError::Malformed { .. })
    }
}

/// Format a load error as a single line for terminal output
pub fn format_load_error(error: &LoadError) -> String {
    match error {
        LoadError::Missing {
            path,
            status: Some(404),
        } => format!("Missing: {} (not found)", path),
        LoadError::Missing {
            path,
            status: Some(status),
        } if (500..600).contains(status) => {
            format!("Missing: {} (server error {})", path, status)
        }
        LoadError::Missing {
            path,
            status: Some(status),
        } => format!("Missing: {} (status {})", path, status),
        LoadError::Missing { path, status: None } => format!("Missing: {}", path),
        LoadError::Malformed { path, source } => {
            format!("Malformed data at {} (line {}, column {})", path, source.line(), source.column())
        }
        LoadError::Transport { path, source } if source.is_connect() => {
            format!("Cannot connect while loading {}. Is the dashboard server running?", path)
        }
        LoadError::Transport { path, source } if source.is_timeout() => {
            format!("Timed out while loading {}", path)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_carries_path() {
        let err = LoadError::Missing {
            path: "/src/data/payer_summary.json".to_string(),
            status: Some(404),
        };
        assert_eq!(err.to_string(), "Missing: /src/data/payer_summary.json");
        assert_eq!(err.path(), "/src/data/payer_summary.json");
        assert!(err.is_missing());
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_malformed_keeps_parser_diagnostic() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = LoadError::Malformed {
            path: "/src/data/denial_trends.json".to_string(),
            source,
        };
        assert!(err.is_malformed());
        assert!(err.to_string().starts_with("Malformed data at /src/data/denial_trends.json"));
        assert!(format_load_error(&err)
            .starts_with("Malformed data at /src/data/denial_trends.json (line 1, column"));
    }

    #[test]
    fn test_format_missing_by_status() {
        let not_found = LoadError::Missing {
            path: "/a.json".to_string(),
            status: Some(404),
        };
        let server = LoadError::Missing {
            path: "/a.json".to_string(),
            status: Some(503),
        };
        let forbidden = LoadError::Missing {
            path: "/a.json".to_string(),
            status: Some(403),
        };
        let file = LoadError::Missing {
            path: "/a.json".to_string(),
            status: None,
        };
        assert_eq!(format_load_error(&not_found), "Missing: /a.json (not found)");
        assert_eq!(format_load_error(&server), "Missing: /a.json (server error 503)");
        assert_eq!(format_load_error(&forbidden), "Missing: /a.json (status 403)");
        assert_eq!(format_load_error(&file), "Missing: /a.json");
    }
}
