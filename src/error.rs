//! Error kinds shared by the fetch, parse, classify and persist stages.
//!
//! Field-level extraction problems never show up here: they degrade to
//! sentinel values or become [`crate::models::Diagnostic`]s. This enum is
//! reserved for failures that abort at least one source.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Network failure or non-2xx response.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// An expected structural element, selector or JSON key is missing.
    #[error("parse error: {0}")]
    Parse(String),

    /// The external classifier was unreachable or answered nonsense.
    #[error("classification error: {0}")]
    Classification(String),

    /// Writing the output document failed.
    #[error("could not write {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Strict mode: one or more sources reported diagnostics.
    #[error("{0} source diagnostic(s) reported in strict mode")]
    Diagnostics(usize),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let url = e
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        Error::Fetch {
            url,
            reason: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let e = Error::Fetch {
            url: "https://apnews.com/".to_string(),
            reason: "HTTP 503".to_string(),
        };
        assert_eq!(e.to_string(), "fetch failed for https://apnews.com/: HTTP 503");
    }

    #[test]
    fn test_persist_error_keeps_io_source() {
        let e = Error::Persist {
            path: "out.json".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().starts_with("could not write out.json"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
