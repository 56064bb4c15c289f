//! Catalog snapshot loading
//!
//! The catalog store is external; the gateway only ever reads a serialized
//! `CatalogSnapshot` from a file path or an HTTP endpoint, at startup and
//! again on the explicit admin reload.

use league_engine::CatalogSnapshot;
use std::path::PathBuf;
use thiserror::Error;

/// Where the catalog snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http(String),
}

impl CatalogSource {
    /// `http(s)://` strings are endpoints; everything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            CatalogSource::Http(raw.to_string())
        } else {
            CatalogSource::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => format!("file:{}", path.display()),
            CatalogSource::Http(url) => url.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog endpoint error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed catalog snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fetch and parse a catalog snapshot from the configured source.
pub async fn load_catalog(
    client: &reqwest::Client,
    source: &CatalogSource,
) -> Result<CatalogSnapshot, CatalogLoadError> {
    match source {
        CatalogSource::File(path) => {
            let raw = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&raw)?)
        }
        CatalogSource::Http(url) => {
            let response = client.get(url).send().await?.error_for_status()?;
            Ok(response.json().await?)
        }
    }
}
