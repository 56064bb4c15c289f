//! Environment-driven gateway configuration

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use types::numeric::Cost;
use types::team::DEFAULT_BUDGET_TOTAL;

use crate::catalog_loader::CatalogSource;

pub const LISTEN_ADDR_VAR: &str = "LEAGUE_LISTEN_ADDR";
pub const CATALOG_SOURCE_VAR: &str = "LEAGUE_CATALOG_SOURCE";
pub const JOURNAL_DIR_VAR: &str = "LEAGUE_JOURNAL_DIR";
pub const JOURNAL_FSYNC_VAR: &str = "LEAGUE_JOURNAL_FSYNC";
pub const BUDGET_TOTAL_VAR: &str = "LEAGUE_BUDGET_TOTAL";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required (catalog snapshot file path or http(s) URL)")]
    MissingCatalogSource(&'static str),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Everything `main` needs to assemble the service.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub catalog_source: CatalogSource,
    /// Journal directory; unset means the store is volatile.
    pub journal_dir: Option<PathBuf>,
    pub journal_fsync: bool,
    pub budget_total: Cost,
}

impl GatewayConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_raw =
            env::var(LISTEN_ADDR_VAR).unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_raw.parse().map_err(|_| ConfigError::Invalid {
            var: LISTEN_ADDR_VAR,
            value: listen_raw.clone(),
        })?;

        let catalog_source = env::var(CATALOG_SOURCE_VAR)
            .map(|s| CatalogSource::parse(&s))
            .map_err(|_| ConfigError::MissingCatalogSource(CATALOG_SOURCE_VAR))?;

        let journal_dir = env::var(JOURNAL_DIR_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let journal_fsync = match env::var(JOURNAL_FSYNC_VAR) {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                var: JOURNAL_FSYNC_VAR,
                value: raw,
            })?,
            Err(_) => true,
        };

        let budget_total = match env::var(BUDGET_TOTAL_VAR) {
            Ok(raw) => raw
                .parse::<u32>()
                .map(Cost::new)
                .map_err(|_| ConfigError::Invalid {
                    var: BUDGET_TOTAL_VAR,
                    value: raw,
                })?,
            Err(_) => DEFAULT_BUDGET_TOTAL,
        };

        Ok(Self {
            listen_addr,
            catalog_source,
            journal_dir,
            journal_fsync,
            budget_total,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" ON "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
