use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Runtime configuration for the HTTP server.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the browser client, served for non-API paths.
    pub static_dir: Option<PathBuf>,
    /// Load the sample users and posts at startup.
    pub seed: bool,
    /// Allow cross-origin requests from any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
            seed: true,
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert!(c.static_dir.is_none());
        assert!(c.seed);
        assert!(c.cors_permissive);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("bind_addr = \"0.0.0.0:8080\"\nseed = false\n").unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert!(!c.seed);
        assert!(c.cors_permissive);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn from_file_reads_static_dir() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "static_dir = \"public\"").unwrap();
        let c = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(c.static_dir, Some(PathBuf::from("public")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
