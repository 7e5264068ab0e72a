use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Root directory for sealed file blobs.
    pub data_dir: PathBuf,
    /// Seconds between retention sweeps. Zero disables the sweeper.
    pub sweep_interval_secs: u64,
    pub max_upload_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7655".parse().expect("static addr is valid"),
            data_dir: PathBuf::from("./data"),
            sweep_interval_secs: 60,
            max_upload_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:7655".parse::<SocketAddr>().unwrap());
        assert_eq!(c.sweep_interval_secs, 60);
        assert_eq!(c.max_upload_bytes, 100 * 1024 * 1024);
        assert_eq!(c.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: ServerConfig = toml::from_str("sweep_interval_secs = 5").unwrap();
        assert_eq!(parsed.sweep_interval_secs, 5);
        assert_eq!(parsed.max_upload_bytes, ServerConfig::default().max_upload_bytes);
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ember.toml");
        std::fs::write(
            &path,
            "bind_addr = \"0.0.0.0:8080\"\nmax_upload_bytes = 1024\n",
        )
        .unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_upload_bytes, 1024);
    }

    #[test]
    fn from_file_missing_is_error() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/ember.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }

    #[test]
    fn from_file_bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "bind_addr = 42").unwrap();
        let err = ServerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
