use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 3002;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_data_dir() -> PathBuf {
    // $XDG_DATA_HOME/taskd, ~/.local/share/taskd, or ./taskd-data as a
    // last resort.
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("taskd");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("taskd");
    }
    PathBuf::from("taskd-data")
}

/// Optional overrides read from `{data_dir}/config.toml` — all fields
/// optional, lowest priority in the layering.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TomlConfig {
    port: Option<u16>,
    bind_address: Option<String>,
    log: Option<String>,
    log_format: Option<String>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("ignoring malformed {}: {e}", path.display());
            None
        }
    }
}

/// Resolved server configuration.
///
/// Layering per field: CLI flag / env (via clap) > config.toml > default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub log: String,
    /// "compact" or "json".
    pub log_format: String,
}

impl ServerConfig {
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
        log_format: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let log_format = log_format
            .or(toml.log_format)
            .unwrap_or_else(|| "compact".to_string());

        Self {
            port,
            bind_address,
            data_dir,
            log,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServerConfig::new(None, Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 3002);
        assert_eq!(cfg.bind_address, "127.0.0.1");
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.log_format, "compact");
    }

    #[test]
    fn test_toml_layer_and_flag_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "port = 4000\nlog = \"debug\"\n",
        )
        .unwrap();
        let cfg = ServerConfig::new(None, Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.log, "debug");

        // Explicit flag beats the file.
        let cfg = ServerConfig::new(Some(5000), Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn test_malformed_toml_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "port = \"not a port").unwrap();
        let cfg = ServerConfig::new(None, Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.port, 3002);
    }
}
