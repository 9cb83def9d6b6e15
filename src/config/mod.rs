pub mod types;

pub use types::Config;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::Path;

/// Name of the config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "aero-compose.toml";

/// Load configuration from file or use defaults
///
/// An explicit path must exist. Without one, `aero-compose.toml` in the
/// working directory is used when present.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.is_file() {
                return Err(ConfigError::InvalidFile {
                    path: p.to_path_buf(),
                    reason: "file does not exist".to_string(),
                }
                .into());
            }
            p.to_path_buf()
        }
        None => {
            let local = Path::new(DEFAULT_CONFIG_FILE);
            if !local.is_file() {
                log::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                return Ok(Config::default());
            }
            local.to_path_buf()
        }
    };

    log::info!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    validate(&config).map_err(|reason| ConfigError::InvalidFile { path, reason })?;
    Ok(config)
}

/// Parse a TOML document, filling every missing field with its default
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(ConfigError::from)?;
    Ok(config)
}

fn validate(config: &Config) -> std::result::Result<(), String> {
    if config.ports.step == 0 {
        return Err("ports.step must be at least 1".to_string());
    }
    if config.ports.base == 0 {
        return Err("ports.base must be a valid port".to_string());
    }
    if config.cluster.name.trim().is_empty() {
        return Err("cluster.name must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[ports]\nbase = 40000\n").unwrap();
        assert_eq!(config.ports.base, 40000);
        assert_eq!(config.ports.step, 2);
        assert_eq!(config.storage.filesize, "4G");
        assert_eq!(config.output_dir, Config::default().output_dir);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_config(Some(&temp_dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_step_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("aero.toml");
        fs::write(&path, "[ports]\nstep = 0\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("ports.step"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(parse_config("[ports\nbase = ").is_err());
    }
}
