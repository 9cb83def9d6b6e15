use crate::common::file_utils;
use crate::config::Config;
use crate::error::Result;
use crate::generator::{self, manifest_gen::SchemaFile, SCHEMA_FILE};
use std::path::{Path, PathBuf};

/// Rewrite every namespace config from `namespaces.yml`, returning the
/// paths written
pub fn regenerate(output_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let path = output_dir.join(SCHEMA_FILE);
    let schema = SchemaFile::parse(&path, &file_utils::read_artifact(&path)?)?;
    if schema.namespaces.is_empty() {
        log::warn!("{} lists no namespaces; nothing to regenerate", path.display());
    }

    let artifacts = generator::render_configs_from_schema(&schema, config)?;
    generator::write_artifacts(output_dir, &artifacts)?;
    Ok(artifacts
        .into_iter()
        .map(|a| output_dir.join(a.path))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_regenerate_overwrites_configs() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        fs::create_dir_all(out.join("config")).unwrap();
        fs::write(out.join("config/cache.conf"), "stale").unwrap();
        fs::write(
            out.join(SCHEMA_FILE),
            "namespaces:\n  cache:\n    replication-factor: 2\n    storage:\n      filesize: 16G\n",
        )
        .unwrap();

        let written = regenerate(out, &Config::default()).unwrap();

        assert_eq!(written, vec![out.join("config/cache.conf")]);
        let text = fs::read_to_string(out.join("config/cache.conf")).unwrap();
        assert!(text.contains("replication-factor 2"));
        assert!(text.contains("filesize 16G"));
        assert!(text.contains("read-page-cache true"));
    }

    #[test]
    fn test_regenerate_refuses_colliding_names() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        fs::create_dir_all(out.join("config")).unwrap();
        fs::write(out.join("config/users.conf"), "kept").unwrap();
        fs::write(out.join(SCHEMA_FILE), "namespaces:\n  Users:\n  users:\n").unwrap();

        assert!(regenerate(out, &Config::default()).is_err());
        assert_eq!(fs::read_to_string(out.join("config/users.conf")).unwrap(), "kept");
    }

    #[test]
    fn test_regenerate_requires_schema() {
        let temp_dir = TempDir::new().unwrap();
        let err = regenerate(temp_dir.path(), &Config::default()).unwrap_err();
        assert!(err.to_string().contains(SCHEMA_FILE));
    }
}
