//! # Operational Helpers
//!
//! Day-to-day commands run against an already generated output directory:
//! bringing the stack up and down, inspecting containers, pushing configs
//! and rebuilding them.

pub mod overview;
pub mod push_config;
pub mod regen_config;

use crate::common::{file_utils, slugify};
use crate::error::{GeneratorError, Result};
use crate::generator::manifest_gen::TopologyMap;
use crate::generator::{COMPOSE_FILE, TOPOLOGY_FILE};
use crate::runtime::ContainerRuntime;
use std::path::{Path, PathBuf};

/// Path of the generated compose file, which must already exist
pub fn compose_file(output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(COMPOSE_FILE);
    if !path.is_file() {
        return Err(GeneratorError::MissingArtifact { path }.into());
    }
    Ok(path)
}

/// Namespace slugs recorded in `topology.yml`, empty when it is absent
pub fn known_slugs(output_dir: &Path) -> Result<Vec<String>> {
    let path = output_dir.join(TOPOLOGY_FILE);
    if !path.is_file() {
        log::debug!("{} not found, only tools containers will match", path.display());
        return Ok(Vec::new());
    }
    let map = TopologyMap::parse(&path, &file_utils::read_artifact(&path)?)?;
    Ok(map.entries.iter().map(|(name, _)| slugify(name)).collect())
}

pub fn up<R: ContainerRuntime + ?Sized>(runtime: &R, output_dir: &Path) -> Result<()> {
    let file = compose_file(output_dir)?;
    log::info!("Starting stack from {}", file.display());
    runtime.compose(&file, &["up", "-d"])
}

pub fn down<R: ContainerRuntime + ?Sized>(runtime: &R, output_dir: &Path) -> Result<()> {
    let file = compose_file(output_dir)?;
    log::info!("Stopping stack from {}", file.display());
    runtime.compose(&file, &["down"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::fake::FakeRuntime;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_up_and_down_use_generated_compose_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(COMPOSE_FILE), "services: {}\n").unwrap();
        let runtime = FakeRuntime::default();

        up(&runtime, temp_dir.path()).unwrap();
        down(&runtime, temp_dir.path()).unwrap();

        let file = temp_dir.path().join(COMPOSE_FILE);
        assert_eq!(
            runtime.calls.borrow().as_slice(),
            [
                format!("compose {} up -d", file.display()),
                format!("compose {} down", file.display()),
            ]
        );
    }

    #[test]
    fn test_up_without_generated_files() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = FakeRuntime::default();
        assert!(up(&runtime, temp_dir.path()).is_err());
        assert!(runtime.calls.borrow().is_empty());
    }

    #[test]
    fn test_known_slugs() {
        let temp_dir = TempDir::new().unwrap();
        assert!(known_slugs(temp_dir.path()).unwrap().is_empty());

        fs::write(
            temp_dir.path().join(TOPOLOGY_FILE),
            "Users: config/users.conf\ncache: config/cache.conf\n",
        )
        .unwrap();
        assert_eq!(known_slugs(temp_dir.path()).unwrap(), vec!["users", "cache"]);
    }
}
