use crate::common::{file_utils, slugify};
use crate::error::{InputError, Result};
use crate::generator::manifest_gen::TopologyMap;
use crate::generator::TOPOLOGY_FILE;
use crate::runtime::{discovery, ContainerRuntime};
use std::path::{Path, PathBuf};

/// Where the server image reads its configuration
pub const SERVER_CONFIG_PATH: &str = "/etc/aerospike/aerospike.conf";

/// What a push did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Container and the config file copied into it
    pub pushed: Vec<(String, PathBuf)>,
    /// Namespaces with no matching container
    pub missing: Vec<String>,
}

/// Copy each namespace's config into its containers and restart them.
///
/// Every config file is checked before any container is touched.
pub fn push<R: ContainerRuntime + ?Sized>(runtime: &R, output_dir: &Path) -> Result<PushReport> {
    let path = output_dir.join(TOPOLOGY_FILE);
    let map = TopologyMap::parse(&path, &file_utils::read_artifact(&path)?)?;

    let mut plan = Vec::with_capacity(map.entries.len());
    for (namespace, config) in &map.entries {
        let config = file_utils::resolve_under(output_dir, config);
        if !config.is_file() {
            return Err(InputError::MissingFile { path: config }.into());
        }
        plan.push((namespace.as_str(), config));
    }

    let containers = runtime.list_containers()?;
    let mut report = PushReport::default();
    for (namespace, config) in plan {
        let nodes = discovery::namespace_nodes(&containers, &slugify(namespace));
        if nodes.is_empty() {
            log::warn!("No containers found for namespace {}", namespace);
            report.missing.push(namespace.to_string());
            continue;
        }
        for node in nodes {
            log::info!("Pushing {} to {}", config.display(), node.name);
            runtime.copy_into(&config, &node.name, SERVER_CONFIG_PATH)?;
            runtime.restart(&node.name)?;
            report.pushed.push((node.name.clone(), config.clone()));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::compose_gen::{LABEL_ROLE, LABEL_SLUG, ROLE_NODE};
    use crate::runtime::fake::{container, FakeRuntime};
    use std::fs;
    use tempfile::TempDir;

    fn setup(topology: &str, configs: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(TOPOLOGY_FILE), topology).unwrap();
        for config in configs {
            let path = temp_dir.path().join(config);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "namespace x {}\n").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_push_copies_and_restarts_every_node() {
        let temp_dir = setup(
            "cache: config/cache.conf\nusers: config/users.conf\n",
            &["config/cache.conf", "config/users.conf"],
        );
        let runtime = FakeRuntime::with(vec![
            container("cache-1", "running", &[(LABEL_ROLE, ROLE_NODE), (LABEL_SLUG, "cache")]),
            container("cache-0", "running", &[(LABEL_ROLE, ROLE_NODE), (LABEL_SLUG, "cache")]),
            container("unrelated", "running", &[]),
        ]);

        let report = push(&runtime, temp_dir.path()).unwrap();

        let conf = temp_dir.path().join("config/cache.conf");
        assert_eq!(
            report.pushed,
            vec![
                ("cache-0".to_string(), conf.clone()),
                ("cache-1".to_string(), conf.clone()),
            ]
        );
        assert_eq!(report.missing, vec!["users"]);
        assert_eq!(
            runtime.calls.borrow().as_slice(),
            [
                format!("cp {} cache-0:{}", conf.display(), SERVER_CONFIG_PATH),
                "restart cache-0".to_string(),
                format!("cp {} cache-1:{}", conf.display(), SERVER_CONFIG_PATH),
                "restart cache-1".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_config_aborts_before_any_push() {
        let temp_dir = setup(
            "cache: config/cache.conf\nusers: /nonexistent/users.conf\n",
            &["config/cache.conf"],
        );
        let runtime = FakeRuntime::with(vec![container("cache", "running", &[])]);

        let err = push(&runtime, temp_dir.path()).unwrap_err();

        assert!(err.to_string().contains("users.conf"));
        assert!(runtime.calls.borrow().is_empty());
    }

    #[test]
    fn test_push_without_topology() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = FakeRuntime::default();
        assert!(push(&runtime, temp_dir.path()).is_err());
    }
}
