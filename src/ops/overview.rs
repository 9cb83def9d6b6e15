use crate::error::{Result, RuntimeError};
use crate::generator::compose_gen::TOOLS_PREFIX;
use crate::runtime::{discovery, ensure_running, ContainerInfo, ContainerRuntime, WaitPolicy};
use std::path::Path;

/// Running containers of the stack generated into `output_dir`
pub fn list<R: ContainerRuntime + ?Sized>(runtime: &R, output_dir: &Path) -> Result<Vec<ContainerInfo>> {
    let slugs = super::known_slugs(output_dir)?;
    let all = runtime.list_containers()?;
    Ok(discovery::run_containers(&all, &slugs)
        .into_iter()
        .filter(|c| c.is_running())
        .cloned()
        .collect())
}

/// Open an interactive `aql` session against `container`.
///
/// Both the target and the tools container are started when stopped. A
/// tools container that does not exist yet is created from the compose
/// file. Returns the exit code of the client.
pub fn connect<R: ContainerRuntime + ?Sized>(
    runtime: &R,
    output_dir: &Path,
    container: &str,
    service_port: u16,
    policy: WaitPolicy,
) -> Result<i32> {
    ensure_running(runtime, container, policy)?;

    let tools = match discovery::find_tools(&runtime.list_containers()?) {
        Some(tools) => tools.name.clone(),
        None => create_tools(runtime, output_dir)?,
    };
    ensure_running(runtime, &tools, policy)?;

    log::info!("Connecting to {} through {}", container, tools);
    let port = service_port.to_string();
    runtime.exec_interactive(&tools, &["aql", "-h", container, "-p", &port])
}

fn create_tools<R: ContainerRuntime + ?Sized>(runtime: &R, output_dir: &Path) -> Result<String> {
    let file = super::compose_file(output_dir).map_err(|_| RuntimeError::ToolsNotFound)?;
    let compose: serde_yaml::Value = serde_yaml::from_str(&std::fs::read_to_string(&file)?)?;
    let service = compose
        .get("services")
        .and_then(|s| s.as_mapping())
        .and_then(|services| {
            services
                .keys()
                .filter_map(|k| k.as_str())
                .find(|name| name.starts_with(&format!("{}-", TOOLS_PREFIX)))
        })
        .ok_or(RuntimeError::ToolsNotFound)?
        .to_string();

    log::info!("Creating tools container {}", service);
    runtime.compose(&file, &["up", "-d", &service])?;
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::compose_gen::{LABEL_ROLE, LABEL_SLUG, ROLE_NODE, ROLE_TOOLS};
    use crate::generator::{COMPOSE_FILE, TOPOLOGY_FILE};
    use crate::runtime::fake::{container, FakeRuntime};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    const FAST: WaitPolicy = WaitPolicy {
        attempts: 2,
        interval: Duration::ZERO,
    };

    #[test]
    fn test_list_shows_only_running_nodes_of_this_run() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(TOPOLOGY_FILE), "cache: config/cache.conf\n").unwrap();
        let runtime = FakeRuntime::with(vec![
            container("cache", "running", &[(LABEL_ROLE, ROLE_NODE), (LABEL_SLUG, "cache")]),
            container("billing", "running", &[(LABEL_ROLE, ROLE_NODE), (LABEL_SLUG, "billing")]),
            container("cache-1", "exited", &[(LABEL_ROLE, ROLE_NODE), (LABEL_SLUG, "cache")]),
            container("postgres", "running", &[]),
        ]);

        let names: Vec<_> = list(&runtime, temp_dir.path())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["cache"]);
    }

    #[test]
    fn test_connect_starts_node_and_tools() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = FakeRuntime::with(vec![
            container("cache", "exited", &[(LABEL_ROLE, ROLE_NODE), (LABEL_SLUG, "cache")]),
            container("aerospike-tools-abc", "exited", &[(LABEL_ROLE, ROLE_TOOLS)]),
        ]);

        let code = connect(&runtime, temp_dir.path(), "cache", 3000, FAST).unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            runtime.calls.borrow().as_slice(),
            [
                "start cache",
                "start aerospike-tools-abc",
                "exec aerospike-tools-abc aql -h cache -p 3000",
            ]
        );
    }

    #[test]
    fn test_connect_creates_missing_tools_from_compose() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(COMPOSE_FILE),
            "services:\n  cache:\n    image: x\n  aerospike-tools-1a2b3c4d:\n    image: y\n",
        )
        .unwrap();
        let runtime = FakeRuntime::with(vec![container("cache", "running", &[])]);
        // The fake never materialises the new container, so the wait fails.
        let err = connect(&runtime, temp_dir.path(), "cache", 3000, FAST).unwrap_err();

        assert!(err.to_string().contains("aerospike-tools-1a2b3c4d"));
        assert!(runtime.calls.borrow()[0].ends_with("up -d aerospike-tools-1a2b3c4d"));
    }

    #[test]
    fn test_connect_unknown_container() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = FakeRuntime::default();
        assert!(connect(&runtime, temp_dir.path(), "ghost", 3000, FAST).is_err());
    }
}
