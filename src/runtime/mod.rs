//! # Runtime Module
//!
//! Thin control layer over the Docker CLI. Every call captures the exit
//! code and stderr and turns failures into a `RuntimeError`; container
//! listings come from `docker ps --format '{{json .}}'` rather than the
//! human-readable table.

pub mod discovery;

use crate::common::command_utils;
use crate::error::{Result, RuntimeError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Output;
use std::thread;
use std::time::Duration;

/// A container as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerInfo {
    pub name: String,
    /// Machine state, e.g. `running` or `exited`
    pub state: String,
    /// Human status, e.g. `Up 3 minutes`
    pub status: String,
    pub ports: String,
    pub labels: BTreeMap<String, String>,
}

impl ContainerInfo {
    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
struct PsLine {
    #[serde(rename = "Names", default)]
    names: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "Ports", default)]
    ports: String,
    #[serde(rename = "Labels", default)]
    labels: String,
}

/// Parse the output of `docker ps --format '{{json .}}'`, one object per line
pub fn parse_ps_output(stdout: &str) -> Result<Vec<ContainerInfo>> {
    let mut containers = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let raw: PsLine = serde_json::from_str(line)
            .map_err(|e| RuntimeError::BadListing(format!("{}: {}", e, line)))?;
        containers.push(ContainerInfo {
            // A container with several names lists them comma-separated.
            name: raw.names.split(',').next().unwrap_or_default().to_string(),
            state: raw.state,
            status: raw.status,
            ports: raw.ports,
            labels: parse_labels(&raw.labels),
        });
    }
    Ok(containers)
}

fn parse_labels(raw: &str) -> BTreeMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Operations the helpers need from a container runtime
pub trait ContainerRuntime {
    /// All containers, running or not
    fn list_containers(&self) -> Result<Vec<ContainerInfo>>;

    fn start(&self, container: &str) -> Result<()>;

    fn restart(&self, container: &str) -> Result<()>;

    fn copy_into(&self, source: &Path, container: &str, destination: &str) -> Result<()>;

    /// Run a command inside a container attached to this terminal
    fn exec_interactive(&self, container: &str, command: &[&str]) -> Result<i32>;

    /// Run `docker compose -f <file> <args>` with output passed through
    fn compose(&self, compose_file: &Path, args: &[&str]) -> Result<()>;

    fn find(&self, container: &str) -> Result<Option<ContainerInfo>> {
        Ok(self
            .list_containers()?
            .into_iter()
            .find(|c| c.name == container))
    }
}

/// How long to wait for a container to come up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            attempts: 20,
            interval: Duration::from_secs(1),
        }
    }
}

/// Start `container` if it is stopped and wait until the runtime reports it
/// running
pub fn ensure_running<R: ContainerRuntime + ?Sized>(
    runtime: &R,
    container: &str,
    policy: WaitPolicy,
) -> Result<()> {
    let info = runtime
        .find(container)?
        .ok_or_else(|| RuntimeError::ContainerNotFound(container.to_string()))?;
    if info.is_running() {
        return Ok(());
    }

    log::info!("Starting {} (currently {})", container, info.state);
    runtime.start(container)?;
    for attempt in 1..=policy.attempts {
        if runtime.find(container)?.is_some_and(|c| c.is_running()) {
            log::debug!("{} running after {} check(s)", container, attempt);
            return Ok(());
        }
        thread::sleep(policy.interval);
    }

    Err(RuntimeError::StartTimeout {
        name: container.to_string(),
        attempts: policy.attempts,
    }
    .into())
}

/// `ContainerRuntime` backed by the `docker` command line
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new() -> Self {
        Self::with_binary("docker")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let output = command_utils::execute_command(&self.binary, args)?;
        check_output(&self.binary, args, output)
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a finished command into an error unless it succeeded
fn check_output(binary: &str, args: &[&str], output: Output) -> Result<Output> {
    if output.status.success() {
        return Ok(output);
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if is_permission_denied(&stderr) {
        return Err(RuntimeError::PermissionDenied.into());
    }
    Err(RuntimeError::CommandFailed {
        command: format!("{} {}", binary, args.join(" ")),
        code: output.status.code().unwrap_or(-1),
        stderr,
    }
    .into())
}

fn is_permission_denied(stderr: &str) -> bool {
    let lower = stderr.to_ascii_lowercase();
    lower.contains("permission denied") && lower.contains("docker")
}

impl ContainerRuntime for DockerCli {
    fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let output = self.run(&["ps", "--all", "--no-trunc", "--format", "{{json .}}"])?;
        parse_ps_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn start(&self, container: &str) -> Result<()> {
        self.run(&["start", container])?;
        Ok(())
    }

    fn restart(&self, container: &str) -> Result<()> {
        self.run(&["restart", container])?;
        Ok(())
    }

    fn copy_into(&self, source: &Path, container: &str, destination: &str) -> Result<()> {
        let source = source.to_string_lossy();
        let target = format!("{}:{}", container, destination);
        self.run(&["cp", &*source, target.as_str()])?;
        Ok(())
    }

    fn exec_interactive(&self, container: &str, command: &[&str]) -> Result<i32> {
        let mut args = vec!["exec", "-it", container];
        args.extend_from_slice(command);
        command_utils::execute_interactive(&self.binary, &args)
    }

    fn compose(&self, compose_file: &Path, args: &[&str]) -> Result<()> {
        let file = compose_file.to_string_lossy();
        let mut full = vec!["compose", "-f", &*file];
        full.extend_from_slice(args);
        let code = command_utils::execute_interactive(&self.binary, &full)?;
        if code != 0 {
            return Err(RuntimeError::CommandFailed {
                command: format!("{} {}", self.binary, full.join(" ")),
                code,
                stderr: "see output above".to_string(),
            }
            .into());
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{container, FakeRuntime};
    use super::*;
    use crate::error::AeroComposeError;

    const PS_OUTPUT: &str = r#"{"Command":"\"/usr/bin/as-tini-static…\"","ID":"1f2e","Image":"aerospike/aerospike-server:latest","Labels":"io.aero-compose.namespace=cache,io.aero-compose.role=node,io.aero-compose.slug=cache","Names":"cache-0","Ports":"0.0.0.0:30000->3000/tcp","State":"running","Status":"Up 2 minutes"}
{"ID":"9a8b","Image":"redis","Labels":"","Names":"other","Ports":"","State":"exited","Status":"Exited (0) 1 hour ago"}
"#;

    #[test]
    fn test_parse_ps_output() {
        let containers = parse_ps_output(PS_OUTPUT).unwrap();
        assert_eq!(containers.len(), 2);

        let cache = &containers[0];
        assert_eq!(cache.name, "cache-0");
        assert!(cache.is_running());
        assert_eq!(cache.ports, "0.0.0.0:30000->3000/tcp");
        assert_eq!(cache.label("io.aero-compose.slug"), Some("cache"));

        assert!(!containers[1].is_running());
        assert!(containers[1].labels.is_empty());
    }

    #[test]
    fn test_parse_ps_output_rejects_garbage() {
        let err = parse_ps_output("CONTAINER ID   IMAGE\n").unwrap_err();
        assert!(matches!(err, AeroComposeError::Runtime(RuntimeError::BadListing(_))));
    }

    #[test]
    fn test_permission_denied_detection() {
        assert!(is_permission_denied(
            "permission denied while trying to connect to the Docker daemon socket at unix:///var/run/docker.sock"
        ));
        assert!(!is_permission_denied("Error: No such container: cache-0"));
    }

    #[test]
    fn test_ensure_running_starts_stopped_container() {
        let runtime = FakeRuntime::with(vec![container("cache-0", "exited", &[])]);
        let policy = WaitPolicy {
            attempts: 3,
            interval: Duration::ZERO,
        };

        ensure_running(&runtime, "cache-0", policy).unwrap();

        assert_eq!(runtime.calls.borrow().as_slice(), ["start cache-0"]);
    }

    #[test]
    fn test_ensure_running_times_out() {
        let mut runtime = FakeRuntime::with(vec![container("cache-0", "exited", &[])]);
        runtime.stuck.push("cache-0".to_string());
        let policy = WaitPolicy {
            attempts: 2,
            interval: Duration::ZERO,
        };

        let err = ensure_running(&runtime, "cache-0", policy).unwrap_err();
        assert!(matches!(
            err,
            AeroComposeError::Runtime(RuntimeError::StartTimeout { attempts: 2, .. })
        ));
    }

    #[test]
    fn test_ensure_running_unknown_container() {
        let runtime = FakeRuntime::default();
        let err = ensure_running(&runtime, "ghost", WaitPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            AeroComposeError::Runtime(RuntimeError::ContainerNotFound(_))
        ));
    }
}
