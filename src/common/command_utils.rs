use crate::error::{Result, RuntimeError};
use std::io::ErrorKind;
use std::process::{Command, Output, Stdio};

/// Execute a command, capturing stdout and stderr
pub fn execute_command(cmd: &str, args: &[&str]) -> Result<Output> {
    log::debug!("Running {} {}", cmd, args.join(" "));
    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(cmd, e))?;

    Ok(output)
}

/// Execute a command attached to the current terminal and return its exit code
pub fn execute_interactive(cmd: &str, args: &[&str]) -> Result<i32> {
    log::debug!("Running interactively {} {}", cmd, args.join(" "));
    let status = Command::new(cmd)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(cmd, e))?;

    Ok(status.code().unwrap_or(-1))
}

fn spawn_error(cmd: &str, e: std::io::Error) -> crate::error::AeroComposeError {
    match e.kind() {
        ErrorKind::NotFound => RuntimeError::Unavailable(cmd.to_string()).into(),
        ErrorKind::PermissionDenied => RuntimeError::PermissionDenied.into(),
        _ => e.into(),
    }
}
