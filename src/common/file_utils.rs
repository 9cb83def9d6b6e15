use crate::error::{AeroComposeError, GeneratorError};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_artifact(path: &Path, content: &str) -> Result<(), AeroComposeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::OutputCreation {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, content).map_err(|source| GeneratorError::OutputCreation {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Marks a generated script as executable for everyone who can read it
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<(), AeroComposeError> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions).map_err(|source| GeneratorError::OutputCreation {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<(), AeroComposeError> {
    Ok(())
}

/// Reads an artifact produced by a previous `generate` run
pub fn read_artifact(path: &Path) -> Result<String, AeroComposeError> {
    if !path.is_file() {
        return Err(GeneratorError::MissingArtifact {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(fs::read_to_string(path)?)
}

/// Resolves `target` against `root` unless it is already absolute
pub fn resolve_under(root: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        root.join(target)
    }
}

/// Makes a relative path absolute against the working directory
pub fn absolutize(path: &Path) -> Result<PathBuf, AeroComposeError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Checks whether a path carries one of the YAML extensions
pub fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref(),
        Some("yml") | Some("yaml")
    )
}
