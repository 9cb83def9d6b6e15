//! # Input Module
//!
//! Reads the namespace set for a run from a plain list file, a YAML map file
//! and trailing command-line arguments. File entries come first, then
//! arguments; the first occurrence of a name wins.

pub mod list;
pub mod yaml_map;

use crate::common::{file_utils, slugify};
use crate::error::{InputError, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("namespace pattern compiles"));

/// Checks a name against `[A-Za-z0-9][A-Za-z0-9_-]*`
pub fn is_valid_namespace(name: &str) -> bool {
    NAMESPACE_RE.is_match(name)
}

/// A validated namespace together with its derived resource slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub slug: String,
    /// Config file supplied by a YAML map, if any
    pub config_path: Option<PathBuf>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, config_path: Option<PathBuf>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            name,
            slug,
            config_path,
        }
    }
}

/// Where a namespace candidate came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File { path: PathBuf, line: Option<usize> },
    Argument(usize),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File { path, line: Some(line) } => write!(f, "{}:{}", path.display(), line),
            Origin::File { path, line: None } => write!(f, "{}", path.display()),
            Origin::Argument(pos) => write!(f, "argument #{}", pos),
        }
    }
}

/// An entry dropped because it failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub origin: Origin,
    pub value: String,
}

/// Ordered, deduplicated namespaces plus the entries that were rejected
#[derive(Debug, Clone, Default)]
pub struct NamespaceSet {
    namespaces: Vec<Namespace>,
    by_slug: HashMap<String, usize>,
    skipped: Vec<SkippedEntry>,
}

impl NamespaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add one candidate.
    ///
    /// Invalid names are recorded as skipped and a repeated name is ignored.
    /// Two different names sharing a slug is an error.
    pub fn offer(&mut self, name: &str, config_path: Option<PathBuf>, origin: Origin) -> Result<()> {
        if !is_valid_namespace(name) {
            warn!("{}: skipping invalid namespace {:?}", origin, name);
            self.skipped.push(SkippedEntry {
                origin,
                value: name.to_string(),
            });
            return Ok(());
        }

        let candidate = Namespace::new(name, config_path);
        if let Some(&idx) = self.by_slug.get(&candidate.slug) {
            let existing = &self.namespaces[idx];
            if existing.name == candidate.name {
                debug!("{}: duplicate namespace {} ignored", origin, name);
                return Ok(());
            }
            return Err(InputError::SlugCollision {
                first: existing.name.clone(),
                second: candidate.name,
                slug: candidate.slug,
            }
            .into());
        }

        self.by_slug
            .insert(candidate.slug.clone(), self.namespaces.len());
        self.namespaces.push(candidate);
        Ok(())
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub fn into_namespaces(self) -> Vec<Namespace> {
        self.namespaces
    }
}

/// Collect namespaces from an optional input file and positional arguments.
///
/// Fails when the file is missing, a YAML map breaks the accepted schema, two
/// names collide after slugification, or nothing valid remains.
pub fn read_namespaces(file: Option<&Path>, args: &[String]) -> Result<NamespaceSet> {
    let mut set = NamespaceSet::new();

    if let Some(path) = file {
        if !path.is_file() {
            return Err(InputError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        let text = fs::read_to_string(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if file_utils::is_yaml_path(path) {
            debug!("Reading namespace map from {}", path.display());
            // Config paths in the map are relative to the map itself.
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            for (name, config) in yaml_map::parse_yaml_map(path, &text)? {
                let config = file_utils::absolutize(&base.join(config))?;
                let origin = Origin::File {
                    path: path.to_path_buf(),
                    line: None,
                };
                set.offer(&name, Some(config), origin)?;
            }
        } else {
            debug!("Reading namespace list from {}", path.display());
            for (line, name) in list::parse_list(&text) {
                let origin = Origin::File {
                    path: path.to_path_buf(),
                    line: Some(line),
                };
                set.offer(&name, None, origin)?;
            }
        }
    }

    for (idx, arg) in args.iter().enumerate() {
        set.offer(arg.trim(), None, Origin::Argument(idx + 1))?;
    }

    if set.is_empty() {
        return Err(InputError::NoNamespaces.into());
    }

    debug!(
        "Selected {} namespace(s), skipped {}",
        set.len(),
        set.skipped().len()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AeroComposeError;
    use tempfile::TempDir;

    fn names(set: &NamespaceSet) -> Vec<&str> {
        set.namespaces().iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_namespace_pattern() {
        assert!(is_valid_namespace("prod-users"));
        assert!(is_valid_namespace("A_1"));
        assert!(is_valid_namespace("9lives"));
        assert!(!is_valid_namespace("-leading"));
        assert!(!is_valid_namespace("_leading"));
        assert!(!is_valid_namespace("Bad Name!"));
        assert!(!is_valid_namespace(""));
    }

    #[test]
    fn test_file_entries_precede_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("namespaces.txt");
        fs::write(&path, "# header\nusers\nBad Name!\nsessions\nusers\n").unwrap();

        let args = vec!["sessions".to_string(), "cache".to_string()];
        let set = read_namespaces(Some(&path), &args).unwrap();

        assert_eq!(names(&set), vec!["users", "sessions", "cache"]);
        assert_eq!(set.skipped().len(), 1);
        assert_eq!(set.skipped()[0].value, "Bad Name!");
        assert_eq!(
            set.skipped()[0].origin,
            Origin::File {
                path: path.clone(),
                line: Some(3)
            }
        );
    }

    #[test]
    fn test_yaml_map_carries_config_paths() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("namespaces.yaml");
        fs::write(&path, "users: custom/users.conf\nsessions: sessions.conf\n").unwrap();

        let set = read_namespaces(Some(&path), &[]).unwrap();

        assert_eq!(names(&set), vec!["users", "sessions"]);
        let users_conf = set.namespaces()[0].config_path.clone().unwrap();
        assert!(users_conf.is_absolute());
        assert_eq!(users_conf, temp_dir.path().join("custom/users.conf"));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_namespaces(Some(&temp_dir.path().join("nope.txt")), &[]).unwrap_err();
        assert!(matches!(err, AeroComposeError::Input(InputError::MissingFile { .. })));
    }

    #[test]
    fn test_empty_selection() {
        let err = read_namespaces(None, &["Bad Name!".to_string()]).unwrap_err();
        assert!(matches!(err, AeroComposeError::Input(InputError::NoNamespaces)));
    }

    #[test]
    fn test_slug_collision_rejected() {
        let args = vec!["Users".to_string(), "users".to_string()];
        let err = read_namespaces(None, &args).unwrap_err();
        match err {
            AeroComposeError::Input(InputError::SlugCollision { first, second, slug }) => {
                assert_eq!(first, "Users");
                assert_eq!(second, "users");
                assert_eq!(slug, "users");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_arguments_are_trimmed() {
        let set = read_namespaces(None, &["  cache ".to_string()]).unwrap();
        assert_eq!(names(&set), vec!["cache"]);
    }
}
