//! Machine-readable manifests written next to the compose file.
//!
//! `topology.yml` maps every namespace to the config file pushed into its
//! nodes. `namespaces.yml` keeps the few settings needed to rebuild those
//! config files later.

use super::conf_gen::NamespaceConf;
use crate::common::slugify;
use crate::error::{GeneratorError, InputError, Result};
use crate::input::{is_valid_namespace, yaml_map};
use crate::topology::Topology;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default location of a generated namespace config, relative to the output
/// directory
pub fn default_config_path(slug: &str) -> PathBuf {
    Path::new(super::CONFIG_DIR).join(format!("{}.conf", slug))
}

/// Namespace to config file, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopologyMap {
    pub entries: Vec<(String, PathBuf)>,
}

impl TopologyMap {
    pub fn from_topology(topology: &Topology) -> Self {
        let entries = topology
            .namespaces
            .iter()
            .map(|ns| {
                let path = ns
                    .namespace
                    .config_path
                    .clone()
                    .unwrap_or_else(|| default_config_path(ns.slug()));
                (ns.namespace.name.clone(), path)
            })
            .collect();
        Self { entries }
    }

    pub fn to_yaml(&self) -> Result<String> {
        let mut map = Mapping::new();
        for (name, path) in &self.entries {
            map.insert(
                Value::String(name.clone()),
                Value::String(path.to_string_lossy().into_owned()),
            );
        }
        Ok(serde_yaml::to_string(&Value::Mapping(map)).map_err(GeneratorError::from)?)
    }

    /// Reads a map written by `to_yaml`; the format is the same one accepted
    /// as `generate -f` input
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        Ok(Self {
            entries: yaml_map::parse_yaml_map(path, text)?,
        })
    }
}

fn default_replication_factor() -> u32 {
    1
}

fn default_filesize() -> String {
    "4G".to_string()
}

fn default_read_page_cache() -> bool {
    true
}

/// Storage settings kept per namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default = "default_filesize")]
    pub filesize: String,
    #[serde(default = "default_read_page_cache")]
    pub read_page_cache: bool,
}

impl Default for StorageSchema {
    fn default() -> Self {
        Self {
            file: None,
            filesize: default_filesize(),
            read_page_cache: default_read_page_cache(),
        }
    }
}

/// Settings kept per namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NamespaceSchema {
    #[serde(default = "default_replication_factor")]
    pub replication_factor: u32,
    #[serde(default)]
    pub storage: StorageSchema,
}

/// Contents of `namespaces.yml`, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaFile {
    pub namespaces: Vec<(String, NamespaceSchema)>,
}

impl SchemaFile {
    pub fn from_confs(confs: &[NamespaceConf]) -> Self {
        let namespaces = confs
            .iter()
            .map(|conf| {
                let schema = NamespaceSchema {
                    replication_factor: conf.replication_factor,
                    storage: StorageSchema {
                        file: Some(conf.file.clone()),
                        filesize: conf.filesize.clone(),
                        read_page_cache: conf.read_page_cache,
                    },
                };
                (conf.namespace.clone(), schema)
            })
            .collect();
        Self { namespaces }
    }

    pub fn get(&self, name: &str) -> Option<&NamespaceSchema> {
        self.namespaces
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    pub fn to_yaml(&self) -> Result<String> {
        let mut namespaces = Mapping::new();
        for (name, schema) in &self.namespaces {
            namespaces.insert(
                Value::String(name.clone()),
                serde_yaml::to_value(schema).map_err(GeneratorError::from)?,
            );
        }
        let mut root = Mapping::new();
        root.insert(Value::from("namespaces"), Value::Mapping(namespaces));
        Ok(serde_yaml::to_string(&Value::Mapping(root)).map_err(GeneratorError::from)?)
    }

    /// Parse `namespaces.yml`; an entry may be empty (`users:`), in which case
    /// every field takes its default.
    ///
    /// Names follow the same rules as `generate` input: they must be valid
    /// namespaces and no two may share a slug.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let schema_error = |reason: String| InputError::Schema {
            path: path.to_path_buf(),
            reason,
        };

        let raw: Value = serde_yaml::from_str(text)?;
        let mut file = SchemaFile::default();
        let namespaces = match raw.get("namespaces") {
            Some(Value::Mapping(m)) => m.clone(),
            Some(Value::Null) | None => return Ok(file),
            Some(_) => {
                return Err(schema_error(
                    "`namespaces` must be a map of namespace settings".to_string(),
                )
                .into())
            }
        };

        let mut by_slug: HashMap<String, String> = HashMap::new();
        for (key, value) in namespaces {
            let name = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => {
                    return Err(schema_error(
                        "namespace keys must be plain names".to_string(),
                    )
                    .into())
                }
            };
            if !is_valid_namespace(&name) {
                return Err(schema_error(format!("'{}' is not a valid namespace name", name)).into());
            }

            let slug = slugify(&name);
            if let Some(first) = by_slug.get(&slug) {
                return Err(InputError::SlugCollision {
                    first: first.clone(),
                    second: name,
                    slug,
                }
                .into());
            }

            let schema = match value {
                Value::Null => NamespaceSchema {
                    replication_factor: default_replication_factor(),
                    storage: StorageSchema::default(),
                },
                other => serde_yaml::from_value::<NamespaceSchema>(other)
                    .map_err(|e| schema_error(format!("'{}': {}", name, e)))?,
            };
            if schema.replication_factor == 0 {
                return Err(schema_error(format!(
                    "'{}': replication-factor must be at least 1",
                    name
                ))
                .into());
            }

            by_slug.insert(slug, name.clone());
            file.namespaces.push((name, schema));
        }
        Ok(file)
    }
}
