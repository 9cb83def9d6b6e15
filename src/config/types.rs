use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub images: ImageConfig,
    pub ports: PortConfig,
    pub cluster: ClusterConfig,
    pub storage: StorageConfig,
}

/// Container images used by the compose descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub server: String,
    pub tools: String,
}

/// Host port allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// First host port handed out in a run
    pub base: u16,
    /// Gap between two consecutive nodes
    pub step: u16,
    /// Container-side client port every node listens on
    pub service: u16,
}

/// Server-wide settings written into every namespace config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,
    pub nofile: u32,
}

/// Storage engine defaults for generated namespaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Mount point of the data volume inside each node
    pub data_dir: String,
    pub filesize: String,
    pub read_page_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("aerospike-local"),
            images: ImageConfig::default(),
            ports: PortConfig::default(),
            cluster: ClusterConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            server: "aerospike/aerospike-server:latest".to_string(),
            tools: "aerospike/aerospike-tools:latest".to_string(),
        }
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            base: 30000,
            step: 2,
            service: 3000,
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: "aerospike-local".to_string(),
            nofile: 15000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "/opt/aerospike/data".to_string(),
            filesize: "4G".to_string(),
            read_page_cache: true,
        }
    }
}
