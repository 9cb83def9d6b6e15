use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::topology::{NamespaceTopology, Node, Topology};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

pub const LABEL_NAMESPACE: &str = "io.aero-compose.namespace";
pub const LABEL_SLUG: &str = "io.aero-compose.slug";
pub const LABEL_ROLE: &str = "io.aero-compose.role";
pub const LABEL_NODE: &str = "io.aero-compose.node";

pub const ROLE_NODE: &str = "node";
pub const ROLE_TOOLS: &str = "tools";

pub const TOOLS_PREFIX: &str = "aerospike-tools";

/// A compose service entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub image: String,
    pub container_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    pub networks: Vec<String>,
    pub restart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ulimits: Option<Ulimits>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ulimits {
    pub nofile: Limit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub soft: u32,
    pub hard: u32,
}

/// Name of the shared tools container for this run
pub fn tools_service_name(suffix: &str) -> String {
    format!("{}-{}", TOOLS_PREFIX, suffix)
}

/// A fresh opaque suffix so a new tools container never clashes with one
/// left over from an earlier run
pub fn new_tools_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn node_service(ns: &NamespaceTopology, node: &Node, config: &Config) -> Service {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_NAMESPACE.to_string(), ns.namespace.name.clone());
    labels.insert(LABEL_SLUG.to_string(), ns.slug().to_string());
    labels.insert(LABEL_ROLE.to_string(), ROLE_NODE.to_string());
    labels.insert(
        LABEL_NODE.to_string(),
        node.index.map(|i| i.to_string()).unwrap_or_else(|| "0".to_string()),
    );

    Service {
        image: config.images.server.clone(),
        container_name: node.name.clone(),
        hostname: Some(node.name.clone()),
        entrypoint: None,
        volumes: vec![format!("{}:{}", node.volume, config.storage.data_dir)],
        ports: vec![format!("{}:{}", node.host_port, config.ports.service)],
        networks: vec![ns.network()],
        restart: "unless-stopped".to_string(),
        ulimits: Some(Ulimits {
            nofile: Limit {
                soft: config.cluster.nofile,
                hard: config.cluster.nofile,
            },
        }),
        labels,
    }
}

fn tools_service(topology: &Topology, suffix: &str, config: &Config) -> Service {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_ROLE.to_string(), ROLE_TOOLS.to_string());

    Service {
        image: config.images.tools.clone(),
        container_name: tools_service_name(suffix),
        hostname: None,
        entrypoint: Some(vec!["sleep".to_string(), "infinity".to_string()]),
        volumes: Vec::new(),
        ports: Vec::new(),
        networks: topology.namespaces.iter().map(|ns| ns.network()).collect(),
        restart: "unless-stopped".to_string(),
        ulimits: None,
        labels,
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_yaml::to_value(value).map_err(GeneratorError::from)?)
}

/// Render the compose descriptor for a planned topology
pub fn generate(topology: &Topology, tools_suffix: &str, config: &Config) -> Result<String> {
    let mut services = Mapping::new();
    let mut networks = Mapping::new();
    let mut volumes = Mapping::new();

    for ns in &topology.namespaces {
        for node in &ns.nodes {
            services.insert(
                Value::String(node.name.clone()),
                to_value(&node_service(ns, node, config))?,
            );
            volumes.insert(Value::String(node.volume.clone()), Value::Mapping(Mapping::new()));
        }

        let mut network = Mapping::new();
        network.insert(Value::from("driver"), Value::from("bridge"));
        networks.insert(Value::String(ns.network()), Value::Mapping(network));
    }

    services.insert(
        Value::String(tools_service_name(tools_suffix)),
        to_value(&tools_service(topology, tools_suffix, config))?,
    );

    let mut root = Mapping::new();
    root.insert(Value::from("name"), Value::String(config.cluster.name.clone()));
    root.insert(Value::from("services"), Value::Mapping(services));
    root.insert(Value::from("networks"), Value::Mapping(networks));
    root.insert(Value::from("volumes"), Value::Mapping(volumes));

    let compose = serde_yaml::to_string(&Value::Mapping(root)).map_err(GeneratorError::from)?;
    Ok(compose)
}
