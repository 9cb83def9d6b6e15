use super::templates::{self, AEROSPIKE_CONF};
use crate::config::Config;
use crate::error::{GeneratorError, Result};
use serde::Serialize;
use tera::{Context, Tera};

pub const FABRIC_PORT: u16 = 3001;
pub const HEARTBEAT_PORT: u16 = 3002;

/// The variable part of a namespace config
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceConf {
    pub namespace: String,
    pub replication_factor: u32,
    pub file: String,
    pub filesize: String,
    pub read_page_cache: bool,
}

impl NamespaceConf {
    /// Settings for a freshly planned namespace
    pub fn planned(namespace: &str, slug: &str, replicas: u32, config: &Config) -> Self {
        Self {
            namespace: namespace.to_string(),
            replication_factor: replicas,
            file: default_storage_file(slug, config),
            filesize: config.storage.filesize.clone(),
            read_page_cache: config.storage.read_page_cache,
        }
    }
}

/// Where a namespace keeps its data inside its node
pub fn default_storage_file(slug: &str, config: &Config) -> String {
    format!("{}/{}.dat", config.storage.data_dir.trim_end_matches('/'), slug)
}

/// Render a minimal Aerospike config for one namespace
pub fn generate(tera: &Tera, conf: &NamespaceConf, config: &Config) -> Result<String> {
    let mut context = Context::from_serialize(conf).map_err(GeneratorError::from)?;
    context.insert("cluster_name", &config.cluster.name);
    context.insert("service_port", &config.ports.service);
    context.insert("fabric_port", &FABRIC_PORT);
    context.insert("heartbeat_port", &HEARTBEAT_PORT);

    let rendered = tera
        .render(AEROSPIKE_CONF, &context)
        .map_err(GeneratorError::from)?;
    Ok(rendered)
}

/// Convenience wrapper that builds its own template registry
pub fn generate_standalone(conf: &NamespaceConf, config: &Config) -> Result<String> {
    let tera = templates::build_tera()?;
    generate(&tera, conf, config)
}
