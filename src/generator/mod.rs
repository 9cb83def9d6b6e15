//! # Generator Module
//!
//! Renders a planned topology into the files written under the output
//! directory. Rendering and writing are separate so a dry run can show
//! exactly what would be written.

pub mod compose_gen;
pub mod conf_gen;
pub mod manifest_gen;
pub mod script_gen;
pub mod summary_gen;
pub mod templates;

use crate::common::{file_utils, slugify};
use crate::config::Config;
use crate::error::Result;
use crate::input::SkippedEntry;
use crate::topology::Topology;
use conf_gen::NamespaceConf;
use manifest_gen::{SchemaFile, TopologyMap};
use std::path::{Path, PathBuf};

pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const CONFIG_DIR: &str = "config";
pub const TOPOLOGY_FILE: &str = "topology.yml";
pub const SCHEMA_FILE: &str = "namespaces.yml";
pub const SUMMARY_FILE: &str = "SUMMARY.txt";

/// One rendered output file, path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub executable: bool,
}

impl Artifact {
    fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
            executable: false,
        }
    }
}

/// Inputs to a generation run other than the topology
pub struct GenerationContext<'a> {
    pub config: &'a Config,
    pub output_dir: &'a Path,
    pub tools_suffix: &'a str,
    pub skipped: &'a [SkippedEntry],
}

/// Render every artifact for a run, in the order they are written
pub fn render_artifacts(topology: &Topology, ctx: &GenerationContext<'_>) -> Result<Vec<Artifact>> {
    let tera = templates::build_tera()?;
    let mut artifacts = Vec::new();

    artifacts.push(Artifact::new(
        COMPOSE_FILE,
        compose_gen::generate(topology, ctx.tools_suffix, ctx.config)?,
    ));

    let mut confs = Vec::with_capacity(topology.namespaces.len());
    for ns in &topology.namespaces {
        let conf = NamespaceConf::planned(&ns.namespace.name, ns.slug(), topology.replicas, ctx.config);
        artifacts.push(Artifact::new(
            manifest_gen::default_config_path(ns.slug()),
            conf_gen::generate(&tera, &conf, ctx.config)?,
        ));
        confs.push(conf);
    }

    artifacts.push(Artifact::new(
        TOPOLOGY_FILE,
        TopologyMap::from_topology(topology).to_yaml()?,
    ));
    artifacts.push(Artifact::new(
        SCHEMA_FILE,
        SchemaFile::from_confs(&confs).to_yaml()?,
    ));

    for script in script_gen::HELPER_SCRIPTS {
        let mut artifact = Artifact::new(script.file_name, script_gen::generate(&tera, script)?);
        artifact.executable = true;
        artifacts.push(artifact);
    }

    let summary = summary_gen::SummaryContext {
        output_dir: ctx.output_dir,
        tools_container: &compose_gen::tools_service_name(ctx.tools_suffix),
        skipped: ctx.skipped,
    };
    artifacts.push(Artifact::new(
        SUMMARY_FILE,
        summary_gen::generate(topology, &summary),
    ));

    Ok(artifacts)
}

/// Rebuild namespace configs from a `namespaces.yml` document
pub fn render_configs_from_schema(schema: &SchemaFile, config: &Config) -> Result<Vec<Artifact>> {
    let tera = templates::build_tera()?;
    let mut artifacts = Vec::with_capacity(schema.namespaces.len());
    for (name, settings) in &schema.namespaces {
        let slug = slugify(name);
        let conf = NamespaceConf {
            namespace: name.clone(),
            replication_factor: settings.replication_factor,
            file: settings
                .storage
                .file
                .clone()
                .unwrap_or_else(|| conf_gen::default_storage_file(&slug, config)),
            filesize: settings.storage.filesize.clone(),
            read_page_cache: settings.storage.read_page_cache,
        };
        artifacts.push(Artifact::new(
            manifest_gen::default_config_path(&slug),
            conf_gen::generate(&tera, &conf, config)?,
        ));
    }
    Ok(artifacts)
}

/// Write artifacts under `output_dir`, replacing existing files.
///
/// Writes are not transactional: an error leaves earlier files in place.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        let path = output_dir.join(&artifact.path);
        file_utils::write_artifact(&path, &artifact.content)?;
        if artifact.executable {
            file_utils::make_executable(&path)?;
        }
    }
    log::info!(
        "Wrote {} file(s) under {}",
        artifacts.len(),
        output_dir.display()
    );
    Ok(())
}
