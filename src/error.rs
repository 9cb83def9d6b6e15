use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AeroComposeError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Artifact generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Container runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("no valid namespaces given (use -f FILE or pass names as arguments)")]
    NoNamespaces,

    #[error("namespaces '{first}' and '{second}' both map to resource name '{slug}'")]
    SlugCollision {
        first: String,
        second: String,
        slug: String,
    },

    #[error("replica count must be a positive integer, got {0}")]
    InvalidReplicas(u32),

    #[error("ran out of host ports while planning namespace '{namespace}'")]
    PortsExhausted { namespace: String },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Template rendering failed: {0}")]
    TemplateRendering(#[from] tera::Error),

    #[error("Compose serialization failed: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", path.display())]
    OutputCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing generated artifact {}; run `aero-compose generate` first", path.display())]
    MissingArtifact { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {}: {reason}", path.display())]
    InvalidFile { path: PathBuf, reason: String },

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("`{0}` is not available; is Docker installed and on PATH?")]
    Unavailable(String),

    #[error("permission denied talking to the Docker daemon; re-run with sudo or add your user to the `docker` group")]
    PermissionDenied,

    #[error("`{command}` exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("no container named '{0}' found")]
    ContainerNotFound(String),

    #[error("no tools container found; run `aero-compose up` first")]
    ToolsNotFound,

    #[error("container '{name}' did not reach running state after {attempts} attempts")]
    StartTimeout { name: String, attempts: u32 },

    #[error("could not parse container listing: {0}")]
    BadListing(String),
}

pub type Result<T> = std::result::Result<T, AeroComposeError>;
