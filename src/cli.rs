use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aero-compose")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate local multi-namespace Aerospike clusters for Docker Compose")]
#[command(long_about = "Generates a docker-compose.yml, one Aerospike config per namespace, topology manifests and helper scripts, then drives the resulting stack through the Docker CLI.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (defaults to ./aero-compose.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the generated files live in
    #[arg(short, long, global = true, value_name = "DIR", env = "AERO_COMPOSE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the compose file, namespace configs and helper scripts
    Generate {
        /// Namespace list (one per line) or YAML map of namespace to .conf file
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file: Option<PathBuf>,

        /// Nodes per namespace, also used as the replication factor
        #[arg(
            short = 'r',
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        replicas: u32,

        /// Print the rendered files instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Additional namespaces
        #[arg(value_name = "NAMESPACE")]
        namespaces: Vec<String>,
    },

    /// List this stack's containers, or open aql against one of them
    Overview {
        /// Container to connect to
        #[arg(value_name = "CONTAINER")]
        container: Option<String>,
    },

    /// Copy each namespace config into its containers and restart them
    PushConfig,

    /// Rewrite the namespace configs from namespaces.yml
    RegenConfig,

    /// Start the generated stack (docker compose up -d)
    Up,

    /// Stop and remove the generated stack (docker compose down)
    Down,
}

impl Cli {
    /// Log level for the requested verbosity; quiet still keeps warnings
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Warn;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        env_logger::Builder::from_default_env()
            .filter_level(self.log_level())
            .init();
    }
}
