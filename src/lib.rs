//! # aero-compose
//!
//! Generates everything needed to run several local Aerospike clusters side by
//! side under Docker Compose: one cluster per namespace, each with its own
//! nodes, volumes, bridge network and host ports.
//!
//! ## Features
//!
//! - **Flexible input**: namespaces from a plain list, a YAML map of
//!   namespace to config file, or command-line arguments
//! - **Deterministic planning**: node names, volumes and host ports depend
//!   only on declaration order and replica count
//! - **Complete output**: compose file, per-namespace configs, topology
//!   manifests, helper scripts and a run summary
//! - **Helpers**: container overview, interactive `aql`, config push and
//!   regeneration through the Docker CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use aero_compose::{config::Config, input, topology};
//!
//! # fn main() -> aero_compose::Result<()> {
//! let set = input::read_namespaces(None, &["users".to_string(), "cache".to_string()])?;
//! let mut ports = topology::PortAllocator::default();
//! let plan = topology::plan(set.namespaces(), 3, &mut ports)?;
//! let compose = aero_compose::generate_compose(&plan, "0badc0de", &Config::default())?;
//! println!("{}", compose);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod display;
pub mod error;
pub mod generator;
pub mod input;
pub mod ops;
pub mod runtime;
pub mod topology;

// Re-export commonly used types and functions
pub use error::{AeroComposeError, Result};
pub use generator::compose_gen::generate as generate_compose;
pub use input::{read_namespaces, Namespace};
pub use topology::{plan, PortAllocator, Topology};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
