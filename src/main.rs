use aero_compose::{
    cli::{Cli, Commands},
    config::{self, Config},
    display,
    generator::{self, compose_gen, GenerationContext},
    input, ops,
    runtime::{DockerCli, WaitPolicy},
    topology::{self, PortAllocator},
};
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> aero_compose::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;
    let output_dir = cli.output.clone().unwrap_or_else(|| config.output_dir.clone());
    log::debug!("Using output directory {}", output_dir.display());

    // Execute command
    match cli.command {
        Commands::Generate {
            file,
            replicas,
            dry_run,
            namespaces,
        } => handle_generate(&config, &output_dir, file, replicas, dry_run, &namespaces, cli.quiet),
        Commands::Overview { container } => handle_overview(&config, &output_dir, container),
        Commands::PushConfig => {
            let report = ops::push_config::push(&DockerCli::new(), &output_dir)?;
            display::print_push_report(&report);
            Ok(())
        }
        Commands::RegenConfig => {
            let written = ops::regen_config::regenerate(&output_dir, &config)?;
            for path in &written {
                println!("{} {}", "✅ Rewrote".green(), path.display());
            }
            Ok(())
        }
        Commands::Up => ops::up(&DockerCli::new(), &output_dir),
        Commands::Down => ops::down(&DockerCli::new(), &output_dir),
    }
}

fn handle_generate(
    config: &Config,
    output_dir: &Path,
    file: Option<PathBuf>,
    replicas: u32,
    dry_run: bool,
    namespaces: &[String],
    quiet: bool,
) -> aero_compose::Result<()> {
    // Invalid entries are logged as warnings while reading.
    let set = input::read_namespaces(file.as_deref(), namespaces)?;

    let mut ports = PortAllocator::from_config(&config.ports);
    let plan = topology::plan(set.namespaces(), replicas, &mut ports)?;

    let tools_suffix = compose_gen::new_tools_suffix();
    let ctx = GenerationContext {
        config,
        output_dir,
        tools_suffix: &tools_suffix,
        skipped: set.skipped(),
    };
    let artifacts = generator::render_artifacts(&plan, &ctx)?;

    if dry_run {
        for artifact in &artifacts {
            println!("--- {} (dry run) ---", output_dir.join(&artifact.path).display());
            println!("{}", artifact.content);
        }
        return Ok(());
    }

    generator::write_artifacts(output_dir, &artifacts)?;

    if !quiet {
        if let Some(summary) = artifacts
            .iter()
            .find(|a| a.path == Path::new(generator::SUMMARY_FILE))
        {
            println!("{}", "✅ Stack generated".green().bold());
            print!("{}", summary.content);
        }
    }
    Ok(())
}

fn handle_overview(
    config: &Config,
    output_dir: &Path,
    container: Option<String>,
) -> aero_compose::Result<()> {
    let runtime = DockerCli::new();
    match container {
        None => {
            let containers = ops::overview::list(&runtime, output_dir)?;
            display::print_containers(&containers);
            Ok(())
        }
        Some(name) => {
            let code = ops::overview::connect(
                &runtime,
                output_dir,
                &name,
                config.ports.service,
                WaitPolicy::default(),
            )?;
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
    }
}
