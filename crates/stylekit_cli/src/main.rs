//! stylekit command-line interface

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use stylekit_app::{replay, Controller, ControllerConfig, ReplayScript};
use stylekit_platform::{HeadlessPlatform, PageSpec};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stylekit")]
#[command(author, version, about = "Headless driver for the design-system page controller")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a page, replay a script and print the resulting UI state as JSON
    Replay {
        /// Page description (TOML)
        #[arg(long)]
        page: PathBuf,

        /// Scripted steps (TOML); without one the freshly mounted page is reported
        #[arg(long)]
        script: Option<PathBuf>,

        /// Controller configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// URL fragment present at load, e.g. `#colors`
        #[arg(long)]
        hash: Option<String>,

        /// Start with the OS preferring a dark colour scheme
        #[arg(long)]
        prefers_dark: bool,
    },

    /// Validate a configuration file and print it with defaults filled in
    CheckConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "stylekit=info",
        1 => "stylekit=debug",
        _ => "stylekit=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Replay {
            page,
            script,
            config,
            hash,
            prefers_dark,
        } => run_replay(&page, script.as_deref(), config.as_deref(), hash.as_deref(), prefers_dark),
        Commands::CheckConfig { path } => check_config(&path),
    }
}

fn load_config(path: Option<&Path>) -> Result<ControllerConfig> {
    match path {
        Some(path) => ControllerConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(ControllerConfig::default()),
    }
}

fn run_replay(
    page: &Path,
    script: Option<&Path>,
    config: Option<&Path>,
    hash: Option<&str>,
    prefers_dark: bool,
) -> Result<()> {
    let raw = fs::read_to_string(page)
        .with_context(|| format!("Failed to read page description {}", page.display()))?;
    let document = PageSpec::from_toml_str(&raw)
        .and_then(|spec| spec.build())
        .with_context(|| format!("Invalid page description {}", page.display()))?;
    let config = load_config(config)?;
    let script = match script {
        Some(path) => ReplayScript::from_path(path)
            .with_context(|| format!("Invalid script {}", path.display()))?,
        None => ReplayScript::default(),
    };

    let mut platform = HeadlessPlatform::new().with_prefers_dark(prefers_dark);
    if let Some(hash) = hash {
        platform = platform.with_hash(hash);
    }

    let mut controller = Controller::mount(document, platform, &config);
    let report = replay(&mut controller, &script)?;
    controller.shutdown();

    let mut stdout = io::stdout().lock();
    report.write_to_writer(&mut stdout)?;
    stdout.flush()?;

    if report.is_failed() {
        bail!(
            "step {} failed: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }
    tracing::info!(steps = report.steps_run, elapsed_ms = report.elapsed_ms, "replay passed");
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    let resolved = config.to_toml().context("Failed to render configuration")?;
    print!("{resolved}");
    tracing::info!(
        modals = config.modals.len(),
        dropdowns = config.dropdowns.len(),
        pills = config.pills.len(),
        "configuration is valid"
    );
    Ok(())
}
