//! Flipclock CLI
//!
//! Run the flip clock widget in a terminal, or drive it through a scripted
//! scenario against a manual clock.

mod live;
mod render;
mod scenario;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flipclock_theme::ScaleProfile;
use flipclock_widget::WidgetConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flipclock")]
#[command(author, version, about = "Flip-digit clock widget", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a live clock in the terminal
    Run(RunArgs),

    /// Run a JSON scenario against a manual clock
    Scenario {
        /// Scenario file
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Size attribute (small, medium, large)
    #[arg(long)]
    size: Option<String>,

    /// Theme attribute (light, dark, auto)
    #[arg(long)]
    theme: Option<String>,

    /// Size scale profile
    #[arg(long, value_parser = parse_profile)]
    profile: Option<ScaleProfile>,

    /// Report a dark system color scheme
    #[arg(long)]
    dark: bool,

    /// Stop after this many seconds
    #[arg(long)]
    duration_secs: Option<u64>,
}

impl RunArgs {
    /// Load the configuration file, then apply command-line overrides
    fn widget_config(&self) -> Result<WidgetConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => WidgetConfig::default(),
        };
        if let Some(size) = &self.size {
            config.attributes.size = Some(size.clone());
        }
        if let Some(theme) = &self.theme {
            config.attributes.theme = Some(theme.clone());
        }
        if let Some(profile) = self.profile {
            config.scale_profile = profile;
        }
        Ok(config)
    }
}

fn parse_profile(s: &str) -> Result<ScaleProfile, String> {
    match s {
        "classic" => Ok(ScaleProfile::Classic),
        "soft" => Ok(ScaleProfile::Soft),
        other => Err(format!("unknown profile `{other}`, expected classic or soft")),
    }
}

fn load_config(path: &Path) -> Result<WidgetConfig> {
    WidgetConfig::from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => live::run(&args),
        Commands::Scenario { file, json } => {
            let passed = scenario::run_file(&file, json)?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
