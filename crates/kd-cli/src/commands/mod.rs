//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod kana;
pub mod kanji;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kd_core::config::Config;
use std::path::{Path, PathBuf};

/// kanadrill - kana writing and kanji reading practice
#[derive(Debug, Parser)]
#[command(name = "kanadrill")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KANADRILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Practice writing kana for romaji syllables
    Kana(kana::KanaArgs),

    /// Practice kanji readings from a deck file
    Kanji(kanji::KanjiArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.unwrap_or_else(default_config_path);

    match cli.command {
        Commands::Kana(args) => kana::execute(args, &config_path),
        Commands::Kanji(args) => kanji::execute(args, &config_path),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Per-user configuration file location
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("org", "kanadrill", "kanadrill")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".kanadrill")
        })
        .join("config.toml")
}

/// Load and validate the configuration, defaulting when no file exists
pub fn load_config(path: &Path) -> Result<Config> {
    tracing::debug!("Configuration path: {:?}", path);
    let config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
