//! Command-line interface for bemforge.
//!
//! # Commands
//!
//! - `build` - Clean the output directory and build every page
//! - `add` - Create skeleton files for a new entity
//! - `chain` - Show the linearized dependency chain of a page
//! - `bundles` - Show which pages reference which entities
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config <path>` - Use a specific `bemforge.toml` instead of searching
//!   upward from the current directory
//!
//! # Examples
//!
//! ```bash
//! bemforge build
//! bemforge add header__logo --tech css,html
//! bemforge chain index --format json
//! bemforge -v bundles
//! ```

mod add;
mod build;
mod bundles;
mod chain;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProjectConfig;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_level: &'static str,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

/// Layered BEM entity resolver and bundler.
#[derive(Parser, Debug)]
#[command(
    name = "bemforge",
    about = "Layered BEM entity resolver and asset bundler",
    version,
    long_about = "bemforge resolves BEM entities across override levels, links page templates to \
                  the entities they use and bundles their styles, behaviors and assets."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to bemforge.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build all pages, bundles and assets into the output directory
    Build(build::BuildCommand),

    /// Create skeleton files for an entity on the highest-priority level
    Add(add::AddCommand),

    /// Show the dependency chain of a page template
    Chain(chain::ChainCommand),

    /// Show the bundle map of all page templates
    Bundles(bundles::BundlesCommand),
}

impl Cli {
    /// Settings derived from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run the selected command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(&config)
    }

    /// Run the selected command with explicit settings.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        let project = ProjectConfig::discover(config.config_path.as_deref())?;
        tracing::debug!("Project root: {}", project.root.display());

        match self.command {
            Commands::Build(cmd) => cmd.execute(project),
            Commands::Add(cmd) => cmd.execute(&project),
            Commands::Chain(cmd) => cmd.execute(project),
            Commands::Bundles(cmd) => cmd.execute(project),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        assert!(Cli::try_parse_from(["bemforge", "--help"]).is_err());
        assert!(Cli::try_parse_from(["bemforge", "build"]).is_ok());
        assert!(Cli::try_parse_from(["bemforge"]).is_err());
    }

    #[test]
    fn test_log_levels() {
        let cli = Cli::try_parse_from(["bemforge", "-v", "build"]).unwrap();
        assert_eq!(cli.build_config().log_level, "debug");

        let cli = Cli::try_parse_from(["bemforge", "build", "--quiet"]).unwrap();
        assert_eq!(cli.build_config().log_level, "error");

        let cli = Cli::try_parse_from(["bemforge", "build"]).unwrap();
        assert_eq!(cli.build_config().log_level, "info");

        assert!(Cli::try_parse_from(["bemforge", "-v", "-q", "build"]).is_err());
    }

    #[test]
    fn test_config_option() {
        let cli = Cli::try_parse_from(["bemforge", "--config", "site/bemforge.toml", "bundles"]).unwrap();
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("site/bemforge.toml")));
    }

    #[test]
    fn test_all_commands_parse() {
        for args in [
            vec!["bemforge", "build"],
            vec!["bemforge", "add", "header__logo", "--tech", "css,html"],
            vec!["bemforge", "add", "header"],
            vec!["bemforge", "chain", "index"],
            vec!["bemforge", "chain", "index", "--format", "json"],
            vec!["bemforge", "bundles", "-f", "json"],
        ] {
            assert!(Cli::try_parse_from(args.clone()).is_ok(), "failed to parse {args:?}");
        }
    }
}
