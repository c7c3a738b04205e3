//! Entity scaffolding.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::ProjectConfig;
use crate::scaffold::create_entity;

/// Create skeleton files for an entity.
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Entity name, e.g. `header`, `header__logo`, `button_size_l`
    entity: String,

    /// Comma-separated technologies to create
    #[arg(short, long, default_value = "css,js,html")]
    tech: String,
}

impl AddCommand {
    pub fn execute(self, config: &ProjectConfig) -> Result<()> {
        let report = create_entity(config, &self.entity, &self.tech)?;

        for path in &report.created {
            println!("{} {}", "created".green(), path.display());
        }
        for path in &report.existing {
            println!("{} {}", "exists".yellow(), path.display());
        }
        for tech in &report.unknown {
            println!("{} unknown technology '{}'", "skipped".red(), tech);
        }
        if report.created.is_empty() && report.existing.is_empty() {
            println!("Nothing created for {}", report.entity.cyan());
        }
        Ok(())
    }
}
