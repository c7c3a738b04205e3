//! Display the bundle map.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;

use crate::config::ProjectConfig;
use crate::pipeline::BuildPipeline;

/// Show which page templates reference which entities.
#[derive(Args, Debug)]
pub struct BundlesCommand {
    /// Output format: table or json
    #[arg(short = 'f', long, default_value = "table")]
    format: String,
}

impl BundlesCommand {
    pub fn execute(self, config: ProjectConfig) -> Result<()> {
        self.validate_arguments()?;

        let mut pipeline = BuildPipeline::new(config);
        pipeline.load_templates()?;
        pipeline.calculate_bundles();
        let bundles = pipeline.bundles();

        if self.format == "json" {
            println!("{}", serde_json::to_string_pretty(bundles)?);
            return Ok(());
        }

        if bundles.is_empty() {
            println!("No entities referenced.");
            return Ok(());
        }

        let width = bundles.iter().map(|(name, _)| name.len()).max().unwrap_or(0).max("ENTITY".len());
        println!("{:<width$}  {:>4}  {}", "ENTITY".bold(), "REFS".bold(), "TEMPLATES".bold());
        for (name, entry) in bundles.iter() {
            let templates: Vec<&str> = entry.referencing_templates.iter().map(String::as_str).collect();
            let vendor = if entry.is_vendor {
                format!(" {}", "[vendor]".yellow())
            } else {
                String::new()
            };
            println!(
                "{:<width$}  {:>4}  {}{}",
                name.cyan(),
                entry.reference_count(),
                templates.join(", "),
                vendor
            );
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "table" | "json" => Ok(()),
            _ => Err(anyhow!("Invalid format '{}'. Valid formats are: table, json", self.format)),
        }
    }
}
