//! Full project build.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::ProjectConfig;
use crate::pipeline::{BuildPipeline, OutputWriter};

/// Clean the output directory and build everything.
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Keep existing files in the output directory
    #[arg(long)]
    no_clean: bool,
}

impl BuildCommand {
    pub fn execute(self, config: ProjectConfig) -> Result<()> {
        let writer = OutputWriter::new(config.out_dir());
        if !self.no_clean {
            writer.clean()?;
        }

        let mut pipeline = BuildPipeline::new(config);
        let update = pipeline.full_build().context("Build failed")?;
        let summary = writer.apply(&update)?;

        println!(
            "{} Built {} into {}",
            "✓".green(),
            summary,
            writer.out_dir().display().to_string().bright_black()
        );

        let vendor: Vec<&str> = pipeline.bundles().vendor_entities().collect();
        if !vendor.is_empty() {
            println!("  vendor: {}", vendor.join(", ").cyan());
        }
        Ok(())
    }
}
