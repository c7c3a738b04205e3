//! Display a page's dependency chain.
//!
//! ```text
//! index
//! ├── ghost (implicit) missing
//! ├── icon (explicit)
//! └── link (implicit)
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::config::ProjectConfig;
use crate::constants::MARKUP_EXTENSION;
use crate::core::BemForgeError;
use crate::pipeline::BuildPipeline;
use crate::resolver::DependencyKind;

/// Show the linearized dependency chain of a page template.
#[derive(Args, Debug)]
pub struct ChainCommand {
    /// Page template name, without extension
    template: String,

    /// Output format: tree or json
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,
}

#[derive(Debug, Serialize)]
struct ChainEntry<'a> {
    name: &'a str,
    kind: DependencyKind,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct ChainReport<'a> {
    template: &'a str,
    chain: Vec<ChainEntry<'a>>,
}

impl ChainCommand {
    pub fn execute(self, config: ProjectConfig) -> Result<()> {
        self.validate_arguments()?;

        let path = config.templates_dir().join(format!("{}.{MARKUP_EXTENSION}", self.template));
        if !path.is_file() {
            return Err(BemForgeError::TemplateNotFound {
                name: self.template,
            }
            .into());
        }

        let mut pipeline = BuildPipeline::new(config);
        let template = pipeline.build_template(&path)?.clone();
        let report = ChainReport {
            template: &template.name,
            chain: template
                .chain
                .iter()
                .map(|dep| ChainEntry {
                    name: &dep.name,
                    kind: dep.kind,
                    exists: pipeline.is_entity_exists(&dep.name),
                })
                .collect(),
        };

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&report)?),
            _ => output_tree(&report),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => Ok(()),
            _ => Err(anyhow!("Invalid format '{}'. Valid formats are: tree, json", self.format)),
        }
    }
}

fn output_tree(report: &ChainReport<'_>) {
    println!("{}", report.template.cyan().bold());
    if report.chain.is_empty() {
        println!("{}", "(no dependencies)".bright_black());
        return;
    }

    for (i, entry) in report.chain.iter().enumerate() {
        let connector = if i == report.chain.len() - 1 { "└── " } else { "├── " };
        let missing = if entry.exists {
            String::new()
        } else {
            format!(" {}", "missing".red())
        };
        println!(
            "{}{} {}{}",
            connector,
            entry.name.cyan(),
            format!("({})", entry.kind).bright_black(),
            missing
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_is_rejected() {
        let cmd = ChainCommand {
            template: "index".into(),
            format: "yaml".into(),
        };
        assert!(cmd.validate_arguments().is_err());
    }

    #[test]
    fn test_report_serialization() {
        let report = ChainReport {
            template: "index",
            chain: vec![ChainEntry {
                name: "header",
                kind: DependencyKind::Explicit,
                exists: false,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["chain"][0]["kind"], "explicit");
        assert_eq!(json["chain"][0]["exists"], false);
    }
}
