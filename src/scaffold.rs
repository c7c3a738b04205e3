//! Entity skeleton creation.
//!
//! New entities always go to the highest-priority level so they override
//! anything with the same name on the shared levels.
//!
//! | Technology | Created at                           | Content              |
//! |------------|--------------------------------------|----------------------|
//! | `css`      | `<level>/<entity path>.css`          | `.<name> {\n\t\n}`   |
//! | `js`       | `<level>/<entity path>.js`           | empty                |
//! | `html`     | `<level>/<entity path>.html`         | `{# <name> #}\n\n`   |
//! | `img`      | `<level>/<entity dir>/img/`          | empty directory      |
//! | `fonts`    | `<level>/<entity dir>/fonts/`        | empty directory      |

use anyhow::Result;
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::core::{BemForgeError, EntityName, Technology};
use crate::utils::fs::{ensure_dir, safe_write};

/// What [`create_entity`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Entity name
    pub entity: String,
    /// Files and directories created
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left untouched
    pub existing: Vec<PathBuf>,
    /// Technology names that were not recognized
    pub unknown: Vec<String>,
}

/// Create skeleton files for `name` on the last configured level.
///
/// `technologies` is a comma-separated list such as `"css,js,html"`.
///
/// ```rust,no_run
/// use bemforge::config::ProjectConfig;
/// use bemforge::scaffold::create_entity;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = ProjectConfig::discover(None)?;
/// let report = create_entity(&config, "menu__item", "css,html")?;
/// for path in &report.created {
///     println!("created {}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn create_entity(config: &ProjectConfig, name: &str, technologies: &str) -> Result<ScaffoldReport> {
    let entity = EntityName::parse(name)?;
    let level = config.last_level().ok_or_else(|| BemForgeError::ConfigValidation {
        reason: "no levels configured".to_string(),
    })?;

    let mut report = ScaffoldReport {
        entity: entity.to_string(),
        ..ScaffoldReport::default()
    };

    for raw in technologies.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let technology = match raw.parse::<Technology>() {
            Ok(technology) => technology,
            Err(e) => {
                tracing::warn!("{e}");
                report.unknown.push(raw.to_string());
                continue;
            }
        };

        if let Some(dir) = technology.asset_dir() {
            let path = entity.entity_dir(&level).join(dir);
            if path.is_dir() {
                report.existing.push(path);
            } else {
                ensure_dir(&path)?;
                report.created.push(path);
            }
            continue;
        }

        let Some(ext) = technology.extension() else {
            continue;
        };
        let path = entity.file_path(&level, ext);
        if path.exists() {
            tracing::debug!("Skipping existing {}", path.display());
            report.existing.push(path);
            continue;
        }

        safe_write(&path, &skeleton(&entity, technology))?;
        tracing::debug!("Created {}", path.display());
        report.created.push(path);
    }

    Ok(report)
}

fn skeleton(entity: &EntityName, technology: Technology) -> String {
    match technology {
        Technology::Style => format!(".{entity} {{\n\t\n}}"),
        Technology::Markup => format!("{{# {entity} #}}\n\n"),
        _ => String::new(),
    }
}
