// ABOUTME: Migration run settings and the optional TOML settings file
// ABOUTME: File values seed the settings; CLI flags override them

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;

/// Settings that customize one migration run.
///
/// `chunk_size` of `None` transfers each table in a single batch; the two
/// type-family defaults feed the DDL emission step and `tables` restricts
/// the run to a subset of the source catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationSettings {
    pub chunk_size: Option<usize>,
    pub mysql_database: String,
    pub integer_type: String,
    pub string_type: String,
    pub tables: Vec<String>,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            chunk_size: None,
            mysql_database: "transfer".to_string(),
            integer_type: "INT(11)".to_string(),
            string_type: "VARCHAR(255)".to_string(),
            tables: Vec::new(),
        }
    }
}

impl MigrationSettings {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == Some(0) {
            bail!("chunk_size must be a positive number of rows");
        }
        if self.mysql_database.trim().is_empty() {
            bail!("mysql_database cannot be empty");
        }
        Ok(())
    }
}

/// Load settings from a TOML file.
pub fn load_settings_from_file(path: &str) -> Result<MigrationSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file at {}", path))?;
    let settings: MigrationSettings = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse TOML settings at {}", path))?;
    settings.validate()?;
    Ok(settings)
}
