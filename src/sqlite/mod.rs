// ABOUTME: Source-side SQLite handle with path validation and read-only open
// ABOUTME: The migration never writes to the source database

pub mod reader;

use crate::error::Result;
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};

/// Validate a SQLite file path before opening it.
///
/// Canonicalizes the path to resolve symlinks and relative segments,
/// requires a regular file, and requires a `.db`, `.sqlite` or `.sqlite3`
/// extension.
///
/// # Examples
///
/// ```no_run
/// # use sqlite3_to_mysql::sqlite::validate_source_path;
/// assert!(validate_source_path("database.db").is_ok());
/// assert!(validate_source_path("../../../etc/passwd").is_err());
/// ```
pub fn validate_source_path(path: &str) -> anyhow::Result<PathBuf> {
    if path.is_empty() {
        bail!("SQLite file path cannot be empty");
    }

    let canonical = Path::new(path).canonicalize().with_context(|| {
        format!(
            "Failed to resolve SQLite file '{}'. \
             File may not exist or may not be readable.",
            path
        )
    })?;

    if !canonical.is_file() {
        bail!("Path '{}' is not a regular file", path);
    }

    match canonical.extension().and_then(|e| e.to_str()) {
        Some("db") | Some("sqlite") | Some("sqlite3") => {}
        _ => bail!(
            "'{}' does not look like an SQLite database. \
             Expected a .db, .sqlite or .sqlite3 file.",
            path
        ),
    }

    tracing::debug!("Validated SQLite path: {}", canonical.display());

    Ok(canonical)
}

/// Validate a user-supplied table name before it reaches any statement.
///
/// Only alphanumeric characters and underscores are accepted. Names read
/// from the catalog itself are quoted instead; this check guards the
/// `--tables` subset coming in from the command line.
pub fn validate_table_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        bail!("Table name cannot be empty");
    }
    if name.len() > 64 {
        bail!("Table name too long (max 64 characters): {}", name);
    }
    for ch in name.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            bail!(
                "Invalid table name '{}': contains '{}'. \
                 Only alphanumeric characters and underscores are allowed.",
                name,
                ch
            );
        }
    }
    Ok(())
}

/// Open the source database in read-only mode.
///
/// A catalog probe runs immediately so a corrupt or non-database file
/// fails here rather than halfway through the migration.
pub fn open_source(path: &Path) -> Result<rusqlite::Connection> {
    tracing::info!("Opening SQLite database: {}", path.display());

    let conn = rusqlite::Connection::open_with_flags(
        path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
    )?;

    let _objects: i64 = conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get(0)
    })?;

    tracing::debug!("Source database opened read-only");

    Ok(conn)
}
