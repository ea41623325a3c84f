// ABOUTME: Typed error taxonomy for the migration core
// ABOUTME: Callers branch on the failure kind instead of matching message strings

use crate::dialect::InvalidTypeDeclaration;
use thiserror::Error;

/// One of the two database handles became unusable.
#[derive(Debug, Error)]
pub enum ConnectivityError {
    #[error("SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("MySQL: {0}")]
    Mysql(#[from] mysql_async::Error),
}

/// Errors raised by the migration core.
///
/// All of them are fatal: the run stops at the first one, and tables
/// migrated before the failure are left in place. The failing table name
/// is attached wherever one exists.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A column's declared type has no recognizable leading type name.
    /// Aborts the table's DDL step before any row is transferred.
    #[error("cannot translate column '{column}' of table '{table}': {source}")]
    InvalidTypeDeclaration {
        table: String,
        column: String,
        source: InvalidTypeDeclaration,
    },

    /// MySQL rejected a CREATE TABLE statement.
    #[error("schema creation failed for table '{table}': {source}")]
    Schema {
        table: String,
        source: mysql_async::Error,
    },

    /// MySQL rejected a batch insert.
    #[error("data transfer failed for table '{table}': {source}")]
    DataTransfer {
        table: String,
        source: mysql_async::Error,
    },

    /// Either database handle failed outside of DDL or DML execution.
    #[error("database connection failure: {0}")]
    Connectivity(#[from] ConnectivityError),
}

impl MigrationError {
    /// Wrap a destination-side error from the DDL step.
    pub fn schema(table: impl Into<String>, source: mysql_async::Error) -> Self {
        MigrationError::Schema {
            table: table.into(),
            source,
        }
    }

    /// Wrap a destination-side error from the row transfer step.
    pub fn data_transfer(table: impl Into<String>, source: mysql_async::Error) -> Self {
        MigrationError::DataTransfer {
            table: table.into(),
            source,
        }
    }
}

// Source-side failures always mean the SQLite handle is unusable for the
// rest of the run; MySQL errors are classified at each call site instead.
impl From<rusqlite::Error> for MigrationError {
    fn from(err: rusqlite::Error) -> Self {
        MigrationError::Connectivity(ConnectivityError::Sqlite(err))
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;
