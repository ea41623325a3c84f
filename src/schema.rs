// ABOUTME: Table schema model and MySQL statement builders
// ABOUTME: Owns column translation, CREATE TABLE and INSERT IGNORE emission

use crate::dialect::{is_integer_class, TypeTranslator};
use crate::error::{MigrationError, Result};

/// One column as the source catalog reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub is_primary_key: bool,
}

/// One column after translation into the destination dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedColumn {
    pub name: String,
    pub mysql_type: String,
    pub not_null: bool,
    pub auto_increment: bool,
}

/// Ordered column list for one table, read fresh at migration time.
///
/// Column order is positional: translated columns, the SELECT statement
/// and the INSERT placeholders all follow the catalog's ordering.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnSpec>,
    pub primary_key: Option<String>,
}

impl TableSchema {
    /// Composite keys are not modeled: when the catalog reports more than
    /// one primary-key column, the last one reported wins.
    pub fn new(table: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        let primary_key = columns
            .iter()
            .filter(|c| c.is_primary_key)
            .last()
            .map(|c| c.name.clone());
        Self {
            table: table.into(),
            columns,
            primary_key,
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Translate every column, preserving order.
    ///
    /// `auto_increment` is set only on a primary-key column whose
    /// translated type is integer-class.
    pub fn translate(&self, translator: &TypeTranslator) -> Result<Vec<TranslatedColumn>> {
        self.columns
            .iter()
            .map(|column| {
                let mysql_type = translator.translate(&column.declared_type).map_err(
                    |source| MigrationError::InvalidTypeDeclaration {
                        table: self.table.clone(),
                        column: column.name.clone(),
                        source,
                    },
                )?;
                let auto_increment = column.is_primary_key && is_integer_class(&mysql_type);
                Ok(TranslatedColumn {
                    name: column.name.clone(),
                    mysql_type,
                    not_null: column.not_null,
                    auto_increment,
                })
            })
            .collect()
    }

    /// Emit the destination DDL for this table.
    ///
    /// `IF NOT EXISTS` keeps re-runs from failing on tables that already
    /// exist; at most one `PRIMARY KEY` clause is emitted.
    pub fn create_table_sql(&self, translator: &TypeTranslator) -> Result<String> {
        let columns = self.translate(translator)?;
        let mut clauses = Vec::with_capacity(columns.len() + 1);
        for column in &columns {
            let mut clause = format!(
                "{} {} {}",
                quote_mysql(&column.name),
                column.mysql_type,
                if column.not_null { "NOT NULL" } else { "NULL" }
            );
            if column.auto_increment {
                clause.push_str(" AUTO_INCREMENT");
            }
            clauses.push(clause);
        }
        if let Some(pk) = &self.primary_key {
            clauses.push(format!("PRIMARY KEY ({})", quote_mysql(pk)));
        }
        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} ( {} ) ENGINE = InnoDB CHARACTER SET utf8mb4",
            quote_mysql(&self.table),
            clauses.join(", ")
        ))
    }
}

/// One multi-row INSERT IGNORE statement with `row_count` placeholder groups.
///
/// IGNORE makes re-runs idempotent for rows covered by a uniqueness
/// constraint; rows without one are inserted again.
pub fn insert_ignore_sql(table: &str, columns: &[String], row_count: usize) -> String {
    let fields = columns
        .iter()
        .map(|c| quote_mysql(c))
        .collect::<Vec<_>>()
        .join(", ");
    let group = format!("({})", vec!["?"; columns.len()].join(", "));
    let values = vec![group; row_count].join(", ");
    format!(
        "INSERT IGNORE INTO {} ({}) VALUES {}",
        quote_mysql(table),
        fields,
        values
    )
}

/// Quote an identifier for MySQL, escaping embedded backticks.
pub fn quote_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote an identifier for SQLite, escaping embedded double quotes.
pub fn quote_sqlite(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
