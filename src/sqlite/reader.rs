// ABOUTME: SQLite catalog introspection for the transfer pipeline
// ABOUTME: Table enumeration, column metadata and row counts

use crate::error::Result;
use crate::schema::{quote_sqlite, ColumnSpec, TableSchema};
use rusqlite::Connection;

/// List user tables in source catalog order.
///
/// Internal `sqlite_%` tables are excluded. `subset`, when non-empty,
/// restricts enumeration to the named tables; names absent from the
/// catalog are silently dropped. No sorting is applied: the destination
/// is populated in the order the source catalog reports.
pub fn list_tables(conn: &Connection, subset: &[String]) -> Result<Vec<String>> {
    tracing::debug!("Listing tables from the source catalog");

    let tables = if subset.is_empty() {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    } else {
        let placeholders = vec!["?"; subset.len()].join(", ");
        let sql = format!(
            "SELECT name FROM sqlite_master \
             WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name IN ({})",
            placeholders
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(subset.iter()), |row| {
            row.get::<_, String>(0)
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()?
    };

    tracing::info!("Found {} table(s) in source database", tables.len());

    Ok(tables)
}

/// Read one table's column list from the catalog.
///
/// Produces the ordered `ColumnSpec` sequence the rest of the pipeline
/// relies on for positional row binding.
pub fn table_schema(conn: &Connection, table: &str) -> Result<TableSchema> {
    let sql = format!("PRAGMA table_info({})", quote_sqlite(table));
    let mut stmt = conn.prepare(&sql)?;

    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnSpec {
                name: row.get(1)?,
                declared_type: row.get(2)?,
                not_null: row.get::<_, i64>(3)? != 0,
                is_primary_key: row.get::<_, i64>(5)? != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!("Table '{}' has {} column(s)", table, columns.len());

    Ok(TableSchema::new(table, columns))
}

/// Total row count for one table.
pub fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_sqlite(table));
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE users (
                id INT NOT NULL,
                name VARCHAR(40) NOT NULL,
                bio TEXT,
                PRIMARY KEY (id)
             );
             CREATE TABLE posts (
                id INT NOT NULL,
                user_id INT,
                title TEXT NOT NULL,
                PRIMARY KEY (id)
             );
             CREATE TABLE audit_log (at INTEGER, message TEXT);

             INSERT INTO users VALUES (1, 'Alice', NULL), (2, 'Bob', 'hi');
             INSERT INTO posts VALUES (1, 1, 'First');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn tables_come_back_in_catalog_order() {
        let conn = scratch_db();
        let tables = list_tables(&conn, &[]).unwrap();
        assert_eq!(tables, vec!["users", "posts", "audit_log"]);
    }

    #[test]
    fn internal_tables_are_excluded() {
        let conn = scratch_db();
        conn.execute(
            "CREATE TABLE counter (id INTEGER PRIMARY KEY AUTOINCREMENT)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO counter DEFAULT VALUES", [])
            .unwrap();

        let tables = list_tables(&conn, &[]).unwrap();
        assert!(!tables.iter().any(|t| t.starts_with("sqlite_")));
        assert!(tables.contains(&"counter".to_string()));
    }

    #[test]
    fn subset_restricts_enumeration() {
        let conn = scratch_db();
        let subset = vec!["posts".to_string(), "no_such_table".to_string()];
        let tables = list_tables(&conn, &subset).unwrap();
        assert_eq!(tables, vec!["posts"]);
    }

    #[test]
    fn introspection_reads_all_column_facts() {
        let conn = scratch_db();
        let schema = table_schema(&conn, "users").unwrap();

        assert_eq!(schema.table, "users");
        assert_eq!(schema.primary_key.as_deref(), Some("id"));

        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "bio"]);

        let id = &schema.columns[0];
        assert_eq!(id.declared_type, "INT");
        assert!(id.not_null);
        assert!(id.is_primary_key);

        let bio = &schema.columns[2];
        assert_eq!(bio.declared_type, "TEXT");
        assert!(!bio.not_null);
        assert!(!bio.is_primary_key);
    }

    #[test]
    fn schema_of_unconstrained_table_has_no_primary_key() {
        let conn = scratch_db();
        let schema = table_schema(&conn, "audit_log").unwrap();
        assert_eq!(schema.primary_key, None);
    }

    #[test]
    fn row_counts() {
        let conn = scratch_db();
        assert_eq!(count_rows(&conn, "users").unwrap(), 2);
        assert_eq!(count_rows(&conn, "posts").unwrap(), 1);
        assert_eq!(count_rows(&conn, "audit_log").unwrap(), 0);
    }

    #[test]
    fn quoting_survives_awkward_table_names() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE \"odd name\" (id INT)", [])
            .unwrap();

        let schema = table_schema(&conn, "odd name").unwrap();
        assert_eq!(schema.columns.len(), 1);
        assert_eq!(count_rows(&conn, "odd name").unwrap(), 0);
    }
}
