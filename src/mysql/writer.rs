// ABOUTME: Destination-side DDL and batched DML execution
// ABOUTME: One multi-row INSERT IGNORE per chunk, committed per chunk

use crate::error::{MigrationError, Result};
use crate::schema::insert_ignore_sql;
use crate::value::Value;
use mysql_async::{prelude::*, Conn, Params, TxOpts};

/// Apply one table's CREATE TABLE statement.
pub async fn create_table(conn: &mut Conn, table: &str, ddl: &str) -> Result<()> {
    tracing::debug!("Applying DDL for table '{}'", table);

    conn.query_drop(ddl)
        .await
        .map_err(|source| MigrationError::schema(table, source))?;

    Ok(())
}

/// Insert one chunk of rows as a single multi-row INSERT IGNORE.
///
/// The chunk runs inside its own transaction; the commit is the chunk's
/// durability boundary. Rows colliding with a uniqueness constraint are
/// skipped by the destination rather than failing the batch.
pub async fn insert_batch(
    conn: &mut Conn,
    table: &str,
    columns: &[String],
    rows: Vec<Vec<Value>>,
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let row_count = rows.len();
    let sql = insert_ignore_sql(table, columns, row_count);
    let params: Vec<mysql_async::Value> = rows
        .into_iter()
        .flatten()
        .map(mysql_async::Value::from)
        .collect();

    let mut tx = conn
        .start_transaction(TxOpts::default())
        .await
        .map_err(|source| MigrationError::data_transfer(table, source))?;
    tx.exec_drop(sql.as_str(), Params::Positional(params))
        .await
        .map_err(|source| MigrationError::data_transfer(table, source))?;
    tx.commit()
        .await
        .map_err(|source| MigrationError::data_transfer(table, source))?;

    tracing::debug!("Committed {} row(s) into table '{}'", row_count, table);

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::schema::insert_ignore_sql;

    #[test]
    fn placeholder_count_matches_rows_times_columns() {
        let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let sql = insert_ignore_sql("t", &columns, 4);
        assert_eq!(sql.matches('?').count(), 12);
        assert_eq!(sql.matches("), (").count(), 3);
    }
}
