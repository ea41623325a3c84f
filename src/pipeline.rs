// ABOUTME: The per-table migration pipeline
// ABOUTME: Introspect, create, count, then stream rows in committed chunks

use crate::dialect::TypeTranslator;
use crate::error::Result;
use crate::mysql::writer;
use crate::progress::MigrationObserver;
use crate::schema::quote_sqlite;
use crate::sqlite::reader;
use crate::value::{row_values, Value};
use mysql_async::Conn;
use rusqlite::Connection;

/// Runs the whole migration over two exclusively-owned connections.
///
/// Tables are processed one at a time and batches within a table one at a
/// time; nothing overlaps. The returned future holds a live SQLite cursor
/// across awaits and is not `Send`; run it on a current-thread runtime.
pub struct MigrationPipeline {
    source: Connection,
    target: Conn,
    translator: TypeTranslator,
    chunk_size: Option<usize>,
    tables: Vec<String>,
    observer: Box<dyn MigrationObserver>,
}

impl MigrationPipeline {
    /// `tables` restricts the run to a subset of the source catalog; an
    /// empty list migrates everything. The observer lives exactly as long
    /// as this pipeline.
    pub fn new(
        source: Connection,
        target: Conn,
        translator: TypeTranslator,
        chunk_size: Option<usize>,
        tables: Vec<String>,
        observer: Box<dyn MigrationObserver>,
    ) -> Self {
        Self {
            source,
            target,
            translator,
            chunk_size,
            tables,
            observer,
        }
    }

    /// Migrate every table: schema first, then data, failing fast.
    ///
    /// The first error unwinds the run. Tables migrated before the failure
    /// are left in place; a table whose DDL succeeded is never rolled back.
    pub async fn migrate_all_tables(&mut self) -> Result<()> {
        let tables = reader::list_tables(&self.source, &self.tables)?;

        for table in &tables {
            self.migrate_table(table).await?;
        }

        self.observer.migration_finished(tables.len());
        tracing::info!("Migration finished: {} table(s)", tables.len());

        Ok(())
    }

    async fn migrate_table(&mut self, table: &str) -> Result<()> {
        let schema = reader::table_schema(&self.source, table)?;
        let ddl = schema.create_table_sql(&self.translator)?;
        writer::create_table(&mut self.target, table, &ddl).await?;

        let total_rows = reader::count_rows(&self.source, table)?;
        self.observer.table_started(table, total_rows);

        if total_rows == 0 {
            tracing::debug!("Table '{}' is empty, skipping data transfer", table);
            self.observer.table_finished(table);
            return Ok(());
        }

        tracing::info!("Transferring table '{}' ({} row(s))", table, total_rows);

        let columns = schema.column_names();
        let select = format!("SELECT * FROM {}", quote_sqlite(table));
        let mut stmt = self.source.prepare(&select)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query([])?;

        match self.chunk_size {
            Some(chunk_size) if chunk_size > 0 => loop {
                let batch = next_batch(&mut rows, chunk_size, column_count)?;
                if batch.is_empty() {
                    break;
                }
                let committed = batch.len();
                writer::insert_batch(&mut self.target, table, &columns, batch).await?;
                self.observer.batch_committed(table, committed);
            },
            _ => {
                let mut all = Vec::with_capacity(total_rows);
                while let Some(row) = rows.next()? {
                    all.push(row_values(row, column_count)?);
                }
                let committed = all.len();
                writer::insert_batch(&mut self.target, table, &columns, all).await?;
                self.observer.batch_committed(table, committed);
            }
        }

        self.observer.table_finished(table);

        Ok(())
    }
}

/// Pull up to `limit` rows off the open cursor.
fn next_batch(
    rows: &mut rusqlite::Rows<'_>,
    limit: usize,
    column_count: usize,
) -> Result<Vec<Vec<Value>>> {
    let mut batch = Vec::with_capacity(limit);
    while batch.len() < limit {
        match rows.next()? {
            Some(row) => batch.push(row_values(row, column_count)?),
            None => break,
        }
    }
    Ok(batch)
}
