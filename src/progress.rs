// ABOUTME: Observability collaborator for a single migration run
// ABOUTME: Receives table and batch lifecycle events from the pipeline

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Receives pipeline events for one migration run.
///
/// Injected into the pipeline at construction and dropped with it, so no
/// process-wide display state survives a run. `batch_committed` fires once
/// per committed chunk (or once per table in unchunked mode).
pub trait MigrationObserver {
    fn table_started(&self, table: &str, total_rows: usize);
    fn batch_committed(&self, table: &str, rows: usize);
    fn table_finished(&self, table: &str);
    fn migration_finished(&self, tables: usize);
}

/// Discards every event. Used by `--quiet` runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MigrationObserver for NoopObserver {
    fn table_started(&self, _table: &str, _total_rows: usize) {}
    fn batch_committed(&self, _table: &str, _rows: usize) {}
    fn table_finished(&self, _table: &str) {}
    fn migration_finished(&self, _tables: usize) {}
}

/// Renders one terminal progress bar per table, advancing per batch.
#[derive(Default)]
pub struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MigrationObserver for ProgressObserver {
    fn table_started(&self, table: &str, total_rows: usize) {
        let bar = ProgressBar::new(total_rows as u64);
        bar.set_style(
            ProgressStyle::with_template("{msg:<24} [{bar:40}] {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(table.to_string());
        *lock(&self.bar) = Some(bar);
    }

    fn batch_committed(&self, _table: &str, rows: usize) {
        if let Some(bar) = lock(&self.bar).as_ref() {
            bar.inc(rows as u64);
        }
    }

    fn table_finished(&self, _table: &str) {
        if let Some(bar) = lock(&self.bar).take() {
            bar.finish();
        }
    }

    fn migration_finished(&self, _tables: usize) {}
}

fn lock(bar: &Mutex<Option<ProgressBar>>) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
    bar.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
