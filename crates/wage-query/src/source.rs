//! Table loading and process-lifetime caching.
//!
//! [`CachedTable`] loads its table on first access and serves the same
//! instance afterwards. The source is a trait so tests can inject fixture
//! tables without touching the file system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use tracing::info;
use wage_model::DEFAULT_TIDY_PATH;

use crate::error::Result;
use crate::table::TidyTable;

/// Anything that can produce the tidy table.
pub trait TableSource {
    fn load(&self) -> Result<TidyTable>;
}

/// Reads the tidy CSV written by the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTableSource {
    path: PathBuf,
}

impl CsvTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CsvTableSource {
    fn default() -> Self {
        Self::new(DEFAULT_TIDY_PATH)
    }
}

impl TableSource for CsvTableSource {
    fn load(&self) -> Result<TidyTable> {
        let start = Instant::now();
        let table = TidyTable::read_csv(&self.path)?;
        info!(
            path = %self.path.display(),
            row_count = table.height(),
            duration_ms = start.elapsed().as_millis(),
            "loaded tidy table"
        );
        Ok(table)
    }
}

/// Serves a table already in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    table: TidyTable,
}

impl StaticSource {
    pub fn new(table: TidyTable) -> Self {
        Self { table }
    }
}

impl TableSource for StaticSource {
    fn load(&self) -> Result<TidyTable> {
        Ok(self.table.clone())
    }
}

/// Load-once cache over a [`TableSource`].
///
/// A failed load is returned to the caller and retried on the next access.
#[derive(Debug)]
pub struct CachedTable<S> {
    source: S,
    table: OnceLock<TidyTable>,
}

impl<S: TableSource> CachedTable<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: OnceLock::new(),
        }
    }

    /// The cached table, loading it on first use.
    pub fn get(&self) -> Result<&TidyTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let loaded = self.source.load()?;
        Ok(self.table.get_or_init(|| loaded))
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
