//! Table store implementation
//!
//! A `TableStore` owns a set of named [`Table`]s plus a per-table counter
//! used by callers to assign the next row identifier. One store-wide
//! reader/writer lock covers every operation: reads run concurrently with
//! each other, writes are totally ordered. Row values are copied in and out
//! by value, so callers never share mutable row state.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::table::Table;

/// Concurrency-safe collection of named, insertion-ordered tables
pub struct TableStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    tables: HashMap<String, Table>,

    /// Next-identifier hint per table. Only ever increments; dropping rows
    /// does not decrement it, so identifiers are never reissued.
    counters: HashMap<String, u64>,
}

impl StoreInner {
    fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::NoSuchTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::NoSuchTable(name.to_string()))
    }
}

impl TableStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Build a store from already-populated tables
    ///
    /// Used when rehydrating from a snapshot. Each table's counter is
    /// derived as the maximum numeric identifier among its row keys (never
    /// less than the row count), so identifiers issued before the snapshot
    /// are not reissued even if their rows were deleted.
    pub fn from_tables(tables: HashMap<String, Table>) -> Self {
        let counters = tables
            .iter()
            .map(|(name, table)| {
                let max_id = table
                    .iter()
                    .filter_map(|(id, _)| id.parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);

                (name.clone(), max_id.max(table.len() as u64))
            })
            .collect();

        Self {
            inner: RwLock::new(StoreInner { tables, counters }),
        }
    }

    /// Create (or reset) an empty table and zero its counter
    ///
    /// Idempotent: an existing table of the same name is overwritten.
    pub fn create_table(&self, name: &str) {
        let mut inner = self.inner.write();

        inner.tables.insert(name.to_string(), Table::new());
        inner.counters.insert(name.to_string(), 0);
    }

    /// Get a point-in-time copy of a table
    pub fn table(&self, name: &str) -> Result<Table> {
        let inner = self.inner.read();

        inner.table(name).cloned()
    }

    /// Remove a table
    ///
    /// The counter is left in place; identifiers stay retired if the table
    /// is ever recreated without `create_table`.
    pub fn drop_table(&self, name: &str) {
        let mut inner = self.inner.write();

        inner.tables.remove(name);
    }

    /// Reset the store to no tables
    pub fn clear(&self) {
        let mut inner = self.inner.write();

        *inner = StoreInner::default();
    }

    /// Append a row at the end of a table's iteration order
    ///
    /// Fails with [`Error::NoSuchTable`] if the table is absent and
    /// [`Error::DuplicateKey`] if the identifier is already taken. On
    /// success the table's counter increments by one.
    pub fn add_row(&self, table: &str, id: &str, row: Value) -> Result<()> {
        let mut inner = self.inner.write();

        if !inner.table_mut(table)?.insert(id, row) {
            return Err(Error::DuplicateKey(id.to_string()));
        }

        *inner.counters.entry(table.to_string()).or_insert(0) += 1;

        Ok(())
    }

    /// Replace a row's value in place, preserving its position
    ///
    /// Does not touch the counter.
    pub fn alter_row(&self, table: &str, id: &str, row: Value) -> Result<()> {
        let mut inner = self.inner.write();

        if !inner.table_mut(table)?.replace(id, row) {
            return Err(Error::NoSuchRow(id.to_string()));
        }

        Ok(())
    }

    /// Remove a row from a table
    ///
    /// Removing an identifier that is not present is a silent no-op; only a
    /// missing table is an error.
    pub fn drop_row(&self, table: &str, id: &str) -> Result<()> {
        let mut inner = self.inner.write();

        inner.table_mut(table)?.remove(id);

        Ok(())
    }

    /// Get a row by identifier
    pub fn row(&self, table: &str, id: &str) -> Result<Value> {
        let inner = self.inner.read();

        inner
            .table(table)?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NoSuchRow(id.to_string()))
    }

    /// Collect up to `limit` rows starting at position `offset`, in
    /// insertion order
    ///
    /// Fails only if the table is absent; an out-of-range offset or a zero
    /// limit yields an empty vec.
    pub fn rows(&self, table: &str, offset: usize, limit: usize) -> Result<Vec<Value>> {
        let inner = self.inner.read();

        Ok(inner.table(table)?.page(offset, limit))
    }

    /// Number of rows currently in a table
    pub fn rows_count(&self, table: &str) -> Result<usize> {
        let inner = self.inner.read();

        Ok(inner.table(table)?.len())
    }

    /// Current counter value for a table
    pub fn counter(&self, table: &str) -> Result<u64> {
        let inner = self.inner.read();

        inner
            .counters
            .get(table)
            .copied()
            .ok_or_else(|| Error::NoSuchTable(table.to_string()))
    }

    /// Point-in-time copy of every table, for serialization
    ///
    /// Takes the shared lock only for the duration of the clone; snapshot
    /// I/O happens with no store lock held.
    pub fn snapshot_tables(&self) -> HashMap<String, Table> {
        let inner = self.inner.read();

        inner.tables.clone()
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}
