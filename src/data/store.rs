use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{field, Row, Table};

/// Raised only for a programming-contract violation: querying joined views
/// before any `load` has happened. Data-quality problems never error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset has not been loaded yet")]
    NotLoaded,
}

// ---------------------------------------------------------------------------
// DatasetStore – the loaded inventory snapshot
// ---------------------------------------------------------------------------

/// Holds the eleven inventory tables and answers lookups by id.
///
/// A table that was never loaded behaves as an empty one; downstream joins
/// turn the resulting misses into "Unknown" labels instead of errors. The
/// store is immutable between `load` calls (read-only reporting view).
#[derive(Debug, Default)]
pub struct DatasetStore {
    tables: BTreeMap<Table, Vec<Row>>,
    loaded: bool,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all held tables with a freshly parsed batch. The batch may be
    /// partial; missing tables simply stay absent and query as empty.
    pub fn load(&mut self, tables: BTreeMap<Table, Vec<Row>>) {
        self.tables = tables;
        self.loaded = true;
    }

    /// Whether `load` has been called at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All rows of a table in original load order; empty for a missing table.
    pub fn rows(&self, table: Table) -> &[Row] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row count of one table.
    pub fn len(&self, table: Table) -> usize {
        self.rows(table).len()
    }

    /// First row whose `id` column equals `id`. O(n) scan; the datasets are
    /// dealership-sized, not web-sized.
    pub fn find_by_id(&self, table: Table, id: &str) -> Option<&Row> {
        self.rows(table).iter().find(|row| field(row, "id") == id)
    }

    /// All rows matching the predicate, in original order.
    pub fn filter<'a>(&'a self, table: Table, pred: impl Fn(&Row) -> bool) -> Vec<&'a Row> {
        self.rows(table).iter().filter(|row| pred(row)).collect()
    }

    /// Tables absent from the current snapshot (for load-time logging).
    pub fn missing_tables(&self) -> Vec<Table> {
        Table::ALL
            .into_iter()
            .filter(|t| !self.tables.contains_key(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn store_with_makes() -> DatasetStore {
        let mut store = DatasetStore::new();
        let mut tables = BTreeMap::new();
        tables.insert(
            Table::Makes,
            vec![
                row(&[("id", "1"), ("name", "Toyota")]),
                row(&[("id", "2"), ("name", "Honda")]),
            ],
        );
        store.load(tables);
        store
    }

    #[test]
    fn find_by_id_returns_first_match() {
        let store = store_with_makes();
        let hit = store.find_by_id(Table::Makes, "2").unwrap();
        assert_eq!(field(hit, "name"), "Honda");
    }

    #[test]
    fn find_by_id_misses_cleanly() {
        let store = store_with_makes();
        assert!(store.find_by_id(Table::Makes, "99").is_none());
    }

    #[test]
    fn missing_table_queries_as_empty() {
        let store = store_with_makes();
        assert!(store.rows(Table::Vehicles).is_empty());
        assert!(store.find_by_id(Table::Vehicles, "1").is_none());
        assert!(store.filter(Table::Colors, |_| true).is_empty());
    }

    #[test]
    fn load_replaces_previous_tables() {
        let mut store = store_with_makes();
        let mut tables = BTreeMap::new();
        tables.insert(Table::Makes, vec![row(&[("id", "9"), ("name", "Mazda")])]);
        store.load(tables);
        assert_eq!(store.len(Table::Makes), 1);
        assert!(store.find_by_id(Table::Makes, "1").is_none());
    }

    #[test]
    fn missing_tables_reports_absent_keys() {
        let store = store_with_makes();
        let missing = store.missing_tables();
        assert_eq!(missing.len(), 10);
        assert!(!missing.contains(&Table::Makes));
    }
}
