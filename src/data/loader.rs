use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Row, Table};
use super::store::DatasetStore;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every inventory table found in `dir` into a ready [`DatasetStore`].
///
/// Each table is one CSV file named per [`Table::file_name`]. A file that is
/// absent leaves its table missing from the snapshot (downstream queries
/// treat it as empty); a file that exists but fails to parse aborts the load.
pub fn load_dir(dir: &Path) -> Result<DatasetStore> {
    let mut tables: BTreeMap<Table, Vec<Row>> = BTreeMap::new();

    for table in Table::ALL {
        let path = dir.join(table.file_name());
        if !path.exists() {
            log::warn!("{} not found, treating {table} as empty", path.display());
            continue;
        }
        let rows = load_csv(&path)
            .with_context(|| format!("loading {table} from {}", path.display()))?;
        log::info!("Loaded {}, got {} records", table.file_name(), rows.len());
        tables.insert(table, rows);
    }

    let mut store = DatasetStore::new();
    store.load(tables);
    Ok(store)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse one CSV file into flat string rows, header row as column names.
/// No schema validation happens here; unexpected or missing columns surface
/// downstream as "Unknown" labels or numeric sentinels, never as an error.
fn load_csv(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), value.trim().to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
