// src/fetch/local.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, path::Path};
use tracing::debug;

/// Read a CSV export of the worksheet into rows of cells.
///
/// Sheets' "Download as CSV" pads every record out to the full sheet width,
/// but hand-trimmed fixtures may not, so records are read flexibly and rows
/// keep whatever length they came with.
pub fn read_csv_rows(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    debug!(rows = rows.len(), path = %path.display(), "read CSV export");
    Ok(rows)
}
