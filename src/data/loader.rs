use std::path::Path;

use thiserror::Error;

use super::model::PowerTable;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between a path and a usable `PowerTable`.
/// All variants are fatal: the caller reports them and exits.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read table file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text, including rows with the wrong field count.
    #[error("could not parse table: {0}")]
    Csv(#[from] csv::Error),

    #[error("table has no header row")]
    Empty,

    #[error("row '{label}': expected {expected} power values, found {found}")]
    RowWidth {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("row '{row_label}', channel '{channel}': '{value}' is not a number")]
    BadCell {
        row_label: String,
        channel: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a power table from a comma-delimited text file.
///
/// Expected layout: one header row whose first field names the row-label
/// column (ignored) and whose remaining fields name the C frequency
/// channels; then R data rows, each a row label followed by C power
/// values. `NaN` and `inf` spellings parse as ordinary floats.
pub fn load_table(path: &Path) -> Result<PowerTable, LoadError> {
    let file = std::fs::File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let mut header_fields = headers.iter();
    if header_fields.next().is_none() {
        return Err(LoadError::Empty);
    }
    let channel_names: Vec<String> = header_fields.map(|h| h.trim().to_string()).collect();

    let mut labeled_rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells = record.iter();
        let label = cells.next().unwrap_or("").trim().to_string();

        let mut values = Vec::with_capacity(channel_names.len());
        for (i, cell) in cells.enumerate() {
            let cell = cell.trim();
            let parsed = cell.parse::<f64>().map_err(|_| LoadError::BadCell {
                row_label: label.clone(),
                channel: channel_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| i.to_string()),
                value: cell.to_string(),
            })?;
            values.push(parsed);
        }
        labeled_rows.push((label, values));
    }

    let table = PowerTable::from_rows(channel_names, labeled_rows)?;
    log::info!(
        "loaded {}: {} observations x {} channels",
        path.display(),
        table.num_rows(),
        table.num_channels()
    );
    Ok(table)
}
