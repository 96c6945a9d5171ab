use super::loader::LoadError;

// ---------------------------------------------------------------------------
// PowerTable
// ---------------------------------------------------------------------------

/// An immutable table of spectral power readings: R observations (rows) by
/// C frequency channels (columns), plus the row labels and channel names
/// taken from the source file.
///
/// Rows and channels are addressed by position (`0..R`, `0..C`); channel
/// names are display text only.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTable {
    /// First-column text of each row, usually a time value.
    row_labels: Vec<String>,
    /// Header names of the C channel columns.
    channel_names: Vec<String>,
    /// Row-major values; every row holds exactly `channel_names.len()` entries.
    rows: Vec<Vec<f64>>,
}

impl PowerTable {
    /// Build a table from labeled rows, checking every row against the
    /// header width.
    pub fn from_rows(
        channel_names: Vec<String>,
        labeled_rows: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, LoadError> {
        let width = channel_names.len();
        let mut row_labels = Vec::with_capacity(labeled_rows.len());
        let mut rows = Vec::with_capacity(labeled_rows.len());

        for (label, values) in labeled_rows {
            if values.len() != width {
                return Err(LoadError::RowWidth {
                    label,
                    expected: width,
                    found: values.len(),
                });
            }
            row_labels.push(label);
            rows.push(values);
        }

        Ok(PowerTable {
            row_labels,
            channel_names,
            rows,
        })
    }

    /// Number of observations (rows).
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of frequency channels (columns).
    pub fn num_channels(&self) -> usize {
        self.channel_names.len()
    }

    /// Whether the table holds no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Label of each row, in file order.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Header names of the channel columns.
    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    /// All rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Power values of one observation, or `None` out of range.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// Power values of one channel across all observations, or `None` out
    /// of range.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.num_channels() {
            return None;
        }
        Some(self.rows.iter().map(|r| r[index]).collect())
    }

    /// The row labels parsed as floats, when every one of them parses.
    /// Tables with a non-numeric first column fall back to positional
    /// time axes.
    pub fn numeric_row_labels(&self) -> Option<Vec<f64>> {
        self.row_labels
            .iter()
            .map(|l| l.trim().parse::<f64>().ok())
            .collect()
    }
}
