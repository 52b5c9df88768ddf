//! Tab-separated fuel map text format.
//!
//! One table row per line, values separated by a single tab, written with
//! three decimal digits. Trailing tabs on a line are ignored when reading:
//! ```text
//! 10.000	10.500
//! 11.250	12.000
//! ```

use std::path::{Path, PathBuf};

use wot_traits::{BoxError, MapSink, MapSource};

/// Digits after the decimal point in written maps.
pub const MAP_DECIMALS: usize = 3;

/// Parse map text, requiring exactly `size` rows of `size` values.
pub fn parse_fuel_map(text: &str, size: usize) -> eyre::Result<Vec<Vec<f64>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::with_capacity(size);
    for (idx, rec) in rdr.records().enumerate() {
        let record = rec.map_err(|e| eyre::eyre!("read fuel map row {}: {}", idx + 1, e))?;
        // Trailing empty fields (a dangling tab from spreadsheet exports) are not values.
        let len = record.iter().collect::<Vec<_>>().iter().rposition(|f| !f.is_empty()).map_or(0, |i| i + 1);
        if len != size {
            eyre::bail!(
                "fuel map row {} has {} values, expected {}",
                idx + 1,
                len,
                size
            );
        }
        let mut row = Vec::with_capacity(size);
        for (col, field) in record.iter().take(len).enumerate() {
            let value = field.parse::<f64>().map_err(|e| {
                eyre::eyre!(
                    "fuel map row {} column {}: invalid number {:?}: {}",
                    idx + 1,
                    col + 1,
                    field,
                    e
                )
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    if rows.len() != size {
        eyre::bail!("fuel map has {} rows, expected {}", rows.len(), size);
    }
    Ok(rows)
}

/// Render rows in the map text layout, each line terminated by `\n`.
pub fn format_fuel_map(rows: &[Vec<f64>]) -> eyre::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row.iter().map(|v| format!("{v:.MAP_DECIMALS$}")))
            .map_err(|e| eyre::eyre!("format fuel map: {e}"))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| eyre::eyre!("format fuel map: {e}"))?;
    String::from_utf8(bytes).map_err(|e| eyre::eyre!("format fuel map: {e}"))
}

pub fn read_fuel_map(path: &Path, size: usize) -> eyre::Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("could not load fuel map {:?}: {}", path, e))?;
    parse_fuel_map(&text, size).map_err(|e| eyre::eyre!("fuel map {:?}: {}", path, e))
}

/// Write rows to `path`. The whole text is rendered before the file is
/// touched, so a formatting failure never leaves a truncated file behind.
pub fn write_fuel_map(path: &Path, rows: &[Vec<f64>]) -> eyre::Result<()> {
    let text = format_fuel_map(rows)?;
    std::fs::write(path, text).map_err(|e| eyre::eyre!("write fuel map {:?}: {}", path, e))
}

/// A fuel map stored as a text file on disk.
#[derive(Debug, Clone)]
pub struct FuelMapFile {
    path: PathBuf,
}

impl FuelMapFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MapSource for FuelMapFile {
    fn read_map(&mut self, size: usize) -> Result<Vec<Vec<f64>>, BoxError> {
        read_fuel_map(&self.path, size).map_err(Into::into)
    }
}

impl MapSink for FuelMapFile {
    fn write_map(&mut self, rows: &[Vec<f64>]) -> Result<(), BoxError> {
        write_fuel_map(&self.path, rows).map_err(Into::into)
    }
}
