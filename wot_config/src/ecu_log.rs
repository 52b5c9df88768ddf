//! ECU log CSV reader.
//!
//! The first row is a header; columns are located by name later on, so this
//! reader keeps every record as raw text together with its source line.

use std::io::Read;
use std::path::Path;

/// One data row of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// 1-based line number in the source file.
    pub line: u64,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EcuLog {
    pub headers: Vec<String>,
    pub records: Vec<LogRecord>,
}

impl EcuLog {
    pub fn from_reader<R: Read>(reader: R) -> eyre::Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| eyre::eyre!("read log header: {e}"))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for (idx, rec) in rdr.records().enumerate() {
            let record = rec.map_err(|e| eyre::eyre!("invalid log row {}: {}", idx + 2, e))?;
            let line = record
                .position()
                .map_or(idx as u64 + 2, csv::Position::line);
            records.push(LogRecord {
                line,
                fields: record.iter().map(str::to_string).collect(),
            });
        }

        Ok(Self { headers, records })
    }

    pub fn read(path: &Path) -> eyre::Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| eyre::eyre!("open ECU log {:?}: {}", path, e))?;
        Self::from_reader(std::io::BufReader::new(file))
            .map_err(|e| eyre::eyre!("ECU log {:?}: {}", path, e))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
