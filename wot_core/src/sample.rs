//! Log samples and header-name resolution.

use std::str::FromStr;

use wot_config::LogRecord;

use crate::config::ColumnNames;
use crate::error::LogFormatError;

/// One parsed log row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogSample {
    /// Source line, for diagnostics.
    pub line: u64,
    pub time_s: f64,
    /// Engine speed; informational only.
    pub rpm: f64,
    pub afr: f64,
    pub throttle_v: f64,
    /// 1-based RPM bin.
    pub rpm_idx: i64,
    /// 1-based load bin.
    pub load_idx: i64,
}

/// A configured header name and where it was found, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: Option<usize>,
}

impl Column {
    fn locate(headers: &[String], name: &str) -> Self {
        let wanted = name.trim();
        Self {
            name: wanted.to_string(),
            index: headers.iter().position(|h| h == wanted),
        }
    }

    fn field<'r>(&self, record: &'r LogRecord) -> Result<&'r str, LogFormatError> {
        let idx = self
            .index
            .ok_or_else(|| LogFormatError::MissingColumn(self.name.clone()))?;
        record
            .fields
            .get(idx)
            .map(String::as_str)
            .ok_or_else(|| LogFormatError::ShortRow {
                line: record.line,
                column: self.name.clone(),
            })
    }

    fn number<T: FromStr>(&self, record: &LogRecord) -> Result<T, LogFormatError> {
        let raw = self.field(record)?;
        raw.parse::<T>().map_err(|_| LogFormatError::BadField {
            line: record.line,
            column: self.name.clone(),
            value: raw.to_string(),
        })
    }
}

/// Header names resolved once to column positions.
///
/// An unresolved name is kept as `None`; it only fails when a row is parsed,
/// so a header-only log is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub time: Column,
    pub rpm: Column,
    pub afr: Column,
    pub throttle: Column,
    pub rpm_idx: Column,
    pub load_idx: Column,
}

impl ColumnMap {
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Self {
        Self {
            time: Column::locate(headers, &names.time),
            rpm: Column::locate(headers, &names.rpm),
            afr: Column::locate(headers, &names.afr),
            throttle: Column::locate(headers, &names.throttle),
            rpm_idx: Column::locate(headers, &names.rpm_idx),
            load_idx: Column::locate(headers, &names.load_idx),
        }
    }

    fn columns(&self) -> [&Column; 6] {
        [
            &self.time,
            &self.rpm,
            &self.afr,
            &self.throttle,
            &self.rpm_idx,
            &self.load_idx,
        ]
    }

    /// Names that did not match any header.
    pub fn missing(&self) -> Vec<&str> {
        self.columns()
            .into_iter()
            .filter(|c| c.index.is_none())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn parse(&self, record: &LogRecord) -> Result<LogSample, LogFormatError> {
        Ok(LogSample {
            line: record.line,
            time_s: self.time.number(record)?,
            rpm: self.rpm.number(record)?,
            afr: self.afr.number(record)?,
            throttle_v: self.throttle.number(record)?,
            rpm_idx: self.rpm_idx.number(record)?,
            load_idx: self.load_idx.number(record)?,
        })
    }
}
