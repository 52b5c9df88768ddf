//! In-memory map source/sink for tests and dry runs.

use wot_traits::{BoxError, MapSink, MapSource};

/// Keeps the last written map in memory instead of persisting it.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub rows: Option<Vec<Vec<f64>>>,
    pub writes: usize,
}

impl MapSink for MemorySink {
    fn write_map(&mut self, rows: &[Vec<f64>]) -> Result<(), BoxError> {
        self.rows = Some(rows.to_vec());
        self.writes += 1;
        Ok(())
    }
}

/// Serves a fixed set of rows regardless of the requested size.
#[derive(Debug, Clone)]
pub struct MemorySource(pub Vec<Vec<f64>>);

impl MapSource for MemorySource {
    fn read_map(&mut self, _size: usize) -> Result<Vec<Vec<f64>>, BoxError> {
        Ok(self.0.clone())
    }
}

/// A sink that always fails; exercises the persistence error path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSink;

impl MapSink for FailingSink {
    fn write_map(&mut self, _rows: &[Vec<f64>]) -> Result<(), BoxError> {
        Err(Box::new(std::io::Error::other("sink unavailable")))
    }
}
