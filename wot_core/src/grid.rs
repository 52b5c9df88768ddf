//! Running-mean AFR accumulation over the (load, RPM) grid.

use crate::error::TunerError;
use crate::sample::LogSample;

/// Mean AFR and sample count of one cell. The mean is meaningless while
/// `count == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridCell {
    pub mean_afr: f64,
    pub count: u32,
}

impl GridCell {
    /// Fold one value into the running mean.
    pub fn push(&mut self, afr: f64) {
        let n = f64::from(self.count);
        self.mean_afr = (self.mean_afr * n + afr) / (n + 1.0);
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_afr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridAccumulator {
    size: usize,
    /// Row-major by load bin, like `FuelMap`.
    cells: Vec<GridCell>,
}

impl GridAccumulator {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![GridCell::default(); size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Map 1-based bin indices to a cell offset.
    fn offset(&self, rpm_idx: i64, load_idx: i64) -> Option<usize> {
        let bin = |idx: i64| {
            usize::try_from(idx)
                .ok()
                .filter(|i| (1..=self.size).contains(i))
                .map(|i| i - 1)
        };
        let rpm = bin(rpm_idx)?;
        let load = bin(load_idx)?;
        Some(load * self.size + rpm)
    }

    /// Add one sample. Bin indices outside `1..=size` abort the run.
    pub fn add(&mut self, sample: &LogSample) -> Result<(), TunerError> {
        let offset =
            self.offset(sample.rpm_idx, sample.load_idx)
                .ok_or(TunerError::IndexRange {
                    line: sample.line,
                    rpm_idx: sample.rpm_idx,
                    load_idx: sample.load_idx,
                    size: self.size,
                })?;
        self.cells[offset].push(sample.afr);
        Ok(())
    }

    /// Drain a sample stream into the grid, stopping at the first error.
    /// Returns the number of samples added.
    pub fn extend_from<I>(&mut self, samples: I) -> Result<usize, TunerError>
    where
        I: IntoIterator<Item = Result<LogSample, TunerError>>,
    {
        let mut added = 0;
        for sample in samples {
            self.add(&sample?)?;
            added += 1;
        }
        Ok(added)
    }

    /// Cell for 0-based (load, rpm) coordinates.
    pub fn cell(&self, load: usize, rpm: usize) -> Option<&GridCell> {
        if load < self.size && rpm < self.size {
            self.cells.get(load * self.size + rpm)
        } else {
            None
        }
    }

    pub fn total_samples(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.count)).sum()
    }

    pub fn counts(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks_exact(self.size.max(1))
            .map(|row| row.iter().map(|c| c.count).collect())
            .collect()
    }
}
