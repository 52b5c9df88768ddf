//! Fuel map correction from accumulated AFR.
//!
//! A cell with more than `min_samples` samples is scaled by
//! `mean_afr / target_afr`; every other cell keeps its current value.

use crate::config::CorrectionCfg;
use crate::error::TunerError;
use crate::fuel_map::FuelMap;
use crate::grid::GridAccumulator;

/// Result of correcting a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub corrected: FuelMap,
    /// Mean AFR per cell, 0.0 where the cell was not corrected.
    pub logged_afr: FuelMap,
    /// `corrected - current` per cell.
    pub delta: FuelMap,
    /// Samples per cell.
    pub counts: Vec<Vec<u32>>,
}

impl Correction {
    /// Number of cells that had enough samples to be rescaled.
    pub fn cells_corrected(&self, cfg: &CorrectionCfg) -> usize {
        self.counts
            .iter()
            .flatten()
            .filter(|&&n| n > cfg.min_samples)
            .count()
    }
}

/// Correct a single cell value.
#[inline]
pub fn correct_cell(mean_afr: f64, count: u32, current: f64, cfg: &CorrectionCfg) -> f64 {
    if count > cfg.min_samples {
        (mean_afr / cfg.target_afr) * current
    } else {
        current
    }
}

pub fn correct(
    grid: &GridAccumulator,
    current: &FuelMap,
    cfg: &CorrectionCfg,
) -> Result<Correction, TunerError> {
    let size = current.size();
    if grid.size() != size {
        return Err(TunerError::Config(format!(
            "fuel map is {size}x{size} but the sample grid is {0}x{0}",
            grid.size()
        )));
    }

    let mut corrected = FuelMap::filled(size, 0.0);
    let mut logged_afr = FuelMap::filled(size, 0.0);
    let mut delta = FuelMap::filled(size, 0.0);
    for load in 0..size {
        for rpm in 0..size {
            let cell = grid.cell(load, rpm).copied().unwrap_or_default();
            let old = current[(load, rpm)];
            let new = correct_cell(cell.mean_afr, cell.count, old, cfg);
            if cell.count > cfg.min_samples {
                logged_afr.set(load, rpm, cell.mean_afr);
            }
            corrected.set(load, rpm, new);
            delta.set(load, rpm, new - old);
        }
    }

    Ok(Correction {
        corrected,
        logged_afr,
        delta,
        counts: grid.counts(),
    })
}
