use wot_config::EcuLog;
use wot_traits::{MapSink, MapSource};

use crate::classifier::wot_samples;
use crate::config::TunerCfg;
use crate::corrector::{Correction, correct};
use crate::error::TunerError;
use crate::fuel_map::FuelMap;
use crate::grid::GridAccumulator;
use crate::sample::ColumnMap;

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Data rows parsed from the log.
    pub rows: usize,
    /// Rows at or above the WOT threshold.
    pub wot_rows: usize,
    /// WOT rows dropped because enrichment had not settled.
    pub settling_dropped: usize,
    /// Samples accumulated into the grid.
    pub samples: usize,
    /// Distinct WOT excursions seen.
    pub excursions: usize,
    /// Cells rescaled in the corrected map.
    pub cells_corrected: usize,
}

#[derive(Debug, Clone)]
pub struct TuneOutcome {
    pub correction: Correction,
    pub stats: RunStats,
}

/// Classify, accumulate and correct in one pass over the log.
pub fn run(log: &EcuLog, current: &FuelMap, cfg: &TunerCfg) -> Result<TuneOutcome, TunerError> {
    if current.size() != cfg.table_size {
        return Err(TunerError::Config(format!(
            "fuel map is {0}x{0}, fuelTableSize is {1}",
            current.size(),
            cfg.table_size
        )));
    }

    let columns = ColumnMap::resolve(&log.headers, &cfg.columns);
    let missing = columns.missing();
    if !missing.is_empty() {
        tracing::warn!(?missing, "configured headers not present in log");
    }

    let mut grid = GridAccumulator::new(cfg.table_size);
    let mut samples = wot_samples(&log.records, &columns, cfg.classifier);
    let added = grid.extend_from(samples.by_ref())?;
    let classified = samples.stats();

    let correction = correct(&grid, current, &cfg.correction)?;
    let stats = RunStats {
        rows: classified.rows,
        wot_rows: classified.wot_rows,
        settling_dropped: classified.settling_dropped,
        samples: added,
        excursions: classified.excursions,
        cells_corrected: correction.cells_corrected(&cfg.correction),
    };
    tracing::info!(
        rows = stats.rows,
        wot_rows = stats.wot_rows,
        settling_dropped = stats.settling_dropped,
        samples = stats.samples,
        excursions = stats.excursions,
        cells_corrected = stats.cells_corrected,
        "tuning complete"
    );

    Ok(TuneOutcome { correction, stats })
}

/// Load the current map from `source` as a `size`x`size` table.
pub fn load_map<S: MapSource>(mut source: S, size: usize) -> Result<FuelMap, TunerError> {
    let rows = source
        .read_map(size)
        .map_err(|e| TunerError::Config(e.to_string()))?;
    let map = FuelMap::from_rows(rows)?;
    if map.size() != size {
        return Err(TunerError::Config(format!(
            "fuel map is {0}x{0}, fuelTableSize is {size}",
            map.size()
        )));
    }
    Ok(map)
}

/// Hand the corrected map to `sink`.
pub fn persist<S: MapSink>(map: &FuelMap, mut sink: S) -> Result<(), TunerError> {
    sink.write_map(&map.to_rows())
        .map_err(|e| TunerError::Io(e.to_string()))?;
    tracing::debug!(size = map.size(), "fuel map persisted");
    Ok(())
}
