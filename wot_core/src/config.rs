//! Configuration types for the tuning pipeline.
//!
//! These are the runtime structs each stage receives. They are separate from
//! the file-level config in `wot_config`; see `conversions` for the mapping.

/// Header names used to locate log columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub time: String,
    pub rpm: String,
    pub afr: String,
    pub throttle: String,
    pub rpm_idx: String,
    pub load_idx: String,
}

/// WOT detection and enrichment settling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierCfg {
    /// Throttle signal (V) at or above which the engine is at WOT.
    pub wot_volt: f64,
    /// Seconds after WOT onset during which samples are ignored.
    pub accel_enrich_s: f64,
}

/// Cell correction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionCfg {
    /// Cells need strictly more samples than this to be corrected.
    pub min_samples: u32,
    pub target_afr: f64,
}

/// Everything one tuning run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TunerCfg {
    /// Side of the square fuel table.
    pub table_size: usize,
    pub columns: ColumnNames,
    pub classifier: ClassifierCfg,
    pub correction: CorrectionCfg,
}
