//! `From` implementations bridging `wot_config` types to `wot_core` types.

use crate::config::{ClassifierCfg, ColumnNames, CorrectionCfg, TunerCfg};

// ── ColumnNames ──────────────────────────────────────────────────────────────

impl From<&wot_config::Config> for ColumnNames {
    fn from(c: &wot_config::Config) -> Self {
        Self {
            time: c.time_header.clone(),
            rpm: c.rpm_header.clone(),
            afr: c.afr_header.clone(),
            throttle: c.throttle_header.clone(),
            rpm_idx: c.rpm_idx_header.clone(),
            load_idx: c.load_idx_header.clone(),
        }
    }
}

// ── ClassifierCfg ────────────────────────────────────────────────────────────

impl From<&wot_config::Config> for ClassifierCfg {
    fn from(c: &wot_config::Config) -> Self {
        Self {
            wot_volt: c.wot_volt,
            accel_enrich_s: c.accel_enrich_seconds,
        }
    }
}

// ── CorrectionCfg ────────────────────────────────────────────────────────────

impl From<&wot_config::Config> for CorrectionCfg {
    fn from(c: &wot_config::Config) -> Self {
        Self {
            min_samples: c.min_number_of_samples,
            target_afr: c.wot_target_afr,
        }
    }
}

// ── TunerCfg ─────────────────────────────────────────────────────────────────

impl From<&wot_config::Config> for TunerCfg {
    fn from(c: &wot_config::Config) -> Self {
        Self {
            table_size: c.fuel_table_size,
            columns: c.into(),
            classifier: c.into(),
            correction: c.into(),
        }
    }
}
