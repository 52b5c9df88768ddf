#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Fuel map correction from wide-open-throttle AFR logs.
//!
//! Storage-agnostic: maps come in through `wot_traits::MapSource` and leave
//! through `wot_traits::MapSink`; the log arrives already read into memory.
//!
//! ## Pipeline
//!
//! - **Classification**: WOT state machine with enrichment settling (`classifier`)
//! - **Accumulation**: running-mean AFR per (load, RPM) cell (`grid`)
//! - **Correction**: scale cells with enough samples by `mean / target` (`corrector`)
//! - **Orchestration**: one call over log + current map (`runner`)
//! - **Reporting**: labelled console tables (`report`)
//!
//! ## Indexing
//!
//! Grids and maps are row-major by load bin: `(load, rpm)`, 0-based. Log rows
//! carry 1-based bin indices which are validated against the table size.

pub mod classifier;
pub mod config;
pub mod conversions;
pub mod corrector;
pub mod error;
pub mod fuel_map;
pub mod grid;
pub mod mocks;
pub mod report;
pub mod runner;
pub mod sample;

pub use classifier::{ClassifyStats, Verdict, WotClassifier, WotSamples, wot_samples};
pub use config::{ClassifierCfg, ColumnNames, CorrectionCfg, TunerCfg};
pub use corrector::{Correction, correct, correct_cell};
pub use error::{LogFormatError, TunerError};
pub use fuel_map::FuelMap;
pub use grid::{GridAccumulator, GridCell};
pub use report::render_table;
pub use runner::{RunStats, TuneOutcome, load_map, persist, run};
pub use sample::{Column, ColumnMap, LogSample};
