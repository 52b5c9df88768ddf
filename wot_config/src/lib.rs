#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and file formats for the WOT tuner.
//!
//! - `Config` is read from a Java-style properties file or from TOML using the
//!   same camelCase keys, then validated.
//! - `fuel_map` reads and writes the tab-separated fuel map text layout.
//! - `ecu_log` reads the comma-separated ECU log into header + raw records.
use serde::Deserialize;
use serde::de::Deserializer;
use std::path::Path;

pub mod ecu_log;
pub mod fuel_map;
pub mod properties;

pub use ecu_log::{EcuLog, LogRecord};
pub use fuel_map::{FuelMapFile, format_fuel_map, parse_fuel_map, read_fuel_map, write_fuel_map};
pub use properties::Properties;

/// Default properties file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tuner.properties";
/// Default current fuel map file.
pub const DEFAULT_FUEL_MAP_FILE: &str = "fuel.map";
/// Default output path for the corrected map.
pub const DEFAULT_NEW_FUEL_MAP_FILE: &str = "new-fuel.map";

/// Tuner configuration.
///
/// Example (properties):
/// ```text
/// fuelTableSize=2
/// rpmLabels=1000,2000
/// loadLabels=50,100
/// timeHeader=Time
/// rpmHeader=RPM
/// afrHeader=AFR
/// throttleHeader=TPS
/// rpmIdxHeader=MapN
/// loadIdxHeader=MapP
/// wotVolt=4.5
/// accelEnrichSeconds=0.5
/// minNumberOfSamples=2
/// wotTargetAfr=12.0
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Side length of the square fuel table.
    pub fuel_table_size: usize,
    /// Display labels for the RPM axis (columns).
    #[serde(deserialize_with = "de_labels")]
    pub rpm_labels: Vec<i32>,
    /// Display labels for the load axis (rows).
    #[serde(deserialize_with = "de_labels")]
    pub load_labels: Vec<i32>,
    pub time_header: String,
    pub rpm_header: String,
    pub afr_header: String,
    pub throttle_header: String,
    pub rpm_idx_header: String,
    pub load_idx_header: String,
    /// Throttle signal at or above this voltage counts as WOT.
    pub wot_volt: f64,
    /// Samples this soon after WOT onset are still in the enrichment transient.
    pub accel_enrich_seconds: f64,
    /// A cell is corrected only with strictly more samples than this.
    pub min_number_of_samples: u32,
    pub wot_target_afr: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelsToml {
    List(Vec<i32>),
    Csv(String),
}

fn de_labels<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match LabelsToml::deserialize(deserializer)? {
        LabelsToml::List(v) => Ok(v),
        LabelsToml::Csv(s) => parse_labels(&s).map_err(serde::de::Error::custom),
    }
}

/// Parse a comma-separated list of integer axis labels. Empty items are ignored.
pub fn parse_labels(s: &str) -> eyre::Result<Vec<i32>> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<i32>()
                .map_err(|e| eyre::eyre!("invalid label {item:?}: {e}"))
        })
        .collect()
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Parse properties text into a `Config` (not yet validated).
pub fn load_properties(s: &str) -> eyre::Result<Config> {
    let props = Properties::parse(s)?;
    Config::from_properties(&props)
}

/// Read, parse and validate a config file. Paths ending in `.toml` are read as
/// TOML, everything else as properties.
pub fn load_config_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("could not load properties {:?}: {}", path, e))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let cfg = if is_toml {
        load_toml(&text).map_err(|e| eyre::eyre!("parse TOML config {:?}: {}", path, e))?
    } else {
        load_properties(&text).map_err(|e| eyre::eyre!("parse properties {:?}: {}", path, e))?
    };
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn from_properties(props: &Properties) -> eyre::Result<Self> {
        Ok(Self {
            fuel_table_size: props.parse_required("fuelTableSize")?,
            rpm_labels: parse_labels(props.required("rpmLabels")?)?,
            load_labels: parse_labels(props.required("loadLabels")?)?,
            time_header: props.required("timeHeader")?.to_string(),
            rpm_header: props.required("rpmHeader")?.to_string(),
            afr_header: props.required("afrHeader")?.to_string(),
            throttle_header: props.required("throttleHeader")?.to_string(),
            rpm_idx_header: props.required("rpmIdxHeader")?.to_string(),
            load_idx_header: props.required("loadIdxHeader")?.to_string(),
            wot_volt: props.parse_required("wotVolt")?,
            accel_enrich_seconds: props.parse_required("accelEnrichSeconds")?,
            min_number_of_samples: props.parse_required("minNumberOfSamples")?,
            wot_target_afr: props.parse_required("wotTargetAfr")?,
        })
    }

    pub fn validate(&self) -> eyre::Result<()> {
        // Table
        if self.fuel_table_size == 0 {
            eyre::bail!("fuelTableSize must be >= 1");
        }
        if self.rpm_labels.len() != self.fuel_table_size {
            eyre::bail!(
                "rpmLabels has {} entries, fuelTableSize is {}",
                self.rpm_labels.len(),
                self.fuel_table_size
            );
        }
        if self.load_labels.len() != self.fuel_table_size {
            eyre::bail!(
                "loadLabels has {} entries, fuelTableSize is {}",
                self.load_labels.len(),
                self.fuel_table_size
            );
        }

        // Headers
        for (key, value) in [
            ("timeHeader", &self.time_header),
            ("rpmHeader", &self.rpm_header),
            ("afrHeader", &self.afr_header),
            ("throttleHeader", &self.throttle_header),
            ("rpmIdxHeader", &self.rpm_idx_header),
            ("loadIdxHeader", &self.load_idx_header),
        ] {
            if value.trim().is_empty() {
                eyre::bail!("{key} must not be empty");
            }
        }

        // Tuning
        if !self.wot_volt.is_finite() {
            eyre::bail!("wotVolt must be a finite number");
        }
        if !self.accel_enrich_seconds.is_finite() || self.accel_enrich_seconds < 0.0 {
            eyre::bail!("accelEnrichSeconds must be >= 0");
        }
        if !self.wot_target_afr.is_finite() || self.wot_target_afr <= 0.0 {
            eyre::bail!("wotTargetAfr must be > 0");
        }

        Ok(())
    }
}
