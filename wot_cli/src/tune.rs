//! One tuning run: load inputs, correct the map, persist and report.

use std::path::Path;

use eyre::{Report, WrapErr};
use serde_json::json;
use wot_config::{Config, EcuLog, FuelMapFile};
use wot_core::mocks::MemorySink;
use wot_core::{LogFormatError, TuneOutcome, TunerCfg, TunerError, render_table};
use wot_traits::MapSink;

use crate::cli::Cli;

pub fn run_tune(cli: &Cli, log_path: &Path) -> eyre::Result<()> {
    let cfg = wot_config::load_config_file(&cli.config)
        .map_err(|e| Report::new(TunerError::Config(format!("{e:#}"))))?;
    let tuner = TunerCfg::from(&cfg);
    tracing::debug!(?tuner, "configuration loaded");

    let current = wot_core::load_map(FuelMapFile::new(&cli.fuel_map), cfg.fuel_table_size)
        .wrap_err_with(|| format!("load current fuel map {}", cli.fuel_map.display()))?;

    if !cli.json {
        println!("\nAnalyzing {}...", log_path.display());
    }
    let log = EcuLog::read(log_path).map_err(|e| {
        Report::new(TunerError::from(LogFormatError::Unreadable(format!(
            "{e:#}"
        ))))
    })?;
    tracing::info!(rows = log.len(), path = %log_path.display(), "log loaded");

    let outcome = wot_core::run(&log, &current, &tuner)
        .wrap_err_with(|| format!("analyze {}", log_path.display()))?;

    let mut file = FuelMapFile::new(&cli.output);
    let mut memory = MemorySink::default();
    let sink: &mut dyn MapSink = if cli.dry_run { &mut memory } else { &mut file };
    wot_core::persist(&outcome.correction.corrected, sink)
        .wrap_err_with(|| format!("save new fuel map {}", cli.output.display()))?;

    if cli.json {
        println!("{}", outcome_json(&cfg, &outcome, cli));
    } else {
        print_tables(&cfg, &outcome, cli);
    }
    Ok(())
}

fn print_tables(cfg: &Config, outcome: &TuneOutcome, cli: &Cli) {
    let c = &outcome.correction;
    let (rpm, load) = (&cfg.rpm_labels, &cfg.load_labels);
    print!("{}", render_table("Logged AFR", &c.logged_afr, rpm, load));
    let title = if cli.dry_run {
        "New Fuel Map (dry run, not saved)".to_string()
    } else {
        format!("New Fuel Map (also saved under {})", cli.output.display())
    };
    print!("{}", render_table(&title, &c.corrected, rpm, load));
    print!("{}", render_table("New-Old Map", &c.delta, rpm, load));
}

fn outcome_json(cfg: &Config, outcome: &TuneOutcome, cli: &Cli) -> serde_json::Value {
    let c = &outcome.correction;
    let s = &outcome.stats;
    let output = if cli.dry_run {
        serde_json::Value::Null
    } else {
        json!(cli.output.display().to_string())
    };
    json!({
        "rpm_labels": cfg.rpm_labels,
        "load_labels": cfg.load_labels,
        "logged_afr": c.logged_afr.to_rows(),
        "new_fuel_map": c.corrected.to_rows(),
        "delta": c.delta.to_rows(),
        "samples": c.counts,
        "stats": {
            "rows": s.rows,
            "wot_rows": s.wot_rows,
            "settling_dropped": s.settling_dropped,
            "samples": s.samples,
            "excursions": s.excursions,
            "cells_corrected": s.cells_corrected,
        },
        "output": output,
    })
}
