use clap::{CommandFactory, Parser};
use eyre::{Result, WrapErr};
use std::path::Path;

mod cli;
mod error_fmt;
mod tune;

use cli::{Cli, JSON_MODE};
use tracing_appender::non_blocking::WorkerGuard;

/// Installs the subscriber; the returned guard must outlive all logging.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cli.log_level)
            .wrap_err_with(|| format!("invalid --log-level {:?}", cli.log_level))?,
    };

    // With --json, stderr is reserved for the error document; diagnostics
    // then only reach --log-file.
    let console = (!cli.json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    });

    let mut guard = None;
    let file = match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("--log-file must name a file: {}", path.display()))?;
            let (writer, file_guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            guard = Some(file_guard);
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| eyre::eyre!("init tracing: {e}"))?;
    Ok(guard)
}

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let [log_path] = cli.logs.as_slice() else {
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    let guard = init_tracing(&cli).unwrap_or_else(|e| {
        eprintln!("warning: logging disabled: {e}");
        None
    });
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wot-tuner starting");

    if let Err(err) = tune::run_tune(&cli, log_path) {
        tracing::debug!(error = ?err, "run failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        let code = error_fmt::exit_code_for_error(&err);
        // exit() skips destructors; flush the file writer first.
        drop(guard);
        std::process::exit(code);
    }
}
