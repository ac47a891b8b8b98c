//! Command-line presentation adapter.
//!
//! # Responsibility
//! - Turn command-line input into core service calls.
//! - Render resolver/aggregator output for the terminal.
//!
//! Core correctness lives in `casemap_core`; this binary is glue.

use casemap_core::db::open_db;
use casemap_core::{
    builtin_reference_table, default_log_level, format_expected_display, init_logging, GeoPoint,
    MapService, PrevalenceRates, SqliteStatePort, FsReportSink, REPORT_FILE_NAME,
};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const STATE_DB_FILE: &str = "casemap.db";

#[derive(Parser)]
#[command(
    name = "casemap",
    version,
    about = "Drop anonymised pins on South African towns and export per-town case summaries"
)]
struct Cli {
    /// Directory holding the state database, logs and exported reports.
    #[arg(long, default_value = ".casemap")]
    data_dir: PathBuf,

    /// Expected cases per 1000 children (band center).
    #[arg(long, default_value_t = 1.5)]
    rate_center: f64,

    /// Expected cases per 1000 children (band floor).
    #[arg(long, default_value_t = 1.0)]
    rate_low: f64,

    /// Expected cases per 1000 children (band ceiling).
    #[arg(long, default_value_t = 2.0)]
    rate_high: f64,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drop a pin; it snaps to the nearest reference town.
    #[command(allow_negative_numbers = true)]
    Add {
        lat: f64,
        lon: f64,
        /// Optional free-text note stored with the pin.
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List stored pins with their resolved towns.
    List,
    /// Show per-town observed vs. expected case summaries.
    Summary,
    /// Write the summary report file.
    Export {
        /// Target directory; defaults to the data directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(&cli.data_dir)?;
    init_logging_best_effort(&cli);

    let conn = open_db(cli.data_dir.join(STATE_DB_FILE))?;
    let port = SqliteStatePort::try_new(&conn)?;
    let table = builtin_reference_table();
    let rates = PrevalenceRates {
        center_per_thousand: cli.rate_center,
        low_per_thousand: cli.rate_low,
        high_per_thousand: cli.rate_high,
    };
    let mut service = MapService::new(table, port, rates);

    match cli.command {
        Command::Add { lat, lon, note } => {
            let outcome = service.place_pin(GeoPoint::new(lat, lon), note)?;
            let town_name = town_name(&service, outcome.annotation.town_id);
            println!("pin {} -> {town_name}", outcome.annotation.id);
            if let Some(warning) = outcome.persist_warning {
                eprintln!("warning: pin kept in memory but not persisted: {warning}");
            }
        }
        Command::List => {
            for annotation in service.annotations() {
                println!(
                    "{}\t{}\t{}",
                    annotation.id,
                    town_name(&service, annotation.town_id),
                    annotation.note
                );
            }
        }
        Command::Summary => {
            let summaries = service.town_summaries();
            for (town, summary) in service.table().towns().iter().zip(&summaries) {
                println!(
                    "{}: observed {} expected {} ({}-{})",
                    town.name,
                    summary.observed_count,
                    format_expected_display(summary.expected_center),
                    format_expected_display(summary.expected_low),
                    format_expected_display(summary.expected_high),
                );
            }
        }
        Command::Export { out } => {
            let sink = FsReportSink::new(out.unwrap_or(cli.data_dir));
            service.export_report(&sink)?;
            println!("wrote {}", sink.target_path(REPORT_FILE_NAME).display());
        }
    }

    Ok(())
}

/// Logging is best effort for the CLI: a failed init degrades to stderr.
fn init_logging_best_effort(cli: &Cli) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());

    let log_dir = match std::fs::canonicalize(&cli.data_dir) {
        Ok(dir) => dir.join("logs"),
        Err(err) => {
            eprintln!("warning: cannot resolve data dir for logging: {err}");
            return;
        }
    };
    let Some(log_dir) = log_dir.to_str().map(String::from) else {
        eprintln!("warning: log directory path is not valid UTF-8; logging disabled");
        return;
    };

    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn town_name<P: casemap_core::StatePort>(service: &MapService<'_, P>, town_id: u32) -> String {
    service
        .table()
        .town_by_id(town_id)
        .map(|town| town.name.clone())
        .unwrap_or_else(|| format!("town#{town_id}"))
}
