//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::catalog::{BatteryType, StationType};

/// Default API server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub station: Option<StationType>,
    pub battery: Option<BatteryType>,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub list: bool,
    pub full: bool,
    pub no_progress: bool,
    pub kpi_out: Option<PathBuf>,
    pub tui: bool,
    pub serve: bool,
    pub port: Option<u16>,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--station" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --station (expected a code)")?;
                if opts.station.replace(value.parse()?).is_some() {
                    return Err("--station provided more than once".to_string());
                }
            }
            "--battery" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --battery (expected a code)")?;
                if opts.battery.replace(value.parse()?).is_some() {
                    return Err("--battery provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--data-dir" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --data-dir (expected a directory)")?;
                if opts.data_dir.replace(PathBuf::from(path)).is_some() {
                    return Err("--data-dir provided more than once".to_string());
                }
            }
            "--kpi-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --kpi-out (expected a file path)")?;
                if opts.kpi_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--kpi-out provided more than once".to_string());
                }
            }
            "--port" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{value}\" is not a valid u16"))?;
                if opts.port.replace(port).is_some() {
                    return Err("--port provided more than once".to_string());
                }
            }
            "--list" => opts.list = true,
            "--full" => opts.full = true,
            "--no-progress" => opts.no_progress = true,
            "--tui" => opts.tui = true,
            "--serve" => opts.serve = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.tui && opts.serve {
        return Err(
            "arguments `--tui` and `--serve` are mutually exclusive; choose one surface"
                .to_string(),
        );
    }
    if opts.port.is_some() && !opts.serve {
        return Err("--port requires --serve".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("swapdash: battery swap station simulation dashboard");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  swapdash [--station <code>] [--battery <code>] [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --station <code>     1-int, 2-int, 3-int, 2-clu, 3-clu (or full label)");
    eprintln!("  --battery <code>     1bp, 2bp, 3bp, mix (or label, e.g. \"3 BP Mix\")");
    eprintln!("  --config <path>      Load settings from a TOML file");
    eprintln!("  --data-dir <path>    Directory holding the data folders");
    eprintln!("  --list               List available configurations");
    eprintln!("  --full               Show the full data table instead of a preview");
    eprintln!("  --no-progress        Skip the simulation progress animation");
    eprintln!("  --kpi-out <path>     Write the KPIs to a CSV file");
    eprintln!("  --tui                Interactive terminal dashboard (feature `tui`)");
    eprintln!("  --serve              Start the REST API (feature `api`)");
    eprintln!("  --port <u16>         API server port (default: {DEFAULT_PORT})");
    eprintln!("  --help               Show this help message");
}
