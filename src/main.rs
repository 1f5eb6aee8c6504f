//! swapdash entry point: CLI wiring and settings-driven dashboard construction.

use std::process;

use swapdash::cli::{self, CliOptions};
use swapdash::config::DashboardConfig;
use swapdash::dashboard::Dashboard;
use swapdash::io::export::export_kpi_csv;
use swapdash::report;
use swapdash::session::{DisplayMode, READY_MESSAGE, Session};

/// Loads settings: `--config` file if given, else defaults; `--data-dir` wins.
fn load_settings(cli: &CliOptions) -> DashboardConfig {
    let mut settings = match cli.config.as_deref() {
        Some(path) => DashboardConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => DashboardConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        settings.data.root = dir.clone();
    }

    let errors = settings.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    settings
}

fn session_from(cli: &CliOptions) -> Session {
    let mut session = Session::new();
    session.select_station(cli.station);
    session.select_battery(cli.battery);
    session
}

#[cfg(feature = "tui")]
fn launch_tui(dashboard: Dashboard, session: Session) {
    swapdash::tui::run(dashboard, session);
}

#[cfg(not(feature = "tui"))]
fn launch_tui(_dashboard: Dashboard, _session: Session) {
    eprintln!("error: --tui requires building with `--features tui`");
    process::exit(1);
}

#[cfg(feature = "api")]
fn launch_api(dashboard: Dashboard, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(swapdash::api::AppState { dashboard });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    rt.block_on(swapdash::api::serve(state, addr));
}

#[cfg(not(feature = "api"))]
fn launch_api(_dashboard: Dashboard, _port: u16) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });

    if cli.list {
        print!("{}", report::welcome());
        return;
    }

    let dashboard = Dashboard::new(load_settings(&cli));
    let mut session = session_from(&cli);

    if let Err(e) = dashboard.check_folders() {
        eprint!("{}", e.report());
        process::exit(1);
    }

    if cli.tui {
        launch_tui(dashboard, session);
        return;
    }
    if cli.serve {
        launch_api(dashboard, cli.port.unwrap_or(cli::DEFAULT_PORT));
        return;
    }

    let Some(config) = session.configuration() else {
        print!("{}", report::welcome());
        return;
    };

    let status = dashboard.layout().status(config);
    if !status.all_ready() {
        log::warn!("{config}: artifacts incomplete {status:?}");
    }
    print!("{}", report::configuration_preview(config, &status));

    if !cli.no_progress {
        dashboard.progress_plan().play(|step| {
            eprintln!("[{:>3.0}%] {}", step.fraction * 100.0, step.message);
        });
        eprintln!("{READY_MESSAGE}");
    }
    session.complete_run();

    let results = dashboard.results(config);
    let mode = if cli.full {
        DisplayMode::Full
    } else {
        DisplayMode::Preview
    };
    println!();
    print!(
        "{}",
        report::results(&results, mode, dashboard.preview_rows())
    );

    if let Some(path) = &cli.kpi_out {
        let Some(kpi) = &results.kpi else {
            eprintln!("error: no KPIs to export, the log failed to load");
            process::exit(1);
        };
        if let Err(e) = export_kpi_csv(config, kpi, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("KPIs written to {}", path.display());
    }

    if results.records.is_err() {
        process::exit(1);
    }
}
