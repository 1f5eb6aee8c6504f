//! TUI application state: selection cursors, progress playback and results.

use std::time::Instant;

use crate::assets::ArtifactStatus;
use crate::catalog::{BatteryType, Configuration, StationType};
use crate::dashboard::{Dashboard, MissingFolders, RunResults};
use crate::session::{DisplayMode, Phase, ProgressPlan, READY_MESSAGE, Session};

/// Rows moved per page scroll in the data table.
const PAGE_ROWS: usize = 10;

/// Which selector receives cursor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Station,
    Battery,
}

/// A progress animation being played against the wall clock.
struct Playback {
    config: Configuration,
    plan: ProgressPlan,
    /// Index of the shown step; `steps().len()` is the ready pause.
    step: usize,
    /// When the shown step ends.
    deadline: Instant,
}

/// TUI application state.
pub struct App {
    dashboard: Dashboard,
    session: Session,
    /// Folder check made at startup; runs are refused while it fails.
    folders: Result<(), MissingFolders>,
    /// Artifact status of the selection, refreshed on select and run.
    status: Option<ArtifactStatus>,
    /// Selector that moves on Up/Down.
    pub focus: Focus,
    /// Highlighted row in the station list.
    pub station_cursor: usize,
    /// Highlighted row in the battery list.
    pub battery_cursor: usize,
    playback: Option<Playback>,
    results: Option<RunResults>,
    /// Preview or full data table.
    pub mode: DisplayMode,
    /// First data row drawn in the table.
    pub table_offset: usize,
    /// One-line message shown in the footer, cleared on the next key.
    pub notice: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app with cursors on the session's selection, if any.
    pub fn new(dashboard: Dashboard, session: Session) -> Self {
        let station_cursor = session
            .station()
            .and_then(|s| StationType::ALL.iter().position(|&x| x == s))
            .unwrap_or(0);
        let battery_cursor = session
            .battery()
            .and_then(|b| BatteryType::ALL.iter().position(|&x| x == b))
            .unwrap_or(0);
        let folders = dashboard.check_folders();
        let status = session
            .configuration()
            .map(|cfg| dashboard.layout().status(cfg));
        Self {
            dashboard,
            session,
            folders,
            status,
            focus: Focus::Station,
            station_cursor,
            battery_cursor,
            playback: None,
            results: None,
            mode: DisplayMode::Preview,
            table_offset: 0,
            notice: None,
            quit: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Artifact status of the selected configuration, if one is chosen.
    pub fn artifact_status(&self) -> Option<ArtifactStatus> {
        self.status
    }

    /// Folders that must exist before a run, if any are absent.
    pub fn missing_folders(&self) -> Option<&MissingFolders> {
        self.folders.as_ref().err()
    }

    fn refresh_status(&mut self) {
        self.status = self
            .session
            .configuration()
            .map(|cfg| self.dashboard.layout().status(cfg));
    }

    /// Results of the last completed run for the current selection.
    pub fn results(&self) -> Option<&RunResults> {
        match self.session.phase() {
            Phase::Complete(_) => self.results.as_ref(),
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Station => Focus::Battery,
            Focus::Battery => Focus::Station,
        };
    }

    pub fn cursor_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = match self.focus {
            Focus::Station => StationType::ALL.len(),
            Focus::Battery => BatteryType::ALL.len(),
        };
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Station => &mut self.station_cursor,
            Focus::Battery => &mut self.battery_cursor,
        }
    }

    /// Applies the highlighted item of the focused list to the session.
    ///
    /// Ignored while the progress animation plays.
    pub fn select(&mut self) {
        if self.is_playing() {
            return;
        }
        match self.focus {
            Focus::Station => self
                .session
                .select_station(Some(StationType::ALL[self.station_cursor])),
            Focus::Battery => self
                .session
                .select_battery(Some(BatteryType::ALL[self.battery_cursor])),
        }
        if !matches!(self.session.phase(), Phase::Complete(_)) {
            self.results = None;
            self.table_offset = 0;
        }
        self.refresh_status();
    }

    /// Starts the progress animation for the selected configuration.
    pub fn start_run(&mut self, now: Instant) {
        if self.is_playing() {
            return;
        }
        if let Err(e) = &self.folders {
            self.notice = Some(e.to_string());
            return;
        }
        let Some(config) = self.session.configuration() else {
            self.notice = Some("Select a station and a battery type first".to_string());
            return;
        };
        self.session.rerun();
        self.results = None;
        self.table_offset = 0;

        let plan = self.dashboard.progress_plan();
        let first = plan.steps().first().map(|s| s.delay).unwrap_or_default();
        self.playback = Some(Playback {
            config,
            plan,
            step: 0,
            deadline: now + first,
        });
    }

    /// Moves the animation forward to `now`, finishing the run when the
    /// ready pause has elapsed.
    pub fn advance(&mut self, now: Instant) {
        let Some(pb) = self.playback.as_mut() else {
            return;
        };
        let mut done = false;
        while now >= pb.deadline {
            pb.step += 1;
            let steps = pb.plan.steps();
            if pb.step < steps.len() {
                pb.deadline += steps[pb.step].delay;
            } else if pb.step == steps.len() {
                pb.deadline += pb.plan.ready_pause();
            } else {
                done = true;
                break;
            }
        }
        if done {
            let config = pb.config;
            self.playback = None;
            self.session.complete_run();
            let results = self.dashboard.results(config);
            self.status = Some(results.status);
            self.results = Some(results);
        }
    }

    /// Gauge ratio and message of the animation, if one is playing.
    pub fn progress(&self) -> Option<(f64, &'static str)> {
        let pb = self.playback.as_ref()?;
        Some(match pb.plan.steps().get(pb.step) {
            Some(step) => (step.fraction, step.message),
            None => (1.0, READY_MESSAGE),
        })
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.table_offset = 0;
    }

    /// Number of table rows visible in the current mode.
    pub fn visible_row_count(&self) -> usize {
        self.results()
            .and_then(|r| r.records.as_ref().ok())
            .map_or(0, |rs| {
                self.mode
                    .visible_rows(rs, self.dashboard.preview_rows())
                    .len()
            })
    }

    pub fn scroll_down(&mut self) {
        let max = self.visible_row_count().saturating_sub(1);
        self.table_offset = (self.table_offset + PAGE_ROWS).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.table_offset = self.table_offset.saturating_sub(PAGE_ROWS);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    use super::*;
    use crate::config::{DashboardConfig, ProgressConfig};

    fn dashboard(root: &Path, step_ms: u64) -> Dashboard {
        let mut settings = DashboardConfig::default();
        settings.data.root = root.to_path_buf();
        for name in [
            &settings.data.logs_dir,
            &settings.data.first_hour_dir,
            &settings.data.customers_dir,
        ] {
            fs::create_dir_all(root.join(name)).expect("mkdir");
        }
        settings.progress = ProgressConfig {
            step_delay_min_ms: step_ms,
            step_delay_max_ms: step_ms,
            final_step_ms: step_ms,
            ready_pause_ms: step_ms,
            seed: Some(1),
        };
        Dashboard::new(settings)
    }

    fn write_log(dash: &Dashboard, cfg: Configuration, rows: usize) {
        let log = dash.layout().artifacts(cfg).log_csv;
        fs::create_dir_all(log.parent().expect("parent")).expect("mkdir");
        let mut text = String::from("Time,Customers Served\n");
        for i in 0..rows {
            text.push_str(&format!("7:{:02}:00,{i}\n", i % 60));
        }
        fs::write(log, text).expect("write");
    }

    fn select_both(app: &mut App) {
        app.select();
        app.toggle_focus();
        app.select();
    }

    #[test]
    fn cursors_start_on_session_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        session.select_station(Some(StationType::TwoClustered));
        session.select_battery(Some(BatteryType::ThreeBpMix));
        let app = App::new(dashboard(dir.path(), 0), session);
        assert_eq!(app.station_cursor, 3);
        assert_eq!(app.battery_cursor, 3);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(dashboard(dir.path(), 0), Session::new());
        app.cursor_up();
        assert_eq!(app.station_cursor, 0);
        for _ in 0..10 {
            app.cursor_down();
        }
        assert_eq!(app.station_cursor, StationType::ALL.len() - 1);

        app.toggle_focus();
        for _ in 0..10 {
            app.cursor_down();
        }
        assert_eq!(app.battery_cursor, BatteryType::ALL.len() - 1);
    }

    #[test]
    fn run_without_selection_sets_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(dashboard(dir.path(), 0), Session::new());
        app.start_run(Instant::now());
        assert!(!app.is_playing());
        assert!(app.notice.is_some());
    }

    #[test]
    fn missing_folders_block_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = DashboardConfig::default();
        settings.data.root = dir.path().to_path_buf();
        let mut app = App::new(Dashboard::new(settings), Session::new());
        select_both(&mut app);

        app.start_run(Instant::now());
        assert!(!app.is_playing());
        assert_eq!(app.missing_folders().map(|e| e.missing.len()), Some(3));
        let notice = app.notice.as_deref().expect("notice");
        assert!(notice.starts_with("Missing folders: Battery Simulation Logs"));
    }

    #[test]
    fn artifact_status_is_cached_until_selection() {
        let dir = tempfile::tempdir().unwrap();
        let dash = dashboard(dir.path(), 0);
        let cfg = Configuration::new(StationType::OneIndependent, BatteryType::OneBp);
        let mut app = App::new(dash, Session::new());
        assert_eq!(app.artifact_status(), None);

        select_both(&mut app);
        assert_eq!(app.artifact_status().map(|s| s.log_csv), Some(false));

        write_log(app.dashboard(), cfg, 3);
        assert_eq!(app.artifact_status().map(|s| s.log_csv), Some(false));

        app.select();
        assert_eq!(app.artifact_status().map(|s| s.log_csv), Some(true));
    }

    #[test]
    fn playback_walks_steps_then_loads_results() {
        let dir = tempfile::tempdir().unwrap();
        let dash = dashboard(dir.path(), 100);
        let cfg = Configuration::new(StationType::OneIndependent, BatteryType::OneBp);
        write_log(&dash, cfg, 30);
        let mut app = App::new(dash, Session::new());
        select_both(&mut app);

        let start = Instant::now();
        app.start_run(start);
        assert_eq!(app.progress(), Some((0.1, "Initializing simulation environment...")));

        app.advance(start + Duration::from_millis(150));
        assert_eq!(app.progress().map(|p| p.1), Some("Loading station configuration..."));

        app.advance(start + Duration::from_millis(1050));
        assert_eq!(app.progress(), Some((1.0, READY_MESSAGE)));
        assert!(app.results().is_none());

        app.advance(start + Duration::from_millis(1100));
        assert!(!app.is_playing());
        let results = app.results().expect("results");
        assert_eq!(results.kpi.as_ref().map(|k| k.total_customers), Some(154));
    }

    #[test]
    fn changing_selection_drops_results() {
        let dir = tempfile::tempdir().unwrap();
        let dash = dashboard(dir.path(), 0);
        write_log(
            &dash,
            Configuration::new(StationType::OneIndependent, BatteryType::OneBp),
            5,
        );
        let mut app = App::new(dash, Session::new());
        select_both(&mut app);
        app.start_run(Instant::now());
        app.advance(Instant::now());
        assert!(app.results().is_some());

        app.cursor_down();
        app.select();
        assert!(app.results().is_none());
        assert!(matches!(app.session().phase(), Phase::Ready(_)));
    }

    #[test]
    fn mode_toggle_and_scrolling() {
        let dir = tempfile::tempdir().unwrap();
        let dash = dashboard(dir.path(), 0);
        write_log(
            &dash,
            Configuration::new(StationType::OneIndependent, BatteryType::OneBp),
            45,
        );
        let mut app = App::new(dash, Session::new());
        select_both(&mut app);
        app.start_run(Instant::now());
        app.advance(Instant::now());

        assert_eq!(app.visible_row_count(), 20);
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.table_offset, 19);

        app.toggle_mode();
        assert_eq!(app.mode, DisplayMode::Full);
        assert_eq!(app.table_offset, 0);
        assert_eq!(app.visible_row_count(), 45);
        app.scroll_down();
        app.scroll_up();
        assert_eq!(app.table_offset, 0);
    }
}
