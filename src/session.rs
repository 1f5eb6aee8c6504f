//! Explicit dashboard state: selection, run status, fake progress, display mode.
//!
//! The UI surfaces own a [`Session`] and pass it to their renderers; nothing
//! here is global.

use std::thread;
use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::analysis::RecordSet;
use crate::catalog::{BatteryType, Configuration, StationType};
use crate::config::ProgressConfig;

/// Status messages shown while the "simulation" runs.
pub const PROGRESS_MESSAGES: [&str; 10] = [
    "Initializing simulation environment...",
    "Loading station configuration...",
    "Setting up battery parameters...",
    "Generating customer arrival patterns...",
    "Simulating vehicle interactions...",
    "Processing simulation data...",
    "Generating performance metrics...",
    "Calculating KPIs...",
    "Creating data logs...",
    "Simulation complete!",
];

/// Message shown after the last step, before results appear.
pub const READY_MESSAGE: &str = "Ready to display results!";

/// Where the user is in the select → run → results flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Station or battery not chosen yet.
    AwaitingSelection,
    /// Configuration chosen, simulation not run for it.
    Ready(Configuration),
    /// Simulation run for this configuration; results are shown.
    Complete(Configuration),
}

/// Selection and run state for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    station: Option<StationType>,
    battery: Option<BatteryType>,
    simulation_run: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn station(&self) -> Option<StationType> {
        self.station
    }

    pub fn battery(&self) -> Option<BatteryType> {
        self.battery
    }

    /// Changes the station; a different value invalidates the last run.
    pub fn select_station(&mut self, station: Option<StationType>) {
        if self.station != station {
            self.station = station;
            self.simulation_run = false;
        }
    }

    /// Changes the battery type; a different value invalidates the last run.
    pub fn select_battery(&mut self, battery: Option<BatteryType>) {
        if self.battery != battery {
            self.battery = battery;
            self.simulation_run = false;
        }
    }

    /// The selected configuration, once both halves are chosen.
    pub fn configuration(&self) -> Option<Configuration> {
        Some(Configuration::new(self.station?, self.battery?))
    }

    pub fn phase(&self) -> Phase {
        match self.configuration() {
            None => Phase::AwaitingSelection,
            Some(cfg) if self.simulation_run => Phase::Complete(cfg),
            Some(cfg) => Phase::Ready(cfg),
        }
    }

    /// Marks the simulation as run. Returns `false` without a full selection.
    pub fn complete_run(&mut self) -> bool {
        let Some(cfg) = self.configuration() else {
            return false;
        };
        log::info!("simulation run complete for {cfg}");
        self.simulation_run = true;
        true
    }

    /// Drops the results so the simulation can be run again.
    pub fn rerun(&mut self) {
        self.simulation_run = false;
    }
}

/// One status message of the progress animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStep {
    pub message: &'static str,
    /// Completed share after this step, in `(0.0, 1.0]`.
    pub fraction: f64,
    /// Time to hold this step before the next one.
    pub delay: Duration,
}

/// The full progress animation: ten timed steps and a ready pause.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPlan {
    steps: Vec<ProgressStep>,
    ready_pause: Duration,
}

impl ProgressPlan {
    /// Draws per-step delays from the configured range.
    ///
    /// Intermediate steps wait a uniform random time in
    /// `[step_delay_min_ms, step_delay_max_ms]`; the last step waits
    /// `final_step_ms`.
    pub fn new(cfg: &ProgressConfig) -> Self {
        let mut rng = cfg
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let lo = cfg.step_delay_min_ms.min(cfg.step_delay_max_ms);
        let hi = cfg.step_delay_max_ms.max(lo);
        let last = PROGRESS_MESSAGES.len() - 1;

        let steps = PROGRESS_MESSAGES
            .iter()
            .enumerate()
            .map(|(i, &message)| {
                let ms = if i == last {
                    cfg.final_step_ms
                } else {
                    rng.random_range(lo..=hi)
                };
                ProgressStep {
                    message,
                    fraction: (i + 1) as f64 / PROGRESS_MESSAGES.len() as f64,
                    delay: Duration::from_millis(ms),
                }
            })
            .collect();

        Self {
            steps,
            ready_pause: Duration::from_millis(cfg.ready_pause_ms),
        }
    }

    /// Same messages with no waiting.
    pub fn instant() -> Self {
        Self::new(&ProgressConfig {
            step_delay_min_ms: 0,
            step_delay_max_ms: 0,
            final_step_ms: 0,
            ready_pause_ms: 0,
            seed: Some(0),
        })
    }

    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn ready_pause(&self) -> Duration {
        self.ready_pause
    }

    /// Wall time the whole animation takes.
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum::<Duration>() + self.ready_pause
    }

    /// Plays the animation on the calling thread, reporting each step
    /// before sleeping through its delay.
    pub fn play(&self, mut on_step: impl FnMut(&ProgressStep)) {
        for step in &self.steps {
            on_step(step);
            thread::sleep(step.delay);
        }
        thread::sleep(self.ready_pause);
    }
}

/// How much of the log table to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// The first `preview_rows` rows.
    #[default]
    Preview,
    /// Every row.
    Full,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Preview => Self::Full,
            Self::Full => Self::Preview,
        }
    }

    pub fn label(self, preview_rows: usize) -> String {
        match self {
            Self::Preview => format!("Preview (First {preview_rows} rows)"),
            Self::Full => "Full Dataset".to_string(),
        }
    }

    /// Rows of `records` visible in this mode.
    pub fn visible_rows<'a>(
        self,
        records: &'a RecordSet,
        preview_rows: usize,
    ) -> &'a [Vec<String>] {
        let rows = records.rows();
        match self {
            Self::Preview => &rows[..rows.len().min(preview_rows)],
            Self::Full => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_awaits_selection() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::AwaitingSelection);
        assert_eq!(session.configuration(), None);
    }

    #[test]
    fn run_requires_full_selection() {
        let mut session = Session::new();
        session.select_station(Some(StationType::TwoClustered));
        assert!(!session.complete_run());
        assert_eq!(session.phase(), Phase::AwaitingSelection);

        session.select_battery(Some(BatteryType::TwoBp));
        let cfg = Configuration::new(StationType::TwoClustered, BatteryType::TwoBp);
        assert_eq!(session.phase(), Phase::Ready(cfg));
        assert!(session.complete_run());
        assert_eq!(session.phase(), Phase::Complete(cfg));
    }

    #[test]
    fn changing_selection_resets_run() {
        let mut session = Session::new();
        session.select_station(Some(StationType::OneIndependent));
        session.select_battery(Some(BatteryType::OneBp));
        session.complete_run();

        session.select_battery(Some(BatteryType::ThreeBpMix));
        assert!(matches!(session.phase(), Phase::Ready(_)));

        session.complete_run();
        session.select_station(Some(StationType::ThreeIndependent));
        assert!(matches!(session.phase(), Phase::Ready(_)));
    }

    #[test]
    fn reselecting_same_value_keeps_run() {
        let mut session = Session::new();
        session.select_station(Some(StationType::OneIndependent));
        session.select_battery(Some(BatteryType::OneBp));
        session.complete_run();
        session.select_station(Some(StationType::OneIndependent));
        assert!(matches!(session.phase(), Phase::Complete(_)));

        session.rerun();
        assert!(matches!(session.phase(), Phase::Ready(_)));
    }

    #[test]
    fn progress_plan_has_ten_steps_ending_at_one() {
        let plan = ProgressPlan::instant();
        assert_eq!(plan.steps().len(), 10);
        assert_eq!(plan.steps()[0].fraction, 0.1);
        assert_eq!(plan.steps()[9].fraction, 1.0);
        assert_eq!(plan.steps()[9].message, "Simulation complete!");
        assert_eq!(plan.total_duration(), Duration::ZERO);
    }

    #[test]
    fn progress_delays_within_configured_range() {
        let cfg = ProgressConfig {
            seed: Some(42),
            ..ProgressConfig::default()
        };
        let plan = ProgressPlan::new(&cfg);
        let (last, rest) = plan.steps().split_last().expect("ten steps");
        for step in rest {
            assert!(step.delay >= Duration::from_millis(300));
            assert!(step.delay <= Duration::from_millis(800));
        }
        assert_eq!(last.delay, Duration::from_millis(500));
        assert_eq!(plan.ready_pause(), Duration::from_millis(500));
    }

    #[test]
    fn seeded_plans_are_deterministic() {
        let cfg = ProgressConfig {
            seed: Some(7),
            ..ProgressConfig::default()
        };
        assert_eq!(ProgressPlan::new(&cfg), ProgressPlan::new(&cfg));
    }

    #[test]
    fn play_reports_every_step() {
        let mut seen = Vec::new();
        ProgressPlan::instant().play(|s| seen.push(s.message));
        assert_eq!(seen, PROGRESS_MESSAGES);
    }

    #[test]
    fn display_mode_limits_rows() {
        let rows: Vec<Vec<String>> = (0..30).map(|i| vec![i.to_string()]).collect();
        let records = RecordSet::new(vec!["n".into()], rows);
        assert_eq!(DisplayMode::Preview.visible_rows(&records, 20).len(), 20);
        assert_eq!(DisplayMode::Full.visible_rows(&records, 20).len(), 30);
        assert_eq!(DisplayMode::Preview.toggle(), DisplayMode::Full);
        assert_eq!(DisplayMode::Preview.label(20), "Preview (First 20 rows)");
    }
}
