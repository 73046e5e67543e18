//! Headless lab session.
//!
//! Stands in for the UI's polling loop: each tick advances a reaction clock,
//! evaluates the runtime state from the session's parameter overlay and hands
//! the session to every registered [`SessionOp`].

use crate::color::Color;
use crate::constants::{DEFAULT_REPORT_FREQUENCY_PERCENT, DEFAULT_TICK_INTERVAL_MS};
use crate::error::LabResult;
use crate::reaction_state::{ReactionPhase, ReactionRuntimeState};
use crate::registry::{Registry, registry};
use crate::simulation_config::ParameterOverlay;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub tick_interval_ms: f64,
    pub debug: bool,
    pub report_frequency_percent: f64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            debug: false,
            report_frequency_percent: DEFAULT_REPORT_FREQUENCY_PERCENT,
        }
    }
}

impl LabConfig {
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> LabResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub trait SessionOp {
    fn name(&self) -> &str;

    /// Called once before the first tick
    fn init_session(&mut self, _session: &mut LabSession) {}

    /// Called after every tick has been evaluated
    fn update_session(&mut self, _session: &mut LabSession) {}

    /// Called once after the last tick
    fn after_session(&mut self, _session: &mut LabSession) {}

    /// Downcasting hook so callers can read results back out of an op.
    fn as_any(&self) -> &dyn std::any::Any;
}

#[derive(Debug, Clone)]
pub struct OpTiming {
    pub op_name: String,
    pub init_time: Duration,
    pub total_update_time: Duration,
    pub update_call_count: u32,
    pub after_time: Duration,
}

impl OpTiming {
    pub fn new(op_name: String) -> Self {
        Self {
            op_name,
            init_time: Duration::ZERO,
            total_update_time: Duration::ZERO,
            update_call_count: 0,
            after_time: Duration::ZERO,
        }
    }

    pub fn avg_update_time(&self) -> Duration {
        if self.update_call_count > 0 {
            self.total_update_time / self.update_call_count
        } else {
            Duration::ZERO
        }
    }
}

pub struct LabSession {
    pub simulation_type: String,
    pub overlay: ParameterOverlay,
    pub config: LabConfig,
    pub tick: u32,
    /// Wall time the session has been running
    pub elapsed_ms: f64,
    /// Time the current reaction has been running; restarts when conditions leave the window
    pub reaction_clock_ms: f64,
    pub current: Option<ReactionRuntimeState>,
    pub op_timings: Vec<OpTiming>,
    ops: Vec<Box<dyn SessionOp>>,
    registry: &'static Registry,
}

impl LabSession {
    /// Session over the global registry, with parameters seeded from the configuration.
    pub fn new(simulation_type: &str, config: LabConfig, ops: Vec<Box<dyn SessionOp>>) -> LabResult<Self> {
        let sim = registry().try_simulation(simulation_type)?;
        Ok(Self::with_overlay(ParameterOverlay::from_config(sim), config, ops))
    }

    pub fn with_overlay(overlay: ParameterOverlay, config: LabConfig, ops: Vec<Box<dyn SessionOp>>) -> Self {
        let op_timings = ops.iter().map(|op| OpTiming::new(op.name().to_string())).collect();
        LabSession {
            simulation_type: overlay.simulation_id().to_string(),
            overlay,
            config,
            tick: 0,
            elapsed_ms: 0.0,
            reaction_clock_ms: 0.0,
            current: None,
            op_timings,
            ops,
            registry: registry(),
        }
    }

    pub fn temperature(&self) -> f64 {
        self.overlay.temperature().unwrap_or(0.0)
    }

    pub fn ph(&self) -> f64 {
        self.overlay.ph().unwrap_or(7.0)
    }

    pub fn set_parameter(&mut self, name: &str, value: f64) -> LabResult<f64> {
        self.overlay.set(name, value)
    }

    pub fn op<T: 'static>(&self) -> Option<&T> {
        self.ops.iter().find_map(|op| op.as_any().downcast_ref::<T>())
    }

    /// Restart the reaction from zero without touching the parameters.
    pub fn restart_reaction(&mut self) {
        self.reaction_clock_ms = 0.0;
        self.current = None;
    }

    /// Advance one interval and re-evaluate without running ops.
    pub fn evaluate_tick(&mut self) -> &ReactionRuntimeState {
        let (temperature, ph) = (self.temperature(), self.ph());
        self.tick += 1;
        self.elapsed_ms += self.config.tick_interval_ms;
        self.reaction_clock_ms += self.config.tick_interval_ms;

        let state = self
            .registry
            .runtime_state(&self.simulation_type, temperature, ph, self.reaction_clock_ms);

        let in_window = self
            .registry
            .profile(&self.simulation_type)
            .is_some_and(|p| p.window.contains(temperature, ph));
        if !in_window {
            self.reaction_clock_ms = 0.0;
        }

        if self.config.debug {
            debug!(
                tick = self.tick,
                elapsed_ms = self.elapsed_ms,
                progress = state.progress,
                state = state.state.as_str(),
                color = %state.color,
                "lab tick"
            );
        }

        self.current.insert(state)
    }

    pub fn step(&mut self) {
        self.evaluate_tick();

        let mut ops = std::mem::take(&mut self.ops);
        for (i, op) in ops.iter_mut().enumerate() {
            let start = Instant::now();
            op.update_session(self);
            self.op_timings[i].total_update_time += start.elapsed();
            self.op_timings[i].update_call_count += 1;
        }
        self.ops = ops;
    }

    pub fn init(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        for (i, op) in ops.iter_mut().enumerate() {
            let start = Instant::now();
            op.init_session(self);
            self.op_timings[i].init_time = start.elapsed();
        }
        self.ops = ops;
    }

    pub fn finish(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        for (i, op) in ops.iter_mut().enumerate() {
            let start = Instant::now();
            op.after_session(self);
            self.op_timings[i].after_time = start.elapsed();
        }
        self.ops = ops;
    }

    /// Init, `ticks` steps, then the after hooks.
    pub fn run(&mut self, ticks: u32) {
        self.init();
        for _ in 0..ticks {
            self.step();
        }
        self.finish();
    }

    /// Run until the reaction completes or `max_ticks` is reached. Returns ticks taken.
    pub fn run_until_complete(&mut self, max_ticks: u32) -> u32 {
        self.init();
        let mut taken = 0;
        while taken < max_ticks {
            self.step();
            taken += 1;
            if self.current.as_ref().is_some_and(|s| s.state == ReactionPhase::Complete) {
                break;
            }
        }
        self.finish();
        taken
    }
}

/// One recorded sample of the live readout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabReading {
    pub elapsed_ms: f64,
    pub temperature: f64,
    pub ph: f64,
    pub progress: f64,
    pub state: ReactionPhase,
    pub color: Color,
}

/// Records a reading on every tick.
#[derive(Default)]
pub struct ReadingLoggerOp {
    pub readings: Vec<LabReading>,
}

impl ReadingLoggerOp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> LabResult<String> {
        Ok(serde_json::to_string(&self.readings)?)
    }
}

impl SessionOp for ReadingLoggerOp {
    fn name(&self) -> &str {
        "ReadingLoggerOp"
    }

    fn init_session(&mut self, _session: &mut LabSession) {
        self.readings.clear();
    }

    fn update_session(&mut self, session: &mut LabSession) {
        if let Some(state) = &session.current {
            self.readings.push(LabReading {
                elapsed_ms: session.elapsed_ms,
                temperature: session.temperature(),
                ph: session.ph(),
                progress: state.progress,
                state: state.state,
                color: state.color,
            });
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Logs each time progress crosses a reporting milestone.
///
/// Built with [`ProgressReportingOp::new`] it reports at the session's
/// `LabConfig::report_frequency_percent`.
pub struct ProgressReportingOp {
    /// Resolved on `init_session`
    pub report_frequency_percent: f64,
    pub milestones_reported: Vec<i32>,
    frequency_override: Option<f64>,
    last_milestone: i32,
}

impl ProgressReportingOp {
    pub fn new() -> Self {
        Self {
            report_frequency_percent: 0.0,
            milestones_reported: Vec::new(),
            frequency_override: None,
            last_milestone: 0,
        }
    }

    pub fn with_frequency(report_frequency_percent: f64) -> Self {
        Self {
            frequency_override: Some(report_frequency_percent),
            ..Self::new()
        }
    }
}

impl Default for ProgressReportingOp {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionOp for ProgressReportingOp {
    fn name(&self) -> &str {
        "ProgressReportingOp"
    }

    fn init_session(&mut self, session: &mut LabSession) {
        self.last_milestone = 0;
        self.milestones_reported.clear();
        self.report_frequency_percent = self
            .frequency_override
            .unwrap_or(session.config.report_frequency_percent);
    }

    fn update_session(&mut self, session: &mut LabSession) {
        let Some(state) = &session.current else {
            return;
        };
        if self.report_frequency_percent <= 0.0 {
            return;
        }

        let milestone = (state.progress * 100.0 / self.report_frequency_percent).floor() as i32;
        if milestone < self.last_milestone {
            // reaction was reset
            self.last_milestone = milestone;
            return;
        }
        if milestone > self.last_milestone {
            self.last_milestone = milestone;
            self.milestones_reported.push(milestone);
            info!(
                simulation = %session.simulation_type,
                progress_percent = state.progress * 100.0,
                state = state.state.as_str(),
                color = %state.color,
                "reaction progress"
            );
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use more_asserts::assert_le;

    fn session(ops: Vec<Box<dyn SessionOp>>) -> LabSession {
        LabSession::new("acid-base", LabConfig::default(), ops).unwrap()
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config = LabConfig::from_json_str(r#"{"tick_interval_ms": 250}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250.0);
        assert!(!config.debug);
        assert_eq!(config.report_frequency_percent, 10.0);
        assert!(LabConfig::from_json_str("[").is_err());
    }

    #[test]
    fn test_unknown_simulation_type() {
        assert!(LabSession::new("alchemy", LabConfig::default(), vec![]).is_err());
    }

    #[test]
    fn test_ticks_advance_progress() {
        let mut s = session(vec![]);
        s.run(5);
        let state = s.current.as_ref().unwrap();
        assert_abs_diff_eq!(state.progress, 0.5);
        assert_eq!(state.state, ReactionPhase::Reacting);
        assert_eq!(s.elapsed_ms, 2500.0);
    }

    #[test]
    fn test_run_until_complete() {
        let mut s = session(vec![]);
        let ticks = s.run_until_complete(100);
        assert_eq!(ticks, 10);
        assert_eq!(s.current.as_ref().unwrap().state, ReactionPhase::Complete);
    }

    #[test]
    fn test_leaving_window_restarts_reaction() {
        let mut s = session(vec![]);
        s.init();
        for _ in 0..4 {
            s.step();
        }
        assert_abs_diff_eq!(s.current.as_ref().unwrap().progress, 0.4);

        // slider allows overheating past the 100 °C window
        assert_eq!(s.set_parameter("temperature", 150.0).unwrap(), 150.0);
        s.step();
        assert_eq!(s.current.as_ref().unwrap().state, ReactionPhase::Idle);
        assert_eq!(s.reaction_clock_ms, 0.0);

        s.set_parameter("temperature", 25.0).unwrap();
        s.step();
        assert_abs_diff_eq!(s.current.as_ref().unwrap().progress, 0.1);
        assert_eq!(s.elapsed_ms, 3000.0);
    }

    #[test]
    fn test_restart_reaction() {
        let mut s = session(vec![]);
        s.run(6);
        s.restart_reaction();
        assert!(s.current.is_none());
        s.step();
        assert_abs_diff_eq!(s.current.as_ref().unwrap().progress, 0.1);
    }

    #[test]
    fn test_logger_records_every_tick() {
        let mut s = session(vec![Box::new(ReadingLoggerOp::new())]);
        s.run(3);

        let logger = s.op::<ReadingLoggerOp>().unwrap();
        assert_eq!(logger.readings.len(), 3);
        assert_eq!(logger.readings[2].elapsed_ms, 1500.0);
        assert_eq!(logger.readings[0].temperature, 25.0);
        assert_le!(logger.readings[0].progress, logger.readings[2].progress);

        let json = logger.to_json().unwrap();
        assert!(json.contains("\"state\":\"reacting\""));
        assert_eq!(s.op_timings[0].update_call_count, 3);
    }

    #[test]
    fn test_progress_reporter_milestones() {
        let mut s = session(vec![Box::new(ProgressReportingOp::with_frequency(25.0))]);
        s.run(10);
        let reporter = s.op::<ProgressReportingOp>().unwrap();
        // 0.1 .. 1.0 in steps of 0.1 cross 25, 50, 75 and 100
        assert_eq!(reporter.milestones_reported, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_progress_reporter_uses_session_frequency() {
        let config = LabConfig { report_frequency_percent: 50.0, ..LabConfig::default() };
        let mut s =
            LabSession::new("acid-base", config, vec![Box::new(ProgressReportingOp::new())]).unwrap();
        s.run(10);
        let reporter = s.op::<ProgressReportingOp>().unwrap();
        assert_eq!(reporter.report_frequency_percent, 50.0);
        assert_eq!(reporter.milestones_reported, vec![1, 2]);

        let mut s = session(vec![Box::new(ProgressReportingOp::default())]);
        s.run(10);
        let reporter = s.op::<ProgressReportingOp>().unwrap();
        assert_eq!(reporter.milestones_reported, (1..=10).collect::<Vec<_>>());
    }
}
