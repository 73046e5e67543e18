//! Time-based reaction profile shared by chemistry simulations and biology processes.
//!
//! A profile says how long a process takes, the temperature/pH window it is
//! viable in, how its color changes, and whether it boils.

use crate::color::Color;
use crate::constants::{DEFAULT_BOIL_TEMP_C, REACTION_WINDOW_MS};
use serde::{Deserialize, Serialize};

/// Inclusive temperature (°C) and pH bounds a process can run in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViabilityWindow {
    pub min_temp: f64,
    pub max_temp: f64,
    pub min_ph: f64,
    pub max_ph: f64,
}

impl ViabilityWindow {
    /// NaN never lies inside the window.
    pub fn contains(&self, temperature: f64, ph: f64) -> bool {
        temperature >= self.min_temp
            && temperature <= self.max_temp
            && ph >= self.min_ph
            && ph <= self.max_ph
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub before: Color,
    pub after: Color,
}

impl ColorRamp {
    pub fn at(&self, progress: f64) -> Color {
        self.before.blend(self.after, progress)
    }
}

fn default_duration_ms() -> f64 {
    REACTION_WINDOW_MS
}

fn default_boil_temp() -> f64 {
    DEFAULT_BOIL_TEMP_C
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionProfile {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    pub window: ViabilityWindow,
    pub colors: ColorRamp,
    #[serde(default)]
    pub boils: bool,
    #[serde(default = "default_boil_temp")]
    pub boil_temp: f64,
}

impl ReactionProfile {
    /// Progress in 0..=1 after `elapsed_ms` at fixed conditions.
    ///
    /// Outside the viability window progress is always 0, whatever the
    /// elapsed time. A non-finite elapsed time counts as not started. A
    /// non-positive duration completes immediately.
    pub fn progress_at(&self, temperature: f64, ph: f64, elapsed_ms: f64) -> f64 {
        if !self.window.contains(temperature, ph) || !elapsed_ms.is_finite() {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_boiling(&self, temperature: f64) -> bool {
        self.boils && temperature >= self.boil_temp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn profile() -> ReactionProfile {
        ReactionProfile {
            duration_ms: 5000.0,
            window: ViabilityWindow { min_temp: 0.0, max_temp: 100.0, min_ph: 0.0, max_ph: 14.0 },
            colors: ColorRamp { before: Color::new(0, 0, 0), after: Color::new(100, 200, 250) },
            boils: true,
            boil_temp: 100.0,
        }
    }

    #[test]
    fn test_window_is_inclusive() {
        let w = profile().window;
        assert!(w.contains(0.0, 0.0));
        assert!(w.contains(100.0, 14.0));
        assert!(!w.contains(100.01, 7.0));
        assert!(!w.contains(25.0, -0.1));
        assert!(!w.contains(f64::NAN, 7.0));
    }

    #[test]
    fn test_progress_scales_and_saturates() {
        let p = profile();
        assert_eq!(p.progress_at(25.0, 7.0, 0.0), 0.0);
        assert_abs_diff_eq!(p.progress_at(25.0, 7.0, 1250.0), 0.25);
        assert_eq!(p.progress_at(25.0, 7.0, 5000.0), 1.0);
        assert_eq!(p.progress_at(25.0, 7.0, 60_000.0), 1.0);
        assert_eq!(p.progress_at(25.0, 7.0, -100.0), 0.0);
    }

    #[test]
    fn test_non_finite_elapsed_is_not_started() {
        let p = profile();
        assert_eq!(p.progress_at(25.0, 7.0, f64::NAN), 0.0);
        assert_eq!(p.progress_at(25.0, 7.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_progress_zero_out_of_window() {
        let p = profile();
        for elapsed in [0.0, 2500.0, 5000.0, 1e9] {
            assert_eq!(p.progress_at(150.0, 7.0, elapsed), 0.0);
            assert_eq!(p.progress_at(25.0, 15.0, elapsed), 0.0);
        }
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut p = profile();
        p.duration_ms = 0.0;
        assert_eq!(p.progress_at(25.0, 7.0, 0.0), 1.0);
    }

    #[test]
    fn test_boiling() {
        let mut p = profile();
        assert!(!p.is_boiling(99.9));
        assert!(p.is_boiling(100.0));
        p.boils = false;
        assert!(!p.is_boiling(250.0));
    }

    #[test]
    fn test_serde_defaults() {
        let json = r##"{
            "window": {"min_temp": 0, "max_temp": 100, "min_ph": 0, "max_ph": 14},
            "colors": {"before": "#ff4444", "after": "#f5f5f5"}
        }"##;
        let p: ReactionProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.duration_ms, 5000.0);
        assert_eq!(p.boil_temp, 100.0);
        assert!(!p.boils);
        assert_eq!(p.colors.at(1.0), Color::new(0xf5, 0xf5, 0xf5));
    }
}
