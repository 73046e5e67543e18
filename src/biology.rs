//! Biology lab processes (photosynthesis, respiration, bacterial growth, ...).
//!
//! Every process is data: a [`ReactionProfile`] for timing and viability, an
//! optimum temperature and pH, and a list of measured outputs that move from a
//! start value to an end value along a [`GrowthCurve`]. One routine,
//! [`simulate_process`], evaluates all of them.

use crate::math_utils::lerp;
use crate::profile::ReactionProfile;
use crate::reaction_state::ReactionPhase;
use serde::{Deserialize, Serialize};

const LOGISTIC_STEEPNESS: f64 = 10.0;

/// Shape applied to progress before interpolating an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthCurve {
    Linear,
    /// S-shaped, normalized so 0 maps to 0 and 1 maps to 1
    Logistic,
    /// Fast start, slowing toward the end: `1 - (1 - p)^2`
    Saturating,
}

impl GrowthCurve {
    pub fn apply(&self, progress: f64) -> f64 {
        match self {
            GrowthCurve::Linear => progress,
            GrowthCurve::Logistic => {
                let s = |x: f64| 1.0 / (1.0 + (-LOGISTIC_STEEPNESS * (x - 0.5)).exp());
                let (lo, hi) = (s(0.0), s(1.0));
                (s(progress) - lo) / (hi - lo)
            }
            GrowthCurve::Saturating => 1.0 - (1.0 - progress).powi(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutput {
    pub name: String,
    pub unit: String,
    pub start: f64,
    pub end: f64,
    pub curve: GrowthCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiologyProcess {
    pub id: String,
    pub name: String,
    pub profile: ReactionProfile,
    pub optimal_temp: f64,
    pub optimal_ph: f64,
    pub outputs: Vec<ProcessOutput>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessReading {
    pub name: String,
    pub unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessState {
    pub progress: f64,
    pub state: ReactionPhase,
    /// 0..1, how close conditions are to the optimum
    pub efficiency: f64,
    pub outputs: Vec<ProcessReading>,
}

impl ProcessState {
    pub fn output(&self, name: &str) -> Option<f64> {
        self.outputs.iter().find(|o| o.name == name).map(|o| o.value)
    }
}

/// Triangular falloff: 1 at `optimum`, 0 at either bound and beyond.
fn axis_efficiency(value: f64, min: f64, optimum: f64, max: f64) -> f64 {
    if !(value >= min && value <= max) {
        return 0.0;
    }
    if value <= optimum {
        if optimum <= min { 1.0 } else { (value - min) / (optimum - min) }
    } else if max <= optimum {
        1.0
    } else {
        (max - value) / (max - optimum)
    }
}

impl BiologyProcess {
    pub fn efficiency(&self, temperature: f64, ph: f64) -> f64 {
        let w = &self.profile.window;
        axis_efficiency(temperature, w.min_temp, self.optimal_temp, w.max_temp)
            * axis_efficiency(ph, w.min_ph, self.optimal_ph, w.max_ph)
    }
}

pub fn simulate_process(
    process: &BiologyProcess,
    temperature: f64,
    ph: f64,
    elapsed_ms: f64,
) -> ProcessState {
    let progress = process.profile.progress_at(temperature, ph, elapsed_ms);
    let efficiency = process.efficiency(temperature, ph);

    let outputs = process
        .outputs
        .iter()
        .map(|o| ProcessReading {
            name: o.name.clone(),
            unit: o.unit.clone(),
            value: lerp(o.start, o.end, o.curve.apply(progress) * efficiency),
        })
        .collect();

    ProcessState {
        progress,
        state: ReactionPhase::from_progress(progress),
        efficiency,
        outputs,
    }
}
