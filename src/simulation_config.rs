// src/simulation_config.rs - Per simulation-type configuration and the live parameter overlay

use crate::constants::{PH_PARAM, TEMPERATURE_PARAM};
use crate::error::{LabError, LabResult};
use crate::profile::ReactionProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A slider-style numeric parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub current: f64,
    pub step: f64,
    pub unit: String,
}

impl ParameterRange {
    /// Clamp to `[min, max]` and snap to the nearest step counted from `min`.
    pub fn constrain(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// Lab equipment such as a beaker or burette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apparatus {
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub volume: f64,
    pub max_volume: f64,
}

/// Static configuration for one simulation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameterSet {
    pub id: String,
    pub name: String,
    pub reaction_id: String,
    pub profile: ReactionProfile,
    pub parameters: Vec<ParameterRange>,
    #[serde(default)]
    pub apparatus: Vec<Apparatus>,
    pub expected_outcome: String,
}

impl SimulationParameterSet {
    pub fn parameter(&self, name: &str) -> Option<&ParameterRange> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A session's live parameter values, seeded from a configuration.
///
/// The static configuration is never mutated; sessions own one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterOverlay {
    simulation_id: String,
    ranges: HashMap<String, ParameterRange>,
    values: HashMap<String, f64>,
    apparatus: Vec<Apparatus>,
}

impl ParameterOverlay {
    pub fn from_config(config: &SimulationParameterSet) -> Self {
        let ranges: HashMap<String, ParameterRange> = config
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.clone()))
            .collect();
        let values = config
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.current))
            .collect();

        Self {
            simulation_id: config.id.clone(),
            ranges,
            values,
            apparatus: config.apparatus.clone(),
        }
    }

    pub fn simulation_id(&self) -> &str {
        &self.simulation_id
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Set a parameter, returning the value actually stored after clamping and snapping.
    pub fn set(&mut self, name: &str, value: f64) -> LabResult<f64> {
        let range = self
            .ranges
            .get(name)
            .ok_or_else(|| LabError::UnknownParameter(name.to_string()))?;
        let constrained = range.constrain(value);
        self.values.insert(name.to_string(), constrained);
        Ok(constrained)
    }

    /// Restore every parameter to its configured starting value.
    pub fn reset(&mut self) {
        for (name, range) in &self.ranges {
            self.values.insert(name.clone(), range.current);
        }
    }

    pub fn temperature(&self) -> Option<f64> {
        self.get(TEMPERATURE_PARAM)
    }

    pub fn ph(&self) -> Option<f64> {
        self.get(PH_PARAM)
    }

    pub fn apparatus(&self) -> &[Apparatus] {
        &self.apparatus
    }

    fn apparatus_mut(&mut self, name: &str) -> LabResult<&mut Apparatus> {
        self.apparatus
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| LabError::UnknownApparatus(name.to_string()))
    }

    /// Set an apparatus fill level, clamped to `[0, max_volume]`.
    pub fn fill(&mut self, name: &str, volume: f64) -> LabResult<f64> {
        let apparatus = self.apparatus_mut(name)?;
        apparatus.volume = volume.clamp(0.0, apparatus.max_volume);
        Ok(apparatus.volume)
    }

    pub fn set_active(&mut self, name: &str, active: bool) -> LabResult<()> {
        self.apparatus_mut(name)?.active = active;
        Ok(())
    }
}
