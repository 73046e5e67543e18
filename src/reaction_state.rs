// src/reaction_state.rs - Reaction state at a point in time
//
// Every value here is a pure projection of (profile or simulation type,
// temperature, pH, elapsed time). Nothing is stored between calls.

use crate::color::Color;
use crate::constants::{BOILING_EVAPORATION_MULTIPLIER, DEFAULT_REACTION_COLOR};
use crate::error::LabResult;
use crate::explosion::can_reaction_explode;
use crate::profile::ReactionProfile;
use crate::reaction::ReactionDescriptor;
use crate::registry::{Registry, registry};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionPhase {
    Idle,
    Reacting,
    Complete,
}

impl ReactionPhase {
    /// Idle at exactly 0, complete at exactly 1, reacting in between.
    pub fn from_progress(progress: f64) -> Self {
        if progress <= 0.0 {
            ReactionPhase::Idle
        } else if progress >= 1.0 {
            ReactionPhase::Complete
        } else {
            ReactionPhase::Reacting
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionPhase::Idle => "idle",
            ReactionPhase::Reacting => "reacting",
            ReactionPhase::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReactionStateSnapshot {
    pub progress: f64,
    pub boiling: bool,
    pub state: ReactionPhase,
}

impl ReactionStateSnapshot {
    pub const IDLE: ReactionStateSnapshot = ReactionStateSnapshot {
        progress: 0.0,
        boiling: false,
        state: ReactionPhase::Idle,
    };
}

/// Visual effect magnitudes, each in 0..1
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EffectMagnitudes {
    pub flame: f64,
    pub smoke: f64,
    pub evaporation: f64,
    pub explosion_likelihood: f64,
    pub heat_release: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionRuntimeState {
    pub simulation_type: String,
    pub progress: f64,
    pub state: ReactionPhase,
    pub boiling: bool,
    pub color: Color,
    pub effects: EffectMagnitudes,
}

/// Blend the profile's before/after colors.
///
/// Progress above 1 is capped; progress below 0 is passed through and
/// saturates at the channel limits.
pub fn profile_color(profile: &ReactionProfile, progress: f64) -> Color {
    profile.colors.at(progress.min(1.0))
}

/// State of a profile after `elapsed_ms`. Out-of-window conditions are always idle.
pub fn profile_state(
    profile: &ReactionProfile,
    temperature: f64,
    ph: f64,
    elapsed_ms: f64,
) -> ReactionStateSnapshot {
    if !profile.window.contains(temperature, ph) {
        return ReactionStateSnapshot::IDLE;
    }

    let progress = profile.progress_at(temperature, ph, elapsed_ms);
    ReactionStateSnapshot {
        progress,
        boiling: profile.is_boiling(temperature),
        state: ReactionPhase::from_progress(progress),
    }
}

/// Effect magnitudes for a reaction in the given state.
///
/// Descriptor values scale with progress. Evaporation is boosted while boiling,
/// explosions need [`can_reaction_explode`], and heat is only released by
/// exothermic reactions.
pub fn compute_effect_magnitudes(
    reaction: &ReactionDescriptor,
    snapshot: &ReactionStateSnapshot,
) -> EffectMagnitudes {
    if snapshot.state == ReactionPhase::Idle {
        return EffectMagnitudes::default();
    }

    let p = snapshot.progress;
    let scaled = |v: Option<f64>| (v.unwrap_or(0.0) * p).clamp(0.0, 1.0);

    let mut evaporation = scaled(reaction.evaporation_rate);
    if snapshot.boiling {
        evaporation = (evaporation * BOILING_EVAPORATION_MULTIPLIER).min(1.0);
    }

    let explosion_likelihood = if can_reaction_explode(reaction) {
        scaled(reaction.explosiveness)
    } else {
        0.0
    };

    EffectMagnitudes {
        flame: scaled(reaction.fire_intensity),
        smoke: scaled(reaction.smoke_amount),
        evaporation,
        explosion_likelihood,
        heat_release: if reaction.releases_heat() { p } else { 0.0 },
    }
}

impl Registry {
    pub fn try_reaction_color(
        &self,
        simulation_type: &str,
        _temperature: f64,
        _ph: f64,
        progress: f64,
    ) -> LabResult<Color> {
        // temperature and pH do not affect the blend
        let profile = self.try_profile(simulation_type)?;
        Ok(profile_color(profile, progress))
    }

    /// Color of the mixture at `progress`; the default color for unknown types.
    pub fn reaction_color(&self, simulation_type: &str, temperature: f64, ph: f64, progress: f64) -> Color {
        self.try_reaction_color(simulation_type, temperature, ph, progress)
            .unwrap_or_else(|err| {
                warn!(%err, "falling back to default reaction color");
                DEFAULT_REACTION_COLOR
            })
    }

    pub fn try_reaction_state(
        &self,
        simulation_type: &str,
        temperature: f64,
        ph: f64,
        elapsed_ms: f64,
    ) -> LabResult<ReactionStateSnapshot> {
        let profile = self.try_profile(simulation_type)?;
        Ok(profile_state(profile, temperature, ph, elapsed_ms))
    }

    /// Progress, boiling flag and phase; idle for unknown types.
    pub fn reaction_state(
        &self,
        simulation_type: &str,
        temperature: f64,
        ph: f64,
        elapsed_ms: f64,
    ) -> ReactionStateSnapshot {
        self.try_reaction_state(simulation_type, temperature, ph, elapsed_ms)
            .unwrap_or_else(|err| {
                warn!(%err, "reporting idle reaction state");
                ReactionStateSnapshot::IDLE
            })
    }

    pub fn try_runtime_state(
        &self,
        simulation_type: &str,
        temperature: f64,
        ph: f64,
        elapsed_ms: f64,
    ) -> LabResult<ReactionRuntimeState> {
        let profile = self.try_profile(simulation_type)?;
        let snapshot = profile_state(profile, temperature, ph, elapsed_ms);
        let effects = self
            .reaction_for_simulation(simulation_type)
            .map(|r| compute_effect_magnitudes(r, &snapshot))
            .unwrap_or_default();

        Ok(ReactionRuntimeState {
            simulation_type: simulation_type.to_string(),
            progress: snapshot.progress,
            state: snapshot.state,
            boiling: snapshot.boiling,
            color: profile_color(profile, snapshot.progress),
            effects,
        })
    }

    /// Full readout: state, color at that progress, and effect magnitudes.
    pub fn runtime_state(
        &self,
        simulation_type: &str,
        temperature: f64,
        ph: f64,
        elapsed_ms: f64,
    ) -> ReactionRuntimeState {
        self.try_runtime_state(simulation_type, temperature, ph, elapsed_ms)
            .unwrap_or_else(|err| {
                warn!(%err, "reporting idle runtime state");
                ReactionRuntimeState {
                    simulation_type: simulation_type.to_string(),
                    progress: 0.0,
                    state: ReactionPhase::Idle,
                    boiling: false,
                    color: DEFAULT_REACTION_COLOR,
                    effects: EffectMagnitudes::default(),
                }
            })
    }
}

/// Mixture color for `simulation_type` at `progress`, from the global registry.
///
/// Returns `#4287f5` when the simulation type is unknown.
pub fn compute_reaction_color(simulation_type: &str, temperature: f64, ph: f64, progress: f64) -> Color {
    registry().reaction_color(simulation_type, temperature, ph, progress)
}

/// Reaction state for `simulation_type` after `elapsed_ms`, from the global registry.
///
/// Leaving the temperature/pH window resets progress to 0 rather than pausing it.
pub fn compute_reaction_state(
    simulation_type: &str,
    temperature: f64,
    ph: f64,
    elapsed_ms: f64,
) -> ReactionStateSnapshot {
    registry().reaction_state(simulation_type, temperature, ph, elapsed_ms)
}

pub fn compute_runtime_state(
    simulation_type: &str,
    temperature: f64,
    ph: f64,
    elapsed_ms: f64,
) -> ReactionRuntimeState {
    registry().runtime_state(simulation_type, temperature, ph, elapsed_ms)
}
