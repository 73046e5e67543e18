pub mod constants;
pub mod math_utils;
pub mod error;
pub mod color;
pub mod compound;
pub mod reaction;
pub mod stoichiometry;
pub mod explosion;
pub mod profile;
pub mod simulation_config;
pub mod biology;
pub mod registry;
pub mod reaction_state;
pub mod session;

pub use biology::{simulate_process, BiologyProcess, ProcessState};
pub use color::Color;
pub use compound::{CompoundCategory, CompoundDescriptor, HazardTag, PhysicalState};
pub use error::{LabError, LabResult};
pub use explosion::{can_reaction_explode, get_explosion_params, ExplosionParams};
pub use profile::{ReactionProfile, ViabilityWindow};
pub use reaction::{ReactionCondition, ReactionDescriptor, ThermalClass, VisualEffect, VisualEffectKind};
pub use reaction_state::{
    compute_effect_magnitudes, compute_reaction_color, compute_reaction_state, compute_runtime_state,
    EffectMagnitudes, ReactionPhase, ReactionRuntimeState, ReactionStateSnapshot,
};
pub use registry::{registry, Registry};
pub use session::{LabConfig, LabSession, ProgressReportingOp, ReadingLoggerOp, SessionOp};
pub use simulation_config::{Apparatus, ParameterOverlay, ParameterRange, SimulationParameterSet};
pub use stoichiometry::{calculate_stoichiometry, StoichiometryResult};

/// Reactions from the global registry plausible for the selected compound ids or formulas.
pub fn suggest_reactions(selected: &[&str]) -> Vec<&'static ReactionDescriptor> {
    registry().suggest_reactions(selected)
}
