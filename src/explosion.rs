use crate::constants::{DEFAULT_EXPLOSION_RADIUS, EXPLOSIVENESS_THRESHOLD};
use crate::reaction::ReactionDescriptor;
use serde::Serialize;

/// Explosion and fire parameters with every field defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExplosionParams {
    pub can_explode: bool,
    pub intensity: f64,
    pub radius: f64,
    pub fire_intensity: f64,
    pub smoke_amount: f64,
}

/// Explicit flag, or explosiveness strictly above the threshold.
pub fn can_reaction_explode(reaction: &ReactionDescriptor) -> bool {
    reaction.can_explode.unwrap_or(false)
        || reaction.explosiveness.unwrap_or(0.0) > EXPLOSIVENESS_THRESHOLD
}

pub fn get_explosion_params(reaction: &ReactionDescriptor) -> ExplosionParams {
    ExplosionParams {
        can_explode: can_reaction_explode(reaction),
        intensity: reaction.explosion_intensity.unwrap_or(0.0),
        radius: reaction.explosion_radius.unwrap_or(DEFAULT_EXPLOSION_RADIUS),
        fire_intensity: reaction.fire_intensity.unwrap_or(0.0),
        smoke_amount: reaction.smoke_amount.unwrap_or(0.0),
    }
}
