// src/reaction.rs - Reaction reference data and matching

use crate::color::Color;
use crate::compound::CompoundDescriptor;
use crate::constants::TO_KELVIN;
use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

/// What a reaction needs in order to proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReactionCondition {
    Heat,
    Light,
    Catalyst,
    RoomTemperature,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualEffectKind {
    Bubbles,
    ColorChange,
    Precipitate,
    Flame,
    Smoke,
    Heat,
    Light,
    Spark,
    Evaporation,
    Explosion,
}

/// UI rendering hint attached to a reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    pub kind: VisualEffectKind,
    /// 0..1
    pub intensity: f64,
    pub duration_ms: f64,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub particle_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermalClass {
    Exothermic,
    Endothermic,
    Thermoneutral,
}

/// One side of a reaction equation: a compound and its stoichiometric moles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionTerm {
    pub compound: CompoundDescriptor,
    pub moles: f64,
}

/// Reaction term as written in the data tables, referencing a compound id.
#[derive(Debug, Clone, Deserialize)]
pub struct TermRecord {
    pub compound: String,
    pub moles: f64,
}

/// Reaction as written in the data tables.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRecord {
    pub id: String,
    pub name: String,
    pub reactants: Vec<TermRecord>,
    pub products: Vec<TermRecord>,
    pub equation: String,
    pub delta_h: f64,
    #[serde(default)]
    pub delta_s: f64,
    pub condition: ReactionCondition,
    #[serde(default)]
    pub effects: Vec<VisualEffect>,
    #[serde(default)]
    pub observations: Vec<String>,
    #[serde(default)]
    pub product_color: Option<Color>,
    #[serde(default)]
    pub fire_intensity: Option<f64>,
    #[serde(default)]
    pub smoke_amount: Option<f64>,
    #[serde(default)]
    pub evaporation_rate: Option<f64>,
    #[serde(default)]
    pub explosiveness: Option<f64>,
    #[serde(default)]
    pub can_explode: Option<bool>,
    #[serde(default)]
    pub explosion_intensity: Option<f64>,
    #[serde(default)]
    pub explosion_radius: Option<f64>,
}

/// Immutable reaction record with its compounds resolved.
///
/// `delta_h` is in kJ/mol (negative releases heat), `delta_s` in J/(mol·K).
/// The optional effect scalars are on a 0..1 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionDescriptor {
    pub id: String,
    pub name: String,
    pub reactants: Vec<ReactionTerm>,
    pub products: Vec<ReactionTerm>,
    pub equation: String,
    pub delta_h: f64,
    pub delta_s: f64,
    pub condition: ReactionCondition,
    pub effects: Vec<VisualEffect>,
    pub observations: Vec<String>,
    pub product_color: Option<Color>,
    pub fire_intensity: Option<f64>,
    pub smoke_amount: Option<f64>,
    pub evaporation_rate: Option<f64>,
    pub explosiveness: Option<f64>,
    pub can_explode: Option<bool>,
    pub explosion_intensity: Option<f64>,
    pub explosion_radius: Option<f64>,
}

impl ReactionDescriptor {
    /// Resolve a data-table record, looking compounds up by id.
    pub fn resolve<F>(record: ReactionRecord, lookup: F) -> LabResult<Self>
    where
        F: Fn(&str) -> Option<CompoundDescriptor>,
    {
        if record.reactants.is_empty() || record.products.is_empty() {
            return Err(LabError::EmptyReaction(record.id));
        }

        let resolve_terms = |terms: Vec<TermRecord>| -> LabResult<Vec<ReactionTerm>> {
            terms
                .into_iter()
                .map(|t| {
                    let compound = lookup(&t.compound).ok_or(LabError::UnknownCompound(t.compound))?;
                    Ok(ReactionTerm { compound, moles: t.moles })
                })
                .collect()
        };

        let reactants = resolve_terms(record.reactants)?;
        let products = resolve_terms(record.products)?;

        Ok(ReactionDescriptor {
            id: record.id,
            name: record.name,
            reactants,
            products,
            equation: record.equation,
            delta_h: record.delta_h,
            delta_s: record.delta_s,
            condition: record.condition,
            effects: record.effects,
            observations: record.observations,
            product_color: record.product_color,
            fire_intensity: record.fire_intensity,
            smoke_amount: record.smoke_amount,
            evaporation_rate: record.evaporation_rate,
            explosiveness: record.explosiveness,
            can_explode: record.can_explode,
            explosion_intensity: record.explosion_intensity,
            explosion_radius: record.explosion_radius,
        })
    }

    pub fn thermal_class(&self) -> ThermalClass {
        if self.delta_h < 0.0 {
            ThermalClass::Exothermic
        } else if self.delta_h > 0.0 {
            ThermalClass::Endothermic
        } else {
            ThermalClass::Thermoneutral
        }
    }

    pub fn releases_heat(&self) -> bool {
        self.thermal_class() == ThermalClass::Exothermic
    }

    /// Gibbs free energy change in kJ/mol at `temp_c`.
    pub fn delta_g(&self, temp_c: f64) -> f64 {
        let temp_k = temp_c + TO_KELVIN;
        self.delta_h - temp_k * self.delta_s / 1000.0
    }

    pub fn is_spontaneous(&self, temp_c: f64) -> bool {
        self.delta_g(temp_c) < 0.0
    }

    /// True if `selected` names this compound by id or formula.
    fn term_selected(term: &ReactionTerm, selected: &[&str]) -> bool {
        selected
            .iter()
            .any(|s| *s == term.compound.id || *s == term.compound.formula)
    }

    /// Loose match used for suggestions: at least one reactant is selected and
    /// the reaction does not need more reactants than were selected.
    pub fn matches_selection(&self, selected: &[&str]) -> bool {
        self.reactants.len() <= selected.len()
            && self.reactants.iter().any(|t| Self::term_selected(t, selected))
    }
}

/// Filter `reactions` down to the ones plausible for the selected compounds.
pub fn suggest_reactions<'a, I>(reactions: I, selected: &[&str]) -> Vec<&'a ReactionDescriptor>
where
    I: IntoIterator<Item = &'a ReactionDescriptor>,
{
    reactions
        .into_iter()
        .filter(|r| r.matches_selection(selected))
        .collect()
}
