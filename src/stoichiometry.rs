//! Mole scaling for a reaction, treating the first listed reactant as limiting.

use crate::reaction::ReactionDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactantUsage {
    pub compound_id: String,
    pub formula: String,
    pub moles: f64,
    pub moles_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductYield {
    pub compound_id: String,
    pub formula: String,
    pub moles: f64,
    pub moles_produced: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoichiometryResult {
    pub ratio: f64,
    pub reactants: Vec<ReactantUsage>,
    pub products: Vec<ProductYield>,
}

/// Scale every term of `reaction` so the first reactant uses `limiting_reactant_moles`.
///
/// The first reactant is the limiting reagent by convention; no minimum-ratio
/// search is done. Negative input is not rejected and scales algebraically.
pub fn calculate_stoichiometry(
    reaction: &ReactionDescriptor,
    limiting_reactant_moles: f64,
) -> StoichiometryResult {
    // reactants are never empty for a resolved descriptor
    let first_moles = reaction.reactants.first().map_or(1.0, |t| t.moles);
    let ratio = limiting_reactant_moles / first_moles;

    let reactants = reaction
        .reactants
        .iter()
        .map(|t| ReactantUsage {
            compound_id: t.compound.id.clone(),
            formula: t.compound.formula.clone(),
            moles: t.moles,
            moles_used: t.moles * ratio,
        })
        .collect();

    let products = reaction
        .products
        .iter()
        .map(|t| ProductYield {
            compound_id: t.compound.id.clone(),
            formula: t.compound.formula.clone(),
            moles: t.moles,
            moles_produced: t.moles * ratio,
        })
        .collect();

    StoichiometryResult { ratio, reactants, products }
}

impl StoichiometryResult {
    /// Total product mass in grams, using each product's molar mass from `reaction`.
    pub fn product_mass_g(&self, reaction: &ReactionDescriptor) -> f64 {
        self.products
            .iter()
            .zip(&reaction.products)
            .map(|(p, term)| term.compound.mass_for_moles(p.moles_produced))
            .sum()
    }
}
