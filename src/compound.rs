// src/compound.rs - Compound reference data

use crate::color::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundCategory {
    Acid,
    Base,
    Salt,
    Oxide,
    Element,
    Compound,
}

/// Phase of matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalState {
    Solid,
    Liquid,
    Gas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardTag {
    Corrosive,
    Flammable,
    Toxic,
    Oxidizer,
    Explosive,
    Irritant,
}

/// Immutable compound record loaded from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundDescriptor {
    pub id: String,
    pub name: String,
    pub formula: String,
    pub category: CompoundCategory,
    pub molar_mass_g_mol: f64,
    pub color: Color,
    pub state: PhysicalState,
    #[serde(default)]
    pub melting_point_c: Option<f64>,
    #[serde(default)]
    pub boiling_point_c: Option<f64>,
    #[serde(default)]
    pub hazards: Vec<HazardTag>,
}

impl CompoundDescriptor {
    /// Phase at `temp_c`, from the melting and boiling points.
    ///
    /// Boundaries are inclusive on the hotter side: a compound exactly at its
    /// boiling point is a gas. Without the relevant point the nominal state is kept.
    pub fn state_at(&self, temp_c: f64) -> PhysicalState {
        if let Some(boil) = self.boiling_point_c {
            if temp_c >= boil {
                return PhysicalState::Gas;
            }
        }

        match self.melting_point_c {
            Some(melt) if temp_c >= melt => PhysicalState::Liquid,
            Some(_) => PhysicalState::Solid,
            None => self.state,
        }
    }

    pub fn is_hazardous(&self) -> bool {
        !self.hazards.is_empty()
    }

    pub fn has_hazard(&self, hazard: HazardTag) -> bool {
        self.hazards.contains(&hazard)
    }

    /// Grams needed for `moles` of this compound.
    pub fn mass_for_moles(&self, moles: f64) -> f64 {
        moles * self.molar_mass_g_mol
    }
}
