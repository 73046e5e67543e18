//! Reference data registry.
//!
//! Compounds, reactions, simulation configurations and biology processes are
//! compiled into the crate as JSON tables and parsed once, on first use, into
//! the global [`REGISTRY`]. [`Registry::from_json`] builds the same structure
//! from caller-supplied tables and validates every cross reference.

use crate::biology::BiologyProcess;
use crate::compound::{CompoundCategory, CompoundDescriptor};
use crate::error::{LabError, LabResult};
use crate::profile::ReactionProfile;
use crate::reaction::{self, ReactionDescriptor, ReactionRecord};
use crate::simulation_config::SimulationParameterSet;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

const COMPOUNDS_JSON: &str = include_str!("data/compounds.json");
const REACTIONS_JSON: &str = include_str!("data/reactions.json");
const SIMULATIONS_JSON: &str = include_str!("data/simulations.json");
const BIOLOGY_JSON: &str = include_str!("data/biology.json");

/// Process-wide registry built from the embedded tables
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    Registry::embedded().expect("Failed to build registry from embedded lab data")
});

pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[derive(Debug, Clone)]
pub struct Registry {
    compounds: Vec<CompoundDescriptor>,
    compound_index: HashMap<String, usize>,
    reactions: Vec<ReactionDescriptor>,
    reaction_index: HashMap<String, usize>,
    simulations: BTreeMap<String, SimulationParameterSet>,
    processes: BTreeMap<String, BiologyProcess>,
}

impl Registry {
    pub fn embedded() -> LabResult<Self> {
        Self::from_json(COMPOUNDS_JSON, REACTIONS_JSON, SIMULATIONS_JSON, BIOLOGY_JSON)
    }

    pub fn from_json(
        compounds_json: &str,
        reactions_json: &str,
        simulations_json: &str,
        biology_json: &str,
    ) -> LabResult<Self> {
        let compounds: Vec<CompoundDescriptor> = serde_json::from_str(compounds_json)?;
        let reaction_records: Vec<ReactionRecord> = serde_json::from_str(reactions_json)?;
        let simulation_list: Vec<SimulationParameterSet> = serde_json::from_str(simulations_json)?;
        let process_list: Vec<BiologyProcess> = serde_json::from_str(biology_json)?;

        let mut compound_index = HashMap::new();
        for (i, compound) in compounds.iter().enumerate() {
            if compound_index.insert(compound.id.clone(), i).is_some() {
                return Err(LabError::DuplicateKey(compound.id.clone()));
            }
        }

        let lookup = |id: &str| compound_index.get(id).map(|&i| compounds[i].clone());
        let mut reactions = Vec::with_capacity(reaction_records.len());
        let mut reaction_index = HashMap::new();
        for record in reaction_records {
            let reaction = ReactionDescriptor::resolve(record, lookup)?;
            if reaction_index.insert(reaction.id.clone(), reactions.len()).is_some() {
                return Err(LabError::DuplicateKey(reaction.id));
            }
            reactions.push(reaction);
        }

        // simulation types and biology processes share one key space
        let mut keys = HashSet::new();

        let mut simulations = BTreeMap::new();
        for sim in simulation_list {
            if !reaction_index.contains_key(&sim.reaction_id) {
                return Err(LabError::UnknownReaction(sim.reaction_id));
            }
            if !keys.insert(sim.id.clone()) {
                return Err(LabError::DuplicateKey(sim.id));
            }
            simulations.insert(sim.id.clone(), sim);
        }

        let mut processes = BTreeMap::new();
        for process in process_list {
            if !keys.insert(process.id.clone()) {
                return Err(LabError::DuplicateKey(process.id));
            }
            processes.insert(process.id.clone(), process);
        }

        debug!(
            compounds = compounds.len(),
            reactions = reactions.len(),
            simulations = simulations.len(),
            processes = processes.len(),
            "lab registry built"
        );

        Ok(Registry {
            compounds,
            compound_index,
            reactions,
            reaction_index,
            simulations,
            processes,
        })
    }

    // --- compounds ---

    pub fn compounds(&self) -> &[CompoundDescriptor] {
        &self.compounds
    }

    pub fn compound(&self, id: &str) -> Option<&CompoundDescriptor> {
        self.compound_index.get(id).map(|&i| &self.compounds[i])
    }

    pub fn compound_by_formula(&self, formula: &str) -> Option<&CompoundDescriptor> {
        self.compounds.iter().find(|c| c.formula == formula)
    }

    pub fn compounds_by_category(&self, category: CompoundCategory) -> Vec<&CompoundDescriptor> {
        self.compounds.iter().filter(|c| c.category == category).collect()
    }

    // --- reactions ---

    pub fn reactions(&self) -> &[ReactionDescriptor] {
        &self.reactions
    }

    pub fn reaction(&self, id: &str) -> Option<&ReactionDescriptor> {
        self.reaction_index.get(id).map(|&i| &self.reactions[i])
    }

    /// Reactions plausible for the selected compound ids or formulas, in table order.
    pub fn suggest_reactions(&self, selected: &[&str]) -> Vec<&ReactionDescriptor> {
        reaction::suggest_reactions(&self.reactions, selected)
    }

    // --- simulation types ---

    pub fn simulation(&self, simulation_type: &str) -> Option<&SimulationParameterSet> {
        self.simulations.get(simulation_type)
    }

    pub fn try_simulation(&self, simulation_type: &str) -> LabResult<&SimulationParameterSet> {
        self.simulation(simulation_type)
            .ok_or_else(|| LabError::UnknownSimulationType(simulation_type.to_string()))
    }

    pub fn simulation_types(&self) -> impl Iterator<Item = &str> {
        self.simulations.keys().map(String::as_str)
    }

    /// The reaction a chemistry simulation type runs. Biology processes have none.
    pub fn reaction_for_simulation(&self, simulation_type: &str) -> Option<&ReactionDescriptor> {
        self.simulation(simulation_type)
            .and_then(|sim| self.reaction(&sim.reaction_id))
    }

    // --- biology ---

    pub fn process(&self, id: &str) -> Option<&BiologyProcess> {
        self.processes.get(id)
    }

    pub fn processes(&self) -> impl Iterator<Item = &BiologyProcess> {
        self.processes.values()
    }

    /// Profile for a chemistry simulation type or a biology process id.
    pub fn profile(&self, key: &str) -> Option<&ReactionProfile> {
        self.simulation(key)
            .map(|s| &s.profile)
            .or_else(|| self.process(key).map(|p| &p.profile))
    }

    pub fn try_profile(&self, key: &str) -> LabResult<&ReactionProfile> {
        self.profile(key)
            .ok_or_else(|| LabError::UnknownSimulationType(key.to_string()))
    }
}
