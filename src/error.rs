use thiserror::Error;

/// Errors raised by registry construction and the fallible lookup variants.
///
/// The live-readout operations never return these; they fall back to defaults.
#[derive(Error, Debug)]
pub enum LabError {
    #[error("unknown simulation type: {0}")]
    UnknownSimulationType(String),

    #[error("unknown reaction: {0}")]
    UnknownReaction(String),

    #[error("unknown compound: {0}")]
    UnknownCompound(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("unknown apparatus: {0}")]
    UnknownApparatus(String),

    #[error("duplicate registry key: {0}")]
    DuplicateKey(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("reaction {0} must list at least one reactant and one product")]
    EmptyReaction(String),

    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type LabResult<T> = Result<T, LabError>;
