//! Error types
//!
//! Summon failures are routine outcomes the caller handles (usually by
//! trying the fallback type or letting the effect fizzle); none of them
//! are fatal.

use thiserror::Error;

use crate::loc::Loc;

/// Why a summon produced no monster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummonError {
    #[error("no free grid near {grid} after {trials} trials")]
    NoLocation { grid: Loc, trials: u32 },

    #[error("no monster on the level can be called")]
    NoCallable,

    #[error("no eligible race at depth {depth}")]
    NoRace { depth: i32 },

    #[error("could not place {race} at {grid}")]
    PlacementFailed { race: String, grid: Loc },
}

/// Summon configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed summon config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
