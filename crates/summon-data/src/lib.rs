//! summon-data: Static data for summoning
//!
//! Contains the standard monster bases and summon type definitions, in the
//! already-parsed form the summon registry is built from.

pub mod bases;
pub mod summons;

pub use bases::{BaseDef, BaseList, BASES};
pub use summons::{standard_registry, standard_summons, DataError, SummonDef, SUMMONS};
