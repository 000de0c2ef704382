//! summon-core: monster summoning for a roguelike dungeon
//!
//! Given a summon type, either conjures a new monster near a grid or calls
//! an existing one there from elsewhere on the level. Candidates are drawn
//! through the race allocation table, restricted by the summon type's
//! eligibility rules.
//!
//! The dungeon level and the allocation table belong to the caller and are
//! reached through the [`SummonCave`] and [`RaceAllocator`] traits. This
//! crate performs no I/O.

pub mod config;
pub mod error;
pub mod monster;
pub mod summon;
pub mod world;

mod loc;
mod rng;

pub use config::SummonConfig;
pub use error::{ConfigError, SummonError};
pub use loc::Loc;
pub use rng::GameRng;
pub use world::{PlayerState, PreparedTable, RaceAllocator, RaceFilter, SummonCave};
