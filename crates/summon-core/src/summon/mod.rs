//! Monster summoning
//!
//! Summoning either creates a new monster near a grid or, when calling is
//! requested, fetches an existing monster from elsewhere on the level.
//! Which races qualify is decided by the summon type's rules in the
//! [`SummonRegistry`].

mod call;
mod filter;
mod place;
mod registry;

pub use call::{call_monster, callable_monsters, can_call_monster};
pub use filter::{summon_okay, SelectionContext};
pub use place::{find_location, scatter, SummonEnv};
pub use registry::{
    MessageKind, RawSummon, SummonId, SummonRegistry, SummonType, KIN, UNIQUE, WRAITH,
};

use crate::monster::MonsterIdx;

/// A successful summon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summoned {
    /// Level of the summoned monster's race
    pub level: i32,
    pub midx: MonsterIdx,
    /// An existing monster was moved rather than a new one made
    pub called: bool,
}

/// Running totals for a multi-monster summon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummonTally {
    pub count: u32,
    /// Sum of the summoned monsters' levels
    pub total_level: i32,
}

impl SummonTally {
    pub fn add(&mut self, summoned: &Summoned) {
        self.count += 1;
        self.total_level += summoned.level;
    }
}
