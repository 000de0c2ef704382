//! Monster system
//!
//! Contains monster races (templates) and the on-level instances that
//! summoning reads and relocates.

mod monst;
mod race;

pub use monst::{GroupId, GroupInfo, GroupRole, MonTimed, Monster, MonsterIdx, MonsterTimed, Origin};
pub use race::{MonsterBase, MonsterRace, RaceFlags};
