//! Monster instances (mon-util / monster.h)

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use super::MonsterRace;
use crate::loc::Loc;

/// Index of a monster in the level's monster list. Slot 0 is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterIdx(pub usize);

impl MonsterIdx {
    pub const NONE: MonsterIdx = MonsterIdx(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Identifier of a monster group on the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

/// Role a monster plays inside its group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum GroupRole {
    Leader,
    Servant,
    Bodyguard,
    #[default]
    Member,
    /// Brought in by a summoner
    Summon,
}

/// Group membership requested when placing a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupInfo {
    /// None places the monster in a fresh group of its own
    pub index: Option<GroupId>,
    pub role: GroupRole,
}

impl GroupInfo {
    pub fn summoned_into(group: GroupId) -> Self {
        Self {
            index: Some(group),
            role: GroupRole::Summon,
        }
    }
}

/// How a monster came to be on the level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Origin {
    #[default]
    Floor,
    Drop,
    DropSpecial,
    DropPit,
    DropSummon,
}

/// Timed monster effects
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum MonTimed {
    Sleep = 0,
    Stun = 1,
    Conf = 2,
    Fear = 3,
    Slow = 4,
    Fast = 5,
    /// Held in place; the monster takes no turns while this runs
    Hold = 6,
    Disen = 7,
    Command = 8,
    Change = 9,
}

/// Per-monster timed effect counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonsterTimed {
    counters: [i16; MonTimed::COUNT],
}

impl MonsterTimed {
    pub fn get(&self, effect: MonTimed) -> i16 {
        self.counters[effect as usize]
    }

    /// Set a counter directly, bypassing any resistance check.
    pub fn set(&mut self, effect: MonTimed, value: i16) {
        self.counters[effect as usize] = value;
    }

    pub fn is_active(&self, effect: MonTimed) -> bool {
        self.get(effect) > 0
    }
}

/// A monster on the current level
#[derive(Debug, Clone, Default)]
pub struct Monster {
    /// None for a dead or cleared slot
    pub race: Option<Arc<MonsterRace>>,
    pub grid: Loc,
    /// Accumulated action energy
    pub energy: u8,
    pub timed: MonsterTimed,
    pub group: GroupInfo,
    pub origin: Origin,
    /// Knows where the player is
    pub aware: bool,
}

impl Monster {
    pub fn new(race: Arc<MonsterRace>, grid: Loc) -> Self {
        Self {
            race: Some(race),
            grid,
            ..Default::default()
        }
    }

    pub fn is_alive(&self) -> bool {
        self.race.is_some()
    }

    pub fn is_asleep(&self) -> bool {
        self.timed.is_active(MonTimed::Sleep)
    }

    pub fn is_held(&self) -> bool {
        self.timed.is_active(MonTimed::Hold)
    }

    /// Level of this monster's race, 0 for a dead slot
    pub fn level(&self) -> i32 {
        self.race.as_ref().map_or(0, |r| r.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::{MonsterBase, RaceFlags};

    fn snaga() -> Arc<MonsterRace> {
        Arc::new(MonsterRace {
            ridx: 3,
            name: "snaga".to_string(),
            base: MonsterBase::new("orc", 'o'),
            level: 6,
            speed: 110,
            rarity: 1,
            flags: RaceFlags::ORC | RaceFlags::EVIL,
        })
    }

    #[test]
    fn test_timed_counters() {
        let mut t = MonsterTimed::default();
        assert!(!t.is_active(MonTimed::Hold));
        t.set(MonTimed::Hold, 3);
        assert_eq!(t.get(MonTimed::Hold), 3);
        assert!(t.is_active(MonTimed::Hold));
        assert_eq!(t.get(MonTimed::Sleep), 0);
    }

    #[test]
    fn test_dead_slot() {
        let m = Monster::default();
        assert!(!m.is_alive());
        assert_eq!(m.level(), 0);
    }

    #[test]
    fn test_new_monster() {
        let m = Monster::new(snaga(), Loc::new(4, 2));
        assert!(m.is_alive());
        assert_eq!(m.level(), 6);
        assert_eq!(m.grid, Loc::new(4, 2));
        assert!(!m.is_held());
        assert!(!m.is_asleep());
    }

    #[test]
    fn test_group_info() {
        let info = GroupInfo::summoned_into(GroupId(7));
        assert_eq!(info.index, Some(GroupId(7)));
        assert_eq!(info.role, GroupRole::Summon);
        assert_eq!(GroupInfo::default().index, None);
        assert!(MonsterIdx::NONE.is_none());
    }
}
