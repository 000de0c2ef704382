//! Monster races and bases (monster.txt / monster_base.txt records)

use std::sync::Arc;

use bitflags::bitflags;

/// A broad monster category ("orc", "zephyr hound", ...).
///
/// Bases are shared between races by `Arc`; two bases are the same
/// category only if they are the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterBase {
    pub name: String,
    pub glyph: char,
}

impl MonsterBase {
    pub fn new(name: &str, glyph: char) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            glyph,
        })
    }
}

bitflags! {
    /// Race capability flags (RF_* in monster.txt)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RaceFlags: u32 {
        const UNIQUE = 0x0000_0001;
        const QUESTOR = 0x0000_0002;
        const MALE = 0x0000_0004;
        const FEMALE = 0x0000_0008;
        const GROUP_AI = 0x0000_0010;
        const NEVER_MOVE = 0x0000_0020;
        const INVISIBLE = 0x0000_0040;
        const SMART = 0x0000_0080;
        const ANIMAL = 0x0000_0100;
        const EVIL = 0x0000_0200;
        const ORC = 0x0000_0400;
        const TROLL = 0x0000_0800;
        const GIANT = 0x0000_1000;
        const DRAGON = 0x0000_2000;
        const DEMON = 0x0000_4000;
        const UNDEAD = 0x0000_8000;
        const SPIRIT = 0x0001_0000;
        const NONLIVING = 0x0002_0000;
        const METAL = 0x0004_0000;
    }
}

/// A monster race: the template every instance of that monster shares.
#[derive(Debug, Clone)]
pub struct MonsterRace {
    /// Index into the race table
    pub ridx: u16,
    pub name: String,
    pub base: Arc<MonsterBase>,
    /// Native depth
    pub level: i32,
    /// Speed, 110 is normal
    pub speed: i32,
    /// Allocation rarity (1 = common)
    pub rarity: u8,
    pub flags: RaceFlags,
}

impl MonsterRace {
    pub fn is_unique(&self) -> bool {
        self.flags.contains(RaceFlags::UNIQUE)
    }

    pub fn has_flag(&self, flag: RaceFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Whether this race belongs to exactly the given base
    pub fn has_base(&self, base: &Arc<MonsterBase>) -> bool {
        Arc::ptr_eq(&self.base, base)
    }
}
