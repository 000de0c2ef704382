//! Fixture races built on the standard monster bases

use std::sync::Arc;

use summon_core::monster::{MonsterBase, MonsterRace, RaceFlags};
use summon_core::summon::{RawSummon, SummonRegistry};
use summon_data::{standard_registry, BaseList};

/// (name, base, level, speed, rarity, flags)
type RaceDef = (&'static str, &'static str, i32, i32, u8, RaceFlags);

const RACES: &[RaceDef] = &[
    ("jackal", "canine", 1, 110, 1, RaceFlags::ANIMAL),
    ("wild dog", "canine", 1, 110, 1, RaceFlags::ANIMAL),
    ("Grip, Farmer Maggot's Dog", "canine", 2, 120, 1, RaceFlags::ANIMAL.union(RaceFlags::UNIQUE)),
    ("cave spider", "spider", 2, 120, 1, RaceFlags::ANIMAL),
    ("poltergeist", "ghost", 3, 140, 1, RaceFlags::UNDEAD.union(RaceFlags::INVISIBLE)),
    ("snaga", "orc", 6, 110, 1, RaceFlags::ORC.union(RaceFlags::EVIL)),
    ("cave orc", "orc", 7, 110, 1, RaceFlags::ORC.union(RaceFlags::EVIL)),
    ("crow of Durthang", "bird", 9, 120, 2, RaceFlags::ANIMAL.union(RaceFlags::EVIL)),
    (
        "Grishnakh, the Hill Orc",
        "orc",
        10,
        120,
        3,
        RaceFlags::UNIQUE.union(RaceFlags::ORC).union(RaceFlags::EVIL),
    ),
    ("stone troll", "troll", 25, 110, 1, RaceFlags::TROLL.union(RaceFlags::EVIL)),
    ("vampire", "vampire", 27, 110, 1, RaceFlags::UNDEAD.union(RaceFlags::EVIL)),
    ("young blue dragon", "dragon", 29, 110, 1, RaceFlags::DRAGON.union(RaceFlags::EVIL)),
    (
        "Uvatha the Horseman",
        "wraith",
        50,
        120,
        3,
        RaceFlags::UNIQUE.union(RaceFlags::UNDEAD).union(RaceFlags::EVIL),
    ),
];

/// Standard bases plus a spread of races across them
pub struct Bestiary {
    pub bases: BaseList,
    races: Vec<Arc<MonsterRace>>,
}

impl Bestiary {
    pub fn new() -> Self {
        let bases = BaseList::standard();
        let races = RACES
            .iter()
            .enumerate()
            .map(|(i, &(name, base, level, speed, rarity, flags))| {
                Arc::new(MonsterRace {
                    ridx: i as u16 + 1,
                    name: name.to_string(),
                    base: Arc::clone(bases.find(base).expect("fixture base exists")),
                    level,
                    speed,
                    rarity,
                    flags,
                })
            })
            .collect();
        Self { bases, races }
    }

    pub fn base(&self, name: &str) -> Arc<MonsterBase> {
        Arc::clone(self.bases.find(name).expect("unknown fixture base"))
    }

    pub fn race(&self, name: &str) -> Arc<MonsterRace> {
        self.races
            .iter()
            .find(|r| r.name == name)
            .map(Arc::clone)
            .expect("unknown fixture race")
    }

    pub fn races(&self) -> Vec<Arc<MonsterRace>> {
        self.races.clone()
    }

    /// Only the named races
    pub fn only(&self, names: &[&str]) -> Vec<Arc<MonsterRace>> {
        names.iter().map(|n| self.race(n)).collect()
    }

    /// The standard summon registry over these bases
    pub fn registry(&self) -> SummonRegistry {
        standard_registry(&self.bases).expect("standard summons resolve")
    }

    /// The standard registry plus an ORC type requiring the orc base
    pub fn registry_with_orcs(&self) -> SummonRegistry {
        let mut raws = summon_data::standard_summons(&self.bases).expect("standard summons resolve");
        raws.push(RawSummon {
            name: "ORC".to_string(),
            bases: vec![self.base("orc")],
            desc: "orcs".to_string(),
            fallback_name: Some("MONSTER".to_string()),
            ..Default::default()
        });
        SummonRegistry::build(raws)
    }
}

impl Default for Bestiary {
    fn default() -> Self {
        Self::new()
    }
}
