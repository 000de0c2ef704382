//! Standard summon types (summon.txt)

use std::sync::Arc;

use summon_core::monster::RaceFlags;
use summon_core::summon::{MessageKind, RawSummon, SummonRegistry};
use thiserror::Error;

use crate::bases::BaseList;

/// Static summon type definition
#[derive(Debug, Clone, Copy)]
pub struct SummonDef {
    pub name: &'static str,
    pub message_kind: MessageKind,
    pub unique_allowed: bool,
    pub bases: &'static [&'static str],
    pub race_flag: Option<RaceFlags>,
    pub fallback: Option<&'static str>,
    pub desc: &'static str,
}

/// Static data that does not fit together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("summon type {summon} names unknown monster base '{base}'")]
    UnknownBase { summon: String, base: String },
}

pub static SUMMONS: &[SummonDef] = &[
    SummonDef {
        name: "KIN",
        message_kind: MessageKind::SumKin,
        unique_allowed: false,
        bases: &[],
        race_flag: None,
        fallback: None,
        desc: "similar monsters",
    },
    SummonDef {
        name: "MONSTER",
        message_kind: MessageKind::SumMonster,
        unique_allowed: false,
        bases: &[],
        race_flag: None,
        fallback: None,
        desc: "a monster",
    },
    SummonDef {
        name: "MONSTERS",
        message_kind: MessageKind::SumMonster,
        unique_allowed: false,
        bases: &[],
        race_flag: None,
        fallback: None,
        desc: "monsters",
    },
    SummonDef {
        name: "ANIMAL",
        message_kind: MessageKind::SumAnimal,
        unique_allowed: false,
        bases: &[],
        race_flag: Some(RaceFlags::ANIMAL),
        fallback: None,
        desc: "animals",
    },
    SummonDef {
        name: "SPIDER",
        message_kind: MessageKind::SumSpider,
        unique_allowed: false,
        bases: &["spider"],
        race_flag: None,
        fallback: None,
        desc: "spiders",
    },
    SummonDef {
        name: "HOUND",
        message_kind: MessageKind::SumHound,
        unique_allowed: false,
        bases: &["canine", "zephyr hound"],
        race_flag: None,
        fallback: None,
        desc: "hounds",
    },
    SummonDef {
        name: "HYDRA",
        message_kind: MessageKind::SumHydra,
        unique_allowed: false,
        bases: &["hydra"],
        race_flag: None,
        fallback: None,
        desc: "hydras",
    },
    SummonDef {
        name: "AINU",
        message_kind: MessageKind::SumAinu,
        unique_allowed: false,
        bases: &["ainu"],
        race_flag: None,
        fallback: None,
        desc: "an ainu",
    },
    SummonDef {
        name: "DEMON",
        message_kind: MessageKind::SumDemon,
        unique_allowed: false,
        bases: &[],
        race_flag: Some(RaceFlags::DEMON),
        fallback: None,
        desc: "a demon",
    },
    SummonDef {
        name: "UNDEAD",
        message_kind: MessageKind::SumUndead,
        unique_allowed: false,
        bases: &[],
        race_flag: Some(RaceFlags::UNDEAD),
        fallback: None,
        desc: "an undead",
    },
    SummonDef {
        name: "DRAGON",
        message_kind: MessageKind::SumDragon,
        unique_allowed: false,
        bases: &["dragon", "ancient dragon"],
        race_flag: None,
        fallback: None,
        desc: "a dragon",
    },
    SummonDef {
        name: "HI_DEMON",
        message_kind: MessageKind::SumHiDemon,
        unique_allowed: false,
        bases: &["major demon"],
        race_flag: None,
        fallback: Some("DEMON"),
        desc: "greater demons",
    },
    SummonDef {
        name: "HI_UNDEAD",
        message_kind: MessageKind::SumHiUndead,
        unique_allowed: false,
        bases: &["vampire", "wraith", "lich"],
        race_flag: None,
        fallback: Some("UNDEAD"),
        desc: "greater undead",
    },
    SummonDef {
        name: "HI_DRAGON",
        message_kind: MessageKind::SumHiDragon,
        unique_allowed: false,
        bases: &["ancient dragon"],
        race_flag: None,
        fallback: Some("DRAGON"),
        desc: "ancient dragons",
    },
    SummonDef {
        name: "WRAITH",
        message_kind: MessageKind::SumWraith,
        unique_allowed: true,
        bases: &["wraith"],
        race_flag: Some(RaceFlags::UNIQUE),
        fallback: Some("HI_UNDEAD"),
        desc: "the Ringwraiths",
    },
    SummonDef {
        name: "UNIQUE",
        message_kind: MessageKind::SumUnique,
        unique_allowed: true,
        bases: &[],
        race_flag: Some(RaceFlags::UNIQUE),
        fallback: Some("MONSTER"),
        desc: "uniques",
    },
];

impl SummonDef {
    /// Resolve base names against `bases` into a raw summon record
    pub fn to_raw(&self, bases: &BaseList) -> Result<RawSummon, DataError> {
        let resolved = self
            .bases
            .iter()
            .map(|name| {
                bases.find(name).map(Arc::clone).ok_or_else(|| DataError::UnknownBase {
                    summon: self.name.to_string(),
                    base: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawSummon {
            name: self.name.to_string(),
            message_kind: self.message_kind,
            unique_allowed: self.unique_allowed,
            bases: resolved,
            race_flag: self.race_flag,
            fallback_name: self.fallback.map(str::to_string),
            desc: self.desc.to_string(),
        })
    }
}

/// Raw records for every standard summon type
pub fn standard_summons(bases: &BaseList) -> Result<Vec<RawSummon>, DataError> {
    SUMMONS.iter().map(|def| def.to_raw(bases)).collect()
}

/// Registry of every standard summon type
pub fn standard_registry(bases: &BaseList) -> Result<SummonRegistry, DataError> {
    Ok(SummonRegistry::build(standard_summons(bases)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bases::{BaseDef, BaseList};
    use summon_core::summon::{SummonId, KIN, UNIQUE, WRAITH};

    #[test]
    fn test_standard_registry() {
        let bases = BaseList::standard();
        let reg = standard_registry(&bases).unwrap();
        assert_eq!(reg.len(), SUMMONS.len());
        assert!(reg.kin().is_some());
        assert!(reg.never_calls(reg.lookup(UNIQUE).unwrap()));
        assert!(reg.never_calls(reg.lookup(WRAITH).unwrap()));
        assert!(!reg.never_calls(reg.lookup(KIN).unwrap()));
    }

    #[test]
    fn test_every_fallback_resolves() {
        let bases = BaseList::standard();
        let reg = standard_registry(&bases).unwrap();
        for (id, summon) in reg.iter() {
            assert_eq!(
                reg.fallback(id),
                summon.fallback_name.as_deref().and_then(|n| reg.lookup(n)),
                "fallback of {}",
                summon.name
            );
            if summon.fallback_name.is_some() {
                assert!(reg.fallback(id).is_some(), "{} fallback unresolved", summon.name);
            }
        }
    }

    #[test]
    fn test_fallback_chain_terminates() {
        let bases = BaseList::standard();
        let reg = standard_registry(&bases).unwrap();
        for (start, _) in reg.iter() {
            let mut id: SummonId = start;
            let mut steps = 0;
            while let Some(next) = reg.fallback(id) {
                id = next;
                steps += 1;
                assert!(steps <= reg.len(), "fallback cycle from {}", start.0);
            }
        }
    }

    #[test]
    fn test_bases_shared_with_list() {
        let bases = BaseList::standard();
        let reg = standard_registry(&bases).unwrap();
        let hounds = reg.summon(reg.lookup("HOUND").unwrap());
        assert_eq!(hounds.bases.len(), 2);
        assert!(Arc::ptr_eq(&hounds.bases[1], bases.find("zephyr hound").unwrap()));
    }

    #[test]
    fn test_unknown_base() {
        let bases = BaseList::from_defs(&[BaseDef { name: "orc", glyph: 'o' }]);
        let err = standard_summons(&bases).unwrap_err();
        assert_eq!(
            err,
            DataError::UnknownBase {
                summon: "SPIDER".to_string(),
                base: "spider".to_string(),
            }
        );
    }
}
