//! Summon eligibility filter
//!
//! Decides whether a race may answer a given summon. The same predicate
//! restricts the allocation table for a creation draw and picks which
//! on-level monsters can be called.

use std::sync::Arc;

use super::registry::{SummonId, SummonRegistry, SummonType};
use crate::monster::{MonsterBase, MonsterRace};

/// Generic checks every summon type applies, in order:
/// uniques, required base, required race flag.
pub fn summon_okay(summon: &SummonType, race: &MonsterRace) -> bool {
    if !summon.unique_allowed && race.is_unique() {
        return false;
    }

    if !summon.bases.is_empty() && !summon.bases.iter().any(|b| race.has_base(b)) {
        return false;
    }

    if let Some(flag) = summon.race_flag
        && !race.has_flag(flag)
    {
        return false;
    }

    true
}

/// The summon being resolved right now.
///
/// Built fresh for each summon or shapechange and dropped when it returns.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    registry: &'a SummonRegistry,
    summon: SummonId,
    kin_base: Option<&'a Arc<MonsterBase>>,
}

impl<'a> SelectionContext<'a> {
    pub fn new(registry: &'a SummonRegistry, summon: SummonId) -> Self {
        Self {
            registry,
            summon,
            kin_base: None,
        }
    }

    /// Base that KIN summons must match
    pub fn with_kin_base(mut self, kin_base: Option<&'a Arc<MonsterBase>>) -> Self {
        self.kin_base = kin_base;
        self
    }

    /// The summon type being resolved
    pub fn summon(&self) -> SummonId {
        self.summon
    }

    /// Whether `race` may answer this summon.
    ///
    /// KIN additionally demands a non-unique race of exactly the kin base;
    /// with no kin base set nothing qualifies.
    pub fn is_eligible(&self, race: &MonsterRace) -> bool {
        if !summon_okay(self.registry.summon(self.summon), race) {
            return false;
        }

        if self.registry.is_kin(self.summon) {
            return !race.is_unique() && self.kin_base.is_some_and(|kin| race.has_base(kin));
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::RaceFlags;
    use crate::summon::registry::{RawSummon, KIN};
    use proptest::prelude::*;

    struct Bases {
        orc: Arc<MonsterBase>,
        troll: Arc<MonsterBase>,
        hound: Arc<MonsterBase>,
    }

    fn bases() -> Bases {
        Bases {
            orc: MonsterBase::new("orc", 'o'),
            troll: MonsterBase::new("troll", 'T'),
            hound: MonsterBase::new("zephyr hound", 'Z'),
        }
    }

    fn race(base: &Arc<MonsterBase>, flags: RaceFlags) -> MonsterRace {
        MonsterRace {
            ridx: 0,
            name: format!("{} thing", base.name),
            base: Arc::clone(base),
            level: 10,
            speed: 110,
            rarity: 1,
            flags,
        }
    }

    fn registry(b: &Bases) -> SummonRegistry {
        SummonRegistry::build(vec![
            RawSummon {
                name: KIN.to_string(),
                ..Default::default()
            },
            RawSummon {
                name: "ORC".to_string(),
                bases: vec![Arc::clone(&b.orc), Arc::clone(&b.troll)],
                ..Default::default()
            },
            RawSummon {
                name: "ANIMAL".to_string(),
                race_flag: Some(RaceFlags::ANIMAL),
                ..Default::default()
            },
            RawSummon {
                name: "UNIQUE".to_string(),
                unique_allowed: true,
                race_flag: Some(RaceFlags::UNIQUE),
                ..Default::default()
            },
            RawSummon {
                name: "ANY".to_string(),
                unique_allowed: true,
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_required_base() {
        let b = bases();
        let reg = registry(&b);
        let ctx = SelectionContext::new(&reg, reg.lookup("ORC").unwrap());
        assert!(ctx.is_eligible(&race(&b.orc, RaceFlags::ORC)));
        assert!(ctx.is_eligible(&race(&b.troll, RaceFlags::TROLL)));
        assert!(!ctx.is_eligible(&race(&b.hound, RaceFlags::ANIMAL)));
        // Uniques are still barred
        assert!(!ctx.is_eligible(&race(&b.orc, RaceFlags::UNIQUE)));
    }

    #[test]
    fn test_required_flag() {
        let b = bases();
        let reg = registry(&b);
        let ctx = SelectionContext::new(&reg, reg.lookup("ANIMAL").unwrap());
        assert!(ctx.is_eligible(&race(&b.hound, RaceFlags::ANIMAL)));
        assert!(!ctx.is_eligible(&race(&b.orc, RaceFlags::ORC)));
    }

    #[test]
    fn test_unique_type() {
        let b = bases();
        let reg = registry(&b);
        let ctx = SelectionContext::new(&reg, reg.lookup("UNIQUE").unwrap());
        assert!(ctx.is_eligible(&race(&b.orc, RaceFlags::UNIQUE)));
        assert!(!ctx.is_eligible(&race(&b.orc, RaceFlags::ORC)));
    }

    #[test]
    fn test_kin_matches_only_kin_base() {
        let b = bases();
        let reg = registry(&b);
        let ctx = SelectionContext::new(&reg, reg.kin().unwrap()).with_kin_base(Some(&b.troll));
        assert!(ctx.is_eligible(&race(&b.troll, RaceFlags::TROLL)));
        assert!(!ctx.is_eligible(&race(&b.orc, RaceFlags::ORC)));
        assert!(!ctx.is_eligible(&race(&b.troll, RaceFlags::UNIQUE)));
    }

    #[test]
    fn test_kin_without_base_matches_nothing() {
        let b = bases();
        let reg = registry(&b);
        let ctx = SelectionContext::new(&reg, reg.kin().unwrap());
        assert!(!ctx.is_eligible(&race(&b.troll, RaceFlags::TROLL)));
        assert!(!ctx.is_eligible(&race(&b.orc, RaceFlags::empty())));
    }

    #[test]
    fn test_kin_base_ignored_for_other_types() {
        let b = bases();
        let reg = registry(&b);
        let ctx = SelectionContext::new(&reg, reg.lookup("ANY").unwrap()).with_kin_base(Some(&b.troll));
        assert!(ctx.is_eligible(&race(&b.orc, RaceFlags::ORC)));
        assert!(ctx.is_eligible(&race(&b.hound, RaceFlags::UNIQUE)));
    }

    fn arb_flags() -> impl Strategy<Value = RaceFlags> {
        any::<u32>().prop_map(RaceFlags::from_bits_truncate)
    }

    proptest! {
        #[test]
        fn prop_uniques_rejected_when_disallowed(
            flags in arb_flags(),
            race_flag in proptest::option::of(arb_flags()),
            base_pick in 0usize..3,
            required in proptest::collection::vec(0usize..3, 0..3),
        ) {
            let b = bases();
            let all = [&b.orc, &b.troll, &b.hound];
            let summon = SummonType {
                name: "TEST".to_string(),
                unique_allowed: false,
                bases: required.iter().map(|&i| Arc::clone(all[i])).collect(),
                race_flag,
                ..Default::default()
            };
            let r = race(all[base_pick], flags | RaceFlags::UNIQUE);
            prop_assert!(!summon_okay(&summon, &r));
        }

        #[test]
        fn prop_required_bases_are_membership(
            base_pick in 0usize..3,
            required in proptest::collection::vec(0usize..3, 1..4),
        ) {
            let b = bases();
            let all = [&b.orc, &b.troll, &b.hound];
            let summon = SummonType {
                name: "TEST".to_string(),
                bases: required.iter().map(|&i| Arc::clone(all[i])).collect(),
                ..Default::default()
            };
            let r = race(all[base_pick], RaceFlags::EVIL);
            prop_assert_eq!(summon_okay(&summon, &r), required.contains(&base_pick));
        }
    }
}
