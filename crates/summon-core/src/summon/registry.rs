//! Summon type registry (summon.txt)
//!
//! The registry is built once from parsed records and is read-only until it
//! is disposed at shutdown. A few summon types have behaviour of their own
//! (KIN, UNIQUE, WRAITH); their indices are resolved once at build time.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::{MonsterBase, RaceFlags};

/// Summon type matching the summoner's own kin base
pub const KIN: &str = "KIN";
/// Summon type that always creates, never calls
pub const UNIQUE: &str = "UNIQUE";
/// Summon type that always creates, never calls
pub const WRAITH: &str = "WRAITH";

/// Index of a summon type in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummonId(pub usize);

/// Which message template announces a summon
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MessageKind {
    #[default]
    SumMonster,
    SumKin,
    SumAnimal,
    SumSpider,
    SumHound,
    SumHydra,
    SumAinu,
    SumDemon,
    SumUndead,
    SumDragon,
    SumHiDemon,
    SumHiUndead,
    SumHiDragon,
    SumWraith,
    SumUnique,
}

/// A summon type as produced by the definition parser
#[derive(Debug, Clone, Default)]
pub struct RawSummon {
    pub name: String,
    pub message_kind: MessageKind,
    pub unique_allowed: bool,
    pub bases: Vec<Arc<MonsterBase>>,
    pub race_flag: Option<RaceFlags>,
    pub fallback_name: Option<String>,
    pub desc: String,
}

/// One registry entry
#[derive(Debug, Clone, Default)]
pub struct SummonType {
    pub name: String,
    pub message_kind: MessageKind,
    /// Uniques may be summoned
    pub unique_allowed: bool,
    /// If non-empty, a race's base must be one of these
    pub bases: Vec<Arc<MonsterBase>>,
    /// A race must carry this flag
    pub race_flag: Option<RaceFlags>,
    pub fallback_name: Option<String>,
    /// Resolved `fallback_name`
    pub fallback: Option<SummonId>,
    pub desc: String,
}

impl From<RawSummon> for SummonType {
    fn from(raw: RawSummon) -> Self {
        Self {
            name: raw.name,
            message_kind: raw.message_kind,
            unique_allowed: raw.unique_allowed,
            bases: raw.bases,
            race_flag: raw.race_flag,
            fallback_name: raw.fallback_name,
            fallback: None,
            desc: raw.desc,
        }
    }
}

/// All summon types
#[derive(Debug, Default)]
pub struct SummonRegistry {
    /// Parsed entries followed by one reserved blank slot
    summons: Box<[SummonType]>,
    kin: Option<SummonId>,
    unique: Option<SummonId>,
    wraith: Option<SummonId>,
}

impl SummonRegistry {
    /// Build the registry, taking ownership of the parsed records.
    ///
    /// Each record is moved into the table as it is consumed. Fallback names
    /// are then resolved to indices; names that match nothing resolve to no
    /// fallback.
    pub fn build(parsed: impl IntoIterator<Item = RawSummon>) -> Self {
        let mut summons: Vec<SummonType> = parsed.into_iter().map(SummonType::from).collect();
        summons.push(SummonType::default());

        let mut registry = Self {
            summons: summons.into_boxed_slice(),
            kin: None,
            unique: None,
            wraith: None,
        };

        for (i, summon) in registry.summons[..registry.len()].iter().enumerate() {
            if let Some(first) = registry.lookup(&summon.name)
                && first.0 != i
            {
                warn!("duplicate summon type {} at {}, lookups use {}", summon.name, i, first.0);
            }
        }

        let fallbacks: Vec<Option<SummonId>> = registry
            .summons
            .iter()
            .map(|s| s.fallback_name.as_deref().and_then(|name| registry.lookup(name)))
            .collect();
        for (summon, fallback) in registry.summons.iter_mut().zip(fallbacks) {
            if fallback.is_none()
                && let Some(name) = &summon.fallback_name
            {
                warn!("summon type {} has unknown fallback {}", summon.name, name);
            }
            summon.fallback = fallback;
        }

        registry.kin = registry.lookup(KIN);
        registry.unique = registry.lookup(UNIQUE);
        registry.wraith = registry.lookup(WRAITH);

        debug!("built summon registry with {} types", registry.len());
        registry
    }

    /// Index of the summon type called `name`. The reserved slot never
    /// matches.
    pub fn lookup(&self, name: &str) -> Option<SummonId> {
        self.summons[..self.len()]
            .iter()
            .position(|s| s.name == name)
            .map(SummonId)
    }

    /// Number of summon types, not counting the reserved slot
    pub fn len(&self) -> usize {
        self.summons.len().saturating_sub(1)
    }

    /// No summon types were defined
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The summon type at `id`, or None past the last entry
    pub fn get(&self, id: SummonId) -> Option<&SummonType> {
        self.summons[..self.len()].get(id.0)
    }

    /// Every summon type in definition order
    pub fn iter(&self) -> impl Iterator<Item = (SummonId, &SummonType)> {
        self.summons[..self.len()]
            .iter()
            .enumerate()
            .map(|(i, s)| (SummonId(i), s))
    }

    /// The summon type at `id`.
    ///
    /// # Panics
    /// If `id` is not an index into this registry.
    pub fn summon(&self, id: SummonId) -> &SummonType {
        &self.summons[id.0]
    }

    /// Message template for a summon type. `id` must be valid.
    pub fn message_kind(&self, id: SummonId) -> MessageKind {
        self.summons[id.0].message_kind
    }

    /// Fallback for a summon type. `id` must be valid.
    pub fn fallback(&self, id: SummonId) -> Option<SummonId> {
        self.summons[id.0].fallback
    }

    /// Description of a summon type, or None for an unknown index
    pub fn description(&self, id: SummonId) -> Option<&str> {
        self.get(id).map(|s| s.desc.as_str())
    }

    /// Index of the KIN summon type, if defined
    pub fn kin(&self) -> Option<SummonId> {
        self.kin
    }

    pub fn is_kin(&self, id: SummonId) -> bool {
        self.kin == Some(id)
    }

    /// UNIQUE and WRAITH summons always create a new monster
    pub fn never_calls(&self, id: SummonId) -> bool {
        self.unique == Some(id) || self.wraith == Some(id)
    }

    /// Release every entry. Returns how many entries were released.
    pub fn dispose(self) -> usize {
        let count = self.len();
        drop(self.summons);
        debug!("released {} summon types", count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, fallback: Option<&str>) -> RawSummon {
        RawSummon {
            name: name.to_string(),
            desc: format!("{} summons", name.to_lowercase()),
            fallback_name: fallback.map(str::to_string),
            ..Default::default()
        }
    }

    fn registry() -> SummonRegistry {
        SummonRegistry::build(vec![
            raw(KIN, None),
            raw("UNDEAD", None),
            raw("HI_UNDEAD", Some("UNDEAD")),
            raw(WRAITH, Some("HI_UNDEAD")),
            raw(UNIQUE, Some("NOPE")),
        ])
    }

    #[test]
    fn test_lookup() {
        let reg = registry();
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.lookup(KIN), Some(SummonId(0)));
        assert_eq!(reg.lookup("HI_UNDEAD"), Some(SummonId(2)));
        assert_eq!(reg.lookup("hi_undead"), None);
        assert_eq!(reg.lookup(""), None);
    }

    #[test]
    fn test_fallbacks_resolved() {
        let reg = registry();
        assert_eq!(reg.fallback(SummonId(2)), Some(SummonId(1)));
        assert_eq!(reg.fallback(SummonId(3)), Some(SummonId(2)));
        assert_eq!(reg.fallback(SummonId(1)), None);
        // Unknown fallback name
        assert_eq!(reg.fallback(SummonId(4)), None);
    }

    #[test]
    fn test_special_types_resolved() {
        let reg = registry();
        assert_eq!(reg.kin(), Some(SummonId(0)));
        assert!(reg.is_kin(SummonId(0)));
        assert!(reg.never_calls(SummonId(3)));
        assert!(reg.never_calls(SummonId(4)));
        assert!(!reg.never_calls(SummonId(1)));
    }

    #[test]
    fn test_description_bounds() {
        let reg = registry();
        assert_eq!(reg.description(SummonId(1)), Some("undead summons"));
        // Reserved slot and beyond
        assert_eq!(reg.description(SummonId(5)), None);
        assert_eq!(reg.description(SummonId(500)), None);
    }

    #[test]
    fn test_reserved_slot_is_invisible() {
        let reg = registry();
        assert_eq!(reg.iter().count(), 5);
        assert!(reg.get(SummonId(5)).is_none());
        // Accessors still tolerate the reserved slot itself
        assert_eq!(reg.fallback(SummonId(5)), None);
        assert_eq!(reg.message_kind(SummonId(5)), MessageKind::SumMonster);
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let reg = SummonRegistry::build(vec![raw("ANIMAL", None), raw("ANIMAL", Some("KIN"))]);
        assert_eq!(reg.lookup("ANIMAL"), Some(SummonId(0)));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_empty_name_is_a_real_entry() {
        let reg = SummonRegistry::build(vec![raw("ANIMAL", None), raw("", Some("ANIMAL"))]);
        assert_eq!(reg.lookup(""), Some(SummonId(1)));
        assert_eq!(reg.fallback(SummonId(1)), Some(SummonId(0)));
        // Without one, the blank reserved slot is still not found
        assert_eq!(registry().lookup(""), None);
    }

    #[test]
    fn test_empty_build_and_dispose() {
        let reg = SummonRegistry::build(Vec::new());
        assert!(reg.is_empty());
        assert_eq!(reg.kin(), None);
        assert_eq!(reg.lookup(KIN), None);
        assert_eq!(reg.dispose(), 0);
    }

    #[test]
    fn test_dispose_releases_bases() {
        let orc = MonsterBase::new("orc", 'o');
        let mut summon = raw("ORC", None);
        summon.bases = vec![Arc::clone(&orc)];
        let reg = SummonRegistry::build(vec![summon]);
        assert_eq!(Arc::strong_count(&orc), 2);
        assert_eq!(reg.dispose(), 1);
        assert_eq!(Arc::strong_count(&orc), 1);
    }

    #[test]
    #[should_panic]
    fn test_message_kind_out_of_range_panics() {
        registry().message_kind(SummonId(99));
    }
}
