//! Weighted race allocator
//!
//! A stand-in for the game's allocation table: races up to the draw depth
//! are picked with weight inversely proportional to their rarity.

use std::sync::Arc;

use summon_core::monster::MonsterRace;
use summon_core::{GameRng, RaceAllocator, RaceFilter};

/// Allocation table over a fixed race list that records how it is used
#[derive(Debug, Clone, Default)]
pub struct TestAllocator {
    races: Vec<Arc<MonsterRace>>,
    allowed: Vec<bool>,
    filtered: bool,
    /// Whether each `prepare` call installed a filter
    pub prepares: Vec<bool>,
    /// Depth of every draw, in order
    pub draws: Vec<i32>,
}

impl TestAllocator {
    pub fn new(races: Vec<Arc<MonsterRace>>) -> Self {
        let allowed = vec![true; races.len()];
        Self {
            races,
            allowed,
            ..Default::default()
        }
    }

    /// A filter is currently installed
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Races that passed the current filter
    pub fn allowed(&self) -> impl Iterator<Item = &Arc<MonsterRace>> {
        self.races
            .iter()
            .zip(&self.allowed)
            .filter(|(_, ok)| **ok)
            .map(|(r, _)| r)
    }

    fn weight(race: &MonsterRace) -> u32 {
        100 / u32::from(race.rarity.max(1))
    }
}

impl RaceAllocator for TestAllocator {
    fn prepare(&mut self, filter: Option<RaceFilter<'_>>) {
        self.filtered = filter.is_some();
        self.prepares.push(self.filtered);
        self.allowed = self
            .races
            .iter()
            .map(|race| filter.is_none_or(|f| f(race)))
            .collect();
    }

    fn draw(&mut self, depth: i32, rng: &mut GameRng) -> Option<Arc<MonsterRace>> {
        self.draws.push(depth);
        let candidates: Vec<&Arc<MonsterRace>> =
            self.allowed().filter(|r| r.level <= depth).collect();
        let total: u32 = candidates.iter().map(|r| Self::weight(r)).sum();
        if total == 0 {
            return None;
        }

        let mut roll = rng.rn2(total);
        for race in candidates {
            let weight = Self::weight(race);
            if roll < weight {
                return Some(Arc::clone(race));
            }
            roll -= weight;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bestiary;

    #[test]
    fn test_draw_respects_depth() {
        let b = Bestiary::new();
        let mut alloc = TestAllocator::new(b.races());
        let mut rng = GameRng::new(11);
        for _ in 0..100 {
            let race = alloc.draw(3, &mut rng).unwrap();
            assert!(race.level <= 3, "{} is too deep", race.name);
        }
        assert!(alloc.draw(0, &mut rng).is_none());
    }

    #[test]
    fn test_filter_and_reset() {
        let b = Bestiary::new();
        let mut alloc = TestAllocator::new(b.races());
        let undead = |r: &MonsterRace| r.name == "poltergeist";
        alloc.prepare(Some(&undead));
        assert!(alloc.is_filtered());
        assert_eq!(alloc.allowed().count(), 1);

        alloc.prepare(None);
        assert!(!alloc.is_filtered());
        assert_eq!(alloc.allowed().count(), b.races().len());
        assert_eq!(alloc.prepares, vec![true, false]);
    }
}
