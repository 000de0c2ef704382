//! Interfaces to the level and the race allocation table
//!
//! Summoning owns none of the dungeon state. It talks to the current level
//! through [`SummonCave`] and to the race allocation table through
//! [`RaceAllocator`].

use std::sync::Arc;

use crate::loc::Loc;
use crate::monster::{GroupId, GroupInfo, Monster, MonsterIdx, MonsterRace, Origin};
use crate::rng::GameRng;

/// Predicate restricting which races the allocation table may draw
pub type RaceFilter<'f> = &'f dyn Fn(&MonsterRace) -> bool;

/// Player facts a summon depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerState {
    /// Current dungeon depth
    pub depth: i32,
    /// Current speed, 110 is normal
    pub speed: i32,
}

/// The current level as seen by summoning
pub trait SummonCave {
    fn in_bounds(&self, grid: Loc) -> bool;

    /// Passable floor with no monster or player on it
    fn is_empty(&self, grid: Loc) -> bool;

    /// Protected by a ward glyph
    fn is_warded(&self, grid: Loc) -> bool;

    /// Holds a decoy
    fn is_decoyed(&self, grid: Loc) -> bool;

    /// Unobstructed line of sight between two grids
    fn los(&self, from: Loc, to: Loc) -> bool;

    /// One past the highest monster index in use; index 0 is reserved
    fn monster_max(&self) -> usize;

    fn monster(&self, midx: MonsterIdx) -> Option<&Monster>;

    fn monster_mut(&mut self, midx: MonsterIdx) -> Option<&mut Monster>;

    fn monster_at(&self, grid: Loc) -> Option<MonsterIdx>;

    /// Exchange whatever occupies two grids, updating the monsters' grids
    fn monster_swap(&mut self, from: Loc, to: Loc);

    /// Wake a monster, making it aware of the player with the given chance
    fn monster_wake(&mut self, midx: MonsterIdx, notify: bool, aware_chance: i32);

    /// The monster whose turn is being processed, if any
    fn current_monster(&self) -> Option<MonsterIdx>;

    /// The group a summoner's summons should join
    fn summon_group(&mut self, summoner: MonsterIdx) -> Option<GroupId>;

    /// Create and place a monster of `race` at `grid`
    fn place_new_monster(
        &mut self,
        grid: Loc,
        race: Arc<MonsterRace>,
        sleep: bool,
        group_ok: bool,
        info: GroupInfo,
        origin: Origin,
    ) -> Option<MonsterIdx>;
}

/// The monster race allocation table
pub trait RaceAllocator {
    /// Rebuild the table restricted by `filter`, or unrestricted for None
    fn prepare(&mut self, filter: Option<RaceFilter<'_>>);

    /// Draw one race appropriate for `depth` from the prepared table
    fn draw(&mut self, depth: i32, rng: &mut GameRng) -> Option<Arc<MonsterRace>>;
}

/// An allocation table restricted by a filter.
///
/// The filter is lifted again when this guard drops, so no exit path can
/// leave a later unrelated draw restricted.
pub struct PreparedTable<'a, A: RaceAllocator + ?Sized> {
    alloc: &'a mut A,
}

impl<'a, A: RaceAllocator + ?Sized> PreparedTable<'a, A> {
    pub fn new(alloc: &'a mut A, filter: RaceFilter<'_>) -> Self {
        alloc.prepare(Some(filter));
        Self { alloc }
    }

    pub fn draw(&mut self, depth: i32, rng: &mut GameRng) -> Option<Arc<MonsterRace>> {
        self.alloc.draw(depth, rng)
    }
}

impl<A: RaceAllocator + ?Sized> Drop for PreparedTable<'_, A> {
    fn drop(&mut self) {
        self.alloc.prepare(None);
    }
}
