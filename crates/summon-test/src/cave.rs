//! In-memory level

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use summon_core::monster::{GroupId, GroupInfo, MonTimed, Monster, MonsterIdx, MonsterRace, Origin};
use summon_core::{Loc, SummonCave};

/// Terrain of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terrain {
    #[default]
    Floor,
    Wall,
}

/// A rectangular level with walls, wards, decoys, a player and monsters.
///
/// Monster slot 0 is reserved and always empty.
#[derive(Debug, Clone)]
pub struct TestCave {
    width: i32,
    height: i32,
    terrain: Vec<Terrain>,
    wards: HashSet<Loc>,
    decoys: HashSet<Loc>,
    monsters: Vec<Monster>,
    occupants: HashMap<Loc, MonsterIdx>,
    player: Option<Loc>,
    current: Option<MonsterIdx>,
    next_group: u32,
    /// Make every `place_new_monster` fail
    pub fail_placement: bool,
}

impl TestCave {
    /// A room of floor surrounded by a one-grid wall border
    pub fn room(width: i32, height: i32) -> Self {
        let mut cave = Self {
            width,
            height,
            terrain: vec![Terrain::Floor; (width * height) as usize],
            wards: HashSet::new(),
            decoys: HashSet::new(),
            monsters: vec![Monster::default()],
            occupants: HashMap::new(),
            player: None,
            current: None,
            next_group: 1,
            fail_placement: false,
        };
        for x in 0..width {
            cave.set_wall(Loc::new(x, 0));
            cave.set_wall(Loc::new(x, height - 1));
        }
        for y in 0..height {
            cave.set_wall(Loc::new(0, y));
            cave.set_wall(Loc::new(width - 1, y));
        }
        cave
    }

    fn index(&self, grid: Loc) -> usize {
        (grid.y * self.width + grid.x) as usize
    }

    pub fn terrain(&self, grid: Loc) -> Terrain {
        self.terrain[self.index(grid)]
    }

    pub fn set_wall(&mut self, grid: Loc) {
        let i = self.index(grid);
        self.terrain[i] = Terrain::Wall;
    }

    /// Wall off column `x` between the top and bottom borders
    pub fn wall_column(&mut self, x: i32) {
        for y in 1..self.height - 1 {
            self.set_wall(Loc::new(x, y));
        }
    }

    pub fn add_ward(&mut self, grid: Loc) {
        self.wards.insert(grid);
    }

    pub fn add_decoy(&mut self, grid: Loc) {
        self.decoys.insert(grid);
    }

    pub fn place_player(&mut self, grid: Loc) {
        self.player = Some(grid);
    }

    pub fn set_current(&mut self, midx: Option<MonsterIdx>) {
        self.current = midx;
    }

    fn new_group(&mut self) -> GroupId {
        let group = GroupId(self.next_group);
        self.next_group += 1;
        group
    }

    /// Put a sleeping monster of `race` at `grid`, in a group of its own.
    pub fn add_monster(&mut self, race: Arc<MonsterRace>, grid: Loc) -> MonsterIdx {
        let mut mon = Monster::new(race, grid);
        mon.energy = 50;
        mon.timed.set(MonTimed::Sleep, 20);
        mon.group = GroupInfo {
            index: Some(self.new_group()),
            role: Default::default(),
        };
        let midx = MonsterIdx(self.monsters.len());
        self.monsters.push(mon);
        self.occupants.insert(grid, midx);
        midx
    }

    /// Clear a monster's slot, leaving a dead entry behind
    pub fn kill(&mut self, midx: MonsterIdx) {
        let mon = &mut self.monsters[midx.0];
        mon.race = None;
        self.occupants.remove(&mon.grid);
    }

    /// Living monsters on the level
    pub fn monster_count(&self) -> usize {
        self.monsters.iter().filter(|m| m.is_alive()).count()
    }

    pub fn monsters(&self) -> impl Iterator<Item = (MonsterIdx, &Monster)> {
        self.monsters
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, m)| m.is_alive())
            .map(|(i, m)| (MonsterIdx(i), m))
    }

    fn blocks_sight(&self, grid: Loc) -> bool {
        self.terrain(grid) == Terrain::Wall
    }
}

impl SummonCave for TestCave {
    fn in_bounds(&self, grid: Loc) -> bool {
        grid.x >= 0 && grid.y >= 0 && grid.x < self.width && grid.y < self.height
    }

    fn is_empty(&self, grid: Loc) -> bool {
        self.in_bounds(grid)
            && self.terrain(grid) == Terrain::Floor
            && !self.occupants.contains_key(&grid)
            && self.player != Some(grid)
    }

    fn is_warded(&self, grid: Loc) -> bool {
        self.wards.contains(&grid)
    }

    fn is_decoyed(&self, grid: Loc) -> bool {
        self.decoys.contains(&grid)
    }

    /// Bresenham line; a wall is visible itself but hides what lies beyond
    fn los(&self, from: Loc, to: Loc) -> bool {
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - x).abs();
        let dy = -(to.y - y).abs();
        let sx = if x < to.x { 1 } else { -1 };
        let sy = if y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            let here = Loc::new(x, y);
            if here != from {
                if !self.in_bounds(here) {
                    return false;
                }
                if self.blocks_sight(here) {
                    return here == to;
                }
            }

            if here == to {
                return true;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn monster_max(&self) -> usize {
        self.monsters.len()
    }

    fn monster(&self, midx: MonsterIdx) -> Option<&Monster> {
        if midx.is_none() {
            return None;
        }
        self.monsters.get(midx.0)
    }

    fn monster_mut(&mut self, midx: MonsterIdx) -> Option<&mut Monster> {
        if midx.is_none() {
            return None;
        }
        self.monsters.get_mut(midx.0)
    }

    fn monster_at(&self, grid: Loc) -> Option<MonsterIdx> {
        self.occupants.get(&grid).copied()
    }

    fn monster_swap(&mut self, from: Loc, to: Loc) {
        let a = self.occupants.remove(&from);
        let b = self.occupants.remove(&to);
        if let Some(midx) = a {
            self.monsters[midx.0].grid = to;
            self.occupants.insert(to, midx);
        }
        if let Some(midx) = b {
            self.monsters[midx.0].grid = from;
            self.occupants.insert(from, midx);
        }
    }

    fn monster_wake(&mut self, midx: MonsterIdx, _notify: bool, aware_chance: i32) {
        if let Some(mon) = self.monster_mut(midx) {
            mon.timed.set(MonTimed::Sleep, 0);
            mon.aware = aware_chance >= 100;
        }
    }

    fn current_monster(&self) -> Option<MonsterIdx> {
        self.current
    }

    fn summon_group(&mut self, summoner: MonsterIdx) -> Option<GroupId> {
        self.monster(summoner).and_then(|m| m.group.index)
    }

    fn place_new_monster(
        &mut self,
        grid: Loc,
        race: Arc<MonsterRace>,
        sleep: bool,
        _group_ok: bool,
        info: GroupInfo,
        origin: Origin,
    ) -> Option<MonsterIdx> {
        if self.fail_placement || !self.is_empty(grid) {
            return None;
        }
        let mut mon = Monster::new(race, grid);
        if sleep {
            mon.timed.set(MonTimed::Sleep, 20);
        }
        mon.group = GroupInfo {
            index: Some(match info.index {
                Some(group) => group,
                None => self.new_group(),
            }),
            role: info.role,
        };
        mon.origin = origin;
        mon.energy = 30;
        let midx = MonsterIdx(self.monsters.len());
        self.monsters.push(mon);
        self.occupants.insert(grid, midx);
        Some(midx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bestiary;

    #[test]
    fn test_room_borders() {
        let cave = TestCave::room(10, 6);
        assert!(!cave.is_empty(Loc::new(0, 0)));
        assert!(!cave.is_empty(Loc::new(9, 3)));
        assert!(cave.is_empty(Loc::new(4, 3)));
        assert!(!cave.is_empty(Loc::new(10, 3)));
    }

    #[test]
    fn test_los_blocked_by_column() {
        let mut cave = TestCave::room(20, 10);
        cave.wall_column(10);
        assert!(cave.los(Loc::new(3, 3), Loc::new(8, 6)));
        assert!(cave.los(Loc::new(3, 3), Loc::new(10, 3)));
        assert!(!cave.los(Loc::new(3, 3), Loc::new(15, 3)));
        assert!(!cave.los(Loc::new(15, 3), Loc::new(3, 3)));
    }

    #[test]
    fn test_swap_and_kill() {
        let b = Bestiary::new();
        let mut cave = TestCave::room(10, 10);
        let midx = cave.add_monster(b.race("snaga"), Loc::new(2, 2));
        cave.monster_swap(Loc::new(2, 2), Loc::new(5, 5));
        assert_eq!(cave.monster_at(Loc::new(5, 5)), Some(midx));
        assert_eq!(cave.monster_at(Loc::new(2, 2)), None);
        assert_eq!(cave.monster(midx).unwrap().grid, Loc::new(5, 5));

        cave.kill(midx);
        assert_eq!(cave.monster_count(), 0);
        assert!(cave.is_empty(Loc::new(5, 5)));
        assert!(cave.monster(MonsterIdx::NONE).is_none());
    }
}
