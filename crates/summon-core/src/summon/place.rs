//! Placing summoned monsters (summon_specific)

use std::sync::Arc;

use log::{debug, trace};

use super::call::call_monster;
use super::filter::SelectionContext;
use super::registry::{SummonId, SummonRegistry};
use super::{SummonTally, Summoned};
use crate::config::SummonConfig;
use crate::error::{ConfigError, SummonError};
use crate::loc::Loc;
use crate::monster::{GroupInfo, MonTimed, Monster, MonsterBase, MonsterRace, Origin};
use crate::rng::GameRng;
use crate::world::{PlayerState, PreparedTable, RaceAllocator, SummonCave};

/// Pick a random in-bounds grid within distance `d` of `grid`.
///
/// With `need_los` only grids in line of sight of `grid` qualify. Returns
/// None when no grid qualifies.
pub fn scatter<C: SummonCave + ?Sized>(
    cave: &C,
    grid: Loc,
    d: i32,
    need_los: bool,
    rng: &mut GameRng,
) -> Option<Loc> {
    let mut options = Vec::new();
    for y in (grid.y - d)..=(grid.y + d) {
        for x in (grid.x - d)..=(grid.x + d) {
            let near = Loc::new(x, y);
            if !cave.in_bounds(near) || grid.distance(near) > d {
                continue;
            }
            if need_los && !cave.los(grid, near) {
                continue;
            }
            options.push(near);
        }
    }
    rng.choose(&options).copied()
}

/// Find an empty, unwarded, undecoyed grid near `grid` for a summon.
///
/// Trials widen the scatter radius by one every `trials_per_radius`
/// attempts.
pub fn find_location<C: SummonCave + ?Sized>(
    cave: &C,
    grid: Loc,
    config: &SummonConfig,
    rng: &mut GameRng,
) -> Option<Loc> {
    for trial in 0..config.placement_trials {
        let d = config.scatter_radius(trial);
        let Some(near) = scatter(cave, grid, d, true, rng) else {
            continue;
        };

        if !cave.is_empty(near) {
            trace!("summon trial {} at {}: not empty", trial, near);
            continue;
        }

        // No summons on glyphs or decoys
        if cave.is_warded(near) || cave.is_decoyed(near) {
            trace!("summon trial {} at {}: warded or decoyed", trial, near);
            continue;
        }

        return Some(near);
    }
    None
}

/// Everything a summon touches, borrowed for the length of one effect.
pub struct SummonEnv<'a, C: SummonCave + ?Sized, A: RaceAllocator + ?Sized> {
    pub registry: &'a SummonRegistry,
    pub cave: &'a mut C,
    pub alloc: &'a mut A,
    pub rng: &'a mut GameRng,
    pub player: PlayerState,
    config: SummonConfig,
    /// Base KIN summons must match, usually the summoner's own
    pub kin_base: Option<Arc<MonsterBase>>,
}

impl<'a, C: SummonCave + ?Sized, A: RaceAllocator + ?Sized> SummonEnv<'a, C, A> {
    /// Borrow everything for one summon effect, with default constants.
    pub fn new(
        registry: &'a SummonRegistry,
        cave: &'a mut C,
        alloc: &'a mut A,
        rng: &'a mut GameRng,
        player: PlayerState,
    ) -> Self {
        Self {
            registry,
            cave,
            alloc,
            rng,
            player,
            config: SummonConfig::default(),
            kin_base: None,
        }
    }

    /// Replace the default constants with `config` once it validates.
    pub fn with_config(mut self, config: SummonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Constants in effect for this environment
    pub fn config(&self) -> &SummonConfig {
        &self.config
    }

    /// Set the base KIN summons must match
    pub fn with_kin_base(mut self, kin_base: Option<Arc<MonsterBase>>) -> Self {
        self.kin_base = kin_base;
        self
    }

    /// Summon one monster of type `summon` near `grid`.
    ///
    /// `lev` is the summoner's level; the race is drawn at the average of it
    /// and the dungeon depth plus a small bonus. With `call`, an existing
    /// monster is moved instead, except for UNIQUE and WRAITH summons. With
    /// `delay`, a new monster loses its energy and faster monsters are held
    /// long enough for the player to act first.
    ///
    /// Never falls back to another summon type; see
    /// [`summon_with_fallback`](Self::summon_with_fallback).
    pub fn summon_specific(
        &mut self,
        grid: Loc,
        lev: i32,
        summon: SummonId,
        delay: bool,
        call: bool,
    ) -> Result<Summoned, SummonError> {
        let near = find_location(&*self.cave, grid, &self.config, self.rng).ok_or(
            SummonError::NoLocation {
                grid,
                trials: self.config.placement_trials,
            },
        )?;
        debug!("summon {} lands at {}", self.registry.summon(summon).name, near);

        let ctx = SelectionContext::new(self.registry, summon).with_kin_base(self.kin_base.as_ref());

        if call && !self.registry.never_calls(summon) {
            return call_monster(&mut *self.cave, &ctx, near, self.config.call_awareness, self.rng);
        }

        let depth = self.config.summon_depth(self.player.depth, lev);
        let race = {
            let filter = |race: &MonsterRace| ctx.is_eligible(race);
            let mut table = PreparedTable::new(&mut *self.alloc, &filter);
            table.draw(depth, self.rng)
        }
        .ok_or(SummonError::NoRace { depth })?;
        debug!("drew {} at depth {}", race.name, depth);

        // Summons join the summoner's group
        let info = match self.cave.current_monster() {
            Some(summoner) if !summoner.is_none() => self
                .cave
                .summon_group(summoner)
                .map(GroupInfo::summoned_into)
                .unwrap_or_default(),
            _ => GroupInfo::default(),
        };

        let placement_failed = || SummonError::PlacementFailed {
            race: race.name.clone(),
            grid: near,
        };
        let midx = self
            .cave
            .place_new_monster(near, Arc::clone(&race), false, false, info, Origin::DropSummon)
            .ok_or_else(placement_failed)?;

        if delay {
            let turns = self.config.hold_turns(race.speed, self.player.speed);
            let mon = self.cave.monster_mut(midx).ok_or_else(placement_failed)?;
            mon.energy = 0;
            if turns > 0 {
                debug!("holding {} for {} turns", race.name, turns);
                mon.timed.set(MonTimed::Hold, turns.min(i16::MAX as i32) as i16);
            }
        }

        Ok(Summoned {
            level: race.level,
            midx,
            called: false,
        })
    }

    /// [`summon_specific`](Self::summon_specific) reduced to the level of
    /// the summoned monster, or 0 on any failure.
    pub fn summon_level(&mut self, grid: Loc, lev: i32, summon: SummonId, delay: bool, call: bool) -> i32 {
        self.summon_specific(grid, lev, summon, delay, call)
            .map_or(0, |s| s.level)
    }

    /// Summon one monster, retrying once with the type's fallback if the
    /// first attempt produces nothing.
    pub fn summon_with_fallback(
        &mut self,
        grid: Loc,
        lev: i32,
        summon: SummonId,
        delay: bool,
        call: bool,
    ) -> Result<Summoned, SummonError> {
        match self.summon_specific(grid, lev, summon, delay, call) {
            Err(err) => match self.registry.fallback(summon) {
                Some(fallback) => {
                    debug!(
                        "summon {} failed ({}), falling back to {}",
                        self.registry.summon(summon).name,
                        err,
                        self.registry.summon(fallback).name
                    );
                    self.summon_specific(grid, lev, fallback, delay, call)
                }
                None => Err(err),
            },
            ok => ok,
        }
    }

    /// Summon up to `count` monsters, each with fallback.
    pub fn summon_count(
        &mut self,
        grid: Loc,
        lev: i32,
        summon: SummonId,
        count: u32,
        delay: bool,
        call: bool,
    ) -> SummonTally {
        let mut tally = SummonTally::default();
        for _ in 0..count {
            if let Ok(summoned) = self.summon_with_fallback(grid, lev, summon, delay, call) {
                tally.add(&summoned);
            }
        }
        tally
    }

    /// Pick a race for `mon` to change shape into, from the races it could
    /// summon with `summon`. Nothing is placed.
    pub fn select_shape(&mut self, mon: &Monster, summon: SummonId) -> Option<Arc<MonsterRace>> {
        let depth = self.player.depth + self.config.shape_depth_bonus;
        let ctx = SelectionContext::new(self.registry, summon).with_kin_base(self.kin_base.as_ref());
        let filter = |race: &MonsterRace| ctx.is_eligible(race);
        let mut table = PreparedTable::new(&mut *self.alloc, &filter);
        let shape = table.draw(depth, self.rng);
        if let (Some(from), Some(to)) = (mon.race.as_ref(), shape.as_ref()) {
            debug!("{} takes the shape of {}", from.name, to.name);
        }
        shape
    }
}
