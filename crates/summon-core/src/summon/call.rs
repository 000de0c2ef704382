//! Calling: fetching a monster already on the level instead of making one

use log::debug;

use super::filter::SelectionContext;
use super::Summoned;
use crate::error::SummonError;
use crate::loc::Loc;
use crate::monster::{Monster, MonsterIdx};
use crate::rng::GameRng;
use crate::world::SummonCave;

/// Whether `mon` could be called to `grid`.
///
/// A callable monster is alive, eligible for the summon and out of sight
/// of the destination, so calling never pulls in something the player
/// could already see from there.
pub fn can_call_monster<C: SummonCave + ?Sized>(
    cave: &C,
    ctx: &SelectionContext<'_>,
    grid: Loc,
    mon: &Monster,
) -> bool {
    let Some(race) = mon.race.as_deref() else {
        return false;
    };

    if !ctx.is_eligible(race) {
        return false;
    }

    !cave.los(grid, mon.grid)
}

/// Indices of every monster that could be called to `grid`
pub fn callable_monsters<C: SummonCave + ?Sized>(
    cave: &C,
    ctx: &SelectionContext<'_>,
    grid: Loc,
) -> Vec<MonsterIdx> {
    (1..cave.monster_max())
        .map(MonsterIdx)
        .filter(|&midx| {
            cave.monster(midx)
                .is_some_and(|mon| can_call_monster(cave, ctx, grid, mon))
        })
        .collect()
}

/// Move one uniformly chosen callable monster to `grid`.
///
/// The monster is woken and made aware, and its energy is cleared so the
/// move does not hand it a free turn.
pub fn call_monster<C: SummonCave + ?Sized>(
    cave: &mut C,
    ctx: &SelectionContext<'_>,
    grid: Loc,
    awareness: i32,
    rng: &mut GameRng,
) -> Result<Summoned, SummonError> {
    let candidates = callable_monsters(cave, ctx, grid);
    let &midx = rng.choose(&candidates).ok_or(SummonError::NoCallable)?;

    let from = cave.monster(midx).ok_or(SummonError::NoCallable)?.grid;
    debug!(
        "calling monster {} of {} from {} to {}",
        midx.0,
        candidates.len(),
        from,
        grid
    );

    cave.monster_swap(from, grid);
    cave.monster_wake(midx, false, awareness);

    let mon = cave.monster_mut(midx).ok_or(SummonError::NoCallable)?;
    mon.energy = 0;

    Ok(Summoned {
        level: mon.level(),
        midx,
        called: true,
    })
}
