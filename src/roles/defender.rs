//! Defender: claim the most threatening enemy, meet it at the border, and
//! tidy radiant out of our territory when the front is quiet.
//!
//! Defenders never leave own territory; the movement primitive only
//! considers in-territory steps and favors ones that land next to a living
//! enemy, since contact is what resolves an interception.

use crate::constants::*;
use crate::context::TickContext;
use crate::game_state::{Action, Character};
use crate::grid::NEIGHBORS_4;
use crate::location::Location;
use crate::roles::Role;
use crate::scoring;
use itertools::Itertools;
use log::{debug, trace};
use std::cmp::Ordering;

pub struct Defender;

impl Role for Defender {
    fn decide(&self, ctx: &mut TickContext<'_>, me: &Character) -> Option<Action> {
        if !me.alive {
            return None;
        }
        let enemies = ctx.enemies();
        ctx.targets.prune_dead(enemies);

        if let Some(enemy_pos) = acquire_target(ctx, me) {
            return engage(ctx, me, enemy_pos);
        }

        if let Some(action) = cleanup(ctx, me) {
            return Some(action);
        }
        patrol(ctx, me)
    }
}

/// Claim the highest-threat enemy not already claimed by another defender.
/// Returns the claimed enemy's position.
fn acquire_target(ctx: &mut TickContext<'_>, me: &Character) -> Option<Location> {
    let enemies = ctx.enemies();
    let scored: Vec<(&Character, f32)> = enemies
        .iter()
        .filter(|enemy| enemy.alive)
        .map(|enemy| (enemy, scoring::threat_level(&ctx.grid, enemy)))
        .collect();

    for (enemy, threat) in scored
        .into_iter()
        .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
    {
        if threat <= 0.0 {
            continue;
        }
        if ctx.targets.claim(enemy, &me.id, threat) {
            trace!(
                "defender {} targets {} (threat {:.1})",
                me.id,
                enemy.id,
                threat
            );
            return Some(enemy.position);
        }
    }
    None
}

fn engage(ctx: &TickContext<'_>, me: &Character, enemy_pos: Location) -> Option<Action> {
    if ctx.grid.is_own(enemy_pos) {
        if me.position.distance_to(enemy_pos) <= 1 {
            // Contact: the engine resolves the interception.
            return None;
        }
        debug!("defender {} closes on invader at {:?}", me.id, enemy_pos);
        return step_towards(ctx, me, enemy_pos);
    }

    // Enemy still outside: pick the border cell balancing our approach
    // against theirs.
    let intercept = scoring::best_border_position(&ctx.grid, me.position, enemy_pos)?;
    if ctx.grid.is_border(me.position)
        && me.position.distance_to(enemy_pos) <= intercept.distance_to(enemy_pos) + 1
    {
        // Well positioned already: hold the line, tidying up if it is cheap.
        return cleanup(ctx, me);
    }
    debug!("defender {} moves to intercept at {:?}", me.id, intercept);
    step_towards(ctx, me, intercept)
}

/// Opportunistic radiant removal: only when unthreatened, only for nearby
/// items, and only when the whole round trip fits the budget; distant
/// cleanup never outranks defense.
fn cleanup(ctx: &TickContext<'_>, me: &Character) -> Option<Action> {
    let enemies = ctx.enemies();
    let reachable = ctx.reachable_from(me.position);

    if !me.carried_items.is_empty() {
        // Haul what we picked up to just across the border.
        let drop = scoring::nearest_drop_spot(&ctx.grid, &reachable, me.position, CLEANUP_TRIP_BUDGET)?;
        if me.position.distance_to(drop) <= 1 && !ctx.grid.has_item(drop) {
            debug!("defender {} dumps radiant over the border", me.id);
            return Some(Action::drop(&me.id));
        }
        return step_towards(ctx, me, drop);
    }

    if !me.has_space(&ctx.state.constants) {
        return None;
    }
    if scoring::enemy_pressure(enemies, me.position, CLEANUP_SAFETY_RADIUS) > 0 {
        return None;
    }

    let item = scoring::nearest_target(&ctx.items, &reachable, me.position, |item| {
        item.is_radiant() && ctx.grid.is_own(item.position)
    })?;
    let item_pos = item.position;
    if me.position.distance_to(item_pos) > CLEANUP_ITEM_RADIUS {
        return None;
    }

    let drop = scoring::nearest_drop_spot(&ctx.grid, &reachable, me.position, CLEANUP_TRIP_BUDGET)?;
    let round_trip = me.position.distance_to(item_pos) + item_pos.distance_to(drop);
    if round_trip > CLEANUP_TRIP_BUDGET {
        return None;
    }

    if me.position == item_pos {
        return Some(Action::grab(&me.id));
    }
    step_towards(ctx, me, item_pos)
}

fn patrol(ctx: &TickContext<'_>, me: &Character) -> Option<Action> {
    let goal = scoring::best_patrol_position(&ctx.grid)?;
    trace!("defender {} patrols toward {:?}", me.id, goal);
    step_towards(ctx, me, goal)
}

/// Movement primitive: of the four orthogonal steps, keep only walkable
/// in-territory ones, minimize distance to the goal, and discount steps
/// that land adjacent to a living enemy. Standing on the goal holds.
fn step_towards(ctx: &TickContext<'_>, me: &Character, goal: Location) -> Option<Action> {
    if me.position == goal {
        return None;
    }
    let enemies = ctx.enemies();
    let mut best: Option<(i64, Location)> = None;

    for &(dx, dy) in &NEIGHBORS_4 {
        let Some(next) = me.position.step(dx, dy) else {
            continue;
        };
        if !ctx.grid.walkable(next) || !ctx.grid.is_own(next) {
            continue;
        }

        let mut score = next.distance_to(goal) as i64;
        let contact = enemies
            .iter()
            .any(|enemy| enemy.alive && enemy.position.distance_to(next) <= 1);
        if contact {
            score -= CONTACT_STEP_BONUS;
        }

        if best.map_or(true, |(best_score, _)| score < best_score) {
            best = Some((score, next));
        }
    }

    let (_, next) = best?;
    Action::step(&me.id, me.position, next)
}
