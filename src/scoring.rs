//! Spatial scoring: pure functions over the grid index and the live
//! character/item lists.
//!
//! Nothing here mutates state or caches between calls; every function is a
//! straight query so the role logic stays the only place with sequencing.
//! Selection functions return `Option`: absence of a candidate is an
//! expected outcome, and callers cascade to their next priority tier.

use crate::constants::*;
use crate::game_state::{Character, Item};
use crate::grid::GridIndex;
use crate::location::Location;
use fnv::FnvHashSet;
use itertools::iproduct;

/// Number of living enemies within `radius` of `pos` (Manhattan).
pub fn enemy_pressure(enemies: &[Character], pos: Location, radius: u32) -> usize {
    enemies
        .iter()
        .filter(|enemy| enemy.alive && enemy.position.distance_to(pos) <= radius)
        .count()
}

/// Threat posed by an enemy: a base score scaled down with distance to the
/// nearest border cell of our territory, with a large multiplier once the
/// enemy is already inside. Dead enemies score zero.
pub fn threat_level(grid: &GridIndex, enemy: &Character) -> f32 {
    if !enemy.alive {
        return 0.0;
    }

    let border_distance = grid
        .border_cells()
        .iter()
        .map(|cell| cell.distance_to(enemy.position))
        .min();
    let distance_factor = match border_distance {
        Some(distance) => {
            (1.0 - distance as f32 * THREAT_DECAY_PER_TILE).max(THREAT_MIN_DISTANCE_FACTOR)
        }
        // No border cells at all (no territory left): the floor applies.
        None => THREAT_MIN_DISTANCE_FACTOR,
    };

    let mut threat = THREAT_BASE * distance_factor;
    if grid.is_own(enemy.position) {
        threat *= HOME_INVASION_THREAT_MULTIPLIER;
    }
    threat
}

/// Whether a position is safe to occupy given what is being carried.
/// Own territory is always safe. Outside it, carrying blitzium means a
/// single enemy within `LADEN_DANGER_RADIUS` is disqualifying; otherwise
/// more than `UNLADEN_ENEMY_TOLERANCE` enemies within
/// `UNLADEN_DANGER_RADIUS` are.
pub fn is_safe(grid: &GridIndex, enemies: &[Character], pos: Location, carried: &[Item]) -> bool {
    if grid.is_own(pos) {
        return true;
    }

    if carried.iter().any(|item| item.is_blitzium()) {
        enemy_pressure(enemies, pos, LADEN_DANGER_RADIUS) == 0
    } else {
        enemy_pressure(enemies, pos, UNLADEN_DANGER_RADIUS) <= UNLADEN_ENEMY_TOLERANCE
    }
}

/// Border cell balancing interception speed against the enemy's approach:
/// minimizes `d(cell, enemy) + 0.5 * d(cell, defender)`.
pub fn best_border_position(
    grid: &GridIndex,
    defender: Location,
    enemy: Location,
) -> Option<Location> {
    let mut best: Option<(f32, Location)> = None;
    for &cell in grid.border_cells() {
        let score = cell.distance_to(enemy) as f32
            + INTERCEPT_SELF_DISTANCE_WEIGHT * cell.distance_to(defender) as f32;
        if best.map_or(true, |(best_score, _)| score < best_score) {
            best = Some((score, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

fn offset(center: Location, dx: i32, dy: i32) -> Option<Location> {
    let x = center.x() as i32 + dx;
    let y = center.y() as i32 + dy;
    if (0..=255).contains(&x) && (0..=255).contains(&y) {
        Some(Location::from_coords(x as u32, y as u32))
    } else {
        None
    }
}

fn qualifies_as_drop(grid: &GridIndex, cell: Location) -> bool {
    grid.walkable(cell)
        && !grid.is_own(cell)
        && !grid.has_item(cell)
        && grid.neighbors(cell).any(|next| grid.is_own(next))
}

/// Nearest reachable cell, in expanding Manhattan rings around `from`, that
/// is walkable, outside own territory, empty of items, and orthogonally
/// adjacent to own territory: liabilities get dumped just across the
/// border, not deep in enemy land.
pub fn nearest_drop_spot(
    grid: &GridIndex,
    reachable: &FnvHashSet<Location>,
    from: Location,
    within_radius: u32,
) -> Option<Location> {
    for radius in 0..=within_radius as i32 {
        for dx in -radius..=radius {
            let rem = radius - dx.abs();
            for dy in if rem == 0 { vec![0] } else { vec![-rem, rem] } {
                let Some(cell) = offset(from, dx, dy) else {
                    continue;
                };
                if qualifies_as_drop(grid, cell) && reachable.contains(&cell) {
                    return Some(cell);
                }
            }
        }
    }
    None
}

/// Highest-value reachable item matching the predicate; value dominates,
/// proximity only breaks ties.
pub fn best_value_target<'a>(
    items: &'a [Item],
    reachable: &FnvHashSet<Location>,
    from: Location,
    mut predicate: impl FnMut(&Item) -> bool,
) -> Option<&'a Item> {
    items
        .iter()
        .filter(|item| predicate(item))
        .filter(|item| reachable.contains(&item.position))
        .max_by_key(|item| (item.value, -(from.distance_to(item.position) as i64)))
}

/// Nearest reachable item matching the predicate.
pub fn nearest_target<'a>(
    items: &'a [Item],
    reachable: &FnvHashSet<Location>,
    from: Location,
    mut predicate: impl FnMut(&Item) -> bool,
) -> Option<&'a Item> {
    items
        .iter()
        .filter(|item| predicate(item))
        .filter(|item| reachable.contains(&item.position))
        .min_by_key(|item| from.distance_to(item.position))
}

/// Reachable own-territory cell minimizing enemy pressure, with raw
/// distance only breaking ties: a laden carrier heads for quiet ground
/// before near ground.
pub fn safest_home_position(
    grid: &GridIndex,
    enemies: &[Character],
    reachable: &FnvHashSet<Location>,
    from: Location,
) -> Option<Location> {
    grid.locations()
        .filter(|&loc| grid.is_own(loc) && grid.walkable(loc) && reachable.contains(&loc))
        .min_by_key(|&loc| {
            (
                enemy_pressure(enemies, loc, HOME_RISK_RADIUS),
                from.distance_to(loc),
            )
        })
}

/// Border cell with the densest own-territory 3x3 neighborhood: the spot
/// from which an idle defender covers the most ground.
pub fn best_patrol_position(grid: &GridIndex) -> Option<Location> {
    let mut best: Option<(f32, Location)> = None;
    for &cell in grid.border_cells() {
        let coverage = iproduct!(-1i8..=1, -1i8..=1)
            .filter(|&(dx, dy)| {
                cell.step(dx, dy)
                    .map(|next| grid.walkable(next) && grid.is_own(next))
                    .unwrap_or(false)
            })
            .count();
        let score = PATROL_BASE_SCORE + coverage as f32 * PATROL_COVERAGE_WEIGHT;
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, cell));
        }
    }
    best.map(|(_, cell)| cell)
}
