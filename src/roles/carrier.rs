//! Carrier: acquire blitzium abroad, deliver it home, and keep our own
//! territory clear of radiant.
//!
//! The decision is a fresh priority cascade every tick: deliver what we
//! hold, dump liabilities, then go collect. Each tier that finds no safe,
//! reachable candidate falls through to the next; an empty cascade is a
//! no-op, never an error.

use crate::context::TickContext;
use crate::game_state::{Action, Character, ResourceFamily};
use crate::grid::Zone;
use crate::location::Location;
use crate::roles::Role;
use crate::scoring;
use crate::search;
use fnv::FnvHashSet;
use log::{debug, trace};

pub struct Carrier;

impl Role for Carrier {
    fn decide(&self, ctx: &mut TickContext<'_>, me: &Character) -> Option<Action> {
        if !me.alive {
            return None;
        }
        let reachable = ctx.reachable_from(me.position);

        if me.carrying(ResourceFamily::Blitzium) {
            return deliver_home(ctx, me, &reachable);
        }
        if me.carrying(ResourceFamily::Radiant) {
            if let Some(action) = dump_liability(ctx, me, &reachable) {
                return Some(action);
            }
        }
        if me.has_space(&ctx.state.constants) {
            if let Some(action) = collect(ctx, me, &reachable) {
                return Some(action);
            }
        }

        trace!("carrier {} has nothing to do", me.id);
        None
    }
}

/// Blitzium in hand: drop it on home ground, routing around enemies on the
/// way there.
fn deliver_home(
    ctx: &TickContext<'_>,
    me: &Character,
    reachable: &FnvHashSet<Location>,
) -> Option<Action> {
    if ctx.grid.is_own(me.position) {
        if ctx.item_at(me.position).is_none() {
            debug!("carrier {} delivers at {:?}", me.id, me.position);
            return Some(Action::drop(&me.id));
        }
        // The landing cell is taken; shuffle to the nearest free own cell.
        let free = ctx
            .grid
            .locations()
            .filter(|&loc| {
                loc != me.position
                    && ctx.grid.is_own(loc)
                    && ctx.grid.walkable(loc)
                    && !ctx.grid.has_item(loc)
                    && reachable.contains(&loc)
            })
            .min_by_key(|&loc| me.position.distance_to(loc))?;
        return Some(Action::move_to(&me.id, free));
    }

    let home = scoring::safest_home_position(&ctx.grid, ctx.enemies(), reachable, me.position)?;
    // With blitzium in hand route control matters: path around enemy-held
    // cells and commit to a single step. When boxed in, hand the move to the
    // engine instead.
    let grid = &ctx.grid;
    match search::shortest_path(me.position, home, |loc| grid.passable(loc)) {
        Some(path) if path.len() >= 2 => {
            debug!("carrier {} heads home toward {:?}", me.id, home);
            Action::step(&me.id, me.position, path[1])
        }
        _ => Some(Action::move_to(&me.id, home)),
    }
}

/// Only radiant in hand: get rid of it just across the border.
fn dump_liability(
    ctx: &TickContext<'_>,
    me: &Character,
    reachable: &FnvHashSet<Location>,
) -> Option<Action> {
    let here_unloads = !ctx.grid.is_own(me.position)
        && ctx.item_at(me.position).is_none()
        && (ctx.grid.is_enemy_zone(me.position)
            || ctx.grid.neighbors(me.position).any(|next| ctx.grid.is_own(next)));
    if here_unloads {
        debug!("carrier {} dumps radiant at {:?}", me.id, me.position);
        return Some(Action::drop(&me.id));
    }

    let radius = (ctx.grid.width() + ctx.grid.height()) as u32;
    let spot = scoring::nearest_drop_spot(&ctx.grid, reachable, me.position, radius)?;
    Some(Action::move_to(&me.id, spot))
}

/// Empty hands: radiant polluting our territory always comes first, then
/// the best blitzium abroad, enemy territory before neutral ground.
fn collect(
    ctx: &TickContext<'_>,
    me: &Character,
    reachable: &FnvHashSet<Location>,
) -> Option<Action> {
    if let Some(item) = scoring::nearest_target(&ctx.items, reachable, me.position, |item| {
        item.is_radiant() && ctx.grid.is_own(item.position)
    }) {
        debug!("carrier {} clears radiant at {:?}", me.id, item.position);
        return Some(approach(me, item.position));
    }

    for zone in [Zone::Enemy, Zone::Neutral] {
        let candidate = scoring::best_value_target(&ctx.items, reachable, me.position, |item| {
            item.is_blitzium() && ctx.grid.zone_of(item.position) == zone
        });
        if let Some(item) = candidate {
            if scoring::is_safe(&ctx.grid, ctx.enemies(), item.position, &me.carried_items) {
                debug!(
                    "carrier {} goes for blitzium worth {} at {:?}",
                    me.id, item.value, item.position
                );
                return Some(approach(me, item.position));
            }
        }
    }

    None
}

fn approach(me: &Character, target: Location) -> Action {
    if me.position == target {
        Action::grab(&me.id)
    } else {
        Action::move_to(&me.id, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn decide(state: &crate::game_state::TeamGameState, index: usize) -> Option<Action> {
        let mut ctx = TickContext::new(state);
        Carrier.decide(&mut ctx, &state.your_characters[index])
    }

    #[test]
    fn liability_at_home_beats_treasure_abroad() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_ally(&mut state, "c1", 1, 2);
        fixtures::add_item(&mut state, 3, 2, "radiant_slag", -5);
        fixtures::add_item(&mut state, 8, 2, "blitzium_core", 25);

        let action = decide(&state, 0).expect("an action");
        assert_eq!(
            action,
            Action::move_to("c1", Location::from_coords(3, 2))
        );
    }

    #[test]
    fn grabs_when_standing_on_the_target() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_ally(&mut state, "c1", 3, 2);
        fixtures::add_item(&mut state, 3, 2, "radiant_slag", -5);

        let action = decide(&state, 0).expect("an action");
        assert_eq!(action, Action::grab("c1"));
    }

    #[test]
    fn prefers_enemy_zone_blitzium_over_richer_neutral_finds() {
        // Columns 4..6 neutral on an 10-wide map.
        let mut state = fixtures::split_state(10, 5, 4);
        for x in 4..6 {
            for y in 0..5 {
                state.team_zone_grid[x][y as usize] = String::new();
            }
        }
        fixtures::add_ally(&mut state, "c1", 1, 2);
        fixtures::add_item(&mut state, 5, 2, "blitzium_core", 25);
        fixtures::add_item(&mut state, 8, 2, "blitzium_nugget", 5);

        let action = decide(&state, 0).expect("an action");
        assert_eq!(
            action,
            Action::move_to("c1", Location::from_coords(8, 2))
        );
    }

    #[test]
    fn unreachable_treasure_is_ignored() {
        let mut state = fixtures::split_state(10, 3, 5);
        // Wall off the rightmost column entirely.
        for y in 0..3 {
            fixtures::add_wall(&mut state, 8, y);
        }
        fixtures::add_ally(&mut state, "c1", 1, 1);
        fixtures::add_item(&mut state, 9, 1, "blitzium_core", 25);
        fixtures::add_item(&mut state, 6, 1, "blitzium_nugget", 5);

        let action = decide(&state, 0).expect("an action");
        assert_eq!(
            action,
            Action::move_to("c1", Location::from_coords(6, 1))
        );
    }

    #[test]
    fn delivers_blitzium_on_home_ground() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_carrying_ally(
            &mut state,
            "c1",
            2,
            2,
            vec![fixtures::item(0, 0, "blitzium_ingot", 15)],
        );

        let action = decide(&state, 0).expect("an action");
        assert_eq!(action, Action::drop("c1"));
    }

    #[test]
    fn laden_carrier_abroad_steps_toward_home() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_carrying_ally(
            &mut state,
            "c1",
            7,
            2,
            vec![fixtures::item(0, 0, "blitzium_ingot", 15)],
        );

        let action = decide(&state, 0).expect("an action");
        // One directional step, and it must head toward our half.
        assert_eq!(action, Action::MoveLeft {
            character_id: "c1".to_owned()
        });
    }

    #[test]
    fn dumps_radiant_in_enemy_territory() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_carrying_ally(
            &mut state,
            "c1",
            7,
            2,
            vec![fixtures::item(0, 0, "radiant_core", -10)],
        );

        let action = decide(&state, 0).expect("an action");
        assert_eq!(action, Action::drop("c1"));
    }

    #[test]
    fn radiant_is_not_dropped_onto_an_occupied_cell() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_item(&mut state, 7, 2, "blitzium_nugget", 5);
        fixtures::add_carrying_ally(
            &mut state,
            "c1",
            7,
            2,
            vec![fixtures::item(0, 0, "radiant_core", -10)],
        );

        let action = decide(&state, 0).expect("an action");
        match action {
            Action::MoveTo { position, .. } => assert_ne!(position, Location::from_coords(7, 2)),
            other => panic!("expected a move to a drop spot, got {other:?}"),
        }
    }

    #[test]
    fn dead_carriers_do_nothing() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_ally(&mut state, "c1", 1, 2);
        state.your_characters[0].alive = false;
        fixtures::add_item(&mut state, 3, 2, "radiant_slag", -5);

        assert_eq!(decide(&state, 0), None);
    }

    #[test]
    fn unsafe_treasure_is_passed_over() {
        let mut state = fixtures::split_state(10, 5, 5);
        fixtures::add_ally(&mut state, "c1", 1, 2);
        fixtures::add_item(&mut state, 8, 2, "blitzium_core", 25);
        // Two enemies parked right next to the prize.
        fixtures::add_enemy(&mut state, "e1", 8, 1);
        fixtures::add_enemy(&mut state, "e2", 8, 3);

        assert_eq!(decide(&state, 0), None);
    }
}
