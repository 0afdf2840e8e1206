//! Per-tick decision context.
//!
//! `TickContext` bundles everything one tick's decisions share: the borrowed
//! snapshot, the grid index, an owned copy of the item list, and the target
//! registry. Constructing it *is* the tick-boundary reset: there is no
//! "first ally in the list" convention; the harness builds one context,
//! evaluates every character against it, and drops it.
//!
//! `apply_local_effect` keeps the context consistent *within* a tick: once a
//! character commits to a grab or drop, later characters in the same tick see
//! the item list as it will look after the engine applies that action.

use crate::game_state::{Action, Character, Item, TeamGameState};
use crate::grid::GridIndex;
use crate::location::Location;
use crate::search;
use fnv::{FnvHashMap, FnvHashSet};
use log::warn;

/// A defender's claim on an enemy.
#[derive(Clone, Debug)]
pub struct Target {
    pub enemy_id: String,
    pub defender_id: String,
    pub threat_level: f32,
    pub last_seen: Location,
}

/// Cross-agent bookkeeping ensuring at most one defender pursues a given
/// enemy at a time. Lives on the tick context, so it is reset structurally
/// at every tick boundary.
#[derive(Default)]
pub struct TargetRegistry {
    by_enemy: FnvHashMap<String, Target>,
}

impl TargetRegistry {
    /// Drop claims on enemies that died or vanished from the snapshot.
    pub fn prune_dead(&mut self, enemies: &[Character]) {
        self.by_enemy.retain(|enemy_id, _| {
            enemies
                .iter()
                .any(|enemy| enemy.alive && enemy.id == *enemy_id)
        });
    }

    /// The defender currently claiming this enemy, if any.
    pub fn holder_of(&self, enemy_id: &str) -> Option<&str> {
        self.by_enemy
            .get(enemy_id)
            .map(|target| target.defender_id.as_str())
    }

    /// Claim an enemy for a defender. Succeeds when the enemy is unclaimed
    /// or already claimed by the same defender; a claim held by another
    /// defender is never overwritten.
    pub fn claim(&mut self, enemy: &Character, defender_id: &str, threat_level: f32) -> bool {
        if let Some(holder) = self.holder_of(&enemy.id) {
            if holder != defender_id {
                return false;
            }
        }
        self.by_enemy.insert(
            enemy.id.clone(),
            Target {
                enemy_id: enemy.id.clone(),
                defender_id: defender_id.to_owned(),
                threat_level,
                last_seen: enemy.position,
            },
        );
        true
    }

    pub fn assignment_of(&self, defender_id: &str) -> Option<&Target> {
        self.by_enemy
            .values()
            .find(|target| target.defender_id == defender_id)
    }

    pub fn len(&self) -> usize {
        self.by_enemy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_enemy.is_empty()
    }
}

/// Everything one tick's decisions share.
pub struct TickContext<'a> {
    pub state: &'a TeamGameState,
    pub grid: GridIndex,
    /// Item list overlay: the snapshot's items plus the local effects of
    /// actions already committed this tick.
    pub items: Vec<Item>,
    pub targets: TargetRegistry,
}

impl<'a> TickContext<'a> {
    pub fn new(state: &'a TeamGameState) -> Self {
        TickContext {
            state,
            grid: GridIndex::build(state),
            items: state.items.clone(),
            targets: TargetRegistry::default(),
        }
    }

    pub fn enemies(&self) -> &'a [Character] {
        &self.state.other_characters
    }

    pub fn item_at(&self, loc: Location) -> Option<&Item> {
        self.items.iter().find(|item| item.position == loc)
    }

    /// Cells reachable from `start` through walkable ground, computed by
    /// flood fill. Each role computes this once per decision and filters
    /// every candidate through it.
    pub fn reachable_from(&self, start: Location) -> FnvHashSet<Location> {
        let grid = &self.grid;
        search::flood_fill(start, |loc| grid.walkable_neighbors(loc))
    }

    /// Fold a committed action's grab/drop effect into the overlay so the
    /// remaining characters this tick decide against consistent state.
    /// Inconsistent inputs (dropping empty-handed, grabbing from a bare
    /// cell) are ignored with a warning rather than corrupting the overlay.
    pub fn apply_local_effect(&mut self, character: &Character, action: &Action) {
        match action {
            Action::Drop { .. } => match character.carried_items.last() {
                Some(carried) => {
                    self.items.push(Item {
                        position: character.position,
                        item_type: carried.item_type.clone(),
                        value: carried.value,
                    });
                    self.grid.set_item(character.position);
                }
                None => {
                    warn!("{} dropped while carrying nothing", character.id);
                }
            },
            Action::Grab { .. } => {
                match self
                    .items
                    .iter()
                    .position(|item| item.position == character.position)
                {
                    Some(index) => {
                        self.items.remove(index);
                        if self.item_at(character.position).is_none() {
                            self.grid.clear_item(character.position);
                        }
                    }
                    None => {
                        warn!("{} grabbed from an empty cell", character.id);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn registry_enforces_one_defender_per_enemy() {
        let mut state = fixtures::split_state(6, 3, 3);
        fixtures::add_enemy(&mut state, "e1", 4, 1);
        let enemy = state.other_characters[0].clone();

        let mut registry = TargetRegistry::default();
        assert!(registry.claim(&enemy, "d1", 80.0));
        assert!(!registry.claim(&enemy, "d2", 80.0));
        // Re-claiming by the holder refreshes the entry.
        assert!(registry.claim(&enemy, "d1", 90.0));
        assert_eq!(registry.holder_of("e1"), Some("d1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn pruning_releases_dead_enemies() {
        let mut state = fixtures::split_state(6, 3, 3);
        fixtures::add_enemy(&mut state, "e1", 4, 1);

        let mut registry = TargetRegistry::default();
        registry.claim(&state.other_characters[0].clone(), "d1", 80.0);

        state.other_characters[0].alive = false;
        registry.prune_dead(&state.other_characters);
        assert!(registry.is_empty());
    }

    #[test]
    fn drop_effect_is_visible_to_later_agents() {
        let mut state = fixtures::split_state(6, 3, 3);
        fixtures::add_carrying_ally(
            &mut state,
            "c1",
            4,
            1,
            vec![fixtures::item(0, 0, "radiant_slag", -5)],
        );
        let character = state.your_characters[0].clone();

        let mut ctx = TickContext::new(&state);
        let drop_cell = character.position;
        assert!(!ctx.grid.has_item(drop_cell));

        ctx.apply_local_effect(&character, &Action::drop("c1"));
        assert!(ctx.grid.has_item(drop_cell));
        assert_eq!(ctx.item_at(drop_cell).map(|item| item.value), Some(-5));
    }

    #[test]
    fn grab_effect_removes_the_item() {
        let mut state = fixtures::split_state(6, 3, 3);
        fixtures::add_item(&mut state, 2, 1, "blitzium_nugget", 5);
        fixtures::add_ally(&mut state, "c1", 2, 1);
        let character = state.your_characters[0].clone();

        let mut ctx = TickContext::new(&state);
        assert!(ctx.grid.has_item(character.position));

        ctx.apply_local_effect(&character, &Action::grab("c1"));
        assert!(!ctx.grid.has_item(character.position));
        assert!(ctx.item_at(character.position).is_none());
    }

    #[test]
    fn inconsistent_effects_are_ignored() {
        let mut state = fixtures::split_state(6, 3, 3);
        fixtures::add_ally(&mut state, "c1", 2, 1);
        let character = state.your_characters[0].clone();

        let mut ctx = TickContext::new(&state);
        ctx.apply_local_effect(&character, &Action::drop("c1"));
        ctx.apply_local_effect(&character, &Action::grab("c1"));
        assert!(ctx.items.is_empty());
    }
}
