//! Shared snapshot builders for unit tests.

use crate::game_state::{
    Character, GameConstants, GameMap, Item, TeamGameState, TileType,
};
use crate::grid::GridIndex;
use crate::location::Location;
use fnv::FnvHashSet;

/// An all-open map split down a vertical line: columns left of `split` are
/// ours ("us"), the rest belong to "them".
pub(crate) fn split_state(width: u32, height: u32, split: u32) -> TeamGameState {
    let tiles = (0..width)
        .map(|_| (0..height).map(|_| TileType::Empty).collect())
        .collect();
    let team_zone_grid = (0..width)
        .map(|x| {
            (0..height)
                .map(|_| if x < split { "us" } else { "them" }.to_owned())
                .collect()
        })
        .collect();

    TeamGameState {
        current_tick_number: 1,
        current_team_id: "us".to_owned(),
        map: GameMap {
            width,
            height,
            tiles,
        },
        team_zone_grid,
        items: Vec::new(),
        your_characters: Vec::new(),
        other_characters: Vec::new(),
        constants: GameConstants {
            max_number_of_items_carried_per_character: 2,
        },
    }
}

pub(crate) fn add_wall(state: &mut TeamGameState, x: u32, y: u32) {
    state.map.tiles[x as usize][y as usize] = TileType::Wall;
}

pub(crate) fn item(x: u32, y: u32, item_type: &str, value: i32) -> Item {
    Item {
        position: Location::from_coords(x, y),
        item_type: item_type.to_owned(),
        value,
    }
}

pub(crate) fn add_item(state: &mut TeamGameState, x: u32, y: u32, item_type: &str, value: i32) {
    state.items.push(item(x, y, item_type, value));
}

fn character(id: &str, team_id: &str, x: u32, y: u32, carried: Vec<Item>) -> Character {
    Character {
        id: id.to_owned(),
        team_id: team_id.to_owned(),
        position: Location::from_coords(x, y),
        alive: true,
        number_of_carried_items: carried.len() as u32,
        carried_items: carried,
    }
}

pub(crate) fn add_ally(state: &mut TeamGameState, id: &str, x: u32, y: u32) {
    state
        .your_characters
        .push(character(id, "us", x, y, Vec::new()));
}

pub(crate) fn add_carrying_ally(
    state: &mut TeamGameState,
    id: &str,
    x: u32,
    y: u32,
    carried: Vec<Item>,
) {
    state.your_characters.push(character(id, "us", x, y, carried));
}

pub(crate) fn add_enemy(state: &mut TeamGameState, id: &str, x: u32, y: u32) {
    state
        .other_characters
        .push(character(id, "them", x, y, Vec::new()));
}

/// Reachability set covering every cell: for tests that do not exercise the
/// reachability filter itself.
pub(crate) fn all_cells(grid: &GridIndex) -> FnvHashSet<Location> {
    grid.locations().collect()
}
