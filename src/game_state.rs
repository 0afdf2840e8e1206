//! Snapshot and action wire types exchanged with the game harness.
//!
//! The harness delivers one `TeamGameState` per tick as JSON (camelCase
//! field names, string team and character ids) and expects a list of
//! serialized `Action`s back. Everything here is a plain data carrier; all
//! interpretation (zones, walkability, occupancy) lives in the grid index.

use crate::game_state::ResourceFamily::*;
use crate::location::Location;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tile classification from the map wire format. Tags this crate does not
/// know are tolerated and treated as open ground.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileType {
    Empty,
    Wall,
    Unknown,
}

impl Serialize for TileType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tag = match self {
            TileType::Empty => "EMPTY",
            TileType::Wall => "WALL",
            TileType::Unknown => "UNKNOWN",
        };
        serializer.serialize_str(tag)
    }
}

impl<'de> Deserialize<'de> for TileType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "EMPTY" => TileType::Empty,
            "WALL" => TileType::Wall,
            _ => TileType::Unknown,
        })
    }
}

/// The static map: dimensions plus `tiles[x][y]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameMap {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<TileType>>,
}

/// The two resource families. Radiant items are liabilities to be dumped in
/// enemy territory; blitzium items are assets to be brought home.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceFamily {
    Radiant,
    Blitzium,
}

/// An item on the ground or in a character's hands. The `type` tag carries
/// the family prefix plus a subtype (e.g. `radiant_slag`, `blitzium_ingot`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub position: Location,
    #[serde(rename = "type")]
    pub item_type: String,
    pub value: i32,
}

impl Item {
    pub fn family(&self) -> Option<ResourceFamily> {
        if self.item_type.starts_with("radiant") {
            Some(Radiant)
        } else if self.item_type.starts_with("blitzium") {
            Some(Blitzium)
        } else {
            None
        }
    }

    pub fn is_radiant(&self) -> bool {
        self.family() == Some(Radiant)
    }

    pub fn is_blitzium(&self) -> bool {
        self.family() == Some(Blitzium)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub team_id: String,
    pub position: Location,
    pub alive: bool,
    pub carried_items: Vec<Item>,
    pub number_of_carried_items: u32,
}

impl Character {
    /// Whether this character can pick up one more item. A carried count
    /// already at or past capacity (including inconsistent snapshots that
    /// report more than capacity) reads as no space.
    pub fn has_space(&self, constants: &GameConstants) -> bool {
        self.number_of_carried_items < constants.max_number_of_items_carried_per_character
    }

    pub fn carrying(&self, family: ResourceFamily) -> bool {
        self.carried_items
            .iter()
            .any(|item| item.family() == Some(family))
    }

    pub fn carried_value(&self) -> i32 {
        self.carried_items.iter().map(|item| item.value).sum()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConstants {
    pub max_number_of_items_carried_per_character: u32,
}

/// One tick's fully-observable snapshot, exactly as the harness sends it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGameState {
    pub current_tick_number: u32,
    pub current_team_id: String,
    pub map: GameMap,
    /// Per-cell owner label indexed `[x][y]`; the empty string is neutral.
    pub team_zone_grid: Vec<Vec<String>>,
    pub items: Vec<Item>,
    pub your_characters: Vec<Character>,
    pub other_characters: Vec<Character>,
    pub constants: GameConstants,
}

/// One action for one character. "No action" is expressed by emitting
/// nothing for that character, so there is no variant for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "MOVE_UP", rename_all = "camelCase")]
    MoveUp { character_id: String },
    #[serde(rename = "MOVE_DOWN", rename_all = "camelCase")]
    MoveDown { character_id: String },
    #[serde(rename = "MOVE_LEFT", rename_all = "camelCase")]
    MoveLeft { character_id: String },
    #[serde(rename = "MOVE_RIGHT", rename_all = "camelCase")]
    MoveRight { character_id: String },
    #[serde(rename = "MOVE_TO", rename_all = "camelCase")]
    MoveTo {
        character_id: String,
        position: Location,
    },
    #[serde(rename = "GRAB", rename_all = "camelCase")]
    Grab { character_id: String },
    #[serde(rename = "DROP", rename_all = "camelCase")]
    Drop { character_id: String },
}

impl Action {
    pub fn move_to(character_id: &str, position: Location) -> Self {
        Action::MoveTo {
            character_id: character_id.to_owned(),
            position,
        }
    }

    pub fn grab(character_id: &str) -> Self {
        Action::Grab {
            character_id: character_id.to_owned(),
        }
    }

    pub fn drop(character_id: &str) -> Self {
        Action::Drop {
            character_id: character_id.to_owned(),
        }
    }

    /// Directional move for a single orthogonal step from `from` to `to`.
    /// Returns `None` when the two cells are not orthogonally adjacent.
    pub fn step(character_id: &str, from: Location, to: Location) -> Option<Self> {
        let dx = to.x() as i16 - from.x() as i16;
        let dy = to.y() as i16 - from.y() as i16;
        let character_id = character_id.to_owned();

        match (dx, dy) {
            (0, -1) => Some(Action::MoveUp { character_id }),
            (0, 1) => Some(Action::MoveDown { character_id }),
            (-1, 0) => Some(Action::MoveLeft { character_id }),
            (1, 0) => Some(Action::MoveRight { character_id }),
            _ => None,
        }
    }

    pub fn character_id(&self) -> &str {
        match self {
            Action::MoveUp { character_id }
            | Action::MoveDown { character_id }
            | Action::MoveLeft { character_id }
            | Action::MoveRight { character_id }
            | Action::MoveTo { character_id, .. }
            | Action::Grab { character_id }
            | Action::Drop { character_id } => character_id,
        }
    }
}
