//! Decision engine for a turn-based, grid-world, two-resource capture game.
//!
//! Each tick the harness hands over a fully-observable `TeamGameState`
//! snapshot; `Bot::decide` returns one action per own character. Carriers
//! fetch blitzium from abroad and haul radiant out of home territory;
//! defenders claim the most threatening enemies and meet them at the
//! border. Both roles are built on the same grid index, generic A* search,
//! and spatial scoring utilities.
//!
//! The crate performs no I/O and installs no logger; it reports through the
//! `log` facade and leaves transport and logger setup to the caller.

pub mod bot;
pub mod constants;
pub mod context;
pub mod game_state;
pub mod grid;
pub mod location;
pub mod roles;
pub mod scoring;
pub mod search;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bot::{Bot, RoleAssignment, RoleKind};
pub use context::{Target, TargetRegistry, TickContext};
pub use game_state::{
    Action, Character, GameConstants, GameMap, Item, ResourceFamily, TeamGameState, TileType,
};
pub use grid::{CellFlags, GridArray, GridIndex, Zone};
pub use location::Location;
pub use roles::{Carrier, Defender, Role};
