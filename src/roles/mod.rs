//! Agent policies: one decision per character per tick.
//!
//! Both roles implement `Role` and share the grid index, search engine, and
//! spatial scorer through the tick context instead of re-implementing them.
//! A `None` decision means "emit nothing for this character": it is the
//! normal outcome whenever every priority tier comes up empty.

mod carrier;
mod defender;

pub use carrier::Carrier;
pub use defender::Defender;

use crate::context::TickContext;
use crate::game_state::{Action, Character};

pub trait Role {
    fn decide(&self, ctx: &mut TickContext<'_>, character: &Character) -> Option<Action>;
}
