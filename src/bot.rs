//! Public API for the decision engine.
//!
//! The harness calls `Bot::decide` once per tick with the snapshot it
//! received and sends back whatever actions come out. All per-tick state
//! (grid index, border cells, target registry, item overlay) lives in a
//! context constructed at the top of the call, so tick-boundary resets are
//! structural rather than conventional.

use crate::context::TickContext;
use crate::game_state::{Action, TeamGameState};
use crate::roles::{Carrier, Defender, Role};
use log::{debug, trace};

/// Which policy drives a character.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoleKind {
    Carrier,
    Defender,
}

/// How characters are mapped to roles, by their index in the snapshot's
/// character list.
#[derive(Clone, Debug)]
pub enum RoleAssignment {
    /// Even indices carry, odd indices defend.
    Alternating,
    /// Explicit per-index roles; indices past the end alternate.
    Fixed(Vec<RoleKind>),
}

impl RoleAssignment {
    fn role_for(&self, index: usize) -> RoleKind {
        let alternating = if index % 2 == 0 {
            RoleKind::Carrier
        } else {
            RoleKind::Defender
        };
        match self {
            RoleAssignment::Alternating => alternating,
            RoleAssignment::Fixed(roles) => roles.get(index).copied().unwrap_or(alternating),
        }
    }
}

/// The decision engine. Stateless across ticks: everything is derived fresh
/// from each snapshot.
pub struct Bot {
    assignment: RoleAssignment,
}

impl Bot {
    pub fn new() -> Self {
        Bot {
            assignment: RoleAssignment::Alternating,
        }
    }

    pub fn with_assignment(assignment: RoleAssignment) -> Self {
        Bot { assignment }
    }

    /// Decide one action per own character for this tick. Characters are
    /// evaluated in snapshot order; each committed grab/drop is folded into
    /// the context before the next character decides.
    pub fn decide(&self, state: &TeamGameState) -> Vec<Action> {
        let mut ctx = TickContext::new(state);
        let mut actions = Vec::with_capacity(state.your_characters.len());

        for (index, character) in state.your_characters.iter().enumerate() {
            let role = self.assignment.role_for(index);
            let action = match role {
                RoleKind::Carrier => Carrier.decide(&mut ctx, character),
                RoleKind::Defender => Defender.decide(&mut ctx, character),
            };

            match action {
                Some(action) => {
                    debug!("tick {}: {:?} -> {:?}", state.current_tick_number, role, action);
                    ctx.apply_local_effect(character, &action);
                    actions.push(action);
                }
                None => {
                    trace!(
                        "tick {}: {:?} {} holds",
                        state.current_tick_number,
                        role,
                        character.id
                    );
                }
            }
        }

        actions
    }
}

impl Default for Bot {
    fn default() -> Self {
        Bot::new()
    }
}
