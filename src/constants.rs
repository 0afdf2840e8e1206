//! Tuned behavior constants.
//!
//! These are match-tested tuning values, kept as named constants so the
//! scoring and role code reads in terms of intent rather than literals.

/// Base threat assigned to a living enemy before distance scaling.
pub const THREAT_BASE: f32 = 100.0;

/// Threat lost per tile of Manhattan distance between an enemy and the
/// nearest border cell of our territory.
pub const THREAT_DECAY_PER_TILE: f32 = 0.1;

/// Floor for the distance factor; a far-away enemy never scores below
/// `THREAT_BASE * THREAT_MIN_DISTANCE_FACTOR`.
pub const THREAT_MIN_DISTANCE_FACTOR: f32 = 0.2;

/// Multiplier applied when an enemy is already inside our territory.
pub const HOME_INVASION_THREAT_MULTIPLIER: f32 = 5.0;

/// Danger radius around a living enemy while carrying blitzium; a single
/// enemy inside this radius makes a position unsafe.
pub const LADEN_DANGER_RADIUS: u32 = 2;

/// Danger radius around living enemies while carrying nothing of value.
pub const UNLADEN_DANGER_RADIUS: u32 = 1;

/// Number of enemies tolerated inside `UNLADEN_DANGER_RADIUS` before a
/// position becomes unsafe.
pub const UNLADEN_ENEMY_TOLERANCE: usize = 1;

/// Radius used when counting enemy pressure on candidate home cells.
pub const HOME_RISK_RADIUS: u32 = 3;

/// Weight of the defender's own approach distance when scoring border cells
/// for interception (the enemy's approach distance has weight 1).
pub const INTERCEPT_SELF_DISTANCE_WEIGHT: f32 = 0.5;

/// Distance discount for steps that land adjacent to a living enemy.
pub const CONTACT_STEP_BONUS: i64 = 2;

/// A defender only starts cleanup when no living enemy is within this radius.
pub const CLEANUP_SAFETY_RADIUS: u32 = 3;

/// Maximum distance to a liability item considered for defender cleanup.
pub const CLEANUP_ITEM_RADIUS: u32 = 5;

/// Maximum self -> item -> drop round trip a defender accepts for cleanup.
pub const CLEANUP_TRIP_BUDGET: u32 = 8;

/// Base score of any border cell as a patrol destination.
pub const PATROL_BASE_SCORE: f32 = 10.0;

/// Patrol score added per own-territory cell in the 3x3 neighborhood.
pub const PATROL_COVERAGE_WEIGHT: f32 = 0.1;
