//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (solids and stars in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, resolve_aabb};
pub use state::{Collectible, GameState, Player, PlayerAnim};
pub use tick::{TickInput, tick};
