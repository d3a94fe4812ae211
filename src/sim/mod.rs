//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::check_collision;
pub use rect::Rect;
pub use state::{
    Faller, FallerKind, GameEvent, GamePhase, GameState, Particle, ParticleColor, Player,
    SpawnRates,
};
pub use tick::{TickInput, add_particles, tick};
