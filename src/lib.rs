//! Dynamic Dodger - A falling-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline and frame building
//! - `platform`: Native input handling
//! - `assets`: Sprite loading and scaling
//! - `highscores`: Persisted high score
//! - `settings`: Optional user settings file

pub mod assets;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreError, HighScoreFile};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time fed to the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Screen dimensions (logical pixels, origin top-left, y down)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 7.0;
    pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 2.0 * PLAYER_SIZE;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 60.0;
    /// Rightmost spawn x for obstacles
    pub const OBSTACLE_SPAWN_MAX_X: u32 = 750;
    /// One in N ticks spawns an obstacle
    pub const OBSTACLE_SPAWN_ODDS: u32 = 60;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 50.0;
    /// Rightmost spawn x for power-ups
    pub const POWERUP_SPAWN_MAX_X: u32 = 770;
    /// One in N ticks spawns a power-up
    pub const POWERUP_SPAWN_ODDS: u32 = 100;

    /// Fall speed at the start of a run (pixels per tick)
    pub const INITIAL_FALL_SPEED: f32 = 3.0;
    /// Fall speed added every `SPEED_RAMP_INTERVAL` playing ticks
    pub const SPEED_RAMP_STEP: f32 = 0.1;
    pub const SPEED_RAMP_INTERVAL: u64 = 500;

    /// Particle bursts
    pub const PARTICLE_BURST: usize = 10;
    pub const PARTICLE_LIFETIME: u32 = 20;
    pub const PARTICLE_MAX_SPEED: i32 = 3;
    pub const PARTICLE_RADIUS: f32 = 3.0;
}
