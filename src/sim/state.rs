//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for SPACE
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for SPACE to restart
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    RunStarted,
    /// Player picked up a power-up (score after pickup)
    PowerUpCollected { score: u32 },
    /// Player touched an obstacle, ending the run
    PlayerHit { score: u32 },
    /// The run's score beat the stored high score
    NewHighScore { score: u32 },
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }

    /// Rightmost x the player can reach
    #[inline]
    pub fn max_x() -> f32 {
        SCREEN_WIDTH - PLAYER_SIZE
    }

    /// Apply one tick of horizontal input, then keep the sprite on screen
    pub fn steer(&mut self, left: bool, right: bool) {
        if left && self.pos.x > 0.0 {
            self.pos.x -= PLAYER_SPEED;
        }
        if right && self.pos.x < Self::max_x() {
            self.pos.x += PLAYER_SPEED;
        }
        self.pos.x = self.pos.x.clamp(0.0, Self::max_x());
    }
}

/// Kind of falling entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallerKind {
    /// Ends the run on contact
    Obstacle,
    /// Adds to the score on contact
    PowerUp,
}

impl FallerKind {
    /// Side length of the entity's square sprite
    pub fn size(&self) -> f32 {
        match self {
            FallerKind::Obstacle => OBSTACLE_SIZE,
            FallerKind::PowerUp => POWERUP_SIZE,
        }
    }

    /// Rightmost spawn position
    pub fn spawn_max_x(&self) -> u32 {
        match self {
            FallerKind::Obstacle => OBSTACLE_SPAWN_MAX_X,
            FallerKind::PowerUp => POWERUP_SPAWN_MAX_X,
        }
    }
}

/// One-in-N spawn chances per playing tick (0 disables spawning)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRates {
    pub obstacle_odds: u32,
    pub powerup_odds: u32,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            obstacle_odds: OBSTACLE_SPAWN_ODDS,
            powerup_odds: POWERUP_SPAWN_ODDS,
        }
    }
}

impl SpawnRates {
    /// Nothing ever spawns
    pub const NONE: SpawnRates = SpawnRates {
        obstacle_odds: 0,
        powerup_odds: 0,
    };

    pub fn odds(&self, kind: FallerKind) -> u32 {
        match kind {
            FallerKind::Obstacle => self.obstacle_odds,
            FallerKind::PowerUp => self.powerup_odds,
        }
    }
}

/// An obstacle or power-up falling down the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faller {
    pub kind: FallerKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical speed captured at spawn time (pixels per tick)
    pub speed: f32,
}

impl Faller {
    pub fn new(kind: FallerKind, x: f32, speed: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, 0.0),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.kind.size())
    }

    /// Move down by one tick's worth of speed
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the top edge has left the bottom of the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

/// Particle colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Player hit an obstacle
    Red,
    /// Player collected a power-up
    Green,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Remaining lifetime in ticks
    pub life: u32,
}

impl Particle {
    /// Advance one tick. Returns false once the particle has expired.
    pub fn step(&mut self) -> bool {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Spawn and particle RNG
    pub rng: Pcg32,
    /// Current screen
    pub phase: GamePhase,
    /// Score of the current (or last) run
    pub score: u32,
    /// Best score seen, persisted between sessions
    pub high_score: u32,
    /// Playing ticks elapsed over all runs; drives the difficulty ramp
    pub time_ticks: u64,
    /// Fall speed given to newly spawned entities
    pub fall_speed: f32,
    pub spawn_rates: SpawnRates,
    pub player: Player,
    /// Active obstacles (no ordering guarantee)
    pub obstacles: Vec<Faller>,
    /// Active power-ups (no ordering guarantee)
    pub powerups: Vec<Faller>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Whether collisions emit particle bursts
    pub particles_enabled: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the start screen
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            high_score,
            time_ticks: 0,
            fall_speed: INITIAL_FALL_SPEED,
            spawn_rates: SpawnRates::default(),
            player: Player::default(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            particles_enabled: true,
            events: Vec::new(),
        }
    }

    /// Reset everything run-specific and enter `Playing`
    ///
    /// `time_ticks` carries over: the speed ramp counts playing ticks across
    /// restarts.
    pub fn start_run(&mut self) {
        self.score = 0;
        self.fall_speed = INITIAL_FALL_SPEED;
        self.player = Player::default();
        self.obstacles.clear();
        self.powerups.clear();
        self.particles.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted);
    }

    /// End the run, raising the high score if it was beaten
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::PlayerHit { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
