//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one frame at a time.

use glam::Vec2;
use rand::Rng;

use super::collision::{check_collision, first_hit};
use super::state::{Faller, FallerKind, GameEvent, GamePhase, GameState, Particle, ParticleColor};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// LEFT arrow held
    pub left: bool,
    /// RIGHT arrow held
    pub right: bool,
    /// SPACE pressed this tick (one-shot)
    pub start: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start && state.phase != GamePhase::Playing {
        state.start_run();
    }

    if state.phase == GamePhase::Playing {
        tick_playing(state, input);
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    state.player.steer(input.left, input.right);

    // Gradually increase fall speed
    state.time_ticks += 1;
    if state.time_ticks % SPEED_RAMP_INTERVAL == 0 {
        state.fall_speed += SPEED_RAMP_STEP;
        log::debug!("Fall speed now {:.1}", state.fall_speed);
    }

    if let Some(obstacle) = roll_spawn(state, FallerKind::Obstacle) {
        state.obstacles.push(obstacle);
    }
    if let Some(powerup) = roll_spawn(state, FallerKind::PowerUp) {
        state.powerups.push(powerup);
    }

    for faller in state.obstacles.iter_mut().chain(state.powerups.iter_mut()) {
        faller.fall();
    }
    state.obstacles.retain(|o| !o.is_off_screen());
    state.powerups.retain(|p| !p.is_off_screen());

    // Player vs obstacles: one burst per obstacle touched
    let player_rect = state.player.rect();
    let hits = state
        .obstacles
        .iter()
        .filter(|o| check_collision(&player_rect, &o.rect()))
        .count();
    let origin = state.player.pos;
    for _ in 0..hits {
        add_particles(state, origin, ParticleColor::Red);
    }

    // Player vs power-ups, still resolved on the tick that ends the run
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if check_collision(&player_rect, &p.rect()) {
            collected.push(p.pos);
            false
        } else {
            true
        }
    });
    for origin in collected {
        state.score += 1;
        state.events.push(GameEvent::PowerUpCollected { score: state.score });
        add_particles(state, origin, ParticleColor::Green);
    }

    // Power-ups never overlap obstacles
    let obstacle_rects: Vec<_> = state.obstacles.iter().map(Faller::rect).collect();
    state
        .powerups
        .retain(|p| first_hit(&p.rect(), &obstacle_rects).is_none());

    state.particles.retain_mut(Particle::step);

    if hits > 0 {
        state.end_run();
    }
}

/// Roll the per-tick spawn chance for `kind`
fn roll_spawn(state: &mut GameState, kind: FallerKind) -> Option<Faller> {
    let odds = state.spawn_rates.odds(kind);
    if odds == 0 || !state.rng.random_ratio(1, odds) {
        return None;
    }
    let x = state.rng.random_range(0..=kind.spawn_max_x()) as f32;
    Some(Faller::new(kind, x, state.fall_speed))
}

/// Emit a burst of particles at `origin`
pub fn add_particles(state: &mut GameState, origin: Vec2, color: ParticleColor) {
    if !state.particles_enabled {
        return;
    }
    let max = PARTICLE_MAX_SPEED;
    for _ in 0..PARTICLE_BURST {
        let vel = Vec2::new(
            state.rng.random_range(-max..=max) as f32,
            state.rng.random_range(-max..=max) as f32,
        );
        state.particles.push(Particle {
            pos: origin,
            vel,
            color,
            life: PARTICLE_LIFETIME,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Player, SpawnRates};
    use proptest::prelude::*;

    const START: TickInput = TickInput {
        left: false,
        right: false,
        start: true,
    };

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, 0);
        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        state.obstacles.clear();
        state.powerups.clear();
        state.spawn_rates = SpawnRates::NONE;
        state
    }

    /// Place a faller so its top-left corner sits at `pos`
    fn faller_at(kind: FallerKind, pos: Vec2, speed: f32) -> Faller {
        let mut faller = Faller::new(kind, pos.x, speed);
        faller.pos.y = pos.y;
        faller
    }

    #[test]
    fn test_start_to_playing() {
        let mut state = GameState::new(12345, 7);
        assert_eq!(state.phase, GamePhase::Start);

        // Tick without SPACE - stays on the start screen
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.high_score, 7);
        assert_eq!(state.drain_events()[0], GameEvent::RunStarted);
    }

    #[test]
    fn test_movement_ignored_outside_playing() {
        let mut state = GameState::new(1, 0);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos.x, PLAYER_START_X);
    }

    #[test]
    fn test_player_moves_and_clamps() {
        let mut state = playing_state();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let right = TickInput {
            right: true,
            ..Default::default()
        };

        state.player.pos.x = 100.0;
        tick(&mut state, &left);
        assert_eq!(state.player.pos.x, 100.0 - PLAYER_SPEED);

        // Never crosses the left edge
        state.player.pos.x = 3.0;
        tick(&mut state, &left);
        assert_eq!(state.player.pos.x, 0.0);
        tick(&mut state, &left);
        assert_eq!(state.player.pos.x, 0.0);

        // Never crosses the right edge
        state.player.pos.x = Player::max_x() - 2.0;
        tick(&mut state, &right);
        assert_eq!(state.player.pos.x, Player::max_x());
        tick(&mut state, &right);
        assert_eq!(state.player.pos.x, Player::max_x());
    }

    #[test]
    fn test_powerup_pickup_scores() {
        let mut state = playing_state();
        let player = state.player.pos;
        state
            .powerups
            .push(faller_at(FallerKind::PowerUp, player + Vec2::new(10.0, 10.0), 0.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 1);
        assert!(state.powerups.is_empty());
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        assert!(state.particles.iter().all(|p| p.color == ParticleColor::Green));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpCollected { score: 1 })
        );
    }

    #[test]
    fn test_obstacle_ends_run_and_sets_high_score() {
        let mut state = playing_state();
        state.score = 5;
        state.high_score = 3;
        let player = state.player.pos;
        state
            .obstacles
            .push(faller_at(FallerKind::Obstacle, player + Vec2::new(20.0, 20.0), 0.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 5);
        assert!(state.particles.iter().all(|p| p.color == ParticleColor::Red));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayerHit { score: 5 }));
        assert!(events.contains(&GameEvent::NewHighScore { score: 5 }));
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut state = playing_state();
        state.score = 2;
        state.high_score = 9;
        let player = state.player.pos;
        state
            .obstacles
            .push(faller_at(FallerKind::Obstacle, player, 0.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 9);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = playing_state();
        state.score = 4;
        state.fall_speed = 5.0;
        state.time_ticks = 1234;
        state.player.pos.x = 0.0;
        state.end_run();
        state
            .obstacles
            .push(faller_at(FallerKind::Obstacle, Vec2::new(10.0, 10.0), 3.0));

        // Game over ignores movement and does not tick the run
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 1234);

        tick(&mut state, &START);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 4);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        // Ramp timer keeps counting across runs
        assert_eq!(state.time_ticks, 1235);
        assert!((state.fall_speed - INITIAL_FALL_SPEED).abs() < f32::EPSILON);
        assert!(state.obstacles.iter().all(|o| o.pos.y <= INITIAL_FALL_SPEED));
    }

    #[test]
    fn test_space_while_playing_does_not_restart() {
        let mut state = playing_state();
        state.score = 3;
        tick(&mut state, &START);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_fallers_move_and_leave_screen() {
        let mut state = playing_state();
        state.player.pos.x = 0.0;
        state.obstacles.push(faller_at(
            FallerKind::Obstacle,
            Vec2::new(700.0, SCREEN_HEIGHT - 2.0),
            3.0,
        ));
        state
            .powerups
            .push(faller_at(FallerKind::PowerUp, Vec2::new(600.0, 10.0), 4.0));

        tick(&mut state, &TickInput::default());

        assert!(state.obstacles.is_empty());
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].pos.y, 14.0);
    }

    #[test]
    fn test_powerup_overlapping_obstacle_is_removed() {
        let mut state = playing_state();
        state.player.pos.x = 0.0;
        state
            .obstacles
            .push(faller_at(FallerKind::Obstacle, Vec2::new(600.0, 50.0), 0.0));
        state
            .powerups
            .push(faller_at(FallerKind::PowerUp, Vec2::new(620.0, 70.0), 0.0));
        state
            .powerups
            .push(faller_at(FallerKind::PowerUp, Vec2::new(300.0, 70.0), 0.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].pos.x, 300.0);
    }

    #[test]
    fn test_fall_speed_ramps() {
        let mut state = playing_state();
        state.player.pos.x = 0.0;
        for _ in 0..(SPEED_RAMP_INTERVAL - 2) {
            tick(&mut state, &TickInput::default());
        }
        assert!((state.fall_speed - INITIAL_FALL_SPEED).abs() < f32::EPSILON);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, SPEED_RAMP_INTERVAL);
        assert!((state.fall_speed - (INITIAL_FALL_SPEED + SPEED_RAMP_STEP)).abs() < 1e-5);
    }

    #[test]
    fn test_spawned_fallers_capture_fall_speed() {
        let mut state = playing_state();
        state.spawn_rates = SpawnRates::default();
        state.player.pos.x = 0.0;
        state.fall_speed = 4.5;

        let mut seen = 0;
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::Playing);
            // Keep the player's column clear
            state.obstacles.retain(|o| o.pos.x > PLAYER_SIZE);
            for faller in state.obstacles.iter().chain(state.powerups.iter()) {
                assert!(faller.speed >= 4.5);
                assert!(faller.pos.x <= faller.kind.spawn_max_x() as f32);
            }
            seen += state.obstacles.len() + state.powerups.len();
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = playing_state();
        let origin = Vec2::new(100.0, 100.0);
        add_particles(&mut state, origin, ParticleColor::Green);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        for p in &state.particles {
            assert!(p.vel.x.abs() <= PARTICLE_MAX_SPEED as f32);
            assert!(p.vel.y.abs() <= PARTICLE_MAX_SPEED as f32);
        }

        for i in 1..PARTICLE_LIFETIME {
            tick(&mut state, &TickInput::default());
            assert!(state.particles.iter().all(|p| p.life == PARTICLE_LIFETIME - i));
        }
        tick(&mut state, &TickInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particles_freeze_after_game_over() {
        let mut state = playing_state();
        add_particles(&mut state, Vec2::new(100.0, 100.0), ParticleColor::Red);
        state.end_run();
        let before: Vec<_> = state.particles.iter().map(|p| (p.pos, p.life)).collect();

        tick(&mut state, &TickInput::default());

        let after: Vec<_> = state.particles.iter().map(|p| (p.pos, p.life)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_hit_tick_still_collects_powerups() {
        let mut state = playing_state();
        let player = state.player.pos;
        state
            .obstacles
            .push(faller_at(FallerKind::Obstacle, player + Vec2::new(20.0, 20.0), 0.0));
        state
            .powerups
            .push(faller_at(FallerKind::PowerUp, player + Vec2::new(-30.0, 40.0), 0.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
        assert!(state.powerups.is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PowerUpCollected { score: 1 }));
        assert!(events.contains(&GameEvent::PlayerHit { score: 1 }));
    }

    #[test]
    fn test_fall_speed_ramp_spans_restarts() {
        // Entering play runs the first playing tick
        let mut state = playing_state();
        for _ in 1..300 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 300);
        state.end_run();

        tick(&mut state, &START);
        for _ in 1..201 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 501);
        assert!((state.fall_speed - (INITIAL_FALL_SPEED + SPEED_RAMP_STEP)).abs() < 1e-5);
    }

    #[test]
    fn test_spawned_faller_falls_on_spawn_tick() {
        let mut state = playing_state();
        state.spawn_rates = SpawnRates {
            obstacle_odds: 1,
            powerup_odds: 0,
        };
        state.player.pos.x = 0.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.y, INITIAL_FALL_SPEED);
        assert_eq!(state.obstacles[0].speed, INITIAL_FALL_SPEED);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_faller_at_bottom_edge_is_kept() {
        let mut state = playing_state();
        state.player.pos.x = 0.0;
        state.obstacles.push(faller_at(
            FallerKind::Obstacle,
            Vec2::new(700.0, SCREEN_HEIGHT - 3.0),
            3.0,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.y, SCREEN_HEIGHT);

        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_particles_disabled() {
        let mut state = playing_state();
        state.particles_enabled = false;
        add_particles(&mut state, Vec2::ZERO, ParticleColor::Red);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, 0);
        let mut state2 = GameState::new(99999, 0);

        let inputs = [
            START,
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), prop::bool::weighted(0.02)).prop_map(
            |(left, right, start)| TickInput { left, right, start },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_screen(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = GameState::new(seed, 0);
            for input in &inputs {
                tick(&mut state, input);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= Player::max_x());
                prop_assert_eq!(state.player.pos.y, PLAYER_START_Y);
            }
        }

        #[test]
        fn prop_score_never_decreases_within_run(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = GameState::new(seed, 0);
            let mut last_score = 0;
            for input in &inputs {
                let was_playing = state.phase == GamePhase::Playing;
                tick(&mut state, input);
                if was_playing {
                    prop_assert!(state.score >= last_score);
                }
                prop_assert!(state.high_score >= state.score || state.phase == GamePhase::Playing);
                last_score = state.score;
            }
        }
    }
}
