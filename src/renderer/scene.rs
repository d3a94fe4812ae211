//! Frame building
//!
//! Turns a `GameState` into per-texture vertex lists. Pure CPU work, so the
//! layout of every screen is testable without a GPU.

use glam::Vec2;

use super::shapes;
use super::text::FontAtlas;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GamePhase, GameState, ParticleColor};

/// Triangles in a circle particle
const PARTICLE_SEGMENTS: u32 = 8;
/// HUD inset from the screen edges
const HUD_MARGIN: f32 = 10.0;
/// Vertical offsets of the score lines below the game-over prompt's center
const GAME_OVER_SCORE_OFFSET: f32 = 40.0;
const GAME_OVER_HIGH_SCORE_OFFSET: f32 = 80.0;

pub const START_PROMPT: &str = "Press SPACE to Start";
pub const GAME_OVER_PROMPT: &str = "Game Over! Press SPACE to Restart";

/// Texture a batch of vertices is drawn with, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Player = 0,
    Obstacle = 1,
    PowerUp = 2,
    /// Solid circles, drawn with the white texture
    Particles = 3,
    /// HUD glyphs, drawn with the font atlas
    Text = 4,
}

pub const LAYER_COUNT: usize = 5;

impl Layer {
    pub const ALL: [Layer; LAYER_COUNT] = [
        Layer::Player,
        Layer::Obstacle,
        Layer::PowerUp,
        Layer::Particles,
        Layer::Text,
    ];
}

/// Everything to draw for one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    layers: [Vec<Vertex>; LAYER_COUNT],
}

impl Frame {
    pub fn layer(&self, layer: Layer) -> &[Vertex] {
        &self.layers[layer as usize]
    }

    fn push(&mut self, layer: Layer, vertices: &[Vertex]) {
        self.layers[layer as usize].extend_from_slice(vertices);
    }

    pub fn vertex_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}

/// Build the frame for the current screen
pub fn build_frame(state: &GameState, font: &FontAtlas) -> Frame {
    let mut frame = Frame::default();
    let center_y = SCREEN_HEIGHT / 2.0;

    match state.phase {
        GamePhase::Start => {
            centered_text(&mut frame, font, START_PROMPT, center_y - font.line_height() / 2.0);
        }
        GamePhase::Playing => {
            frame.push(Layer::Player, &shapes::sprite(&state.player.rect()));
            for obstacle in &state.obstacles {
                frame.push(Layer::Obstacle, &shapes::sprite(&obstacle.rect()));
            }
            for powerup in &state.powerups {
                frame.push(Layer::PowerUp, &shapes::sprite(&powerup.rect()));
            }
            push_particles(&mut frame, state);

            let score = score_label(state.score);
            frame.push(
                Layer::Text,
                &font.text(&score, Vec2::splat(HUD_MARGIN), colors::TEXT),
            );
            let high = high_score_label(state.high_score);
            let high_x = SCREEN_WIDTH - font.text_width(&high) - HUD_MARGIN;
            frame.push(
                Layer::Text,
                &font.text(&high, Vec2::new(high_x, HUD_MARGIN), colors::TEXT),
            );
        }
        GamePhase::GameOver => {
            centered_text(&mut frame, font, GAME_OVER_PROMPT, center_y - font.line_height() / 2.0);
            centered_text(
                &mut frame,
                font,
                &score_label(state.score),
                center_y + GAME_OVER_SCORE_OFFSET,
            );
            centered_text(
                &mut frame,
                font,
                &high_score_label(state.high_score),
                center_y + GAME_OVER_HIGH_SCORE_OFFSET,
            );
        }
    }

    frame
}

fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

fn high_score_label(high_score: u32) -> String {
    format!("High Score: {}", high_score)
}

/// Horizontally centered line of text with its top edge at `top`
fn centered_text(frame: &mut Frame, font: &FontAtlas, content: &str, top: f32) {
    let x = SCREEN_WIDTH / 2.0 - font.text_width(content) / 2.0;
    frame.push(Layer::Text, &font.text(content, Vec2::new(x, top), colors::TEXT));
}

fn push_particles(frame: &mut Frame, state: &GameState) {
    for particle in &state.particles {
        let color = match particle.color {
            ParticleColor::Red => colors::PARTICLE_RED,
            ParticleColor::Green => colors::PARTICLE_GREEN,
        };
        frame.push(
            Layer::Particles,
            &shapes::circle(particle.pos, PARTICLE_RADIUS, color, PARTICLE_SEGMENTS),
        );
    }
}
