//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in screen pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::Rect;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a solid rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

/// Generate vertices for a rectangle showing a whole texture
pub fn sprite(r: &Rect) -> [Vertex; 6] {
    textured_rect(r, Vec2::ZERO, Vec2::ONE, colors::WHITE)
}

/// Generate vertices for a rectangle showing the `uv_min..uv_max` region of a texture
pub fn textured_rect(r: &Rect, uv_min: Vec2, uv_max: Vec2, tint: [f32; 4]) -> [Vertex; 6] {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    let (u0, v0, u1, v1) = (uv_min.x, uv_min.y, uv_max.x, uv_max.y);
    [
        Vertex::textured(l, t, u0, v0, tint),
        Vertex::textured(l, b, u0, v1, tint),
        Vertex::textured(rt, t, u1, v0, tint),
        Vertex::textured(rt, t, u1, v0, tint),
        Vertex::textured(l, b, u0, v1, tint),
        Vertex::textured(rt, b, u1, v1, tint),
    ]
}
