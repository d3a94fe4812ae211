//! Collision detection between sprite bounds
//!
//! Every entity is an axis-aligned box, so a collision is a strict overlap
//! test. Rects that only share an edge do not collide.

use super::rect::Rect;

/// Check whether two rects overlap
///
/// Edges are exclusive: a rect ending at x = 100 does not touch one starting
/// at x = 100. Empty rects never collide.
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Index of the first rect in `others` that overlaps `rect`
pub fn first_hit<'a, I>(rect: &Rect, others: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    others
        .into_iter()
        .position(|other| check_collision(rect, other))
}
