//! Circle-vs-pipe collision predicates
//!
//! A pipe is two axis-aligned rectangles separated by the gap, which is the
//! only passable vertical band. All tests are pure functions over positions
//! and radii.

use glam::Vec2;

use super::state::Pipe;

/// True when the circle's horizontal extent crosses the pipe's column.
/// Edge-touching does not count; the extents must strictly overlap.
#[inline]
pub fn overlaps_column(pipe: &Pipe, pos: Vec2, radius: f32) -> bool {
    pos.x + radius > pipe.x && pos.x - radius < pipe.x + pipe.width
}

/// True when the circle's vertical extent breaches the gap band
#[inline]
pub fn breaches_gap(pipe: &Pipe, pos: Vec2, radius: f32) -> bool {
    pos.y - radius < pipe.gap_top || pos.y + radius > pipe.gap_bottom
}

/// Circle-vs-two-rectangle test: a hit needs horizontal overlap with the
/// column and a vertical breach of the gap.
pub fn pipe_hits_circle(pipe: &Pipe, pos: Vec2, radius: f32) -> bool {
    overlaps_column(pipe, pos, radius) && breaches_gap(pipe, pos, radius)
}
