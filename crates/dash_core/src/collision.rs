//! Axis-aligned rectangle overlap between the runner and the obstacles.
//!
//! Obstacle hitboxes are shrunk inward by a fixed padding before testing,
//! because the nebula sprites carry a wide transparent margin. The runner's
//! rectangle is always tested unpadded.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(position.x, position.y, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by `padding` on every side. A padding larger than half the
    /// size yields a negative extent, which never overlaps anything.
    pub fn inset(&self, padding: f32) -> Self {
        Self {
            x: self.x + padding,
            y: self.y + padding,
            width: self.width - 2.0 * padding,
            height: self.height - 2.0 * padding,
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Index of the first obstacle whose padded hitbox overlaps `player`.
pub fn first_hit<I>(player: Rect, obstacles: I, padding: f32) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    obstacles
        .into_iter()
        .position(|obstacle| obstacle.inset(padding).overlaps(&player))
}
