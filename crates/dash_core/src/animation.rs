//! Sprite-sheet animation: a source rectangle stepping across one row of a sheet.
//!
//! Every animated sprite owns a [`SpriteAnimation`]. Advancing accumulates frame
//! time and, once a frame's duration has elapsed, moves to the next column and
//! rewrites the source rectangle's x offset. Leftover time past the boundary is
//! dropped, so long frames never skip columns.

use glam::Vec2;

use crate::collision::Rect;

/// Grid layout of a sprite sheet texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub columns: u32,
    pub rows: u32,
}

impl SpriteSheet {
    /// Runner: a single row of six frames.
    pub const PLAYER: SpriteSheet = SpriteSheet::new(6, 1);
    /// Nebula: an 8x8 grid, of which the first row is cycled.
    pub const OBSTACLE: SpriteSheet = SpriteSheet::new(8, 8);

    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Size of one cell for a texture of `texture_size` pixels.
    pub fn frame_size(&self, texture_size: (u32, u32)) -> (f32, f32) {
        (
            texture_size.0 as f32 / self.columns as f32,
            texture_size.1 as f32 / self.rows as f32,
        )
    }

    /// Highest frame index when cycling a row.
    pub fn max_frame(&self) -> u32 {
        self.columns.saturating_sub(1)
    }
}

/// Runtime animation state for one on-screen sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteAnimation {
    /// Source rectangle within the sheet, in texels.
    pub frame: Rect,
    /// Top-left corner in game space.
    pub position: Vec2,
    pub frame_index: u32,
    /// Seconds each frame stays on screen.
    pub update_time: f32,
    /// Seconds accumulated since the last frame change.
    pub running_time: f32,
}

impl SpriteAnimation {
    pub fn new(frame_size: (f32, f32), position: Vec2, update_time: f32) -> Self {
        Self {
            frame: Rect::new(0.0, 0.0, frame_size.0, frame_size.1),
            position,
            frame_index: 0,
            update_time,
            running_time: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.frame.width
    }

    pub fn height(&self) -> f32 {
        self.frame.height
    }

    /// On-screen bounds, the size of one frame at `position`.
    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, self.frame.width, self.frame.height)
    }

    /// Accumulate `dt` seconds and step to the next frame once `update_time`
    /// has elapsed, wrapping to frame 0 after `max_frame`.
    ///
    /// The source rect is taken from the index after stepping, so the drawn
    /// cell is always column `frame_index`, never the one before it.
    pub fn advance(&mut self, dt: f32, max_frame: u32) {
        self.running_time += dt;
        if self.running_time < self.update_time {
            return;
        }

        self.running_time = 0.0;
        self.frame_index += 1;
        if self.frame_index > max_frame {
            self.frame_index = 0;
        }
        self.frame.x = self.frame_index as f32 * self.frame.width;
    }
}
