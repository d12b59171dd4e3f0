//! Endless horizontal background built from three scrolling layers.
//!
//! Each layer is drawn as two tiles side by side starting at its offset. The
//! offset drifts left at the layer's speed and snaps back to zero once a whole
//! tile has passed, which is invisible because both tiles show the same image.

pub const LAYER_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub offset: f32,
    /// Leftward drift in px/s.
    pub speed: f32,
    /// Drawn width of one tile: texture width times scale.
    pub tile_width: f32,
}

impl ParallaxLayer {
    pub fn new(speed: f32, tile_width: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            tile_width,
        }
    }

    pub fn scroll(&mut self, dt: f32) {
        self.offset -= self.speed * dt;
        if self.offset <= -self.tile_width {
            self.offset = 0.0;
        }
    }

    /// Left edges of the two tiles covering the screen.
    pub fn tile_positions(&self) -> [f32; 2] {
        [self.offset, self.offset + self.tile_width]
    }
}

/// Far, mid and close layers, in draw order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxBackground {
    pub layers: [ParallaxLayer; LAYER_COUNT],
    pub scale: f32,
}

impl ParallaxBackground {
    pub fn new(speeds: [f32; LAYER_COUNT], texture_widths: [u32; LAYER_COUNT], scale: f32) -> Self {
        let layers =
            std::array::from_fn(|i| ParallaxLayer::new(speeds[i], texture_widths[i] as f32 * scale));
        Self { layers, scale }
    }

    pub fn scroll(&mut self, dt: f32) {
        for layer in &mut self.layers {
            layer.scroll(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_width_scales_texture_width() {
        let bg = ParallaxBackground::new([20.0, 40.0, 80.0], [256, 256, 352], 2.0);
        assert_eq!(bg.layers[0].tile_width, 512.0);
        assert_eq!(bg.layers[2].tile_width, 704.0);
    }

    #[test]
    fn layers_drift_at_their_own_speed() {
        let mut bg = ParallaxBackground::new([20.0, 40.0, 80.0], [256, 256, 256], 2.0);
        bg.scroll(0.5);
        assert_eq!(bg.layers[0].offset, -10.0);
        assert_eq!(bg.layers[1].offset, -20.0);
        assert_eq!(bg.layers[2].offset, -40.0);
    }

    #[test]
    fn wraps_to_exactly_zero_not_remainder() {
        let mut layer = ParallaxLayer::new(80.0, 512.0);
        layer.offset = -511.0;
        // Step of 8px crosses the tile boundary by 7px; the remainder is dropped.
        layer.scroll(0.1);
        assert_eq!(layer.offset, 0.0);
    }

    #[test]
    fn landing_exactly_on_boundary_wraps() {
        let mut layer = ParallaxLayer::new(100.0, 50.0);
        layer.scroll(0.5);
        assert_eq!(layer.offset, 0.0);
    }

    #[test]
    fn offset_stays_within_one_tile() {
        let mut layer = ParallaxLayer::new(80.0, 512.0);
        for _ in 0..10_000 {
            layer.scroll(1.0 / 144.0);
            assert!(layer.offset <= 0.0);
            assert!(layer.offset > -512.0);
        }
    }

    #[test]
    fn second_tile_starts_where_first_ends() {
        let mut layer = ParallaxLayer::new(20.0, 512.0);
        layer.scroll(1.0);
        assert_eq!(layer.tile_positions(), [-20.0, 492.0]);
    }
}
