//! CPU-side sprite mesh, rebuilt from the world every frame.
//!
//! Quads are emitted in paint order (backgrounds far to close, obstacles,
//! runner). Consecutive quads that share a texture collapse into one
//! `draw_indexed` call, so a frame is at most five texture binds.

use dash_core::collision::Rect;
use dash_core::world::{World, OBSTACLE_COUNT};
use dash_render::texture::uv_rect;
use dash_render::SpriteVertex;

use crate::assets::{TextureSizes, TextureSlot};

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// The finish obstacle's tint (sRGB 230, 41, 55 in linear space).
pub const FINISH_TINT: [f32; 4] = [0.791, 0.022, 0.038, 1.0];

/// A contiguous run of indices drawn with one texture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureSlot,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct QuadSpec {
    pub texture: TextureSlot,
    /// Destination rectangle in game space, top-left anchored.
    pub rect: Rect,
    /// `[u0, v0, u1, v1]`
    pub uv: [f32; 4],
    pub color: [f32; 4],
}

#[derive(Debug, Default)]
pub struct SpriteMesh {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

impl SpriteMesh {
    pub fn sprite_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn push_quad(&mut self, spec: QuadSpec) {
        let QuadSpec {
            texture,
            rect,
            uv,
            color,
        } = spec;
        let base_index = self.vertices.len() as u32;
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

        self.vertices.extend_from_slice(&[
            SpriteVertex {
                position: [left, top],
                tex_coords: [uv[0], uv[1]],
                color,
            },
            SpriteVertex {
                position: [right, top],
                tex_coords: [uv[2], uv[1]],
                color,
            },
            SpriteVertex {
                position: [right, bottom],
                tex_coords: [uv[2], uv[3]],
                color,
            },
            SpriteVertex {
                position: [left, bottom],
                tex_coords: [uv[0], uv[3]],
                color,
            },
        ]);

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);

        self.push_draw_call(texture, draw_start, 6);
    }

    /// Append a draw call, merging with the previous one when the texture
    /// matches and the indices are contiguous.
    fn push_draw_call(&mut self, texture: TextureSlot, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if last.texture == texture && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture,
            index_start,
            index_count,
        });
    }
}

/// Build this frame's mesh. Obstacles and the runner are only drawn while the
/// run is in progress; an ended run shows the scrolling background alone.
pub fn build_mesh(world: &World, sizes: &TextureSizes) -> SpriteMesh {
    let mut mesh = SpriteMesh::default();

    let scale = world.background.scale;
    for (layer, slot) in world
        .background
        .layers
        .iter()
        .zip(TextureSlot::BACKGROUNDS)
    {
        let size = sizes[slot.index()];
        let (w, h) = (size.0 as f32 * scale, size.1 as f32 * scale);
        for x in layer.tile_positions() {
            mesh.push_quad(QuadSpec {
                texture: slot,
                rect: Rect::new(x, 0.0, w, h),
                uv: [0.0, 0.0, 1.0, 1.0],
                color: WHITE,
            });
        }
    }

    if world.phase.is_ended() {
        return mesh;
    }

    let obstacle_size = sizes[TextureSlot::Obstacle.index()];
    for (i, obstacle) in world.obstacles.iter().enumerate() {
        let frame = obstacle.frame;
        mesh.push_quad(QuadSpec {
            texture: TextureSlot::Obstacle,
            rect: obstacle.bounds(),
            uv: uv_rect(obstacle_size, frame.x, frame.y, frame.width, frame.height),
            color: if i == OBSTACLE_COUNT - 1 {
                FINISH_TINT
            } else {
                WHITE
            },
        });
    }

    let player_size = sizes[TextureSlot::Player.index()];
    let frame = world.player.frame;
    mesh.push_quad(QuadSpec {
        texture: TextureSlot::Player,
        rect: world.player.bounds(),
        uv: uv_rect(player_size, frame.x, frame.y, frame.width, frame.height),
        color: WHITE,
    });

    mesh
}

/// Texture binds the render pass will issue for `draw_calls`.
pub fn count_texture_binds(draw_calls: &[DrawCall]) -> usize {
    let mut binds = 0usize;
    let mut current: Option<TextureSlot> = None;
    for draw in draw_calls {
        if current != Some(draw.texture) {
            current = Some(draw.texture);
            binds += 1;
        }
    }
    binds
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::config::GameConfig;
    use dash_core::world::{GamePhase, WorldLayout};

    const SIZES: TextureSizes = [(256, 192), (256, 192), (352, 192), (800, 800), (768, 128)];

    fn world() -> World {
        let config = GameConfig::default();
        let layout = WorldLayout::from_textures(
            &config,
            SIZES[TextureSlot::Player.index()],
            SIZES[TextureSlot::Obstacle.index()],
            [SIZES[0].0, SIZES[1].0, SIZES[2].0],
        );
        World::new(&config, layout, fastrand::Rng::with_seed(11))
    }

    #[test]
    fn playing_frame_batches_into_one_call_per_texture() {
        let mesh = build_mesh(&world(), &SIZES);
        // 3 layers x 2 tiles + 10 obstacles + runner
        assert_eq!(mesh.sprite_count(), 17);
        assert_eq!(mesh.indices.len(), 17 * 6);

        let order: Vec<TextureSlot> = mesh.draw_calls.iter().map(|d| d.texture).collect();
        assert_eq!(order, TextureSlot::ALL.to_vec());
        assert_eq!(mesh.draw_calls[3].index_count, 10 * 6);
        assert_eq!(count_texture_binds(&mesh.draw_calls), 5);
    }

    #[test]
    fn ended_run_draws_background_only() {
        let mut world = world();
        world.phase = GamePhase::Lost;
        let mesh = build_mesh(&world, &SIZES);
        assert_eq!(mesh.sprite_count(), 6);
        assert!(mesh
            .draw_calls
            .iter()
            .all(|d| TextureSlot::BACKGROUNDS.contains(&d.texture)));
    }

    #[test]
    fn background_tiles_are_scaled_and_adjacent() {
        let mesh = build_mesh(&world(), &SIZES);
        // Close layer: second tile of the third layer is quad 5.
        let first = &mesh.vertices[4 * 4..4 * 4 + 4];
        let second = &mesh.vertices[5 * 4..5 * 4 + 4];
        assert_eq!(first[0].position, [0.0, 0.0]);
        assert_eq!(first[2].position, [704.0, 384.0]);
        assert_eq!(second[0].position, [704.0, 0.0]);
    }

    #[test]
    fn only_finish_obstacle_is_tinted() {
        let mesh = build_mesh(&world(), &SIZES);
        let obstacle_colors: Vec<[f32; 4]> = (6..16).map(|q| mesh.vertices[q * 4].color).collect();
        assert!(obstacle_colors[..OBSTACLE_COUNT - 1]
            .iter()
            .all(|c| *c == WHITE));
        assert_eq!(obstacle_colors[OBSTACLE_COUNT - 1], FINISH_TINT);
        assert_eq!(mesh.vertices[16 * 4].color, WHITE);
    }

    #[test]
    fn sprite_uvs_follow_animation_frame() {
        let mut world = world();
        world.player.frame.x = 2.0 * world.player.width();
        world.obstacles[0].frame.x = 3.0 * world.obstacles[0].width();
        let mesh = build_mesh(&world, &SIZES);

        let runner = &mesh.vertices[16 * 4..];
        assert!((runner[0].tex_coords[0] - 2.0 / 6.0).abs() < 1e-6);
        assert!((runner[2].tex_coords[0] - 3.0 / 6.0).abs() < 1e-6);
        assert_eq!(runner[2].tex_coords[1], 1.0);

        let nebula = &mesh.vertices[6 * 4..7 * 4];
        assert!((nebula[0].tex_coords[0] - 3.0 / 8.0).abs() < 1e-6);
        assert!((nebula[2].tex_coords[1] - 1.0 / 8.0).abs() < 1e-6);
    }

    #[test]
    fn quads_split_when_texture_changes_back() {
        let mut mesh = SpriteMesh::default();
        let quad = |texture| QuadSpec {
            texture,
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            uv: [0.0, 0.0, 1.0, 1.0],
            color: WHITE,
        };
        mesh.push_quad(quad(TextureSlot::Obstacle));
        mesh.push_quad(quad(TextureSlot::Obstacle));
        mesh.push_quad(quad(TextureSlot::Player));
        mesh.push_quad(quad(TextureSlot::Obstacle));
        assert_eq!(mesh.draw_calls.len(), 3);
        assert_eq!(mesh.draw_calls[0].index_count, 12);
        assert_eq!(mesh.draw_calls[2].index_start, 18);
        assert_eq!(count_texture_binds(&mesh.draw_calls), 3);
    }
}
