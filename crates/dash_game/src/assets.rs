//! The five textures the game draws with, loaded once before the loop.
//!
//! Textures are addressed by [`TextureSlot`] rather than by path so the mesh
//! builder can batch on a `Copy` key and tests can run without a GPU.

use dash_core::config::AssetConfig;
use dash_render::{SpritePipeline, Texture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    BackgroundFar,
    BackgroundMid,
    BackgroundClose,
    Obstacle,
    Player,
}

impl TextureSlot {
    pub const COUNT: usize = 5;

    pub const ALL: [TextureSlot; Self::COUNT] = [
        TextureSlot::BackgroundFar,
        TextureSlot::BackgroundMid,
        TextureSlot::BackgroundClose,
        TextureSlot::Obstacle,
        TextureSlot::Player,
    ];

    /// Background layers, far to close.
    pub const BACKGROUNDS: [TextureSlot; 3] = [
        TextureSlot::BackgroundFar,
        TextureSlot::BackgroundMid,
        TextureSlot::BackgroundClose,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn path(self, assets: &AssetConfig) -> &str {
        match self {
            Self::BackgroundFar => &assets.background_far,
            Self::BackgroundMid => &assets.background_mid,
            Self::BackgroundClose => &assets.background_close,
            Self::Obstacle => &assets.obstacle_sheet,
            Self::Player => &assets.player_sheet,
        }
    }
}

/// Texel sizes of every slot, indexed by [`TextureSlot::index`].
pub type TextureSizes = [(u32, u32); TextureSlot::COUNT];

pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

pub struct GameTextures {
    slots: Vec<GpuSpriteTexture>,
}

impl GameTextures {
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &SpritePipeline,
        assets: &AssetConfig,
    ) -> Result<Self, String> {
        let slots = TextureSlot::ALL
            .iter()
            .map(|slot| load_texture_asset(device, queue, pipeline, slot.path(assets)))
            .collect::<Result<Vec<_>, String>>()?;
        Ok(Self { slots })
    }

    pub fn get(&self, slot: TextureSlot) -> &GpuSpriteTexture {
        &self.slots[slot.index()]
    }

    pub fn sizes(&self) -> TextureSizes {
        TextureSlot::ALL.map(|slot| self.get(slot).texture.size)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

fn load_texture_asset(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
    asset_path: &str,
) -> Result<GpuSpriteTexture, String> {
    let bytes = std::fs::read(asset_path)
        .map_err(|e| format!("Failed to read texture '{}': {e}", asset_path))?;
    let texture = Texture::from_bytes(device, queue, &bytes, asset_path)?;
    let bind_group = pipeline.create_texture_bind_group(device, &texture);
    log::info!(
        "Loaded texture '{}' ({}x{})",
        asset_path,
        texture.size.0,
        texture.size.1
    );
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}
