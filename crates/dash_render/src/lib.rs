//! GPU side of the game: surface and device setup, the textured-quad
//! pipeline, PNG textures, and the fixed game-space camera.

pub mod camera;
pub mod gpu_context;
pub mod sprite_pipeline;
pub mod texture;
pub mod vertex;

pub use camera::Camera2D;
pub use gpu_context::GpuContext;
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use vertex::SpriteVertex;
