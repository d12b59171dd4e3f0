use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: origin at the top-left, y growing downward, one unit
/// per game pixel. The game area is stretched to fill whatever the surface is.
pub struct Camera2D {
    pub game_size: (f32, f32),
}

impl Camera2D {
    pub fn new(game_width: f32, game_height: f32) -> Self {
        Self {
            game_size: (game_width, game_height),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let (width, height) = self.game_size;
        Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
