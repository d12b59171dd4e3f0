//! Dapper Dasher -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. The loop sleeps until
//! the frame clock's next deadline, then everything happens inside
//! `RedrawRequested`:
//!
//!   1. `begin_frame()` -- measure the wall-clock delta (capped) as this frame's step
//!   2. `World::tick` -- one variable-step simulation tick with this frame's input
//!   3. Rebuild the sprite mesh from the world
//!   4. Upload camera uniform, issue draw calls, composite the egui HUD
//!
//! Startup failures (no GPU, missing texture, bad config) are logged and end the
//! process with a non-zero exit code.

mod assets;
mod batch;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::{GameTextures, TextureSlot};
use batch::{build_mesh, count_texture_binds, DrawCall};
use dash_core::config::{load_config_or_default, GameConfig};
use dash_core::input::{InputState, Key};
use dash_core::time::FrameClock;
use dash_core::world::{TickReport, World, WorldLayout};
use dash_hud::{HudOverlay, HudStats};
use dash_platform::window::PlatformConfig;
use dash_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex};

const CONFIG_PATH: &str = "dasher.json";

const CLEAR_COLOR: wgpu::Color = wgpu::Color::WHITE;

/// All mutable game state lives here. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface are available.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    clock: FrameClock,
    input: InputState,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,
    hud: HudOverlay,
    world: World,
    textures: GameTextures,
    last_report: TickReport,

    // The sprite mesh is rebuilt on the CPU each frame, then streamed into these
    // GPU buffers. Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
    sprite_count: usize,
}

impl EngineState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);

        // Every texture must load before the world exists: its layout comes
        // from the texture sizes.
        let textures = GameTextures::load(&gpu.device, &gpu.queue, &sprite_pipeline, &config.assets)?;
        let sizes = textures.sizes();
        let layout = WorldLayout::from_textures(
            config,
            sizes[TextureSlot::Player.index()],
            sizes[TextureSlot::Obstacle.index()],
            TextureSlot::BACKGROUNDS.map(|slot| sizes[slot.index()].0),
        );
        let world = World::new(config, layout, fastrand::Rng::new());
        log::info!(
            "World ready: {} textures, finish line at x={:.0}",
            textures.len(),
            world.finish_line()
        );

        let game_size = (layout.width, layout.height);
        let camera = Camera2D::new(game_size.0, game_size.1);
        let hud = HudOverlay::new(&gpu.device, gpu.surface_format, &window, game_size);
        let clock = FrameClock::new(config.window.target_fps, config.physics.max_frame_dt);

        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            gpu,
            clock,
            input: InputState::new(),
            camera,
            sprite_pipeline,
            hud,
            world,
            textures,
            last_report: TickReport::default(),
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
            sprite_count: 0,
        };
        state.rebuild_mesh();
        Ok(state)
    }

    fn rebuild_mesh(&mut self) {
        let mesh = build_mesh(&self.world, &self.textures.sizes());
        self.ensure_mesh_capacity(mesh.vertices.len(), mesh.indices.len());
        if !mesh.vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        }
        self.sprite_count = mesh.sprite_count();
        self.draw_calls = mesh.draw_calls;
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn hud_stats(&self) -> HudStats {
        HudStats {
            phase: self.world.phase,
            player_y: self.world.player.position.y,
            velocity_y: self.world.body.velocity_y,
            airborne: self.last_report.airborne,
            finish_line: self.world.finish_line(),
            sprite_count: self.sprite_count as u32,
            draw_calls: self.draw_calls.len() as u32,
            texture_binds: count_texture_binds(&self.draw_calls) as u32,
            runs_won: self.world.stats.won,
            runs_lost: self.world.stats.lost,
        }
    }

    fn render(&mut self) {
        let camera_uniform = self.camera.build_uniform();
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = self.hud_stats();
        let (egui_primitives, egui_textures_delta) =
            self.hud.prepare(&self.window, &self.clock, &stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            let mut last_bound: Option<TextureSlot> = None;
            for draw in &self.draw_calls {
                if last_bound != Some(draw.texture) {
                    render_pass.set_bind_group(1, &self.textures.get(draw.texture).bind_group, &[]);
                    last_bound = Some(draw.texture);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.hud.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.hud
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.hud.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: GameConfig,
    state: Option<EngineState>,
    startup_error: Option<String>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: None,
            startup_error: None,
        }
    }

    fn platform_config(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.config.window.title.clone(),
            width: self.config.window.width,
            height: self.config.window.height,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let started = dash_platform::window::create_window(event_loop, &self.platform_config())
            .and_then(|window| EngineState::new(window, &self.config));
        match started {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => {
                self.startup_error = Some(format!("Startup failed: {err}"));
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        let deadline = state.clock.next_deadline();
        if Instant::now() >= deadline {
            state.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.hud.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(game_key),
                            ElementState::Released => state.input.key_up(game_key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                let dt = state.clock.begin_frame();

                if state.input.is_just_pressed(Key::Escape) {
                    log::info!("Escape pressed, exiting.");
                    event_loop.exit();
                    return;
                }
                if state.input.is_just_pressed(Key::F3) {
                    state.hud.toggle_debug();
                }

                state.last_report = state.world.tick(state.input.frame_input(), dt);
                state.input.end_frame();

                state.rebuild_mesh();
                state.render();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            log::info!(
                "Releasing {} textures after {} frames (won {}, lost {})",
                state.textures.len(),
                state.clock.frame_count,
                state.world.stats.won,
                state.world.stats.lost
            );
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn run() -> Result<(), String> {
    let config = load_config_or_default(Path::new(CONFIG_PATH))?;

    let event_loop = EventLoop::new().map_err(|e| format!("Failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("Event loop error: {e}"))?;

    match app.startup_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Dapper Dasher starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
