//! HUD text and the debug window, painted with egui on top of the sprite pass.
//!
//! Integration pattern: egui requires a three-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The frame-rate counter and the end-of-run banner are always painted. The
//! debug window only appears while `debug_visible` is set (toggled by F3).

use dash_core::time::FrameClock;
use dash_core::world::GamePhase;
use egui::{Align2, Color32, FontId, Pos2};
use winit::window::Window;

const FPS_COLOR: Color32 = Color32::from_rgb(0, 158, 47);
const LOSS_COLOR: Color32 = Color32::from_rgb(230, 41, 55);
const WIN_COLOR: Color32 = Color32::from_rgb(0, 228, 48);

const FPS_FONT_SIZE: f32 = 20.0;
const HEADLINE_FONT_SIZE: f32 = 60.0;
const PROMPT_FONT_SIZE: f32 = 35.0;

#[derive(Debug, Clone, Default)]
pub struct HudStats {
    pub phase: GamePhase,
    pub player_y: f32,
    pub velocity_y: f32,
    pub airborne: bool,
    pub finish_line: f32,
    pub sprite_count: u32,
    pub draw_calls: u32,
    pub texture_binds: u32,
    pub runs_won: u32,
    pub runs_lost: u32,
}

/// One line of end-of-run text, positioned in game space (top-left anchor).
#[derive(Debug, Clone, PartialEq)]
pub struct BannerLine {
    pub text: &'static str,
    pub position: (f32, f32),
    pub size: f32,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndBanner {
    pub headline: BannerLine,
    pub prompt: BannerLine,
}

impl EndBanner {
    /// Text for an ended run on a `width` x `height` game area; `None` while playing.
    pub fn for_phase(phase: GamePhase, width: f32, height: f32) -> Option<Self> {
        let (cx, cy) = (width / 2.0, height / 2.0);
        let (headline, headline_pos, color) = match phase {
            GamePhase::Playing => return None,
            GamePhase::Lost => ("Game Over!", (cx - 150.0, cy - 60.0), LOSS_COLOR),
            GamePhase::Won => ("You Win!", (cx - 130.0, cy - 50.0), WIN_COLOR),
        };
        Some(Self {
            headline: BannerLine {
                text: headline,
                position: headline_pos,
                size: HEADLINE_FONT_SIZE,
                color,
            },
            prompt: BannerLine {
                text: "Press R to restart",
                position: (cx - 150.0, cy + 10.0),
                size: PROMPT_FONT_SIZE,
                color,
            },
        })
    }
}

pub struct HudOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub debug_visible: bool,
    /// Game-space size; HUD positions are laid out against it.
    pub game_size: (f32, f32),
}

impl HudOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
        game_size: (f32, f32),
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            debug_visible: false,
            game_size,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!(
            "Debug window: {}",
            if self.debug_visible { "ON" } else { "OFF" }
        );
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        clock: &FrameClock,
        stats: &HudStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let game_size = self.game_size;
        let debug_visible = self.debug_visible;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            // Game space may be stretched onto a larger window; scale HUD
            // positions the same way the sprite camera does.
            let screen = ctx.screen_rect();
            let scale = egui::vec2(
                screen.width() / game_size.0.max(1.0),
                screen.height() / game_size.1.max(1.0),
            );
            let to_screen = |x: f32, y: f32| Pos2::new(x * scale.x, y * scale.y);

            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("hud"),
            ));

            painter.text(
                to_screen(0.0, 0.0),
                Align2::LEFT_TOP,
                format!("{:.0} FPS", clock.smoothed_fps),
                FontId::proportional(FPS_FONT_SIZE * scale.y),
                FPS_COLOR,
            );

            if let Some(banner) = EndBanner::for_phase(stats.phase, game_size.0, game_size.1) {
                for line in [&banner.headline, &banner.prompt] {
                    painter.text(
                        to_screen(line.position.0, line.position.1),
                        Align2::LEFT_TOP,
                        line.text,
                        FontId::proportional(line.size * scale.y),
                        line.color,
                    );
                }
            }

            if debug_visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 30.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                        ui.label(format!("Step: {:.4} s", clock.dt));
                        ui.label(format!("Frame: {}", clock.frame_count));
                        ui.separator();
                        ui.label(format!("Phase: {}", stats.phase));
                        ui.label(format!("Player y: {:.1}", stats.player_y));
                        ui.label(format!("Velocity y: {:.1}", stats.velocity_y));
                        ui.label(format!("Airborne: {}", stats.airborne));
                        ui.label(format!("Finish line x: {:.0}", stats.finish_line));
                        ui.separator();
                        ui.label(format!("Sprites: {}", stats.sprite_count));
                        ui.label(format!("Draw calls: {}", stats.draw_calls));
                        ui.label(format!("Texture binds: {}", stats.texture_binds));
                        ui.label(format!(
                            "Runs won/lost: {}/{}",
                            stats.runs_won, stats.runs_lost
                        ));
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
