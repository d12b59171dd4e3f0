use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Fixed-size window; the game space never changes, so resizing is disabled.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(false);

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Failed to create window: {e}"))?;
    log::info!(
        "Window created: {}x{} '{}'",
        config.width,
        config.height,
        config.title
    );
    Ok(Arc::new(window))
}
