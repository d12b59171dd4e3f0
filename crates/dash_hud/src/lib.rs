pub mod hud_overlay;

pub use hud_overlay::{EndBanner, HudOverlay, HudStats};
