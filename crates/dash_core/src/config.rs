//! Game tuning loaded from an optional JSON file.
//!
//! Every field has a default, so a missing file (or a file that only overrides a
//! few values) is valid. A present file must declare `"version": "0.1"` and pass
//! [`validate_config`]; a broken config is reported rather than silently ignored.

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_VERSION: &str = "0.1";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub version: String,
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub obstacles: ObstacleConfig,
    pub parallax: ParallaxConfig,
    pub assets: AssetConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            window: WindowConfig::default(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            obstacles: ObstacleConfig::default(),
            parallax: ParallaxConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dapper Dasher!".to_string(),
            width: 512,
            height: 380,
            target_fps: 144,
        }
    }
}

/// Vertical motion of the runner and horizontal motion of the obstacles.
/// Velocities are px/s, gravity is px/s², screen y grows downward.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub obstacle_velocity: f32,
    /// Longest frame delta fed to the simulation, in seconds.
    pub max_frame_dt: f32,
    /// How far above the ground line the runner starts the first run.
    pub spawn_drop: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            jump_velocity: -600.0,
            obstacle_velocity: -200.0,
            max_frame_dt: 0.25,
            spawn_drop: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub frame_time: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            frame_time: 1.0 / 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Horizontal distance between consecutive spawn slots.
    pub spacing: f32,
    /// Upper bound (inclusive) of the whole-pixel jitter added to each slot.
    pub max_jitter: u32,
    /// Inset applied to every obstacle hitbox before collision tests.
    pub hitbox_padding: f32,
    pub frame_time: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            spacing: 500.0,
            max_jitter: 300,
            hitbox_padding: 50.0,
            frame_time: 1.0 / 16.0,
        }
    }
}

/// Far, mid and close background layers, in that order.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub speeds: [f32; 3],
    pub scale: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            speeds: [20.0, 40.0, 80.0],
            scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub background_far: String,
    pub background_mid: String,
    pub background_close: String,
    pub obstacle_sheet: String,
    pub player_sheet: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            background_far: "textures/far-buildings.png".to_string(),
            background_mid: "textures/back-buildings.png".to_string(),
            background_close: "textures/foreground.png".to_string(),
            obstacle_sheet: "textures/12_nebula_spritesheet.png".to_string(),
            player_sheet: "textures/scarfy.png".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`GameConfig::default`].
pub fn load_config_or_default(path: &Path) -> Result<GameConfig, String> {
    if !path.exists() {
        log::info!(
            "No config at '{}', using built-in defaults",
            path.display()
        );
        return Ok(GameConfig::default());
    }
    let config = load_config(path)?;
    log::info!("Loaded config from '{}'", path.display());
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.version != CONFIG_VERSION {
        return Err(format!(
            "Config validation failed: unsupported version '{}'",
            config.version
        ));
    }
    if config.window.width == 0 || config.window.height == 0 {
        return Err("Config validation failed: window size must be non-zero".to_string());
    }
    if config.window.target_fps == 0 {
        return Err("Config validation failed: target_fps must be > 0".to_string());
    }

    let physics = &config.physics;
    if physics.gravity <= 0.0 {
        return Err("Config validation failed: gravity must be > 0".to_string());
    }
    if physics.jump_velocity >= 0.0 {
        return Err(
            "Config validation failed: jump_velocity must be negative (screen y points down)"
                .to_string(),
        );
    }
    if physics.max_frame_dt <= 0.0 {
        return Err("Config validation failed: max_frame_dt must be > 0".to_string());
    }
    if physics.spawn_drop < 0.0 {
        return Err("Config validation failed: spawn_drop must be >= 0".to_string());
    }

    if config.player.frame_time <= 0.0 || config.obstacles.frame_time <= 0.0 {
        return Err("Config validation failed: frame_time must be > 0".to_string());
    }
    if config.obstacles.spacing <= 0.0 {
        return Err("Config validation failed: obstacle spacing must be > 0".to_string());
    }
    if config.obstacles.hitbox_padding < 0.0 {
        return Err("Config validation failed: hitbox_padding must be >= 0".to_string());
    }

    if config.parallax.scale <= 0.0 {
        return Err("Config validation failed: parallax scale must be > 0".to_string());
    }
    for (i, speed) in config.parallax.speeds.iter().enumerate() {
        if *speed < 0.0 {
            return Err(format!(
                "Config validation failed: parallax layer {} has negative speed",
                i
            ));
        }
    }

    let assets = &config.assets;
    for (name, path) in [
        ("background_far", &assets.background_far),
        ("background_mid", &assets.background_mid),
        ("background_close", &assets.background_close),
        ("obstacle_sheet", &assets.obstacle_sheet),
        ("player_sheet", &assets.player_sheet),
    ] {
        if path.is_empty() {
            return Err(format!(
                "Config validation failed: asset path '{}' is empty",
                name
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "dash_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        validate_config(&config).expect("defaults should validate");
        assert_eq!(config.window.width, 512);
        assert_eq!(config.window.height, 380);
        assert_eq!(config.window.target_fps, 144);
        assert_eq!(config.physics.gravity, 1000.0);
        assert_eq!(config.physics.jump_velocity, -600.0);
        assert_eq!(config.physics.obstacle_velocity, -200.0);
        assert_eq!(config.parallax.speeds, [20.0, 40.0, 80.0]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("missing");
        let config = load_config_or_default(&path).expect("missing file is fine");
        assert_eq!(config.window.title, "Dapper Dasher!");
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let path = temp_file_path("partial");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "physics": { "gravity": 1500.0 },
              "obstacles": { "max_jitter": 0 }
            }"#,
        )
        .expect("write temp file");

        let config = load_config(&path).expect("should parse");
        assert_eq!(config.physics.gravity, 1500.0);
        assert_eq!(config.physics.jump_velocity, -600.0);
        assert_eq!(config.obstacles.max_jitter, 0);
        assert_eq!(config.obstacles.spacing, 500.0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_bad_version() {
        let path = temp_file_path("bad_version");
        fs::write(&path, r#"{ "version": "9.9" }"#).expect("write temp file");
        let err = load_config(&path).expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_upward_gravity_and_downward_jump() {
        let mut config = GameConfig::default();
        config.physics.gravity = -10.0;
        assert!(validate_config(&config).unwrap_err().contains("gravity"));

        let mut config = GameConfig::default();
        config.physics.jump_velocity = 600.0;
        assert!(validate_config(&config)
            .unwrap_err()
            .contains("jump_velocity"));
    }

    #[test]
    fn rejects_zero_frame_time() {
        let mut config = GameConfig::default();
        config.obstacles.frame_time = 0.0;
        assert!(validate_config(&config).unwrap_err().contains("frame_time"));
    }

    #[test]
    fn rejects_zero_window_size() {
        let mut config = GameConfig::default();
        config.window.width = 0;
        assert!(validate_config(&config)
            .unwrap_err()
            .contains("window size"));

        let mut config = GameConfig::default();
        config.window.height = 0;
        assert!(validate_config(&config)
            .unwrap_err()
            .contains("window size"));
    }

    #[test]
    fn rejects_non_positive_spacing_and_scale() {
        for spacing in [0.0, -500.0] {
            let mut config = GameConfig::default();
            config.obstacles.spacing = spacing;
            assert!(validate_config(&config)
                .unwrap_err()
                .contains("obstacle spacing"));
        }

        for scale in [0.0, -2.0] {
            let mut config = GameConfig::default();
            config.parallax.scale = scale;
            assert!(validate_config(&config)
                .unwrap_err()
                .contains("parallax scale"));
        }
    }

    #[test]
    fn rejects_empty_asset_path() {
        let mut config = GameConfig::default();
        config.assets.player_sheet.clear();
        assert!(validate_config(&config)
            .unwrap_err()
            .contains("player_sheet"));
    }

    #[test]
    fn rejects_malformed_json() {
        let path = temp_file_path("malformed");
        fs::write(&path, "{ not json").expect("write temp file");
        let err = load_config(&path).expect_err("malformed should fail");
        assert!(err.contains("Failed to parse"));
        let _ = fs::remove_file(path);
    }
}
