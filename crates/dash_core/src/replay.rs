use crate::world::{FrameInput, World};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub frame_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub reset: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<FrameInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(FrameInput {
                    jump: frame.jump,
                    reset: frame.reset,
                });
            }
        }
        out
    }

    pub fn run(&self, world: &mut World) {
        for input in self.expanded_inputs() {
            world.tick(input, self.frame_dt);
        }
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frame_dt <= 0.0 {
        return Err("Replay validation failed: frame_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 144.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::world::{GamePhase, WorldLayout};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "dash_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn sample_world(seed: u64) -> World {
        let layout = WorldLayout {
            width: 512.0,
            height: 380.0,
            player_frame: (128.0, 128.0),
            obstacle_frame: (100.0, 100.0),
            background_widths: [256, 256, 352],
        };
        World::new(&GameConfig::default(), layout, fastrand::Rng::with_seed(seed))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "repeat": 3 },
                { "jump": true },
                { "reset": true, "repeat": 2 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        assert!((replay.frame_dt - 1.0 / 144.0).abs() < 1e-9);
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 6);
        assert!(expanded[3].jump);
        assert!(expanded[5].reset);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frame_dt": 0.01, "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frame_dt": 0.006944444,
              "frames": [
                { "repeat": 144 },
                { "jump": true },
                { "repeat": 200 },
                { "jump": true },
                { "repeat": 400 },
                { "reset": true },
                { "repeat": 100 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let mut run_a = sample_world(42);
        let mut run_b = sample_world(42);
        replay.run(&mut run_a);
        replay.run(&mut run_b);

        assert_eq!(run_a.phase, run_b.phase);
        assert_eq!(run_a.stats, run_b.stats);
        assert_eq!(run_a.player, run_b.player);
        assert_eq!(run_a.body, run_b.body);
        assert_eq!(run_a.obstacles, run_b.obstacles);
        assert_eq!(run_a.background, run_b.background);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn standing_still_loses_to_first_obstacle() {
        let replay = ReplaySequence {
            frame_dt: 1.0 / 144.0,
            frames: vec![ReplayFrame {
                jump: false,
                reset: false,
                repeat: 144 * 5,
            }],
        };
        let mut world = sample_world(3);
        replay.run(&mut world);
        assert_eq!(world.phase, GamePhase::Lost);
        assert_eq!(world.stats.lost, 1);
    }
}
