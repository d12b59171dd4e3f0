//! The whole mutable game state and the per-frame tick that drives it.
//!
//! Tick order (every frame, regardless of phase unless noted):
//!
//!   1. scroll the parallax background
//!   2. derive `airborne` from the runner's position
//!   3. gravity or ground snap, then the jump override (Playing only)
//!   4. slide obstacles left, integrate the runner's y
//!   5. advance animations (runner only while grounded)
//!   6. collision, then the win test (Playing only)
//!   7. reset on request (ended only)
//!
//! `airborne` from step 2 is reused by steps 5 and 6 even though step 4 may
//! have moved the runner. A runner that lands this tick is still treated as
//! airborne until the next one.

use glam::Vec2;

use crate::animation::{SpriteAnimation, SpriteSheet};
use crate::collision;
use crate::config::{GameConfig, ObstacleConfig, PhysicsConfig};
use crate::kinematics::{self, RunnerBody};
use crate::parallax::{ParallaxBackground, LAYER_COUNT};

pub const OBSTACLE_COUNT: usize = 10;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    #[default]
    Playing,
    Lost,
    Won,
}

impl GamePhase {
    pub fn is_ended(self) -> bool {
        !matches!(self, Self::Playing)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Lost => "Lost",
            Self::Won => "Won",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decide the next phase. Ended phases latch; a collision beats a win
/// detected in the same tick.
pub fn resolve_phase(
    phase: GamePhase,
    collision: bool,
    reached_finish: bool,
    airborne: bool,
) -> GamePhase {
    if phase.is_ended() {
        return phase;
    }
    if collision {
        GamePhase::Lost
    } else if reached_finish && !airborne {
        GamePhase::Won
    } else {
        GamePhase::Playing
    }
}

/// Edge-triggered actions for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub jump: bool,
    pub reset: bool,
}

/// Sizes the simulation needs from the loaded textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldLayout {
    pub width: f32,
    pub height: f32,
    pub player_frame: (f32, f32),
    pub obstacle_frame: (f32, f32),
    pub background_widths: [u32; LAYER_COUNT],
}

impl WorldLayout {
    pub fn from_textures(
        config: &GameConfig,
        player_texture: (u32, u32),
        obstacle_texture: (u32, u32),
        background_widths: [u32; LAYER_COUNT],
    ) -> Self {
        Self {
            width: config.window.width as f32,
            height: config.window.height as f32,
            player_frame: SpriteSheet::PLAYER.frame_size(player_texture),
            obstacle_frame: SpriteSheet::OBSTACLE.frame_size(obstacle_texture),
            background_widths,
        }
    }
}

/// What happened during one tick, for the HUD and logging.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub airborne: bool,
    pub collision: bool,
    pub transition: Option<GamePhase>,
    pub reset: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub won: u32,
    pub lost: u32,
}

pub struct World {
    pub layout: WorldLayout,
    pub physics: PhysicsConfig,
    pub obstacle_rules: ObstacleConfig,
    pub player: SpriteAnimation,
    pub body: RunnerBody,
    pub obstacles: [SpriteAnimation; OBSTACLE_COUNT],
    pub background: ParallaxBackground,
    pub phase: GamePhase,
    pub stats: RunStats,
    rng: fastrand::Rng,
}

impl World {
    pub fn new(config: &GameConfig, layout: WorldLayout, mut rng: fastrand::Rng) -> Self {
        let physics = config.physics;
        let obstacle_rules = config.obstacles;

        let start = Vec2::new(
            player_start_x(&layout),
            layout.height - layout.player_frame.1 - physics.spawn_drop,
        );
        let player = SpriteAnimation::new(layout.player_frame, start, config.player.frame_time);

        let obstacles = std::array::from_fn(|i| {
            SpriteAnimation::new(
                layout.obstacle_frame,
                obstacle_spawn(&layout, &obstacle_rules, i, &mut rng),
                obstacle_rules.frame_time,
            )
        });

        let background = ParallaxBackground::new(
            config.parallax.speeds,
            layout.background_widths,
            config.parallax.scale,
        );

        Self {
            layout,
            physics,
            obstacle_rules,
            player,
            body: RunnerBody::default(),
            obstacles,
            background,
            phase: GamePhase::Playing,
            stats: RunStats::default(),
            rng,
        }
    }

    pub fn ground_y(&self) -> f32 {
        self.layout.height
    }

    /// The win line rides on the last obstacle.
    pub fn finish_line(&self) -> f32 {
        self.obstacles[OBSTACLE_COUNT - 1].position.x
    }

    pub fn is_airborne(&self) -> bool {
        kinematics::is_airborne(&self.player, self.ground_y())
    }

    pub fn tick(&mut self, input: FrameInput, dt: f32) -> TickReport {
        self.background.scroll(dt);

        let airborne = self.is_airborne();
        let jump = input.jump && !self.phase.is_ended();
        self.body.apply_forces(airborne, jump, &self.physics, dt);

        kinematics::scroll_obstacles(&mut self.obstacles, self.physics.obstacle_velocity, dt);
        self.body.integrate(&mut self.player, dt);

        if !airborne {
            self.player.advance(dt, SpriteSheet::PLAYER.max_frame());
        }
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt, SpriteSheet::OBSTACLE.max_frame());
        }

        let mut report = TickReport {
            airborne,
            ..TickReport::default()
        };

        if !self.phase.is_ended() {
            report.collision = self.detect_collision();
            let reached_finish = self.player.position.x >= self.finish_line();
            let next = resolve_phase(self.phase, report.collision, reached_finish, airborne);
            if next != self.phase {
                self.enter_phase(next);
                report.transition = Some(next);
            }
        }

        if input.reset {
            report.reset = self.reset();
        }
        report
    }

    pub fn detect_collision(&self) -> bool {
        collision::first_hit(
            self.player.bounds(),
            self.obstacles.iter().map(SpriteAnimation::bounds),
            self.obstacle_rules.hitbox_padding,
        )
        .is_some()
    }

    /// Put the runner and obstacles back at their spawn points. Only acts
    /// once the run has ended; returns whether anything was reset.
    pub fn reset(&mut self) -> bool {
        if !self.phase.is_ended() {
            return false;
        }

        self.player.position = Vec2::new(
            player_start_x(&self.layout),
            self.ground_y() - self.player.height(),
        );
        for (i, obstacle) in self.obstacles.iter_mut().enumerate() {
            obstacle.position = obstacle_spawn(&self.layout, &self.obstacle_rules, i, &mut self.rng);
        }
        self.phase = GamePhase::Playing;
        log::info!("Run reset, finish line at x={:.0}", self.finish_line());
        true
    }

    fn enter_phase(&mut self, next: GamePhase) {
        self.phase = next;
        match next {
            GamePhase::Lost => {
                self.stats.lost += 1;
                log::info!(
                    "Run lost at player x={:.0}, finish line x={:.0}",
                    self.player.position.x,
                    self.finish_line()
                );
            }
            GamePhase::Won => {
                self.stats.won += 1;
                log::info!("Run won at finish line x={:.0}", self.finish_line());
            }
            GamePhase::Playing => {}
        }
    }
}

fn player_start_x(layout: &WorldLayout) -> f32 {
    layout.width / 2.0 - layout.player_frame.0 / 2.0
}

/// Spawn slot `index`: past the right edge, spaced out, with whole-pixel jitter.
fn obstacle_spawn(
    layout: &WorldLayout,
    rules: &ObstacleConfig,
    index: usize,
    rng: &mut fastrand::Rng,
) -> Vec2 {
    let jitter = rng.u32(0..=rules.max_jitter) as f32;
    Vec2::new(
        layout.width + index as f32 * rules.spacing + jitter,
        layout.height - layout.obstacle_frame.1,
    )
}
