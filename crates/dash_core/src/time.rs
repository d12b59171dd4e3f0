use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Variable-step frame clock. Each frame's measured delta is the physics step;
/// `next_deadline` paces the event loop toward the target rate.
pub struct FrameClock {
    pub target_frame_time: Duration,
    pub max_dt: f64,
    pub dt: f32,
    pub real_dt: f64,
    pub total_time: f64,
    pub frame_count: u64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(target_fps: u32, max_dt: f32) -> Self {
        Self::starting_at(Instant::now(), target_fps, max_dt)
    }

    pub fn starting_at(now: Instant, target_fps: u32, max_dt: f32) -> Self {
        let target_dt = 1.0 / target_fps.max(1) as f64;
        Self {
            target_frame_time: Duration::from_secs_f64(target_dt),
            max_dt: max_dt as f64,
            dt: 0.0,
            real_dt: 0.0,
            total_time: 0.0,
            frame_count: 0,
            last_instant: now,
            fps_samples: [target_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: target_fps as f64,
            smoothed_frame_time_ms: target_dt * 1000.0,
        }
    }

    /// Measure the delta since the previous frame and return it as the step.
    pub fn begin_frame(&mut self) -> f32 {
        self.begin_frame_at(Instant::now())
    }

    pub fn begin_frame_at(&mut self, now: Instant) -> f32 {
        self.real_dt = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // A stalled window (drag, breakpoint) must not teleport the obstacles.
        let step = if self.real_dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms, capping step to {}ms",
                self.real_dt * 1000.0,
                self.max_dt * 1000.0
            );
            self.max_dt
        } else {
            self.real_dt
        };
        self.dt = step as f32;
        self.total_time += step;
        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.dt
    }

    /// When the next frame is due.
    pub fn next_deadline(&self) -> Instant {
        self.last_instant + self.target_frame_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(144, 0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_measured_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 144, 0.25);
        let dt = clock.begin_frame_at(start + Duration::from_millis(10));
        assert!((dt - 0.010).abs() < 1e-6);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn long_frames_are_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 144, 0.25);
        let dt = clock.begin_frame_at(start + Duration::from_secs(3));
        assert_eq!(dt, 0.25);
        assert!((clock.real_dt - 3.0).abs() < 1e-9);
    }

    #[test]
    fn deadline_is_one_target_frame_after_last_frame() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 100, 0.25);
        let frame = start + Duration::from_millis(5);
        clock.begin_frame_at(frame);
        assert_eq!(clock.next_deadline(), frame + Duration::from_millis(10));
    }

    #[test]
    fn smoothed_fps_converges_to_steady_rate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start, 144, 0.25);
        let mut now = start;
        for _ in 0..FPS_SAMPLE_COUNT {
            now += Duration::from_millis(20);
            clock.begin_frame_at(now);
        }
        assert!((clock.smoothed_fps - 50.0).abs() < 0.01);
        assert!((clock.smoothed_frame_time_ms - 20.0).abs() < 0.01);
    }
}
