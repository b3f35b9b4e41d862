use web_time::{Duration, Instant};

/// Frame pacing with smoothed FPS measurement.
///
/// Used to replay recorded traces at their capture rate.
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: if target_fps > 0 { target_fps as f32 } else { 60.0 },
            smoothing: 0.05,
        }
    }

    /// Time left before the next frame is due (zero when unlimited or late).
    #[must_use]
    pub fn remaining(&self) -> Duration {
        if self.target_fps == 0 {
            return Duration::ZERO;
        }
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Sleep until the next frame is due, then record the frame.
    pub fn pace(&mut self) {
        let wait = self.remaining();
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.end_frame();
    }

    /// Record that a frame just finished.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let timing = FrameTiming::new(0);
        assert_eq!(timing.remaining(), Duration::ZERO);
    }

    #[test]
    fn pacing_holds_the_target_interval() {
        let mut timing = FrameTiming::new(200);
        let start = Instant::now();
        for _ in 0..4 {
            timing.pace();
        }
        // Four 5ms frames.
        assert!(start.elapsed() >= Duration::from_millis(15));
        assert!(timing.fps() > 0.0);
    }
}
