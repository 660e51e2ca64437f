use std::time::Instant;

/// Seconds between FPS readout refreshes
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub elapsed: f32,
    pub delta: f32,
}

/// Monotonic clock for the animation loop
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    frame_number: u64,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_number: 0,
        }
    }

    /// Advance to the next frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let info = FrameInfo {
            number: self.frame_number,
            elapsed: now.duration_since(self.start).as_secs_f32(),
            delta: now.duration_since(self.last_tick).as_secs_f32(),
        };
        self.frame_number += 1;
        self.last_tick = now;
        info
    }

    /// Restart elapsed time at zero
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
        self.frame_number = 0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames-per-second averaged over [`FPS_UPDATE_INTERVAL`]
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    accumulated: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame. Returns the new reading when the interval rolls over.
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.accumulated += delta;

        if self.accumulated < FPS_UPDATE_INTERVAL {
            return None;
        }

        self.fps = self.frames as f32 / self.accumulated;
        self.frames = 0;
        self.accumulated = 0.0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let frame = clock.tick();

        assert_eq!(frame.number, 0);
        assert!(frame.delta >= 0.009);
        assert!(frame.elapsed >= frame.delta);
    }

    #[test]
    fn clock_counts_frames() {
        let mut clock = Clock::new();
        clock.tick();
        clock.tick();
        assert_eq!(clock.tick().number, 2);

        clock.reset();
        assert_eq!(clock.tick().number, 0);
    }

    #[test]
    fn fps_reports_once_per_interval() {
        let mut counter = FpsCounter::new();
        for _ in 0..59 {
            assert!(counter.record(1.0 / 60.0).is_none());
        }
        let fps = counter.record(1.0 / 60.0 + 1e-3).unwrap();
        assert!((fps - 60.0).abs() < 1.0);
        assert_eq!(counter.fps(), fps);
    }
}
