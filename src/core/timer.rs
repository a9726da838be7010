//! Frame timing: throughput reporting and optional rate capping

use std::time::{Duration, Instant};

const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Counts dispatched frames and reports a rate once per interval
#[derive(Debug)]
pub struct FpsMeter {
    window_start: Instant,
    frames: u32,
    interval: Duration,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::with_interval(FPS_REPORT_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            interval,
        }
    }

    /// Record one frame. Returns the measured rate when the interval elapses.
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps the dispatch loop up to the next frame deadline
#[derive(Debug)]
pub struct FramePacer {
    frame_time: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    /// `None` for a zero rate
    pub fn new(fps: u32) -> Option<Self> {
        if fps == 0 {
            return None;
        }
        let frame_time = Duration::from_secs(1) / fps;
        Some(Self {
            frame_time,
            next_deadline: Instant::now() + frame_time,
        })
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Time left until the next deadline, advancing the deadline.
    /// A loop that fell behind is resynchronised instead of bursting.
    fn advance(&mut self, now: Instant) -> Duration {
        let wait = self.next_deadline.saturating_duration_since(now);
        self.next_deadline = if wait.is_zero() {
            now + self.frame_time
        } else {
            self.next_deadline + self.frame_time
        };
        wait
    }

    pub fn wait(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}
