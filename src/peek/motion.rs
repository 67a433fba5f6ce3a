//! Fixed-timestep slide-in / hold / slide-out motion
//!
//! The motion is simulated in whole frames at [`TARGET_FPS`], independent of
//! how often the window actually repaints: a late repaint simply runs the
//! frames it missed. Frame `k` happens at `k / TARGET_FPS` seconds and moves
//! according to the phase at that instant.

use std::time::Duration;

use crate::constants::peek::{STEP_PER_SPEED, TARGET_FPS};

const NANOS_PER_SEC: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First third: moving towards the rest position
    SlideIn,
    /// Middle third: no movement
    Hold,
    /// Last third: moving back off-screen
    SlideOut,
    /// Total duration exceeded
    Finished,
}

impl Phase {
    pub fn at(elapsed: Duration, total: Duration) -> Self {
        if elapsed > total {
            Phase::Finished
        } else if elapsed < total / 3 {
            Phase::SlideIn
        } else if elapsed > total * 2 / 3 {
            Phase::SlideOut
        } else {
            Phase::Hold
        }
    }
}

/// Horizontal position of the peeking image
///
/// Position `-width` is fully off-screen to the left, `0` is fully visible.
#[derive(Debug, Clone)]
pub struct PeekMotion {
    width: f32,
    step: f32,
    total: Duration,
    position: f32,
    frames: u64,
}

impl PeekMotion {
    pub fn new(width: f32, total: Duration, speed: f32) -> Self {
        let width = width.max(0.0);
        let step = speed * STEP_PER_SPEED;
        Self {
            width,
            step: if step.is_finite() { step } else { 0.0 },
            total,
            position: -width,
            frames: 0,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Run every frame due by `elapsed` and report the phase at `elapsed`
    pub fn advance_to(&mut self, elapsed: Duration) -> Phase {
        let due = frames_due(elapsed);
        while self.frames < due {
            self.frames += 1;
            self.tick(frame_time(self.frames));
        }
        Phase::at(elapsed, self.total)
    }

    fn tick(&mut self, at: Duration) {
        let moved = match Phase::at(at, self.total) {
            Phase::SlideIn => self.position + self.step,
            Phase::SlideOut => self.position - self.step,
            Phase::Hold | Phase::Finished => return,
        };
        self.position = moved.clamp(-self.width, 0.0);
    }
}

/// Time between two simulated frames
pub fn frame_interval() -> Duration {
    frame_time(1)
}

fn frames_due(elapsed: Duration) -> u64 {
    (elapsed.as_nanos() * TARGET_FPS as u128 / NANOS_PER_SEC as u128) as u64
}

/// First nanosecond at which `frame` is due, so `frames_due(frame_time(k)) == k`
fn frame_time(frame: u64) -> Duration {
    Duration::from_nanos((frame * NANOS_PER_SEC).div_ceil(TARGET_FPS))
}
