//! Time-driven progress along a [`Path`].
//!
//! The animator is a small state machine advanced by a [`Clock`]. It is
//! never driven by a thread or timer of its own: the host calls
//! [`Animator::tick`] once per display frame, and tests substitute a
//! [`FrameClock`] to step time deterministically.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::AnimationConfig;
use crate::path::{Locate, Path, Position};
use crate::route::RoutePlan;

/// Millisecond tick source.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// A clock whose time is set from outside, typically by the frame
/// driver's timestamp or by a test.
#[derive(Debug, Default)]
pub struct FrameClock {
    now: Cell<f64>,
}

impl FrameClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Monotonic wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// What a view needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot<P> {
    pub progress: f64,
    pub position: Option<P>,
    pub state: AnimationState,
}

impl<P: Into<Position>> Snapshot<P> {
    /// Same snapshot with the position tagged by coordinate space.
    pub fn tagged(self) -> Snapshot<Position> {
        Snapshot {
            progress: self.progress,
            position: self.position.map(Into::into),
            state: self.state,
        }
    }
}

pub struct Animator<P, C> {
    path: Path<P>,
    duration_ms: f64,
    clock: C,
    state: AnimationState,
    progress: f64,
    last_ms: f64,
}

impl<P: Locate, C: Clock> Animator<P, C> {
    /// Non-positive or non-finite durations are treated as 1 ms.
    pub fn new(path: Path<P>, total_duration_ms: f64, clock: C) -> Self {
        let duration_ms = if total_duration_ms.is_finite() && total_duration_ms > 0.0 {
            total_duration_ms
        } else {
            1.0
        };

        Self {
            path,
            duration_ms,
            clock,
            state: AnimationState::Idle,
            progress: 0.0,
            last_ms: 0.0,
        }
    }

    /// Duration derived from the plan's minutes, counting every step
    /// whether or not it made it onto the path.
    pub fn for_plan(path: Path<P>, plan: &RoutePlan, config: &AnimationConfig, clock: C) -> Self {
        Self::new(path, plan.duration_ms(config), clock)
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn path(&self) -> &Path<P> {
        &self.path
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Play from the beginning, whatever the current state.
    pub fn start(&mut self) {
        self.progress = 0.0;
        self.last_ms = self.clock.now_ms();
        self.transition(AnimationState::Running);
    }

    /// Freeze progress. Time up to now still counts.
    pub fn pause(&mut self) {
        if self.state != AnimationState::Running {
            return;
        }
        self.advance();
        if self.state == AnimationState::Running {
            self.transition(AnimationState::Paused);
        }
    }

    /// Continue from the frozen progress; paused time is not counted.
    pub fn resume(&mut self) {
        if self.state != AnimationState::Paused {
            return;
        }
        self.last_ms = self.clock.now_ms();
        self.transition(AnimationState::Running);
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.transition(AnimationState::Idle);
    }

    /// Advance by the time elapsed since the last update.
    ///
    /// Returns None when the animator is not running, meaning the host
    /// need not schedule another frame.
    pub fn tick(&mut self) -> Option<Snapshot<P>> {
        if self.state != AnimationState::Running {
            return None;
        }
        self.advance();
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot<P> {
        Snapshot {
            progress: self.progress,
            position: self.path.resolve(self.progress),
            state: self.state,
        }
    }

    fn advance(&mut self) {
        let now = self.clock.now_ms();
        // A clock stepping backwards must not rewind the marker.
        let elapsed = (now - self.last_ms).max(0.0);
        self.last_ms = now;

        self.progress = (self.progress + elapsed / self.duration_ms).min(1.0);
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.transition(AnimationState::Completed);
        }
    }

    fn transition(&mut self, next: AnimationState) {
        if self.state != next {
            debug!("Route animation {:?} -> {:?} at {:.3}", self.state, next, self.progress);
            self.state = next;
        }
    }
}
