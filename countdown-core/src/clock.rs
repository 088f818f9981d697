//! Ticking state machine.
//!
//! The clock is generic over the timer handle so the browser can plug in a
//! `gloo-timers` interval while tests and the CLI use plain values. Dropping
//! a handle must cancel its timer.

use crate::TimeRemaining;

/// Period between two ticks.
pub const TICK_INTERVAL_MS: u32 = 1_000;

/// Trạng thái của đồng hồ đếm ngược.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    Expired,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still counting; display these values.
    Update(TimeRemaining),
    /// The end instant was reached on this tick and the timer was cancelled.
    Expired,
    /// Not running: a late callback after expiry or teardown.
    Stopped,
}

#[derive(Debug)]
pub struct CountdownClock<H> {
    state: ClockState,
    end_ms: Option<i64>,
    timer: Option<H>,
}

impl<H> Default for CountdownClock<H> {
    fn default() -> Self {
        Self {
            state: ClockState::Idle,
            end_ms: None,
            timer: None,
        }
    }
}

impl<H> CountdownClock<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn end_ms(&self) -> Option<i64> {
        self.end_ms
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether a restart towards `end_ms` would be a no-op.
    pub fn is_counting_to(&self, end_ms: i64) -> bool {
        self.state == ClockState::Running && self.end_ms == Some(end_ms)
    }

    /// Start counting towards `end_ms`, cancelling any previous timer before
    /// `timer` takes its place.
    pub fn start(&mut self, end_ms: i64, timer: H) {
        drop(self.timer.take());
        self.timer = Some(timer);
        self.end_ms = Some(end_ms);
        self.state = ClockState::Running;
        log::debug!("countdown clock running towards {end_ms}");
    }

    /// Stop without a valid end instant.
    pub fn expire(&mut self) {
        self.timer = None;
        self.end_ms = None;
        self.state = ClockState::Expired;
    }

    /// Recompute the remaining time at `now_ms`.
    pub fn tick(&mut self, now_ms: i64) -> Tick {
        let Some(end_ms) = self.end_ms.filter(|_| self.state == ClockState::Running) else {
            return Tick::Stopped;
        };

        let remaining = TimeRemaining::between(end_ms, now_ms);
        if remaining.is_expired() {
            self.timer = None;
            self.state = ClockState::Expired;
            log::debug!("countdown towards {end_ms} expired");
            return Tick::Expired;
        }
        Tick::Update(remaining)
    }

    /// Cancel the timer when the owner goes away.
    pub fn teardown(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("countdown clock torn down");
        }
        self.state = ClockState::Idle;
    }
}
