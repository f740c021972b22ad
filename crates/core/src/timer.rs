//! Countdown module - per-question answer window
//!
//! The countdown is driven by elapsed time handed to [`Countdown::tick`]; it
//! never schedules anything itself. Its single owner is the session, which
//! drops it on every transition that leaves a question, so a late tick can
//! never reach the next question.

use crate::types::TIMER_STEPS;

/// Result of advancing the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Still running; `changed` is set when the visible value moved
    Running { remaining_percent: u8, changed: bool },
    /// The value reached zero on this tick or earlier
    Expired,
}

/// Fixed-step countdown from 100 to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Countdown {
    step_ms: u32,
    acc_ms: u32,
    value: u32,
}

impl Countdown {
    /// Start a countdown that expires after `duration_ms`.
    pub fn new(duration_ms: u32) -> Self {
        Self {
            step_ms: (duration_ms / TIMER_STEPS).max(1),
            acc_ms: 0,
            value: TIMER_STEPS,
        }
    }

    pub fn remaining_percent(&self) -> u8 {
        (self.value * 100 / TIMER_STEPS) as u8
    }

    pub fn is_expired(&self) -> bool {
        self.value == 0
    }

    /// Advance by `elapsed_ms`, stepping as many times as fit.
    pub fn tick(&mut self, elapsed_ms: u32) -> CountdownStatus {
        if self.is_expired() {
            return CountdownStatus::Expired;
        }

        self.acc_ms = self.acc_ms.saturating_add(elapsed_ms);
        let mut changed = false;
        while self.acc_ms >= self.step_ms && self.value > 0 {
            self.acc_ms -= self.step_ms;
            self.value -= 1;
            changed = true;
        }

        if self.is_expired() {
            CountdownStatus::Expired
        } else {
            CountdownStatus::Running {
                remaining_percent: self.remaining_percent(),
                changed,
            }
        }
    }
}
