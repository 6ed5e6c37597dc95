//! Rest-break scheduling and the in-flight countdown.
//!
//! While a session is running, exactly one future rest trigger is armed,
//! with a delay drawn uniformly at random from a 3-5 minute window. Arming
//! replaces any prior deadline; pausing or stopping cancels it.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Lower bound of the rest-trigger spacing (3 minutes).
pub const REST_INTERVAL_MIN_MS: u64 = 3 * 60 * 1000;
/// Upper bound of the rest-trigger spacing (5 minutes).
pub const REST_INTERVAL_MAX_MS: u64 = 5 * 60 * 1000;
/// Length of one rest countdown.
pub const REST_COUNTDOWN_SECS: u64 = 10;

/// Arms at most one future rest trigger at a time.
#[derive(Debug)]
pub struct RestScheduler {
    rng: Mcg128Xsl64,
    deadline_ms: Option<u64>,
}

impl RestScheduler {
    /// Create a scheduler. `seed` pins the interval draws for tests and
    /// reproducible sessions; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            rng,
            deadline_ms: None,
        }
    }

    /// Draw a fresh random delay and arm the trigger at `now + delay`.
    pub fn arm(&mut self, now_ms: u64) {
        let delay = self
            .rng
            .gen_range(REST_INTERVAL_MIN_MS..=REST_INTERVAL_MAX_MS);
        self.deadline_ms = Some(now_ms.saturating_add(delay));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Disarm and report whether the armed deadline had been reached.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        if self.deadline_ms.is_some_and(|d| now_ms >= d) {
            self.deadline_ms = None;
            true
        } else {
            false
        }
    }
}

/// One in-flight 10-second rest countdown.
///
/// Tracks its own remaining seconds for termination; the status line shows
/// a fixed "resting" label rather than the live number.
#[derive(Debug, Clone, Copy)]
pub struct RestBreak {
    started_at_ms: u64,
}

impl RestBreak {
    pub fn begin(now_ms: u64) -> Self {
        Self {
            started_at_ms: now_ms,
        }
    }

    pub fn remaining_secs(&self, now_ms: u64) -> u64 {
        let elapsed_secs = now_ms.saturating_sub(self.started_at_ms) / 1000;
        REST_COUNTDOWN_SECS.saturating_sub(elapsed_secs)
    }

    pub fn finished(&self, now_ms: u64) -> bool {
        self.remaining_secs(now_ms) == 0
    }
}
