//! Session engine implementation.
//!
//! The session engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per second while a session is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!        Completed -> (start) -> Running
//! ```
//!
//! Invalid transitions are silent no-ops returning `None`, never errors.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::rest::{RestBreak, RestScheduler};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;

/// Fixed session length: 90 minutes.
pub const SESSION_DURATION_MS: u64 = 90 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core session engine.
///
/// Owns all timer state: the lifecycle state, elapsed-time accounting
/// across pauses, the armed rest trigger, and any in-flight countdown.
/// Operates on wall-clock deltas read from an injected [`Clock`].
#[derive(Debug)]
pub struct SessionEngine {
    state: SessionState,
    /// Timestamp (ms since epoch) of the last start/resume.
    /// `None` unless the session is running.
    started_at_ms: Option<u64>,
    /// Elapsed time banked across prior running segments.
    banked_ms: u64,
    /// In-flight rest countdown, only while running.
    rest: Option<RestBreak>,
    scheduler: RestScheduler,
    clock: Box<dyn Clock>,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock), None)
    }

    /// Create an engine with an injected clock and a pinned interval seed.
    pub fn with_clock(clock: Box<dyn Clock>, seed: Option<u64>) -> Self {
        Self {
            state: SessionState::Idle,
            started_at_ms: None,
            banked_ms: 0,
            rest: None,
            scheduler: RestScheduler::new(seed),
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn resting(&self) -> bool {
        self.rest.is_some()
    }

    /// Cumulative non-paused duration since the session started.
    pub fn elapsed_ms(&self) -> u64 {
        match (self.state, self.started_at_ms) {
            (SessionState::Running, Some(started)) => self
                .banked_ms
                .saturating_add(self.clock.now_ms().saturating_sub(started)),
            _ => self.banked_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        SESSION_DURATION_MS.saturating_sub(self.elapsed_ms())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            resting: self.resting(),
            elapsed_ms: self.elapsed_ms(),
            remaining_ms: self.remaining_ms(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session. Valid from `Idle` or `Completed`.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Completed => {
                let now = self.clock.now_ms();
                self.state = SessionState::Running;
                self.started_at_ms = Some(now);
                self.banked_ms = 0;
                self.rest = None;
                self.scheduler.arm(now);
                Some(Event::SessionStarted {
                    duration_ms: SESSION_DURATION_MS,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Freeze elapsed-time accrual. Valid only from `Running`; aborts any
    /// in-flight countdown without rescheduling.
    pub fn pause(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        let now = self.clock.now_ms();
        if let Some(started) = self.started_at_ms.take() {
            self.banked_ms = self.banked_ms.saturating_add(now.saturating_sub(started));
        }
        self.state = SessionState::Paused;
        self.rest = None;
        self.scheduler.cancel();
        Some(Event::SessionPaused {
            elapsed_ms: self.banked_ms,
            at: Utc::now(),
        })
    }

    /// Valid only from `Paused`; re-arms the rest trigger.
    pub fn resume(&mut self) -> Option<Event> {
        if self.state != SessionState::Paused {
            return None;
        }
        let now = self.clock.now_ms();
        self.state = SessionState::Running;
        self.started_at_ms = Some(now);
        self.scheduler.arm(now);
        Some(Event::SessionResumed {
            elapsed_ms: self.banked_ms,
            at: Utc::now(),
        })
    }

    /// Abandon the session from any state. The running segment is not
    /// banked and previously banked time is not zeroed; `reset` does that.
    pub fn stop(&mut self) {
        self.state = SessionState::Idle;
        self.started_at_ms = None;
        self.rest = None;
        self.scheduler.cancel();
    }

    /// Stop and zero the elapsed-time accounting.
    pub fn reset(&mut self) -> Option<Event> {
        self.stop();
        self.banked_ms = 0;
        Some(Event::SessionReset { at: Utc::now() })
    }

    /// The single externally bound command: pause when running, resume
    /// when paused, otherwise start.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            _ => self.start(),
        }
    }

    /// Manual rest: begin the countdown now if running and not already
    /// resting. The armed trigger is cancelled; the countdown's natural
    /// completion re-arms it.
    pub fn begin_rest(&mut self) -> Option<Event> {
        if self.state != SessionState::Running || self.rest.is_some() {
            return None;
        }
        let now = self.clock.now_ms();
        self.scheduler.cancel();
        self.rest = Some(RestBreak::begin(now));
        Some(Event::RestStarted { at: Utc::now() })
    }

    /// Call once per second while running. Checks, in order: session
    /// completion, countdown progress, the armed rest trigger.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state != SessionState::Running {
            // A trigger that outlived a missed cancel lands here as a no-op.
            return events;
        }
        let now = self.clock.now_ms();

        if self.elapsed_ms() >= SESSION_DURATION_MS {
            self.complete(&mut events);
            return events;
        }

        if let Some(rest) = self.rest {
            if rest.finished(now) {
                self.rest = None;
                events.push(Event::RestFinished { at: Utc::now() });
                self.scheduler.arm(now);
            }
            return events;
        }

        if self.scheduler.take_due(now) {
            self.rest = Some(RestBreak::begin(now));
            events.push(Event::RestStarted { at: Utc::now() });
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, events: &mut Vec<Event>) {
        self.banked_ms = self.elapsed_ms();
        self.state = SessionState::Completed;
        self.started_at_ms = None;
        self.rest = None;
        self.scheduler.cancel();
        events.push(Event::SessionCompleted { at: Utc::now() });
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::timer::{REST_INTERVAL_MAX_MS, REST_INTERVAL_MIN_MS};
    use proptest::prelude::*;

    fn engine_at(clock: &ManualClock) -> SessionEngine {
        SessionEngine::with_clock(Box::new(clock.clone()), Some(42))
    }

    #[test]
    fn start_pause_resume() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);
        assert_eq!(engine.state(), SessionState::Idle);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), SessionState::Running);

        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), SessionState::Paused);

        assert!(engine.resume().is_some());
        assert_eq!(engine.state(), SessionState::Running);
    }

    #[test]
    fn invalid_transitions_are_noops() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        assert!(engine.pause().is_none());
        assert!(engine.resume().is_none());
        assert!(engine.begin_rest().is_none());

        engine.start();
        assert!(engine.start().is_none());
        assert!(engine.resume().is_none());

        engine.pause();
        assert!(engine.pause().is_none());
        assert!(engine.begin_rest().is_none());
    }

    #[test]
    fn toggle_cycles_through_states() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.toggle();
        assert_eq!(engine.state(), SessionState::Running);
        engine.toggle();
        assert_eq!(engine.state(), SessionState::Paused);
        engine.toggle();
        assert_eq!(engine.state(), SessionState::Running);
    }

    #[test]
    fn elapsed_accounting_across_pauses() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.set_ms(60_000);
        engine.pause();
        assert_eq!(engine.elapsed_ms(), 60_000);

        clock.set_ms(120_000);
        assert_eq!(engine.elapsed_ms(), 60_000);
        engine.resume();
        clock.set_ms(150_000);
        engine.pause();
        assert_eq!(engine.elapsed_ms(), 90_000);
    }

    #[test]
    fn instant_pause_resume_banks_nothing() {
        let clock = ManualClock::new(1_000);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(30_000);
        engine.pause();
        engine.resume();
        assert_eq!(engine.elapsed_ms(), 30_000);
    }

    #[test]
    fn reset_zeroes_from_any_state() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(45_000);
        engine.pause();
        assert!(engine.reset().is_some());
        assert_eq!(engine.state(), SessionState::Idle);
        assert_eq!(engine.elapsed_ms(), 0);
    }

    #[test]
    fn stop_abandons_running_segment() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(20_000);
        engine.pause();
        clock.advance_ms(1_000);
        engine.resume();
        clock.advance_ms(30_000);
        engine.stop();
        assert_eq!(engine.state(), SessionState::Idle);
        // Only the paused-at bank survives; the running segment is dropped.
        assert_eq!(engine.elapsed_ms(), 20_000);
    }

    #[test]
    fn completes_at_ninety_minutes() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(SESSION_DURATION_MS);
        let events = engine.tick();
        assert!(matches!(events[..], [Event::SessionCompleted { .. }]));
        assert_eq!(engine.state(), SessionState::Completed);
        assert_eq!(engine.remaining_ms(), 0);

        // Terminal: nothing further fires.
        clock.advance_ms(REST_INTERVAL_MAX_MS);
        assert!(engine.tick().is_empty());
        assert!(engine.begin_rest().is_none());
    }

    #[test]
    fn start_is_valid_from_completed() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(SESSION_DURATION_MS);
        engine.tick();
        assert_eq!(engine.state(), SessionState::Completed);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), SessionState::Running);
        assert_eq!(engine.elapsed_ms(), 0);
    }

    #[test]
    fn trigger_fires_within_interval_bounds() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(REST_INTERVAL_MIN_MS - 1);
        assert!(engine.tick().is_empty());

        clock.set_ms(REST_INTERVAL_MAX_MS);
        let events = engine.tick();
        assert!(matches!(events[..], [Event::RestStarted { .. }]));
        assert!(engine.resting());
    }

    #[test]
    fn trigger_is_noop_while_paused() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(REST_INTERVAL_MAX_MS);
        engine.pause();
        assert!(engine.tick().is_empty());
        assert!(!engine.resting());
    }

    #[test]
    fn countdown_finishes_and_rearms() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(REST_INTERVAL_MAX_MS);
        engine.tick();
        assert!(engine.resting());

        // Mid-countdown seconds produce no events.
        clock.advance_ms(5_000);
        assert!(engine.tick().is_empty());
        assert!(engine.resting());

        clock.advance_ms(5_000);
        let events = engine.tick();
        assert!(matches!(events[..], [Event::RestFinished { .. }]));
        assert!(!engine.resting());

        // Natural completion re-armed the scheduler.
        clock.advance_ms(REST_INTERVAL_MAX_MS);
        let events = engine.tick();
        assert!(matches!(events[..], [Event::RestStarted { .. }]));
    }

    #[test]
    fn pause_aborts_countdown_without_reschedule() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        clock.advance_ms(REST_INTERVAL_MAX_MS);
        engine.tick();
        assert!(engine.resting());

        clock.advance_ms(3_000);
        engine.pause();
        assert!(!engine.resting());

        // Resume arms a fresh trigger; the aborted countdown never finishes.
        engine.resume();
        let events = engine.tick();
        assert!(events.is_empty());
        clock.advance_ms(REST_INTERVAL_MAX_MS);
        let events = engine.tick();
        assert!(matches!(events[..], [Event::RestStarted { .. }]));
    }

    #[test]
    fn manual_rest_only_while_running() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);

        engine.start();
        let event = engine.begin_rest();
        assert!(matches!(event, Some(Event::RestStarted { .. })));
        assert!(engine.resting());
        // Already resting: a second request is a no-op.
        assert!(engine.begin_rest().is_none());
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let clock = ManualClock::new(0);
        let mut engine = engine_at(&clock);
        engine.start();
        clock.advance_ms(53_000);

        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                resting,
                elapsed_ms,
                remaining_ms,
                ..
            } => {
                assert_eq!(state, SessionState::Running);
                assert!(!resting);
                assert_eq!(elapsed_ms, 53_000);
                assert_eq!(remaining_ms, SESSION_DURATION_MS - 53_000);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Toggle,
        Advance(u64),
        Tick,
    }

    proptest! {
        // Total advance is capped well below 90 minutes, so completion
        // never interferes with the accounting model.
        #[test]
        fn elapsed_counts_only_running_time(
            ops in proptest::collection::vec(
                prop_oneof![
                    Just(Op::Toggle),
                    (0u64..120_000).prop_map(Op::Advance),
                    Just(Op::Tick),
                ],
                1..32,
            )
        ) {
            let clock = ManualClock::new(0);
            let mut engine = engine_at(&clock);
            let mut model_elapsed: u64 = 0;

            for op in ops {
                match op {
                    Op::Toggle => {
                        let was_idle = engine.state() == SessionState::Idle;
                        engine.toggle();
                        if was_idle {
                            model_elapsed = 0;
                        }
                    }
                    Op::Advance(delta) => {
                        clock.advance_ms(delta);
                        if engine.state() == SessionState::Running {
                            model_elapsed += delta;
                        }
                    }
                    Op::Tick => {
                        engine.tick();
                    }
                }
                prop_assert_eq!(engine.elapsed_ms(), model_elapsed);
            }
        }
    }
}
