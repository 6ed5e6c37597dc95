use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionState;

/// Every state change in the session produces an Event.
/// The host maps these to notifications and status updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// Total elapsed time reached the session length.
    SessionCompleted {
        at: DateTime<Utc>,
    },
    /// A rest trigger fired (or a manual rest was requested); the
    /// 10-second countdown has begun.
    RestStarted {
        at: DateTime<Utc>,
    },
    /// The countdown ran its full course; the next trigger is armed.
    RestFinished {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        resting: bool,
        elapsed_ms: u64,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_with_variant_name() {
        let event = Event::SessionReset { at: Utc::now() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SessionReset");
    }
}
