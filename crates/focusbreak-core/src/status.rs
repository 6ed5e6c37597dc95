//! Status-indicator rendering.
//!
//! Pure derivation from engine state; the host re-renders on every
//! transition and once per second while a session is running.

use serde::{Deserialize, Serialize};

use crate::timer::{SessionEngine, SessionState};

/// Text and tooltip for the host's status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub text: String,
    pub tooltip: String,
}

/// Render the status indicator for the current engine state.
pub fn render(engine: &SessionEngine) -> StatusLine {
    match engine.state() {
        SessionState::Idle => StatusLine {
            text: "Focus: ready".into(),
            tooltip: "Start a 90-minute focus session".into(),
        },
        SessionState::Running if engine.resting() => StatusLine {
            // Fixed label; the live countdown number is intentionally
            // not shown.
            text: "Focus: resting".into(),
            tooltip: "10-second rest break in progress".into(),
        },
        SessionState::Running => {
            let remaining = engine.remaining_ms();
            if remaining == 0 {
                // Completion observed at render time, ahead of the
                // engine's next tick.
                return completed_line();
            }
            StatusLine {
                text: format!("Focus: {}", format_remaining(remaining)),
                tooltip: "Focus session running (toggle to pause)".into(),
            }
        }
        SessionState::Paused => {
            let remaining = engine.remaining_ms();
            if remaining == 0 {
                return completed_line();
            }
            StatusLine {
                text: format!("Focus: {} (paused)", format_remaining(remaining)),
                tooltip: "Focus session paused (toggle to resume)".into(),
            }
        }
        SessionState::Completed => completed_line(),
    }
}

fn completed_line() -> StatusLine {
    StatusLine {
        text: "Focus: done".into(),
        tooltip: "Focus session complete".into(),
    }
}

/// `minutes:seconds` with zero-padded seconds: 5_400_000 -> "90:00".
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
