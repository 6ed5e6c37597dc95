mod engine;
mod rest;

pub use engine::{SessionEngine, SessionState, SESSION_DURATION_MS};
pub use rest::{
    RestBreak, RestScheduler, REST_COUNTDOWN_SECS, REST_INTERVAL_MAX_MS, REST_INTERVAL_MIN_MS,
};
