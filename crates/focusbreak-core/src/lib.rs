//! # Focusbreak Core Library
//!
//! Core logic for the Focusbreak focus timer: a single 90-minute session
//! interrupted by randomized 10-second rest breaks.
//!
//! ## Architecture
//!
//! - **Session Engine**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for progress updates. No
//!   internal threads.
//! - **Rest Scheduler**: at most one armed rest trigger at a time, with the
//!   delay drawn uniformly from a 3-5 minute window.
//! - **Presenter**: trait boundary to the host's status indicator and
//!   notification surface; the shipped host is a terminal CLI.
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: core session state machine
//! - [`SessionController`]: couples the engine to a host [`Presenter`]
//! - [`render`]: pure status-line rendering from engine state

pub mod clock;
pub mod controller;
pub mod error;
pub mod events;
pub mod presenter;
pub mod status;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::SessionController;
pub use error::{CoreError, PresenterError};
pub use events::Event;
pub use presenter::Presenter;
pub use status::{render, StatusLine};
pub use timer::{SessionEngine, SessionState};
