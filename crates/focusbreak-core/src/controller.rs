//! Glue between the session engine and a host presenter.

use crate::events::Event;
use crate::presenter::Presenter;
use crate::status;
use crate::timer::{SessionEngine, REST_COUNTDOWN_SECS};

/// Auto-dismiss delay for transient notifications.
const NOTICE_MS: u64 = 3_000;

/// Couples the session engine to a host presenter.
///
/// Every command and tick pushes a fresh status line; events map to the
/// host's notification surface.
pub struct SessionController<P: Presenter> {
    engine: SessionEngine,
    presenter: P,
}

impl<P: Presenter> SessionController<P> {
    pub fn new(engine: SessionEngine, presenter: P) -> Self {
        let mut controller = Self { engine, presenter };
        controller.refresh_status();
        controller
    }

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn toggle(&mut self) -> Option<Event> {
        let event = self.engine.toggle();
        if let Some(event) = event.clone() {
            self.announce(&event);
        }
        self.refresh_status();
        event
    }

    pub fn rest(&mut self) -> Option<Event> {
        let event = self.engine.begin_rest();
        if let Some(event) = event.clone() {
            self.announce(&event);
        }
        self.refresh_status();
        event
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.engine.reset();
        if let Some(event) = event.clone() {
            self.announce(&event);
        }
        self.refresh_status();
        event
    }

    /// Drive the engine one tick and surface whatever it produced.
    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.engine.tick();
        for event in &events {
            self.announce(event);
        }
        self.refresh_status();
        events
    }

    /// Teardown: cancel the outstanding trigger and leave a final status.
    pub fn shutdown(&mut self) {
        self.engine.stop();
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        let line = status::render(&self.engine);
        self.presenter.set_status_text(&line.text, &line.tooltip);
    }

    fn announce(&mut self, event: &Event) {
        match event {
            Event::SessionStarted { .. } => self
                .presenter
                .show_transient_message("Focus session started: 90 minutes on the clock", NOTICE_MS),
            Event::SessionPaused { .. } => self
                .presenter
                .show_transient_message("Focus session paused", NOTICE_MS),
            Event::SessionResumed { .. } => self
                .presenter
                .show_transient_message("Focus session resumed", NOTICE_MS),
            Event::SessionReset { .. } => self
                .presenter
                .show_transient_message("Focus session reset", NOTICE_MS),
            Event::RestStarted { .. } => {
                self.presenter
                    .show_transient_message("Rest time! Look away from the screen", NOTICE_MS);
                self.presenter
                    .show_progress_toast("Resting", REST_COUNTDOWN_SECS * 1000);
            }
            Event::RestFinished { .. } => self
                .presenter
                .show_transient_message("Break over, back to it", NOTICE_MS),
            Event::SessionCompleted { .. } => {
                let choice = self.presenter.show_modal_choice(
                    "90-minute focus session complete!",
                    &["New session", "Dismiss"],
                );
                if choice == Some(0) {
                    if let Some(started) = self.engine.start() {
                        self.announce(&started);
                    }
                }
            }
            Event::StateSnapshot { .. } => {}
        }
    }
}
