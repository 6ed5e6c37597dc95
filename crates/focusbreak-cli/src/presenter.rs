//! Terminal implementation of the core presenter contract.

use std::io::{self, Write};

use focusbreak_core::{Presenter, PresenterError};

/// Terminal presenter: the status line lives on the current row and is
/// redrawn in place; notifications print on their own lines above it.
pub struct TerminalPresenter {
    stdout: io::Stdout,
}

impl TerminalPresenter {
    /// Fails fast when the terminal cannot be written to.
    pub fn new() -> Result<Self, PresenterError> {
        let mut stdout = io::stdout();
        stdout
            .flush()
            .map_err(|e| PresenterError::Unavailable(e.to_string()))?;
        Ok(Self { stdout })
    }

    fn clear_status_row(&mut self) {
        let _ = write!(self.stdout, "\r\x1b[2K");
    }
}

impl Presenter for TerminalPresenter {
    fn set_status_text(&mut self, text: &str, _tooltip: &str) {
        self.clear_status_row();
        let _ = write!(self.stdout, "{text}");
        let _ = self.stdout.flush();
    }

    fn show_transient_message(&mut self, text: &str, _duration_ms: u64) {
        self.clear_status_row();
        let _ = writeln!(self.stdout, "{text}");
        let _ = self.stdout.flush();
    }

    fn show_modal_choice(&mut self, text: &str, options: &[&str]) -> Option<usize> {
        // A plain terminal has no modal surface; print the prompt and let
        // the user issue the matching line command instead.
        self.clear_status_row();
        let _ = writeln!(self.stdout, "{text} [{}]", options.join(" / "));
        let _ = self.stdout.flush();
        None
    }

    fn show_progress_toast(&mut self, text: &str, duration_ms: u64) {
        self.clear_status_row();
        let _ = writeln!(self.stdout, "{text} ({}s)", duration_ms / 1000);
        let _ = self.stdout.flush();
    }
}
