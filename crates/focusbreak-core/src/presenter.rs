//! Host presentation contract.

/// Presentation surface the host implements.
///
/// The core drives these calls; the host owns actual rendering. Calls are
/// infallible: a host whose surface cannot be brought up fails at startup
/// (see [`crate::error::PresenterError`]) rather than per call.
pub trait Presenter {
    /// Update the persistent status indicator.
    fn set_status_text(&mut self, text: &str, tooltip: &str);

    /// Show a notification that auto-dismisses after `duration_ms`.
    fn show_transient_message(&mut self, text: &str, duration_ms: u64);

    /// Present a blocking choice. `None` means the host could not present
    /// the dialog or the user dismissed it.
    fn show_modal_choice(&mut self, text: &str, options: &[&str]) -> Option<usize>;

    /// Show a progress indicator spanning `duration_ms`.
    fn show_progress_toast(&mut self, text: &str, duration_ms: u64);
}
