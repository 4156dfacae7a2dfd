use std::sync::Arc;
use std::time::Duration;

use subex_config::UiConfig;
use subex_debounce::{Debounced, debounce};
use subex_status::{ContainerResolver, DisplayState, StatusRenderer};

/// A flash-message container that hides itself a fixed time after the last
/// message was shown. Showing a new message restarts the countdown.
pub struct FlashAlert<R> {
    renderer: Arc<StatusRenderer<R>>,
    id: String,
    dismiss: Option<Debounced<()>>,
}

impl<R> FlashAlert<R>
where
    R: ContainerResolver + 'static,
{
    /// `dismiss_after: None` keeps messages up until replaced.
    ///
    /// With a delay, must be called within a Tokio runtime.
    pub fn new(
        renderer: Arc<StatusRenderer<R>>,
        id: impl Into<String>,
        dismiss_after: Option<Duration>,
    ) -> Self {
        let id = id.into();
        let dismiss = dismiss_after.map(|wait| {
            let renderer = Arc::clone(&renderer);
            let id = id.clone();
            debounce(move |()| renderer.progress_hide(id.as_str()), wait)
        });
        Self {
            renderer,
            id,
            dismiss,
        }
    }

    /// Alert that hides after `[ui] alert_dismiss_ms` (`0` keeps it up).
    pub fn from_config(
        renderer: Arc<StatusRenderer<R>>,
        id: impl Into<String>,
        ui: &UiConfig,
    ) -> Self {
        Self::new(renderer, id, ui.alert_dismiss())
    }

    pub fn dismiss_after(&self) -> Option<Duration> {
        self.dismiss.as_ref().map(Debounced::wait)
    }

    pub fn error(&self, message: &str) {
        self.show(&DisplayState::error(message));
    }

    /// Render `state`, make the container visible and restart the countdown.
    /// `Hidden` hides immediately.
    pub fn show(&self, state: &DisplayState) {
        self.renderer.apply(self.id.as_str(), state);
        if matches!(state, DisplayState::Hidden) {
            return;
        }
        if let Some(container) = self.renderer.resolver().resolve(&self.id) {
            container.set_visible(true);
        }
        if let Some(dismiss) = &self.dismiss {
            dismiss.call(());
        }
    }
}
