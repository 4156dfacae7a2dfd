use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use subex_status::{Container, ContainerResolver, Markup};

use crate::style;

/// Id of the single status line the CLI renders into.
pub const STATUS_ID: &str = "status";

/// A status container drawn on stderr with `indicatif`.
///
/// The markup is read the way assistive technology reads it: an `alert`
/// role ends the line with a cross mark, a `progressbar` role drives a bar
/// from `aria-valuenow`, anything else is a spinner with the text content.
pub struct TerminalContainer {
    draw_hidden: bool,
    inner: Mutex<Inner>,
}

struct Inner {
    markup: Markup,
    bar: Option<ProgressBar>,
    visible: bool,
    finished: Option<String>,
}

impl TerminalContainer {
    pub fn stderr() -> Self {
        Self::new(false)
    }

    /// Draws nothing; state can still be inspected.
    pub fn hidden() -> Self {
        Self::new(true)
    }

    fn new(draw_hidden: bool) -> Self {
        Self {
            draw_hidden,
            inner: Mutex::new(Inner {
                markup: Markup::empty(),
                bar: None,
                visible: true,
                finished: None,
            }),
        }
    }

    /// End the current line with a check mark.
    pub fn finish_ok(&self, message: &str) {
        let mut inner = self.lock();
        let bar = inner.bar.take().unwrap_or_else(|| self.new_bar());
        let line = format!("{} {message}", style::check_mark());
        bar.set_style(plain_style());
        bar.finish_with_message(line.clone());
        inner.finished = Some(line);
    }

    pub fn markup(&self) -> Markup {
        self.lock().markup.clone()
    }

    /// Message of the live spinner or bar.
    pub fn message(&self) -> Option<String> {
        self.lock().bar.as_ref().map(|bar| bar.message())
    }

    /// Position of the live bar, `0..=100`.
    pub fn position(&self) -> Option<u64> {
        let inner = self.lock();
        let bar = inner.bar.as_ref()?;
        bar.length().map(|_| bar.position())
    }

    /// Last line printed by an alert or [`finish_ok`](Self::finish_ok).
    pub fn finished(&self) -> Option<String> {
        self.lock().finished.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_bar(&self) -> ProgressBar {
        if self.draw_hidden {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        }
    }

    fn draw(&self, inner: &mut Inner) {
        if inner.markup.is_empty() {
            if let Some(bar) = inner.bar.take() {
                bar.finish_and_clear();
            }
            return;
        }

        let message = inner.markup.text_content();

        if inner.markup.find_by_role("alert").is_some() {
            let bar = inner.bar.take().unwrap_or_else(|| self.new_bar());
            let line = format!("{} {message}", style::cross_mark());
            bar.set_style(plain_style());
            bar.finish_with_message(line.clone());
            inner.finished = Some(line);
            return;
        }

        let percent = inner
            .markup
            .find_by_role("progressbar")
            .and_then(|el| el.get_attr("aria-valuenow"))
            .and_then(|v| v.parse::<u64>().ok());

        let bar = inner.bar.get_or_insert_with(|| self.new_bar());
        match percent {
            Some(percent) => {
                bar.disable_steady_tick();
                bar.set_style(bar_style());
                bar.set_length(100);
                bar.set_position(percent);
            }
            None => {
                bar.set_style(spinner_style());
                bar.unset_length();
                bar.enable_steady_tick(Duration::from_millis(80));
            }
        }
        bar.set_message(message);
    }
}

impl Container for TerminalContainer {
    fn replace_content(&self, content: Markup) {
        let mut inner = self.lock();
        inner.markup = content;
        if inner.visible {
            self.draw(&mut inner);
        }
    }

    fn set_visible(&self, visible: bool) {
        let mut inner = self.lock();
        let was_visible = inner.visible;
        inner.visible = visible;
        if !visible {
            if let Some(bar) = inner.bar.take() {
                bar.finish_and_clear();
            }
        } else if !was_visible {
            self.draw(&mut inner);
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} [{bar:30.cyan/blue}] {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn plain_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Resolves [`STATUS_ID`] to the terminal status line.
#[derive(Clone)]
pub struct TerminalPage {
    status: Arc<TerminalContainer>,
}

impl TerminalPage {
    pub fn new(status: TerminalContainer) -> Self {
        Self {
            status: Arc::new(status),
        }
    }

    pub fn status(&self) -> &TerminalContainer {
        &self.status
    }
}

impl ContainerResolver for TerminalPage {
    fn resolve(&self, id: &str) -> Option<Arc<dyn Container>> {
        (id == STATUS_ID).then(|| Arc::clone(&self.status) as Arc<dyn Container>)
    }
}

#[cfg(test)]
mod tests {
    use subex_status::StatusRenderer;

    use super::*;

    fn renderer() -> StatusRenderer<TerminalPage> {
        StatusRenderer::new(TerminalPage::new(TerminalContainer::hidden()))
    }

    #[test]
    fn loading_is_a_spinner_with_message() {
        let renderer = renderer();
        renderer.show_loading(STATUS_ID, Some("Extracting track 2"));

        let status = renderer.resolver().status();
        assert_eq!(status.message().as_deref(), Some("Extracting track 2"));
        assert_eq!(status.position(), None);
    }

    #[test]
    fn progress_percent_drives_bar() {
        let renderer = renderer();
        renderer.progress_show(STATUS_ID, None);
        renderer.progress_update(STATUS_ID, "Downloading", Some(42));

        let status = renderer.resolver().status();
        assert_eq!(status.position(), Some(42));
        assert_eq!(status.message().as_deref(), Some("Downloading"));

        renderer.progress_update(STATUS_ID, "Finishing", None);
        assert_eq!(status.position(), None);
    }

    #[test]
    fn error_finishes_line_with_cross() {
        let renderer = renderer();
        renderer.show_loading(STATUS_ID, None);
        renderer.show_error(STATUS_ID, "Invalid video path");

        let status = renderer.resolver().status();
        assert!(status.message().is_none());
        let line = status.finished().unwrap();
        assert!(line.ends_with("Invalid video path"), "{line}");
        assert!(line.contains('\u{2718}'));
    }

    #[test]
    fn hide_keeps_markup_and_restores() {
        let renderer = renderer();
        renderer.progress_show(STATUS_ID, Some("Go"));
        renderer.progress_hide(STATUS_ID);

        let status = renderer.resolver().status();
        assert!(status.message().is_none());
        assert_eq!(status.markup().text_content(), "Go");

        status.set_visible(true);
        assert_eq!(status.message().as_deref(), Some("Go"));
    }

    #[test]
    fn finish_ok_prints_check_mark() {
        let renderer = renderer();
        renderer.show_loading(STATUS_ID, None);

        let status = renderer.resolver().status();
        status.finish_ok("Extracted 312 lines");
        assert!(status.message().is_none());
        assert!(status.finished().unwrap().ends_with("Extracted 312 lines"));
    }

    #[test]
    fn other_ids_do_not_resolve() {
        let page = TerminalPage::new(TerminalContainer::hidden());
        assert!(page.resolve(STATUS_ID).is_some());
        assert!(page.resolve("progress").is_none());
    }
}
