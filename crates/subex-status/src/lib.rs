//! Status and progress rendering for subex pages.
//!
//! A [`StatusRenderer`] draws a [`DisplayState`] into a container found
//! through a caller-supplied [`ContainerResolver`]. Every operation fully
//! replaces what the container showed before, so the last call always wins.
//! A target that does not resolve turns the operation into a no-op.

mod document;
mod markup;
mod state;

use std::sync::Arc;

pub use document::{Document, MemoryContainer};
pub use markup::{Element, Markup, Node};
pub use state::{DEFAULT_LOADING_MESSAGE, DEFAULT_PROGRESS_MESSAGE, DisplayState};

/// A UI region that status markup is rendered into.
pub trait Container: Send + Sync {
    /// Replace the entire content tree.
    fn replace_content(&self, content: Markup);
    fn set_visible(&self, visible: bool);
}

/// Looks up containers by element id.
pub trait ContainerResolver: Send + Sync {
    fn resolve(&self, id: &str) -> Option<Arc<dyn Container>>;
}

impl<T: ContainerResolver + ?Sized> ContainerResolver for Arc<T> {
    fn resolve(&self, id: &str) -> Option<Arc<dyn Container>> {
        (**self).resolve(id)
    }
}

impl<T: ContainerResolver + ?Sized> ContainerResolver for &T {
    fn resolve(&self, id: &str) -> Option<Arc<dyn Container>> {
        (**self).resolve(id)
    }
}

/// Where to render: an element id resolved at call time, or a direct handle.
#[derive(Clone)]
pub enum Target<'a> {
    Id(&'a str),
    Handle(Arc<dyn Container>),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(id: &'a str) -> Self {
        Target::Id(id)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(id: &'a String) -> Self {
        Target::Id(id)
    }
}

impl From<Arc<dyn Container>> for Target<'_> {
    fn from(handle: Arc<dyn Container>) -> Self {
        Target::Handle(handle)
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Target::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

/// Renders display states into containers.
pub struct StatusRenderer<R> {
    resolver: R,
}

impl<R: ContainerResolver> StatusRenderer<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Spinner with `message`, or [`DEFAULT_LOADING_MESSAGE`].
    pub fn show_loading<'a>(&self, target: impl Into<Target<'a>>, message: Option<&str>) {
        let state = DisplayState::loading(message.unwrap_or(DEFAULT_LOADING_MESSAGE));
        self.with_container(target.into(), |c| c.replace_content(state.render()));
    }

    /// Alert with `message`. The message is rendered as text, never as markup.
    pub fn show_error<'a>(&self, target: impl Into<Target<'a>>, message: &str) {
        let state = DisplayState::error(message);
        self.with_container(target.into(), |c| c.replace_content(state.render()));
    }

    /// Show the container with `message`, or [`DEFAULT_PROGRESS_MESSAGE`],
    /// and no bar.
    pub fn progress_show<'a>(&self, target: impl Into<Target<'a>>, message: Option<&str>) {
        let state = DisplayState::progress(message.unwrap_or(DEFAULT_PROGRESS_MESSAGE), None);
        self.with_container(target.into(), |c| {
            c.replace_content(state.render());
            c.set_visible(true);
        });
    }

    /// Replace the progress message; draws a bar only when `percent` is given.
    /// Visibility is left alone.
    pub fn progress_update<'a>(
        &self,
        target: impl Into<Target<'a>>,
        message: &str,
        percent: Option<u8>,
    ) {
        let state = DisplayState::progress(message, percent);
        self.with_container(target.into(), |c| c.replace_content(state.render()));
    }

    /// Hide the container. Its markup stays as it was.
    pub fn progress_hide<'a>(&self, target: impl Into<Target<'a>>) {
        self.with_container(target.into(), |c| c.set_visible(false));
    }

    /// Render an arbitrary state.
    ///
    /// `Hidden` hides the container; every other state replaces its content
    /// without touching visibility.
    pub fn apply<'a>(&self, target: impl Into<Target<'a>>, state: &DisplayState) {
        self.with_container(target.into(), |c| match state {
            DisplayState::Hidden => c.set_visible(false),
            _ => c.replace_content(state.render()),
        });
    }

    fn with_container(&self, target: Target<'_>, f: impl FnOnce(&dyn Container)) {
        let container = match target {
            Target::Handle(handle) => handle,
            Target::Id(id) => match self.resolver.resolve(id) {
                Some(container) => container,
                None => {
                    tracing::trace!(id, "status container not found, skipping");
                    return;
                }
            },
        };
        f(container.as_ref());
    }
}
