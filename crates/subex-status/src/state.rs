use crate::markup::{Element, Markup};

pub const DEFAULT_LOADING_MESSAGE: &str = "Loading…";
pub const DEFAULT_PROGRESS_MESSAGE: &str = "Processing…";

/// The visual mode of a status container.
///
/// Exactly one state is current for a container; rendering a new one replaces
/// the old markup entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Not displayed. Leaves existing markup in place.
    Hidden,
    /// Inline spinner with a message.
    Loading { message: String },
    /// Non-dismissible alert.
    Error { message: String },
    /// Message with an optional thin bar, `percent` in `0..=100`.
    Progress {
        message: String,
        percent: Option<u8>,
    },
}

impl DisplayState {
    pub fn loading(message: impl Into<String>) -> Self {
        DisplayState::Loading {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        DisplayState::Error {
            message: message.into(),
        }
    }

    /// Progress state; percentages above 100 are clamped.
    pub fn progress(message: impl Into<String>, percent: Option<u8>) -> Self {
        DisplayState::Progress {
            message: message.into(),
            percent: percent.map(|p| p.min(100)),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            DisplayState::Hidden => None,
            DisplayState::Loading { message }
            | DisplayState::Error { message }
            | DisplayState::Progress { message, .. } => Some(message),
        }
    }

    /// Render to a content tree. `Hidden` renders nothing.
    pub fn render(&self) -> Markup {
        match self {
            DisplayState::Hidden => Markup::empty(),
            DisplayState::Loading { message } => Element::new("div")
                .class("status status-loading d-flex align-items-center")
                .attr("role", "status")
                .child(
                    Element::new("span")
                        .class("spinner-border spinner-border-sm me-2")
                        .attr("aria-hidden", "true"),
                )
                .child(message_span(message))
                .into(),
            DisplayState::Error { message } => Element::new("div")
                .class("status status-error alert alert-danger")
                .attr("role", "alert")
                .child(message_span(message))
                .into(),
            DisplayState::Progress { message, percent } => {
                let mut root = Element::new("div")
                    .class("status status-progress")
                    .child(message_span(message));
                if let Some(percent) = percent {
                    root = root.child(progress_bar(*percent));
                }
                root.into()
            }
        }
    }
}

fn message_span(message: &str) -> Element {
    Element::new("span").class("status-message").text(message)
}

fn progress_bar(percent: u8) -> Element {
    Element::new("div")
        .class("progress")
        .attr("style", "height: 4px;")
        .child(
            Element::new("div")
                .class("progress-bar")
                .attr("role", "progressbar")
                .attr("style", format!("width: {percent}%;"))
                .attr("aria-valuenow", percent.to_string())
                .attr("aria-valuemin", "0")
                .attr("aria-valuemax", "100"),
        )
}
