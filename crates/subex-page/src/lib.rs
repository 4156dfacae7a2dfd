//! Page behaviors built on the debounce scheduler and status renderer.
//!
//! - [`ListFilter`] / [`SearchBinding`]: debounced substring filtering
//! - [`validate_required`] / [`check_form`]: required-field checks
//! - [`KeyRouter`]: keyboard shortcuts
//! - [`DropZone`]: drag-and-drop upload state
//! - [`FlashAlert`]: alerts that hide themselves after a delay

mod dropzone;
mod filter;
mod flash;
mod form;
mod keys;

pub use dropzone::{DropOutcome, DropZone, VIDEO_EXTENSIONS};
pub use filter::{FilterResult, ListFilter, SearchBinding};
pub use flash::FlashAlert;
pub use form::{Field, check_form, validate_required};
pub use keys::{Action, KeyPress, KeyRouter, ParseShortcutError, Shortcut};
