use std::fmt;
use std::str::FromStr;

/// What a shortcut asks the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusSearch,
    ClearSearch,
    Submit,
}

/// A key press as reported by the event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name, e.g. `"k"`, `"/"`, `"Escape"`, `"Enter"`.
    pub key: String,
    pub ctrl: bool,
    /// Cmd on macOS; treated the same as `ctrl`.
    pub meta: bool,
    /// Focus is inside a text input.
    pub in_text_field: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            in_text_field: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }
}

/// A key combination such as `Ctrl+K`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    key: String,
    ctrl: bool,
}

impl Shortcut {
    fn matches(&self, press: &KeyPress) -> bool {
        self.ctrl == (press.ctrl || press.meta) && self.key == press.key.to_lowercase()
    }

    /// Unmodified single-character shortcuts would swallow typing.
    fn is_typing_key(&self) -> bool {
        !self.ctrl && self.key.chars().count() == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShortcutError(String);

impl fmt::Display for ParseShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid shortcut '{}'", self.0)
    }
}

impl std::error::Error for ParseShortcutError {}

impl FromStr for Shortcut {
    type Err = ParseShortcutError;

    /// `"k"`, `"Ctrl+K"`, `"cmd+enter"`, `"Escape"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ctrl = false;
        let mut key = None;
        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "" => return Err(ParseShortcutError(s.to_string())),
                "ctrl" | "cmd" | "meta" => ctrl = true,
                other if key.is_none() => key = Some(other.to_string()),
                _ => return Err(ParseShortcutError(s.to_string())),
            }
        }
        match key {
            Some(key) => Ok(Self { key, ctrl }),
            None => Err(ParseShortcutError(s.to_string())),
        }
    }
}

/// Maps key presses to page actions.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    bindings: Vec<(Shortcut, Action)>,
}

impl KeyRouter {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, shortcut: Shortcut, action: Action) -> Self {
        self.bindings.push((shortcut, action));
        self
    }

    /// First matching binding wins.
    pub fn route(&self, press: &KeyPress) -> Option<Action> {
        self.bindings
            .iter()
            .filter(|(shortcut, _)| !(press.in_text_field && shortcut.is_typing_key()))
            .find(|(shortcut, _)| shortcut.matches(press))
            .map(|(_, action)| *action)
    }
}

impl Default for KeyRouter {
    /// `Ctrl+K` and `/` focus the search field, `Escape` clears it,
    /// `Ctrl+Enter` submits.
    fn default() -> Self {
        let shortcut = |s: &str| Shortcut {
            key: s.to_string(),
            ctrl: false,
        };
        let ctrl = |s: &str| Shortcut {
            key: s.to_string(),
            ctrl: true,
        };
        Self::empty()
            .bind(ctrl("k"), Action::FocusSearch)
            .bind(shortcut("/"), Action::FocusSearch)
            .bind(shortcut("escape"), Action::ClearSearch)
            .bind(ctrl("enter"), Action::Submit)
    }
}
