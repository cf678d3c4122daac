//! Event and command types for driving the controller.
//!
//! The host translates its own input events into these types and calls the
//! matching controller handler. Key handlers report back whether the key was
//! consumed (so the host can suppress the environment default, e.g. caret
//! movement on Up/Down) and whether a deferred command must run once the
//! current dispatch turn has completed.

use std::fmt;

/// Keyboard key relevant to the combobox interaction pattern.
///
/// Anything the controller does not give special meaning to arrives as
/// [`Key::Char`] and drives filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Return/Enter.
    Enter,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Shift (arrives on release like any other key, but never filters).
    Shift,
    /// A typed character.
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Enter => write!(f, "enter"),
            Self::Tab => write!(f, "tab"),
            Self::Escape => write!(f, "esc"),
            Self::Backspace => write!(f, "backspace"),
            Self::Shift => write!(f, "shift"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Where a pointer-down interaction landed, as seen by the outside-interaction
/// notifier the host registers the controller with.
///
/// Interactions on the controller's own surfaces are suppressed (their
/// dedicated handlers take over); anything else closes the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The text field itself.
    Field,
    /// A descendant of the text field.
    FieldDescendant,
    /// The toggle control.
    Toggle,
    /// Anywhere else in the host environment.
    Elsewhere,
}

/// A deferred follow-up action.
///
/// Handlers return a command when an effect must not run within the current
/// dispatch turn. The host schedules it on its task queue with zero delay and
/// feeds it back through [`Combobox::run`](crate::combobox::Combobox::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Clear the text field's literal value.
    ClearValue,
}

/// Result of a key handler invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Whether the controller consumed the key. The host should suppress the
    /// environment's default handling for consumed keys.
    pub consumed: bool,
    /// Deferred command to run after the current dispatch turn, if any.
    pub cmd: Option<Cmd>,
}

impl KeyOutcome {
    /// An outcome that consumed the key with no follow-up.
    #[must_use]
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            cmd: None,
        }
    }

    /// An outcome that left the key to the environment.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }
}
