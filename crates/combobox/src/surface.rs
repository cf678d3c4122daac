//! UI surface ports.
//!
//! The controller never touches a concrete widget toolkit. Instead it drives
//! three small ports: a focusable text field, an optional labelled toggle,
//! and an option listbox. A real UI runtime implements these over its own
//! widget primitives; tests and headless hosts use the in-memory versions in
//! [`crate::mem`].
//!
//! Accessibility bookkeeping goes through the generic attribute operations on
//! [`TextField`] using the names below, so host bindings can forward them
//! verbatim to their accessibility tree.

/// Expansion state of the field's popup (`"true"`/`"false"`).
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Identifier of the currently active option entry. Present only while an
/// entry is active.
pub const ARIA_ACTIVEDESCENDANT: &str = "aria-activedescendant";

/// Identifier of the listbox the field controls. Present only while an entry
/// is active.
pub const ARIA_CONTROLS: &str = "aria-controls";

/// Declared autocomplete capability of the field. The controller reads this
/// once at construction; the value `"both"` enables inline autocompletion.
pub const ARIA_AUTOCOMPLETE: &str = "aria-autocomplete";

/// Port for the text input surface.
///
/// Selection range offsets are counted in grapheme clusters.
pub trait TextField {
    /// Returns the current literal text.
    fn value(&self) -> String;

    /// Overwrites the literal text.
    fn set_value(&mut self, value: &str);

    /// Returns a declared attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Sets a declared attribute.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Removes a declared attribute. Removing an absent attribute is a no-op.
    fn remove_attribute(&mut self, name: &str);

    /// Selects the text between `start` and `end` (grapheme offsets).
    fn set_selection_range(&mut self, start: usize, end: usize);

    /// Enables or disables interaction with the field.
    fn set_enabled(&mut self, enabled: bool);

    /// Requests input focus for the field.
    fn focus(&mut self);
}

/// Port for the optional toggle control next to the field.
pub trait ToggleControl {
    /// Returns the descriptive label, if any.
    fn label(&self) -> Option<String>;

    /// Replaces the descriptive label.
    fn set_label(&mut self, label: &str);
}

/// No-op toggle for hosts without a toggle control.
impl ToggleControl for () {
    fn label(&self) -> Option<String> {
        None
    }

    fn set_label(&mut self, _label: &str) {}
}

/// Port for the results container.
///
/// The controller owns the render pass; the listbox only mirrors it. Entries
/// are replaced wholesale on every filter pass and discarded on close.
pub trait OptionListbox {
    /// Returns the container's stable identifier, used to derive positional
    /// entry identifiers.
    fn id(&self) -> &str;

    /// Shows or hides the container.
    fn set_visible(&mut self, visible: bool);

    /// Appends an option entry with the given identifier and label. `selected`
    /// sets the entry's initial selected marker.
    fn append_option(&mut self, id: &str, label: &str, selected: bool);

    /// Updates the selected marker of the entry at `index`. Out-of-range
    /// indices are a no-op.
    fn set_option_selected(&mut self, index: usize, selected: bool);

    /// Removes all option entries.
    fn clear_options(&mut self);
}
