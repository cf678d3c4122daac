//! In-memory surface implementations.
//!
//! These implement the ports in [`crate::surface`] over plain data, recording
//! every write the controller makes. They back the crate's tests and any
//! headless host (the demo binary renders them to a terminal).

use std::collections::BTreeMap;

use crate::surface::{OptionListbox, TextField, ToggleControl};

/// In-memory text field recording value, attributes, selection, enablement,
/// and focus requests.
#[derive(Debug, Clone, Default)]
pub struct MemTextField {
    value: String,
    attributes: BTreeMap<String, String>,
    selection: Option<(usize, usize)>,
    disabled: bool,
    focused: bool,
}

impl MemTextField {
    /// Creates an empty, enabled field with no declared attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field with a declared attribute already set. Handy for
    /// declaring the autocomplete capability before construction.
    #[must_use]
    pub fn with_attribute(name: &str, value: &str) -> Self {
        let mut field = Self::new();
        field.set_attribute(name, value);
        field
    }

    /// Returns the last selection range written, if any.
    #[must_use]
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Returns whether the field is enabled.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    /// Returns whether focus has been requested on the field.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }
}

impl TextField for MemTextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        // A programmatic overwrite collapses any prior selection.
        self.selection = None;
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        self.selection = Some((start, end));
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

/// In-memory toggle control.
#[derive(Debug, Clone, Default)]
pub struct MemToggle {
    label: Option<String>,
}

impl MemToggle {
    /// Creates a toggle with the given descriptive label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

impl ToggleControl for MemToggle {
    fn label(&self) -> Option<String> {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }
}

/// A rendered option entry inside a [`MemListbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemOption {
    /// Positional identifier.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Selected accessibility marker.
    pub selected: bool,
}

/// In-memory option listbox.
#[derive(Debug, Clone)]
pub struct MemListbox {
    id: String,
    visible: bool,
    options: Vec<MemOption>,
}

impl MemListbox {
    /// Creates a hidden, empty listbox with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: false,
            options: Vec::new(),
        }
    }

    /// Returns whether the listbox is visible.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Returns the rendered option entries.
    #[must_use]
    pub fn options(&self) -> &[MemOption] {
        &self.options
    }
}

impl OptionListbox for MemListbox {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn append_option(&mut self, id: &str, label: &str, selected: bool) {
        self.options.push(MemOption {
            id: id.to_string(),
            label: label.to_string(),
            selected,
        });
    }

    fn set_option_selected(&mut self, index: usize, selected: bool) {
        if let Some(option) = self.options.get_mut(index) {
            option.selected = selected;
        }
    }

    fn clear_options(&mut self) {
        self.options.clear();
    }
}
