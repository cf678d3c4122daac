//! The combobox interaction controller.
//!
//! This module provides the state machine binding a text field, an optional
//! toggle control, and an option listbox into an accessible autocomplete
//! widget. The controller owns its surfaces and its candidate list; the host
//! feeds it events and reacts to lifecycle hooks.
//!
//! # Example
//!
//! ```rust
//! use combobox::combobox::Combobox;
//! use combobox::event::Key;
//! use combobox::mem::{MemListbox, MemTextField, MemToggle};
//!
//! let field = MemTextField::new();
//! let listbox = MemListbox::new("lb1");
//! let fruits = vec!["Apple".to_string(), "Banana".to_string()];
//!
//! let mut cb = Combobox::new(field, listbox, fruits)
//!     .with_toggle(MemToggle::new("Show fruit options"))
//!     .with_initial_value("Apple");
//!
//! cb.focus();
//! assert!(cb.is_open());
//! assert_eq!(cb.results_count(), 2);
//!
//! cb.key_down(Key::Down);
//! assert_eq!(cb.active_index(), Some(0));
//! ```

use std::fmt;

use crate::candidate::Candidate;
use crate::event::{Cmd, Key, KeyOutcome, PointerTarget};
use crate::filter;
use crate::surface::{
    ARIA_ACTIVEDESCENDANT, ARIA_AUTOCOMPLETE, ARIA_CONTROLS, ARIA_EXPANDED, OptionListbox,
    TextField, ToggleControl,
};
use unicode_segmentation::UnicodeSegmentation;

/// One entry of the current render pass.
///
/// Entries carry a positional identifier (`<listbox-id>-result-item-<index>`)
/// rather than a direct reference into the listbox, so a stale index after a
/// re-render resolves to nothing instead of dangling. The whole pass is
/// discarded whenever the listbox closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOption {
    /// Positional identifier, dense over the current pass.
    pub id: String,
    /// The candidate's display label.
    pub label: String,
    /// Index of the source candidate in the controller's candidate list.
    pub candidate: usize,
    /// Whether the entry carries the selected accessibility marker.
    pub selected: bool,
}

/// Lifecycle hooks supplied by the host. Missing hooks default to no-ops.
struct Hooks<C, L> {
    on_shown: Box<dyn FnMut()>,
    on_hidden: Box<dyn FnMut()>,
    on_select: Box<dyn FnMut(Option<&C>)>,
    on_error: Box<dyn FnMut(&L)>,
}

impl<C, L> Default for Hooks<C, L> {
    fn default() -> Self {
        Self {
            on_shown: Box::new(|| {}),
            on_hidden: Box::new(|| {}),
            on_select: Box::new(|_| {}),
            on_error: Box::new(|_| {}),
        }
    }
}

/// Accessible combobox controller.
///
/// Generic over the candidate type and the three surface ports. Hosts without
/// a toggle control can leave `T` at its default of `()`.
pub struct Combobox<C, F, L, T = ()>
where
    C: Candidate,
    F: TextField,
    L: OptionListbox,
    T: ToggleControl,
{
    input: F,
    listbox: L,
    toggle: Option<T>,
    candidates: Vec<C>,
    hooks: Hooks<C, L>,
    /// Current render pass, rebuilt on every filter run.
    rendered: Vec<RenderedOption>,
    /// Active entry index into the render pass, if any.
    active: Option<usize>,
    open: bool,
    auto_select_first: bool,
    /// Fixed at construction from the field's declared autocomplete
    /// capability: `"both"` means the active entry's label is provisionally
    /// written into the field as the user navigates.
    inline_autocomplete: bool,
}

impl<C, F, L> Combobox<C, F, L>
where
    C: Candidate,
    F: TextField,
    L: OptionListbox,
{
    /// Creates a controller over the given field, listbox, and candidates.
    ///
    /// The field's `aria-autocomplete` attribute is read once here; the value
    /// `"both"` enables inline autocompletion for the controller's lifetime.
    #[must_use]
    pub fn new(input: F, listbox: L, candidates: Vec<C>) -> Self {
        let inline_autocomplete =
            input.attribute(ARIA_AUTOCOMPLETE).as_deref() == Some("both");

        Self {
            input,
            listbox,
            toggle: None,
            candidates,
            hooks: Hooks::default(),
            rendered: Vec::new(),
            active: None,
            open: false,
            auto_select_first: false,
            inline_autocomplete,
        }
    }
}

impl<C, F, L, T> Combobox<C, F, L, T>
where
    C: Candidate,
    F: TextField,
    L: OptionListbox,
    T: ToggleControl,
{
    /// Attaches a toggle control.
    #[must_use]
    pub fn with_toggle<T2: ToggleControl>(self, toggle: T2) -> Combobox<C, F, L, T2> {
        Combobox {
            input: self.input,
            listbox: self.listbox,
            toggle: Some(toggle),
            candidates: self.candidates,
            hooks: self.hooks,
            rendered: self.rendered,
            active: self.active,
            open: self.open,
            auto_select_first: self.auto_select_first,
            inline_autocomplete: self.inline_autocomplete,
        }
    }

    /// Pre-populates the field when the value exactly matches a candidate's
    /// trimmed label; otherwise it is ignored.
    #[must_use]
    pub fn with_initial_value(mut self, value: &str) -> Self {
        if self.candidates.iter().any(|c| c.label().trim() == value) {
            self.input.set_attribute("value", value);
            self.input.set_value(value);
        }
        self
    }

    /// Marks the first match active/selected on every render pass.
    #[must_use]
    pub fn auto_select_first(mut self, enabled: bool) -> Self {
        self.auto_select_first = enabled;
        self
    }

    /// Sets the hook fired on every transition into a visible results state.
    #[must_use]
    pub fn on_shown(mut self, f: impl FnMut() + 'static) -> Self {
        self.hooks.on_shown = Box::new(f);
        self
    }

    /// Sets the hook fired on every transition from visible to hidden.
    #[must_use]
    pub fn on_hidden(mut self, f: impl FnMut() + 'static) -> Self {
        self.hooks.on_hidden = Box::new(f);
        self
    }

    /// Sets the hook fired when a candidate is committed. Escape-triggered
    /// invocations carry no candidate.
    #[must_use]
    pub fn on_select(mut self, f: impl FnMut(Option<&C>) + 'static) -> Self {
        self.hooks.on_select = Box::new(f);
        self
    }

    /// Sets the hook fired when a filter pass yields zero matches for a
    /// non-empty query. Receives the listbox so the host can render an
    /// empty-state message into it.
    #[must_use]
    pub fn on_error(mut self, f: impl FnMut(&L) + 'static) -> Self {
        self.hooks.on_error = Box::new(f);
        self
    }

    /// Returns the text field surface.
    pub fn input(&self) -> &F {
        &self.input
    }

    /// Returns the text field surface mutably. Hosts use this to mirror typed
    /// text into the field before delivering the key release.
    pub fn input_mut(&mut self) -> &mut F {
        &mut self.input
    }

    /// Returns the listbox surface.
    pub fn listbox(&self) -> &L {
        &self.listbox
    }

    /// Returns the toggle surface, if any.
    pub fn toggle(&self) -> Option<&T> {
        self.toggle.as_ref()
    }

    /// Returns the candidate list.
    pub fn candidates(&self) -> &[C] {
        &self.candidates
    }

    /// Returns the current render pass.
    pub fn options(&self) -> &[RenderedOption] {
        &self.rendered
    }

    /// Returns whether the results surface is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the active entry index, if any.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Returns the size of the currently displayed result set.
    #[must_use]
    pub fn results_count(&self) -> usize {
        self.rendered.len()
    }

    /// Runs a filter pass and re-renders the result list.
    ///
    /// With `show_all` the full candidate list is rendered regardless of the
    /// field's value; otherwise the candidates whose label contains the value
    /// case-insensitively are rendered, in original relative order. The
    /// previous render is always torn down first, so a pass while open emits
    /// `hidden` before `shown`. A zero-match pass with a non-empty query
    /// fires the error hook and leaves the listbox visible and empty.
    pub fn update_results(&mut self, show_all: bool) {
        let query = self.input.value();
        let matched: Vec<usize> = if show_all {
            (0..self.candidates.len()).collect()
        } else {
            filter::filter_indices(&query, &self.candidates)
        };

        self.hide_listbox();

        if !matched.is_empty() {
            for (position, &candidate) in matched.iter().enumerate() {
                let id = self.option_id(position);
                let label = self.candidates[candidate].label().to_string();
                let selected = self.auto_select_first && position == 0;
                self.listbox.append_option(&id, &label, selected);
                if selected {
                    self.active = Some(0);
                }
                self.rendered.push(RenderedOption {
                    id,
                    label,
                    candidate,
                    selected,
                });
            }
            self.listbox.set_visible(true);
            self.input.set_attribute(ARIA_EXPANDED, "true");
            self.open = true;
            tracing::debug!(results = self.rendered.len(), "results shown");
        } else if !query.is_empty() {
            tracing::debug!(%query, "no matches for query");
            (self.hooks.on_error)(&self.listbox);
            self.listbox.set_visible(true);
            self.open = true;
        }

        if self.open {
            (self.hooks.on_shown)();
        }
    }

    /// Handles a key press (before the environment inserts text).
    ///
    /// Escape resets the widget. Up/Down cycle the active entry with
    /// wrap-around and are reported consumed; Return commits the active entry
    /// and Tab commits then closes, both left to the environment default.
    pub fn key_down(&mut self, key: Key) -> KeyOutcome {
        if key == Key::Escape {
            return KeyOutcome {
                consumed: false,
                cmd: self.reset(),
            };
        }

        // Snapshot before any show-all render below: both the wrap-around
        // math and the entry to unmark use the pre-render index.
        let previous = self.active;

        if self.rendered.is_empty() {
            if self.inline_autocomplete && matches!(key, Key::Up | Key::Down) {
                self.update_results(true);
            } else {
                return KeyOutcome::ignored();
            }
        }

        let next = match key {
            Key::Up => match previous {
                None | Some(0) => self.rendered.len().checked_sub(1),
                Some(i) => Some(i - 1),
            },
            Key::Down => match previous {
                Some(i) if i + 1 < self.rendered.len() => Some(i + 1),
                _ => Some(0),
            },
            Key::Enter => {
                self.select_at(previous);
                return KeyOutcome::ignored();
            }
            Key::Tab => {
                self.check_selection();
                self.hide_listbox();
                return KeyOutcome::ignored();
            }
            _ => return KeyOutcome::ignored(),
        };

        self.active = next;

        if let Some(p) = previous {
            if let Some(entry) = self.rendered.get_mut(p) {
                entry.selected = false;
                self.listbox.set_option_selected(p, false);
            }
        }

        let resolved = next.and_then(|i| {
            self.rendered
                .get(i)
                .map(|entry| (i, entry.id.clone(), entry.label.clone()))
        });
        match resolved {
            Some((index, id, label)) => {
                self.input.set_attribute(ARIA_ACTIVEDESCENDANT, &id);
                let controls = self.listbox.id().to_string();
                self.input.set_attribute(ARIA_CONTROLS, &controls);
                if let Some(entry) = self.rendered.get_mut(index) {
                    entry.selected = true;
                }
                self.listbox.set_option_selected(index, true);
                if self.inline_autocomplete {
                    self.input.set_value(&label);
                }
            }
            None => {
                self.input.remove_attribute(ARIA_ACTIVEDESCENDANT);
                self.input.remove_attribute(ARIA_CONTROLS);
            }
        }

        KeyOutcome::consumed()
    }

    /// Handles a key release (after the environment updated the field).
    ///
    /// Escape reports the pending selection as cleared; navigation and commit
    /// keys are consumed no-ops here. Anything else filters with the current
    /// field value and, in inline-autocomplete mode, runs the completion
    /// assist (except after Backspace, so deletions are not fought).
    pub fn key_up(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Escape => {
                (self.hooks.on_select)(None);
                return KeyOutcome::consumed();
            }
            Key::Up | Key::Down | Key::Enter | Key::Tab | Key::Shift => {
                return KeyOutcome::consumed();
            }
            _ => self.update_results(false),
        }

        if self.inline_autocomplete && key != Key::Backspace {
            self.autocomplete_assist();
        }

        KeyOutcome::ignored()
    }

    /// Handles the field gaining focus: opens with the unfiltered full list.
    pub fn focus(&mut self) {
        self.update_results(true);
    }

    /// Handles the field losing focus: commits the highlighted entry, if any.
    pub fn blur(&mut self) {
        self.check_selection();
    }

    /// Handles a click on the rendered entry at `index`. A stale index is a
    /// no-op.
    pub fn click_option(&mut self, index: usize) {
        self.select_at(Some(index));
    }

    /// Handles a click on the toggle control: flips open/closed and swaps
    /// "Show"/"Hide" in the toggle's descriptive label. Inert without a
    /// toggle surface or with an empty candidate list.
    pub fn toggle_click(&mut self) {
        if self.toggle.is_none() || self.candidates.is_empty() {
            return;
        }

        if self.open {
            self.hide_listbox();
            if let Some(toggle) = self.toggle.as_mut() {
                if let Some(label) = toggle.label() {
                    toggle.set_label(&label.replace("Hide", "Show"));
                }
            }
        } else {
            if let Some(toggle) = self.toggle.as_mut() {
                if let Some(label) = toggle.label() {
                    toggle.set_label(&label.replace("Show", "Hide"));
                }
            }
            self.input.focus();
            self.update_results(true);
        }
    }

    /// Handles a pointer-down anywhere in the host environment. Returns
    /// `true` when the interaction landed on one of the widget's own surfaces
    /// and the host default should be suppressed; otherwise the result list
    /// closes unconditionally.
    pub fn pointer_down(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Field | PointerTarget::FieldDescendant | PointerTarget::Toggle => true,
            PointerTarget::Elsewhere => {
                self.hide_listbox();
                false
            }
        }
    }

    /// Closes the result list.
    ///
    /// The hidden hook fires once per open-to-closed transition; everything
    /// else (active index, render pass, listbox contents, linkage attributes)
    /// is cleared unconditionally, so calling this while closed is harmless.
    pub fn hide_listbox(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!("results hidden");
            (self.hooks.on_hidden)();
        }

        self.active = None;
        self.rendered.clear();
        self.listbox.clear_options();
        self.listbox.set_visible(false);
        self.input.set_attribute(ARIA_EXPANDED, "false");
        self.input.remove_attribute(ARIA_ACTIVEDESCENDANT);
        self.input.remove_attribute(ARIA_CONTROLS);
    }

    /// Closes the result list, forgets any pre-set initial value, re-enables
    /// the field, and returns the deferred command that clears the field's
    /// literal text.
    ///
    /// The clear is deferred because some environments do not honor an
    /// immediate overwrite during the dispatch that triggered it; the host
    /// runs the command on its task queue with zero delay.
    #[must_use]
    pub fn reset(&mut self) -> Option<Cmd> {
        self.hide_listbox();
        self.input.remove_attribute("value");
        self.input.set_enabled(true);
        Some(Cmd::ClearValue)
    }

    /// Executes a deferred command returned by an earlier handler.
    pub fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::ClearValue => self.input.set_value(""),
        }
    }

    /// Marks the field non-interactive. No other state changes.
    pub fn disable(&mut self) {
        self.input.set_enabled(false);
    }

    fn option_id(&self, index: usize) -> String {
        format!("{}-result-item-{}", self.listbox.id(), index)
    }

    /// Commits the entry at `index` as the selection: writes its label into
    /// the field, closes the list, and fires the selection hook. Unresolved
    /// entries are a silent no-op.
    fn select_at(&mut self, index: Option<usize>) {
        let Some((label, candidate)) = index
            .and_then(|i| self.rendered.get(i))
            .map(|entry| (entry.label.clone(), entry.candidate))
        else {
            return;
        };

        tracing::debug!(%label, "candidate committed");
        self.input.set_value(&label);
        self.hide_listbox();
        if let Some(c) = self.candidates.get(candidate) {
            (self.hooks.on_select)(Some(c));
        }
    }

    /// Blur-time commit: selects the highlighted entry, if any. The only path
    /// by which leaving the field commits a choice not confirmed with Return.
    fn check_selection(&mut self) {
        if let Some(index) = self.active {
            self.select_at(Some(index));
        }
    }

    /// Inline completion assist: overwrites the field with the selected
    /// entry's label and selects the appended suffix, so continued typing
    /// replaces it.
    fn autocomplete_assist(&mut self) {
        let Some(label) = self
            .rendered
            .iter()
            .find(|entry| entry.selected)
            .map(|entry| entry.label.clone())
        else {
            return;
        };

        let typed = self.input.value();
        if typed.is_empty() || typed == label {
            return;
        }

        let prefix = typed.graphemes(true).count();
        let full = label.graphemes(true).count();
        self.input.set_value(&label);
        self.input.set_selection_range(prefix, full);
    }
}

impl<C, F, L, T> fmt::Debug for Combobox<C, F, L, T>
where
    C: Candidate,
    F: TextField,
    L: OptionListbox,
    T: ToggleControl,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combobox")
            .field("candidates", &self.candidates.len())
            .field("results", &self.rendered.len())
            .field("active", &self.active)
            .field("open", &self.open)
            .field("auto_select_first", &self.auto_select_first)
            .field("inline_autocomplete", &self.inline_autocomplete)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::{MemListbox, MemTextField, MemToggle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn states() -> Vec<String> {
        vec![
            "Alabama".to_string(),
            "Alaska".to_string(),
            "Arizona".to_string(),
        ]
    }

    fn plain() -> Combobox<String, MemTextField, MemListbox> {
        Combobox::new(MemTextField::new(), MemListbox::new("lb1"), states())
    }

    fn inline() -> Combobox<String, MemTextField, MemListbox> {
        let field = MemTextField::with_attribute(ARIA_AUTOCOMPLETE, "both");
        Combobox::new(field, MemListbox::new("lb1"), states())
    }

    #[test]
    fn test_new_defaults() {
        let cb = plain();
        assert!(!cb.is_open());
        assert_eq!(cb.active_index(), None);
        assert_eq!(cb.results_count(), 0);
        assert_eq!(cb.candidates().len(), 3);
    }

    #[test]
    fn test_autocomplete_capability_read_once() {
        let cb = inline();
        assert!(cb.inline_autocomplete);

        let listy = MemTextField::with_attribute(ARIA_AUTOCOMPLETE, "list");
        let cb = Combobox::new(listy, MemListbox::new("lb1"), states());
        assert!(!cb.inline_autocomplete);
    }

    #[test]
    fn test_initial_value_matching_candidate() {
        let cb = plain().with_initial_value("Alaska");
        assert_eq!(cb.input().value(), "Alaska");
        assert_eq!(cb.input().attribute("value").as_deref(), Some("Alaska"));
    }

    #[test]
    fn test_initial_value_without_match_ignored() {
        let cb = plain().with_initial_value("Narnia");
        assert_eq!(cb.input().value(), "");
        assert!(cb.input().attribute("value").is_none());
    }

    #[test]
    fn test_update_results_filters_and_opens() {
        let mut cb = plain();
        cb.input_mut().set_value("al");
        cb.update_results(false);

        assert!(cb.is_open());
        assert_eq!(cb.results_count(), 2);
        assert_eq!(cb.options()[0].label, "Alabama");
        assert_eq!(cb.options()[1].label, "Alaska");
        assert_eq!(cb.options()[0].id, "lb1-result-item-0");
        assert_eq!(cb.options()[1].id, "lb1-result-item-1");
        assert!(cb.listbox().visible());
        assert_eq!(
            cb.input().attribute(ARIA_EXPANDED).as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_update_results_show_all_ignores_query() {
        let mut cb = plain();
        cb.input_mut().set_value("xyz");
        cb.update_results(true);
        assert_eq!(cb.results_count(), 3);
    }

    #[test]
    fn test_update_results_empty_query_no_matches_stays_closed() {
        let mut cb = Combobox::new(
            MemTextField::new(),
            MemListbox::new("lb1"),
            Vec::<String>::new(),
        );
        cb.update_results(false);
        assert!(!cb.is_open());
        assert!(!cb.listbox().visible());
    }

    #[test]
    fn test_error_branch_opens_without_entries() {
        let errors = Rc::new(RefCell::new(0));
        let seen = errors.clone();
        let mut cb = plain().on_error(move |_lb: &MemListbox| {
            *seen.borrow_mut() += 1;
        });

        cb.input_mut().set_value("zzz");
        cb.update_results(false);

        assert!(cb.is_open());
        assert_eq!(cb.results_count(), 0);
        assert!(cb.listbox().visible());
        assert_eq!(*errors.borrow(), 1);
        // The error branch shows the surface without declaring expansion.
        assert_eq!(
            cb.input().attribute(ARIA_EXPANDED).as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_auto_select_first_marks_without_activedescendant() {
        let mut cb = plain().auto_select_first(true);
        cb.focus();

        assert_eq!(cb.active_index(), Some(0));
        assert!(cb.options()[0].selected);
        assert!(cb.listbox().options()[0].selected);
        // Only navigation writes the active-descendant linkage.
        assert!(cb.input().attribute(ARIA_ACTIVEDESCENDANT).is_none());
    }

    #[test]
    fn test_navigation_down_marks_active() {
        let mut cb = plain();
        cb.focus();

        let outcome = cb.key_down(Key::Down);
        assert!(outcome.consumed);
        assert_eq!(cb.active_index(), Some(0));
        assert!(cb.options()[0].selected);
        assert_eq!(
            cb.input().attribute(ARIA_ACTIVEDESCENDANT).as_deref(),
            Some("lb1-result-item-0")
        );
        assert_eq!(cb.input().attribute(ARIA_CONTROLS).as_deref(), Some("lb1"));
        // Without inline autocomplete the field text is untouched.
        assert_eq!(cb.input().value(), "");
    }

    #[test]
    fn test_navigation_wraps_both_directions() {
        let mut cb = plain();
        cb.focus();

        cb.key_down(Key::Up);
        assert_eq!(cb.active_index(), Some(2));

        cb.key_down(Key::Down);
        assert_eq!(cb.active_index(), Some(0));

        cb.key_down(Key::Up);
        assert_eq!(cb.active_index(), Some(2));
    }

    #[test]
    fn test_navigation_moves_selected_marker() {
        let mut cb = plain();
        cb.focus();
        cb.key_down(Key::Down);
        cb.key_down(Key::Down);

        assert_eq!(cb.active_index(), Some(1));
        assert!(!cb.options()[0].selected);
        assert!(cb.options()[1].selected);
        assert!(!cb.listbox().options()[0].selected);
        assert!(cb.listbox().options()[1].selected);
    }

    #[test]
    fn test_navigation_ignored_when_closed_without_inline_mode() {
        let mut cb = plain();
        let outcome = cb.key_down(Key::Down);
        assert!(!outcome.consumed);
        assert!(!cb.is_open());
        assert_eq!(cb.active_index(), None);
    }

    #[test]
    fn test_inline_mode_navigation_opens_full_list() {
        let mut cb = inline();
        cb.key_down(Key::Down);

        assert!(cb.is_open());
        assert_eq!(cb.results_count(), 3);
        assert_eq!(cb.active_index(), Some(0));
        // Inline mode writes the active label into the field.
        assert_eq!(cb.input().value(), "Alabama");
    }

    #[test]
    fn test_enter_commits_active_entry() {
        let selected = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
        let seen = selected.clone();
        let mut cb = plain().on_select(move |c: Option<&String>| {
            seen.borrow_mut().push(c.cloned());
        });

        cb.focus();
        cb.key_down(Key::Down);
        cb.key_down(Key::Down);
        cb.key_down(Key::Enter);

        assert_eq!(cb.input().value(), "Alaska");
        assert!(!cb.is_open());
        assert_eq!(
            selected.borrow().as_slice(),
            &[Some("Alaska".to_string())]
        );
    }

    #[test]
    fn test_enter_without_active_entry_is_noop() {
        let mut cb = plain();
        cb.focus();
        cb.key_down(Key::Enter);

        assert_eq!(cb.input().value(), "");
        assert!(cb.is_open());
    }

    #[test]
    fn test_tab_commits_then_closes() {
        let mut cb = plain();
        cb.focus();
        cb.key_down(Key::Down);
        let outcome = cb.key_down(Key::Tab);

        assert!(!outcome.consumed);
        assert_eq!(cb.input().value(), "Alabama");
        assert!(!cb.is_open());
    }

    #[test]
    fn test_blur_commits_highlighted_entry() {
        let mut cb = plain();
        cb.focus();
        cb.key_down(Key::Down);
        cb.blur();

        assert_eq!(cb.input().value(), "Alabama");
        assert!(!cb.is_open());
    }

    #[test]
    fn test_blur_without_highlight_is_noop() {
        let mut cb = plain();
        cb.focus();
        cb.blur();
        assert_eq!(cb.input().value(), "");
    }

    #[test]
    fn test_escape_key_down_resets() {
        let mut cb = plain().with_initial_value("Alaska");
        cb.focus();
        cb.key_down(Key::Down);

        let outcome = cb.key_down(Key::Escape);
        assert!(!outcome.consumed);
        assert!(!cb.is_open());
        assert_eq!(cb.active_index(), None);
        assert!(cb.input().attribute("value").is_none());
        // The literal clear is deferred to the host's task queue.
        assert_eq!(cb.input().value(), "Alaska");
        cb.run(outcome.cmd.unwrap());
        assert_eq!(cb.input().value(), "");
    }

    #[test]
    fn test_escape_key_up_reports_empty_selection() {
        let calls = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
        let seen = calls.clone();
        let mut cb = plain().on_select(move |c: Option<&String>| {
            seen.borrow_mut().push(c.cloned());
        });

        let outcome = cb.key_up(Key::Escape);
        assert!(outcome.consumed);
        assert_eq!(calls.borrow().as_slice(), &[None]);
    }

    #[test]
    fn test_key_up_filters_on_character() {
        let mut cb = plain();
        cb.input_mut().set_value("ska");
        cb.key_up(Key::Char('a'));

        assert_eq!(cb.results_count(), 1);
        assert_eq!(cb.options()[0].label, "Alaska");
    }

    #[test]
    fn test_key_up_navigation_keys_consumed_without_filtering() {
        let mut cb = plain();
        cb.input_mut().set_value("al");
        for key in [Key::Up, Key::Down, Key::Enter, Key::Tab, Key::Shift] {
            let outcome = cb.key_up(key);
            assert!(outcome.consumed, "{key} should be consumed");
        }
        assert!(!cb.is_open());
    }

    #[test]
    fn test_autocomplete_assist_extends_and_selects_suffix() {
        let mut cb = inline().auto_select_first(true);
        cb.input_mut().set_value("ala");
        cb.key_up(Key::Char('a'));

        // First match "Alabama" is auto-selected and completed inline.
        assert_eq!(cb.input().value(), "Alabama");
        assert_eq!(cb.input().selection(), Some((3, 7)));
    }

    #[test]
    fn test_autocomplete_assist_skipped_on_backspace() {
        let mut cb = inline().auto_select_first(true);
        cb.input_mut().set_value("ala");
        cb.key_up(Key::Backspace);

        assert_eq!(cb.input().value(), "ala");
        assert_eq!(cb.results_count(), 2);
    }

    #[test]
    fn test_autocomplete_assist_noop_without_selected_entry() {
        let mut cb = inline();
        cb.input_mut().set_value("ala");
        cb.key_up(Key::Char('a'));

        assert_eq!(cb.input().value(), "ala");
    }

    #[test]
    fn test_hide_listbox_idempotent() {
        let hidden = Rc::new(RefCell::new(0));
        let seen = hidden.clone();
        let mut cb = plain().on_hidden(move || {
            *seen.borrow_mut() += 1;
        });

        cb.focus();
        cb.key_down(Key::Down);
        cb.hide_listbox();
        cb.hide_listbox();

        assert_eq!(*hidden.borrow(), 1);
        assert!(!cb.is_open());
        assert_eq!(cb.active_index(), None);
        assert_eq!(cb.results_count(), 0);
        assert!(cb.listbox().options().is_empty());
        assert_eq!(
            cb.input().attribute(ARIA_EXPANDED).as_deref(),
            Some("false")
        );
        assert!(cb.input().attribute(ARIA_ACTIVEDESCENDANT).is_none());
        assert!(cb.input().attribute(ARIA_CONTROLS).is_none());
    }

    #[test]
    fn test_click_option_selects() {
        let mut cb = plain();
        cb.focus();
        cb.click_option(2);

        assert_eq!(cb.input().value(), "Arizona");
        assert!(!cb.is_open());
    }

    #[test]
    fn test_click_option_stale_index_noop() {
        let mut cb = plain();
        cb.focus();
        cb.click_option(17);

        assert_eq!(cb.input().value(), "");
        assert!(cb.is_open());
    }

    #[test]
    fn test_toggle_click_opens_and_swaps_label() {
        let mut cb = plain().with_toggle(MemToggle::new("Show state options"));
        cb.toggle_click();

        assert!(cb.is_open());
        assert_eq!(cb.results_count(), 3);
        assert!(cb.input().focused());
        assert_eq!(
            cb.toggle().unwrap().label().as_deref(),
            Some("Hide state options")
        );

        cb.toggle_click();
        assert!(!cb.is_open());
        assert_eq!(
            cb.toggle().unwrap().label().as_deref(),
            Some("Show state options")
        );
    }

    #[test]
    fn test_toggle_click_inert_with_empty_candidates() {
        let mut cb = Combobox::new(
            MemTextField::new(),
            MemListbox::new("lb1"),
            Vec::<String>::new(),
        )
        .with_toggle(MemToggle::new("Show state options"));

        cb.toggle_click();
        assert!(!cb.is_open());
        assert_eq!(
            cb.toggle().unwrap().label().as_deref(),
            Some("Show state options")
        );
    }

    #[test]
    fn test_pointer_down_on_own_surfaces_suppressed() {
        let mut cb = plain();
        cb.focus();

        assert!(cb.pointer_down(PointerTarget::Field));
        assert!(cb.pointer_down(PointerTarget::FieldDescendant));
        assert!(cb.pointer_down(PointerTarget::Toggle));
        assert!(cb.is_open());
    }

    #[test]
    fn test_pointer_down_elsewhere_closes() {
        let mut cb = plain();
        cb.focus();

        assert!(!cb.pointer_down(PointerTarget::Elsewhere));
        assert!(!cb.is_open());
    }

    #[test]
    fn test_disable_marks_field_noninteractive() {
        let mut cb = plain();
        cb.focus();
        cb.disable();

        assert!(!cb.input().enabled());
        // Disable leaves the rest of the state alone.
        assert!(cb.is_open());
    }

    #[test]
    fn test_reset_reenables_field() {
        let mut cb = plain();
        cb.disable();
        let cmd = cb.reset();
        assert!(cb.input().enabled());
        assert_eq!(cmd, Some(Cmd::ClearValue));
    }

    #[test]
    fn test_refilter_fires_hidden_then_shown() {
        let log = Rc::new(RefCell::new(Vec::<&'static str>::new()));
        let shown = log.clone();
        let hidden = log.clone();
        let mut cb = plain()
            .on_shown(move || shown.borrow_mut().push("shown"))
            .on_hidden(move || hidden.borrow_mut().push("hidden"));

        cb.input_mut().set_value("a");
        cb.key_up(Key::Char('a'));
        cb.input_mut().set_value("al");
        cb.key_up(Key::Char('l'));

        assert_eq!(log.borrow().as_slice(), &["shown", "hidden", "shown"]);
    }

    #[test]
    fn test_stale_navigation_after_rerender_clears_linkage() {
        let mut cb = inline();
        // Open on the full list and walk to the last entry.
        cb.key_down(Key::Down);
        cb.key_down(Key::Up);
        assert_eq!(cb.active_index(), Some(2));

        // A narrower re-render invalidates the old index; the next
        // navigation resolves against the fresh pass.
        cb.input_mut().set_value("alas");
        cb.key_up(Key::Char('s'));
        assert_eq!(cb.results_count(), 1);
    }
}
