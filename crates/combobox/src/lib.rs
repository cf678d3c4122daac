#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Combobox
//!
//! An accessible autocomplete/combobox interaction controller: a text field
//! paired with a filterable, keyboard-navigable option list, following the
//! ARIA combobox interaction pattern.
//!
//! The crate is host-agnostic. The controller talks to its UI through three
//! small ports (a text field, an optional toggle control, and an option
//! listbox), and the host feeds it events: keys, focus changes, pointer
//! interactions. State transitions are reported back through lifecycle
//! hooks.
//!
//! Modules:
//! - **candidate** - The option trait the controller filters over
//! - **event** - Key and pointer event types, deferred commands
//! - **surface** - The UI surface ports and ARIA attribute names
//! - **filter** - Case-insensitive substring filtering
//! - **combobox** - The controller itself
//! - **mem** - In-memory surfaces for tests and headless hosts
//!
//! ## Example
//!
//! ```rust
//! use combobox::combobox::Combobox;
//! use combobox::event::Key;
//! use combobox::mem::{MemListbox, MemTextField};
//! use combobox::surface::TextField;
//!
//! let field = MemTextField::new();
//! let listbox = MemListbox::new("lb1");
//! let states = vec!["Alabama".to_string(), "Alaska".to_string()];
//!
//! let mut cb = Combobox::new(field, listbox, states);
//! cb.input_mut().set_value("al");
//! cb.key_up(Key::Char('l'));
//! assert_eq!(cb.results_count(), 2);
//! ```

pub mod candidate;
pub mod combobox;
pub mod event;
pub mod filter;
pub mod mem;
pub mod surface;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::candidate::Candidate;
    pub use crate::combobox::{Combobox, RenderedOption};
    pub use crate::event::{Cmd, Key, KeyOutcome, PointerTarget};
    pub use crate::mem::{MemListbox, MemOption, MemTextField, MemToggle};
    pub use crate::surface::{OptionListbox, TextField, ToggleControl};
}
