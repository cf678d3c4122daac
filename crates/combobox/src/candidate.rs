//! Candidate options for the combobox.
//!
//! A candidate is an opaque option with a display label. The controller only
//! ever reads the label: it filters over it, writes it into the text field on
//! selection, and hands the candidate back through the selection hook.

/// Trait for options that can appear in the combobox result list.
pub trait Candidate {
    /// Returns the text displayed for this option and matched against the
    /// typed query.
    fn label(&self) -> &str;
}

impl Candidate for String {
    fn label(&self) -> &str {
        self
    }
}

impl Candidate for &'static str {
    fn label(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_candidate() {
        let c = "Alabama".to_string();
        assert_eq!(c.label(), "Alabama");
    }

    #[test]
    fn test_str_candidate() {
        let c = "Alaska";
        assert_eq!(c.label(), "Alaska");
    }

    #[test]
    fn test_custom_candidate() {
        struct State {
            name: String,
            #[allow(dead_code)]
            abbreviation: &'static str,
        }

        impl Candidate for State {
            fn label(&self) -> &str {
                &self.name
            }
        }

        let c = State {
            name: "Arizona".into(),
            abbreviation: "AZ",
        };
        assert_eq!(c.label(), "Arizona");
    }
}
