use crate::interface::FlagSource;

/// A single-keyword visibility filter: the subject matches when the
/// keyword's current state equals the expected state.
///
/// The expected state is written as `"On"` or `"Off"` (case-insensitive)
/// the way it appears in declarative annotations; an unrecognized value
/// is reported through the [`log`] facade and treated as `"On"`.
///
/// # Example
///
/// ```
/// use minicond::{FlagSet, KeywordFilter};
///
/// let filter = KeywordFilter::new("_NORMALMAP", "Off");
///
/// assert!(filter.matches(&FlagSet::new()));
/// assert!(!filter.matches(&FlagSet::from_iter(["_NORMALMAP"])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    keyword: String,
    expected: bool,
}

impl KeywordFilter {
    pub fn new<T: Into<String>>(keyword: T, state: &str) -> Self {
        let state_lower = state.to_ascii_lowercase();

        if state_lower != "on" && state_lower != "off" {
            log::warn!(
                "Invalid keyword filter state {:?}. Use \"On\" or \"Off\" instead.",
                state
            );
        }

        Self {
            keyword: keyword.into(),
            expected: state_lower != "off",
        }
    }

    /// Shorthand for a filter that expects the keyword to be enabled.
    pub fn enabled<T: Into<String>>(keyword: T) -> Self {
        Self {
            keyword: keyword.into(),
            expected: true,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The keyword state this filter expects: `true` for `"On"`.
    pub fn expected_state(&self) -> bool {
        self.expected
    }

    /// True when the subject's keyword state equals the expected state.
    pub fn matches<F: FlagSource + ?Sized>(&self, flags: &F) -> bool {
        flags.is_enabled(&self.keyword) == self.expected
    }

    /// True when at least one subject in the selection matches.
    pub fn matches_any<'s, F, I>(&self, subjects: I) -> bool
    where
        F: FlagSource + ?Sized + 's,
        I: IntoIterator<Item = &'s F>,
    {
        subjects.into_iter().any(|flags| self.matches(flags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::FlagSet;

    #[test]
    #[ntest::timeout(100)]
    fn test_on_filter() {
        let filter = KeywordFilter::new("_EMISSION", "On");
        assert_eq!(filter.keyword(), "_EMISSION");
        assert!(filter.expected_state());

        assert!(filter.matches(&FlagSet::from_iter(["_EMISSION"])));
        assert!(!filter.matches(&FlagSet::new()));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_off_filter() {
        let filter = KeywordFilter::new("_EMISSION", "oFF");
        assert!(!filter.expected_state());

        assert!(filter.matches(&FlagSet::new()));
        assert!(!filter.matches(&FlagSet::from_iter(["_EMISSION"])));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_invalid_state_defaults_to_on() {
        let filter = KeywordFilter::new("_EMISSION", "enabled");
        assert!(filter.expected_state());
        assert!(filter.matches(&FlagSet::from_iter(["_EMISSION"])));
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_enabled_shorthand() {
        assert_eq!(
            KeywordFilter::enabled("_EMISSION"),
            KeywordFilter::new("_EMISSION", "On")
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_matches_any_across_selection() {
        let filter = KeywordFilter::new("_EMISSION", "On");
        let lit = FlagSet::from_iter(["_EMISSION"]);
        let unlit = FlagSet::new();

        assert!(filter.matches_any([&lit, &unlit]));
        assert!(!filter.matches_any([&unlit]));
        assert!(!filter.matches_any(std::iter::empty::<&FlagSet>()));
    }
}
