use std::fmt::Display;

/// An option found by [`Scanner::advance`](crate::Scanner::advance).
///
/// Borrows from the argument sequence rather than the scanner, so it stays
/// usable after the scanner moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'s> {
    /// One character of a (possibly grouped) short option run, e.g. `y` in `-xyz`.
    Short(char),
    /// A long option name without the leading `--` and without any `=value`.
    Long(&'s str),
}

impl Token<'_> {
    /// Calls `f` with the bare option name, as compared against spellings.
    pub fn with_name<R>(self, f: impl FnOnce(&str) -> R) -> R {
        match self {
            Token::Short(c) => f(c.encode_utf8(&mut [0; 4])),
            Token::Long(name) => f(name),
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Short(c) => write!(f, "-{c}"),
            Token::Long(name) => write!(f, "--{name}"),
        }
    }
}

/// The spelling out of a `|`-delimited list that matched an option name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Spelling {
    /// The list ended in `=`: the value must be attached to the option.
    pub attached_only: bool,
}

/// Looks `name` up in `spec`, e.g. `"o|output"`. A trailing `=` on the whole
/// list (`"c|color="`) makes every spelling in it attached-only.
///
/// Comparison is exact: no prefixes, no case folding.
pub(crate) fn find_spelling(spec: &str, name: &str) -> Option<Spelling> {
    let (spec, attached_only) = match spec.strip_suffix('=') {
        Some(bare) => (bare, true),
        None => (spec, false),
    };
    spec.split('|')
        .any(|spelling| spelling == name)
        .then_some(Spelling { attached_only })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_alternatives() {
        assert!(find_spelling("m|multiple-opts", "m").is_some());
        assert!(find_spelling("m|multiple-opts", "multiple-opts").is_some());
        assert!(find_spelling("m|multiple-opts", "multiple").is_none());
        assert!(find_spelling("m|multiple-opts", "M").is_none());
        assert!(find_spelling("x", "xy").is_none());
    }

    #[test]
    fn empty_alternatives_only_match_empty_names() {
        assert!(find_spelling("a||b", "").is_some());
        assert!(find_spelling("a|b", "").is_none());
    }

    #[test]
    fn trailing_equals_marks_attached_only() {
        assert_eq!(
            find_spelling("c|color=", "color"),
            Some(Spelling {
                attached_only: true
            })
        );
        assert_eq!(
            find_spelling("c|color=", "c"),
            Some(Spelling {
                attached_only: true
            })
        );
        assert_eq!(find_spelling("c|color=", "color="), None);
        assert_eq!(
            find_spelling("c|color", "c"),
            Some(Spelling {
                attached_only: false
            })
        );
    }

    #[test]
    fn display_uses_marker_prefixes() {
        assert_eq!(Token::Short('x').to_string(), "-x");
        assert_eq!(Token::Long("verbose").to_string(), "--verbose");
        assert_eq!(Token::Short('é').with_name(str::len), 2);
    }
}
