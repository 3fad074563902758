//! In-place reordering for [`Mode::Permute`](crate::Mode::Permute).
//!
//! Every time the scanner steps onto a new element, the next option-looking
//! element is rotated down to the cursor, jumping over the positionals in
//! between. Positionals only ever shift right by one slot at a time, so their
//! relative order survives, and once scanning finishes all options sit in
//! front of them.

use tracing::debug;

use crate::MARKER;

/// Where the value of the option just rotated into place currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Pending {
    /// Nothing was looked up; the value, if any, is the next element.
    #[default]
    Untracked,
    /// The element at this index directly followed the option before it was
    /// rotated and is its value if one gets requested.
    At(usize),
    /// The option was followed by another option or by nothing.
    Unavailable,
}

/// A marker followed by anything at all. Includes the `--` terminator,
/// excludes the lone `-`.
#[inline]
pub(crate) fn looks_like_option(arg: &str) -> bool {
    matches!(arg.as_bytes(), [MARKER, _, ..])
}

/// Rotates the first option-looking element at or after `index` down to
/// `index` and reports where its value candidate ended up.
pub(crate) fn bring_forward(args: &mut [&str], index: usize) -> Pending {
    let Some(offset) = args[index..].iter().position(|arg| looks_like_option(arg)) else {
        return Pending::Untracked;
    };
    let found = index + offset;
    if offset > 0 {
        args[index..=found].rotate_right(1);
        debug!(
            option = args[index],
            from = found,
            to = index,
            skipped = offset,
            "moved option ahead of positionals"
        );
    }
    match args.get(found + 1) {
        Some(next) if !looks_like_option(next) => Pending::At(found + 1),
        _ => Pending::Unavailable,
    }
}

/// Pulls the value candidate at `at` down so it directly follows the option
/// at `index`.
pub(crate) fn bring_value_forward(args: &mut [&str], index: usize, at: usize) {
    debug_assert!(at > index, "value candidate must follow its option");
    if at > index + 1 {
        args[index + 1..=at].rotate_right(1);
        debug!(
            value = args[index + 1],
            from = at,
            to = index + 1,
            "moved value next to its option"
        );
    }
}
