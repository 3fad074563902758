use memchr::memchr;
use tracing::{debug, trace};

use crate::{
    MARKER, Token,
    permute::{self, Pending, looks_like_option},
    policy::{Exit, MissingValuePolicy},
    token::find_spelling,
};

/// How options and positionals may be arranged on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scanning stops at the first positional: `-x a -y` yields `-x` and the
    /// positionals `a -y`.
    #[default]
    InOrder,
    /// Options may appear anywhere. The sequence is reordered in place so
    /// that all options (with their values) end up in front of the
    /// positionals, which keep their relative order.
    Permute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BetweenElements,
    InShortGroup,
    InLongOption,
    Finished,
}

/// Cursor over a program's argument vector.
///
/// Element 0 is the program name and is never scanned. Drive it with
/// [`advance`](Self::advance), test the option with [`matches`](Self::matches)
/// and pull values with [`value`](Self::value) or
/// [`optional_value`](Self::optional_value). Once `advance` returns `false`,
/// everything from [`positional_start`](Self::positional_start) on is a
/// positional argument.
///
/// ```
/// use optwack::prelude::*;
///
/// let mut args = ["prog", "-vo", "out.txt", "input"];
/// let mut scanner = Scanner::new(&mut args).on_missing_value(Fail);
/// let mut verbose = false;
/// let mut output = None;
/// while scanner.advance() {
///     if scanner.matches("v|verbose") {
///         verbose = true;
///     } else if scanner.matches("o|output") {
///         output = Some(scanner.value()?);
///     }
/// }
/// assert!(verbose);
/// assert_eq!(output, Some("out.txt"));
/// assert_eq!(scanner.positionals(), ["input"]);
/// # Ok::<(), ArgError>(())
/// ```
///
/// The scanner holds the only mutable borrow of the sequence; in
/// [`Mode::Permute`] it rotates elements in place, and the caller sees the
/// final order once the scanner is dropped. Nothing is allocated or copied.
#[derive(Debug)]
pub struct Scanner<'a, 's, P = Exit> {
    args: &'a mut [&'s str],
    mode: Mode,
    state: State,
    index: usize,
    /// Byte offset of the current character inside a short option group.
    subindex: usize,
    pending: Pending,
    current: Option<Token<'s>>,
    matched: bool,
    attached_only: bool,
    policy: P,
}

impl<'a, 's> Scanner<'a, 's, Exit> {
    /// Starts an in-order scan. A missing required value prints a diagnostic
    /// and exits the process until another policy is set with
    /// [`on_missing_value`](Self::on_missing_value).
    pub fn new(args: &'a mut [&'s str]) -> Self {
        Self {
            args,
            mode: Mode::InOrder,
            state: State::BetweenElements,
            index: 0,
            subindex: 0,
            pending: Pending::Untracked,
            current: None,
            matched: false,
            attached_only: false,
            policy: Exit,
        }
    }

    /// Starts a scan in [`Mode::Permute`].
    pub fn permuting(args: &'a mut [&'s str]) -> Self {
        Self::new(args).with_mode(Mode::Permute)
    }
}

impl<'a, 's, P> Scanner<'a, 's, P> {
    /// Chooses the scanning mode. Only meaningful before the first `advance`.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        debug_assert!(self.index == 0, "mode changed after scanning started");
        self.mode = mode;
        self
    }

    /// Replaces what happens when a required value is missing.
    pub fn on_missing_value<NP: MissingValuePolicy<'s>>(self, policy: NP) -> Scanner<'a, 's, NP> {
        let Self {
            args,
            mode,
            state,
            index,
            subindex,
            pending,
            current,
            matched,
            attached_only,
            policy: _policy,
        } = self;
        Scanner {
            args,
            mode,
            state,
            index,
            subindex,
            pending,
            current,
            matched,
            attached_only,
            policy,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The program name, element 0, or `""` for an empty sequence.
    pub fn program(&self) -> &'s str {
        self.args.first().copied().unwrap_or_default()
    }

    /// The option found by the last successful [`advance`](Self::advance).
    pub fn current(&self) -> Option<Token<'s>> {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Index of the first positional argument.
    ///
    /// # Panics
    /// If called before [`advance`](Self::advance) has returned `false`.
    pub fn positional_start(&self) -> usize {
        assert!(
            self.is_finished(),
            "positional_start() read before scanning finished"
        );
        self.index
    }

    /// The positional arguments, in their final order.
    ///
    /// # Panics
    /// If called before [`advance`](Self::advance) has returned `false`.
    pub fn positionals(&self) -> &[&'s str] {
        &self.args[self.positional_start()..]
    }

    /// Steps to the next option. Returns `false` once no options remain, and
    /// keeps returning `false` after that.
    pub fn advance(&mut self) -> bool {
        self.current = None;
        self.matched = false;
        self.attached_only = false;
        match self.state {
            State::Finished => return false,
            State::InShortGroup => {
                if let Some(next) = self.next_in_group() {
                    return self.emit(next, State::InShortGroup);
                }
                self.subindex = 0;
            }
            State::BetweenElements | State::InLongOption => (),
        }
        self.step_element()
    }

    /// The character after the current one in a short group, if any.
    fn next_in_group(&mut self) -> Option<Token<'s>> {
        let arg = self.args[self.index];
        let after = self.subindex + self.current_width();
        let c = arg[after..].chars().next()?;
        self.subindex = after;
        Some(Token::Short(c))
    }

    fn current_width(&self) -> usize {
        self.args[self.index][self.subindex..]
            .chars()
            .next()
            .map_or(0, char::len_utf8)
    }

    fn step_element(&mut self) -> bool {
        self.pending = Pending::Untracked;
        if self.index >= self.args.len() {
            return self.finish();
        }
        self.index += 1;
        if self.index >= self.args.len() {
            return self.finish();
        }
        if self.mode == Mode::Permute {
            self.pending = permute::bring_forward(self.args, self.index);
        }
        let arg = self.args[self.index];
        match arg.as_bytes() {
            [MARKER, MARKER] => {
                trace!(index = self.index, "terminator");
                self.index += 1;
                self.finish()
            }
            [MARKER, MARKER, name @ ..] => {
                let name = match memchr(b'=', name) {
                    Some(eq) => &arg[2..2 + eq],
                    None => &arg[2..],
                };
                self.emit(Token::Long(name), State::InLongOption)
            }
            [MARKER, _, ..] => {
                self.subindex = 1;
                match arg[1..].chars().next() {
                    Some(c) => self.emit(Token::Short(c), State::InShortGroup),
                    None => unreachable!("short option group without a character"),
                }
            }
            _ => self.finish(),
        }
    }

    fn emit(&mut self, token: Token<'s>, state: State) -> bool {
        trace!(index = self.index, subindex = self.subindex, %token, "option");
        self.current = Some(token);
        self.state = state;
        true
    }

    fn finish(&mut self) -> bool {
        self.state = State::Finished;
        self.subindex = 0;
        self.index = self.index.min(self.args.len());
        debug!(
            positional_start = self.index,
            positionals = self.args.len() - self.index,
            "option scanning finished"
        );
        false
    }

    pub(crate) fn current_option(&self) -> Token<'s> {
        match self.current {
            Some(token) => token,
            None => panic!("no current option: advance() must return true first"),
        }
    }

    /// Whether the current option is one of the `|`-separated spellings in
    /// `spec`, such as `"o|output"`.
    ///
    /// A short option matches one-character spellings, a long option matches
    /// its name up to any `=`. A list ending in `=` (`"c|color="`) only
    /// accepts a value attached to the option, never the following element.
    ///
    /// # Panics
    /// If there is no current option.
    pub fn matches(&mut self, spec: &str) -> bool {
        let Some(spelling) = self
            .current_option()
            .with_name(|name| find_spelling(spec, name))
        else {
            self.matched = false;
            self.attached_only = false;
            return false;
        };
        self.matched = true;
        self.attached_only = spelling.attached_only;
        true
    }

    /// Takes the value of the matched option, if it has one.
    ///
    /// Attached values (`-ovalue`, `-o=value`, `--output=value`) win;
    /// otherwise the next element is consumed unless it looks like an option
    /// itself. A lone `-` is accepted as a value. Unlike getopt's `o::`, a
    /// detached `-o value` is taken too; use a spelling list ending in `=` to
    /// accept attached values only.
    ///
    /// # Panics
    /// If the last [`matches`](Self::matches) call did not succeed, or the
    /// value was already taken.
    pub fn optional_value(&mut self) -> Option<&'s str> {
        assert!(
            self.matched,
            "value requested without a matched option, or requested twice"
        );
        self.matched = false;
        let arg = self.args[self.index];
        let state = std::mem::replace(&mut self.state, State::BetweenElements);
        let pending = std::mem::take(&mut self.pending);
        match state {
            State::InShortGroup => {
                let after = self.subindex + self.current_width();
                self.subindex = 0;
                if after < arg.len() {
                    let rest = &arg[after..];
                    return Some(rest.strip_prefix('=').unwrap_or(rest));
                }
            }
            State::InLongOption => {
                if let Some(eq) = memchr(b'=', arg.as_bytes()) {
                    return Some(&arg[eq + 1..]);
                }
            }
            State::BetweenElements | State::Finished => {
                unreachable!("matched option outside of an option element")
            }
        }
        if self.attached_only {
            return None;
        }
        match pending {
            Pending::Unavailable => return None,
            Pending::At(at) => permute::bring_value_forward(self.args, self.index, at),
            Pending::Untracked => (),
        }
        let next = *self.args.get(self.index + 1)?;
        if looks_like_option(next) {
            return None;
        }
        self.index += 1;
        Some(next)
    }
}

impl<'s, P: MissingValuePolicy<'s>> Scanner<'_, 's, P> {
    /// Takes the value of the matched option, deferring to the
    /// missing-value policy when there is none.
    ///
    /// # Panics
    /// Same as [`optional_value`](Self::optional_value).
    pub fn value(&mut self) -> Result<&'s str, crate::ArgError<'s>> {
        let option = self.current_option();
        match self.optional_value() {
            Some(value) => Ok(value),
            None => {
                debug!(%option, "missing required value");
                let program = self.program();
                self.policy.missing_value(program, option)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_finishes_at_zero() {
        let mut args: [&str; 0] = [];
        let mut scanner = Scanner::new(&mut args);
        assert!(!scanner.advance());
        assert_eq!(scanner.positional_start(), 0);
        assert_eq!(scanner.program(), "");
    }

    #[test]
    fn multibyte_short_options() {
        let mut args = ["prog", "-éx"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        assert_eq!(scanner.current(), Some(Token::Short('é')));
        assert!(scanner.advance());
        assert_eq!(scanner.current(), Some(Token::Short('x')));
        assert!(!scanner.advance());
        assert_eq!(scanner.positional_start(), 2);
    }

    #[test]
    fn multibyte_attached_value() {
        let mut args = ["prog", "-éval"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        assert!(scanner.matches("é"));
        assert_eq!(scanner.optional_value(), Some("val"));
        assert!(!scanner.advance());
    }

    #[test]
    #[should_panic(expected = "value requested without a matched option")]
    fn value_without_match_panics() {
        let mut args = ["prog", "-x", "val"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        scanner.optional_value();
    }

    #[test]
    #[should_panic(expected = "value requested without a matched option")]
    fn value_after_failed_match_panics() {
        let mut args = ["prog", "-c", "red"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        assert!(scanner.matches("c|color="));
        assert!(!scanner.matches("s"));
        scanner.optional_value();
    }

    #[test]
    fn failed_match_forgets_attached_only() {
        let mut args = ["prog", "-c", "red"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        assert!(scanner.matches("c|color="));
        assert!(!scanner.matches("x"));
        assert!(scanner.matches("c"));
        assert_eq!(scanner.optional_value(), Some("red"));
    }

    #[test]
    #[should_panic(expected = "requested twice")]
    fn value_twice_panics() {
        let mut args = ["prog", "-x", "a", "b"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        assert!(scanner.matches("x"));
        scanner.optional_value();
        scanner.optional_value();
    }

    #[test]
    #[should_panic(expected = "before scanning finished")]
    fn positional_start_before_finish_panics() {
        let mut args = ["prog", "-x"];
        let mut scanner = Scanner::new(&mut args);
        assert!(scanner.advance());
        scanner.positional_start();
    }

    #[test]
    #[should_panic(expected = "no current option")]
    fn matches_after_finish_panics() {
        let mut args = ["prog"];
        let mut scanner = Scanner::new(&mut args);
        assert!(!scanner.advance());
        scanner.matches("x");
    }
}
