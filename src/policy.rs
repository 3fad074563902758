use tracing::debug;

use crate::{ArgError, Token};

/// Decides what happens when [`Scanner::value`](crate::Scanner::value) finds
/// no value for an option that requires one.
///
/// Returning `Ok` substitutes a value; returning `Err` hands the error back to
/// the caller of `value`.
pub trait MissingValuePolicy<'s> {
    fn missing_value(&mut self, program: &'s str, option: Token<'s>)
    -> Result<&'s str, ArgError<'s>>;
}

/// Prints `prog: option '-o' requires arg` to stderr and exits with status 1.
///
/// This is the policy a fresh [`Scanner`](crate::Scanner) starts with.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exit;

impl<'s> MissingValuePolicy<'s> for Exit {
    fn missing_value(
        &mut self,
        program: &'s str,
        option: Token<'s>,
    ) -> Result<&'s str, ArgError<'s>> {
        eprintln!("{}", ArgError::MissingValue { program, option });
        std::process::exit(1)
    }
}

/// Returns [`ArgError::MissingValue`] to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fail;

impl<'s> MissingValuePolicy<'s> for Fail {
    fn missing_value(
        &mut self,
        program: &'s str,
        option: Token<'s>,
    ) -> Result<&'s str, ArgError<'s>> {
        debug!(%option, "missing value reported to caller");
        Err(ArgError::MissingValue { program, option })
    }
}

impl<'s, C: FnMut(&'s str, Token<'s>) -> Result<&'s str, ArgError<'s>>> MissingValuePolicy<'s>
    for C
{
    fn missing_value(
        &mut self,
        program: &'s str,
        option: Token<'s>,
    ) -> Result<&'s str, ArgError<'s>> {
        self(program, option)
    }
}
