use std::str::FromStr;

use crate::{ArgError, Scanner, policy::MissingValuePolicy};

impl<'s, P: MissingValuePolicy<'s>> Scanner<'_, 's, P> {
    /// [`value`](Scanner::value), parsed with [`FromStr`].
    pub fn parsed_value<T: FromStr>(&mut self) -> Result<T, ArgError<'s>> {
        let option = self.current_option();
        let value = self.value()?;
        value
            .parse()
            .ok()
            .ok_or(ArgError::InvalidValue { option, value })
    }

    /// [`optional_value`](Scanner::optional_value), parsed with [`FromStr`].
    /// An absent value is `Ok(None)`; a present but unparsable one is an error.
    pub fn parsed_optional_value<T: FromStr>(&mut self) -> Result<Option<T>, ArgError<'s>> {
        let option = self.current_option();
        let Some(value) = self.optional_value() else {
            return Ok(None);
        };
        let parsed = value
            .parse()
            .ok()
            .ok_or(ArgError::InvalidValue { option, value })?;
        Ok(Some(parsed))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn parses_attached_and_detached() {
        let mut args = ["prog", "-j8", "--level", "3"];
        let mut scanner = Scanner::new(&mut args).on_missing_value(Fail);
        assert!(scanner.advance());
        assert!(scanner.matches("j"));
        assert_eq!(scanner.parsed_value::<u32>(), Ok(8));
        assert!(scanner.advance());
        assert!(scanner.matches("level"));
        assert_eq!(scanner.parsed_value::<i64>(), Ok(3));
        assert!(!scanner.advance());
    }

    #[test]
    fn reports_unparsable_value() {
        let mut args = ["prog", "--jobs=many"];
        let mut scanner = Scanner::new(&mut args).on_missing_value(Fail);
        assert!(scanner.advance());
        assert!(scanner.matches("j|jobs"));
        let err = scanner.parsed_value::<u32>().unwrap_err();
        assert_eq!(
            err,
            ArgError::InvalidValue {
                option: Token::Long("jobs"),
                value: "many"
            }
        );
        assert_eq!(err.to_string(), "invalid value 'many' for option '--jobs'");
    }

    #[test]
    fn optional_parse() {
        let mut args = ["prog", "-l", "-x", "-l", "x"];
        let mut scanner = Scanner::new(&mut args).on_missing_value(Fail);
        assert!(scanner.advance());
        assert!(scanner.matches("l"));
        assert_eq!(scanner.parsed_optional_value::<u8>(), Ok(None));
        assert!(scanner.advance());
        assert!(scanner.matches("x"));
        assert!(scanner.advance());
        assert!(scanner.matches("l"));
        assert!(scanner.parsed_optional_value::<u8>().is_err());
        assert!(!scanner.advance());
        assert_eq!(scanner.positional_start(), 5);
    }
}
