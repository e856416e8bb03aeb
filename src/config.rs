use crate::errors::*;

/// Knobs for the lexer. The defaults match the stock Stan grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Characters that may not appear raw inside a string literal.
    /// Each occurrence is tagged `invalid.illegal.string` instead of
    /// being folded into the surrounding string body.
    pub illegal_string_chars: Vec<char>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            illegal_string_chars: vec!['\t'],
        }
    }
}

impl Config {
    /// Replaces the set of characters flagged inside string literals.
    ///
    /// # Examples
    ///
    /// ```
    /// use stan_syntax::Config;
    ///
    /// let config = Config::default().with_illegal_string_chars(&['\t', '\\']);
    /// assert!(config.is_illegal_in_string('\\'));
    /// ```
    pub fn with_illegal_string_chars(mut self, chars: &[char]) -> Config {
        self.illegal_string_chars = chars.to_vec();
        self
    }

    pub fn is_illegal_in_string(&self, c: char) -> bool {
        self.illegal_string_chars.contains(&c)
    }

    /// Rejects configurations the lexer can't honour.
    pub fn validate(&self) -> Result<()> {
        if self.is_illegal_in_string('"') {
            bail!(ErrorKind::IllegalStringDelimiter('"'));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::errors::ErrorKind;

    #[test]
    fn default_flags_raw_tabs() {
        let config = Config::default();
        assert!(config.is_illegal_in_string('\t'));
        assert!(!config.is_illegal_in_string('a'));
    }

    #[test]
    fn validate_rejects_the_string_delimiter() {
        let config = Config::default().with_illegal_string_chars(&['"']);
        match config.validate() {
            Err(e) => match *e.kind() {
                ErrorKind::IllegalStringDelimiter('"') => (),
                ref other => panic!("unexpected error: {}", other),
            },
            Ok(_) => panic!("expected validation to fail"),
        }
    }

    #[test]
    fn validate_accepts_the_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
