//! Line-at-a-time tokenization.
//!
//! A [`Lexer`] holds no per-document state. Each call to
//! [`Lexer::tokenize_line`] takes the [`LineState`] produced by the previous
//! line and returns the lexemes for this line along with the state to feed
//! into the next one.

mod cursor;
mod matchers;
mod state;

pub use self::state::LineState;

use self::cursor::Cursor;
use crate::config::Config;
use crate::errors::*;
use crate::grammar::Grammar;
use log::debug;
use syntect::parsing::ScopeStack;

/// A slice of a line paired with the full stack of scopes it sits in.
#[derive(Clone, Debug, PartialEq)]
pub struct Lexeme<'a> {
    pub value: &'a str,
    pub scope: ScopeStack,
    /// Byte offset of `value` within the line.
    pub offset: usize,
}

/// Output of tokenizing one line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineTokens<'a> {
    /// Lexemes covering the whole line, in order and without gaps.
    pub lexemes: Vec<Lexeme<'a>>,
    /// The state the next line starts in.
    pub state: LineState,
}

#[derive(Clone, Debug)]
pub struct Lexer {
    grammar: Grammar,
    config: Config,
}

impl Lexer {
    /// Creates a lexer with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use stan_syntax::{Lexer, LineState};
    ///
    /// let lexer = Lexer::new().unwrap();
    /// let tokens = lexer.tokenize_line("real sigma;", &LineState::new());
    /// assert_eq!(tokens.lexemes[0].value, "real");
    /// assert!(tokens.state.is_top_level());
    /// ```
    pub fn new() -> Result<Lexer> {
        Lexer::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Lexer> {
        config.validate()?;
        let grammar = Grammar::new()?;
        debug!("created lexer with {:?}", config);

        Ok(Lexer { grammar, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Tokenizes `line`, starting in `state`.
    ///
    /// The line may carry its terminator (`\n`, `\r\n` or `\r`); it is
    /// emitted as plain text so that the lexemes always cover the whole
    /// input. This never fails: text no rule recognizes is emitted with
    /// just the scopes of the regions around it.
    pub fn tokenize_line<'a>(&self, line: &'a str, state: &LineState) -> LineTokens<'a> {
        Cursor::new(&self.grammar, &self.config, line, state).run()
    }
}
