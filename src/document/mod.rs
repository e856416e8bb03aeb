//! Whole-text tokenization, threading line state from one line to the next.

mod position;
mod token_iterator;

pub use self::position::Position;
pub use self::token_iterator::TokenIterator;

use crate::errors::*;
use crate::lexer::{Lexeme, Lexer};
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// A line break. Every terminator (`\n`, `\r\n` or `\r`) yields the
    /// same token; [`Document::data`] keeps the original spelling.
    Newline,
    Lexeme { lexeme: Lexeme<'a>, position: Position },
}

/// Stan source text, optionally backed by a file on disk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    data: String,
    path: Option<PathBuf>,
}

impl Document {
    pub fn new(data: String) -> Document {
        Document { data, path: None }
    }

    /// Creates a document by reading the UTF-8 contents of the specified path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// let document = stan_syntax::Document::from_file(
    ///     Path::new("tests/fixtures/eight_schools.stan")
    /// ).unwrap();
    /// assert!(document.data().starts_with("/**"));
    /// ```
    pub fn from_file(path: &Path) -> Result<Document> {
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        debug!("read {} bytes from {}", data.len(), path.display());

        Ok(Document {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Tokenizes the whole document. Each line starts in the state the
    /// previous one ended in; line terminators become [`Token::Newline`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stan_syntax::{Document, Lexer, Token};
    ///
    /// let lexer = Lexer::new().unwrap();
    /// let document = Document::new("/* a\nb */".to_string());
    /// let tokens: Vec<Token> = document.tokens(&lexer).collect();
    /// assert_eq!(tokens.len(), 5);
    /// assert_eq!(tokens[2], Token::Newline);
    /// ```
    pub fn tokens<'a, 'l>(&'a self, lexer: &'l Lexer) -> TokenIterator<'a, 'l> {
        TokenIterator::new(&self.data, lexer)
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, Position, Token};
    use crate::lexer::Lexer;
    use std::path::Path;

    #[test]
    fn from_file_remembers_the_path() {
        let path = Path::new("tests/fixtures/eight_schools.stan");
        let document = Document::from_file(path).unwrap();
        assert_eq!(document.path(), Some(path));
    }

    #[test]
    fn from_file_reports_missing_files() {
        assert!(Document::from_file(Path::new("tests/fixtures/missing.stan")).is_err());
    }

    #[test]
    fn tokens_cover_the_document() {
        let lexer = Lexer::new().unwrap();
        let document = Document::from_file(Path::new("tests/fixtures/eight_schools.stan")).unwrap();

        let mut text = String::new();
        for token in document.tokens(&lexer) {
            match token {
                Token::Newline => text.push('\n'),
                Token::Lexeme { lexeme, .. } => text.push_str(lexeme.value),
            }
        }
        assert_eq!(text, document.data());
    }

    #[test]
    fn crlf_terminators_become_newline_tokens() {
        let lexer = Lexer::new().unwrap();
        let document = Document::new("real a;\r\nint b;\r\n".to_string());

        let mut text = String::new();
        let mut newlines = 0;
        for token in document.tokens(&lexer) {
            match token {
                Token::Newline => {
                    newlines += 1;
                    text.push('\n');
                }
                Token::Lexeme { lexeme, .. } => {
                    assert!(!lexeme.value.contains('\r'));
                    text.push_str(lexeme.value);
                }
            }
        }
        assert_eq!(newlines, 2);
        assert_eq!(text, document.data().replace("\r\n", "\n"));
    }

    #[test]
    fn tokens_carry_line_positions() {
        let lexer = Lexer::new().unwrap();
        let document = Document::new("model {\n  y ~ normal(0, 1);\n}".to_string());
        let positions: Vec<Position> = document
            .tokens(&lexer)
            .filter_map(|token| match token {
                Token::Lexeme { lexeme, position } if lexeme.value == "normal" => Some(position),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![Position { line: 1, offset: 6 }]);
    }
}
