use crate::document::{Position, Token};
use crate::lexer::{Lexeme, Lexer, LineState};
use crate::util::{strip_line_terminator, LineIterator};
use std::vec;

pub struct TokenIterator<'a, 'l> {
    lexer: &'l Lexer,
    lines: LineIterator<'a>,
    state: LineState,
    line_number: usize,
    lexemes: vec::IntoIter<Lexeme<'a>>,
}

impl<'a, 'l> TokenIterator<'a, 'l> {
    pub fn new(data: &'a str, lexer: &'l Lexer) -> TokenIterator<'a, 'l> {
        let mut token_iterator = TokenIterator {
            lexer,
            lines: LineIterator::new(data),
            state: LineState::new(),
            line_number: 0,
            lexemes: Vec::new().into_iter(),
        };

        // Preload the first line
        token_iterator.tokenize_next_line();

        token_iterator
    }

    /// The state the most recently tokenized line ended in.
    pub fn state(&self) -> &LineState {
        &self.state
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        if let Some(lexeme) = self.lexemes.next() {
            let position = Position {
                line: self.line_number,
                offset: lexeme.offset,
            };
            return Some(Token::Lexeme { lexeme, position });
        }

        // We're done with this line; on to the next.
        if self.tokenize_next_line() {
            Some(Token::Newline)
        } else {
            None
        }
    }

    fn tokenize_next_line(&mut self) -> bool {
        match self.lines.next() {
            Some((line_number, line)) => {
                // Terminators are reported as Newline tokens instead.
                let tokens = self.lexer.tokenize_line(strip_line_terminator(line), &self.state);
                self.state = tokens.state;
                self.lexemes = tokens.lexemes.into_iter();
                self.line_number = line_number;
                true
            }
            None => false,
        }
    }
}

impl<'a, 'l> Iterator for TokenIterator<'a, 'l> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::TokenIterator;
    use crate::document::{Position, Token};
    use crate::lexer::{Lexer, LineState};
    use syntect::parsing::{Scope, ScopeStack};

    fn stack(names: &[&str]) -> ScopeStack {
        let mut stack = ScopeStack::new();
        for name in names {
            stack.push(Scope::new(name).unwrap());
        }
        stack
    }

    #[test]
    fn token_iterator_returns_correct_tokens() {
        let lexer = Lexer::new().unwrap();
        let iterator = TokenIterator::new("model {\n// comment\n}x\n\n", &lexer);
        let actual: Vec<(Option<(String, ScopeStack)>, Option<Position>)> = iterator
            .map(|token| match token {
                Token::Newline => (None, None),
                Token::Lexeme { lexeme, position } => {
                    (Some((lexeme.value.to_string(), lexeme.scope)), Some(position))
                }
            })
            .collect();

        let model = "meta.section.model.stan";
        let expected = vec![
            (
                Some(("model".to_string(), stack(&["source.stan", model, "entity.name.section.model.stan"]))),
                Some(Position { line: 0, offset: 0 }),
            ),
            (
                Some((" ".to_string(), stack(&["source.stan", model]))),
                Some(Position { line: 0, offset: 5 }),
            ),
            (
                Some((
                    "{".to_string(),
                    stack(&["source.stan", model, "punctuation.definition.model.begin.bracket.curly.stan"]),
                )),
                Some(Position { line: 0, offset: 6 }),
            ),
            (None, None),
            (
                Some((
                    "//".to_string(),
                    stack(&[
                        "source.stan",
                        model,
                        "comment.line.double-slash.stan",
                        "punctuation.definition.comment.stan",
                    ]),
                )),
                Some(Position { line: 1, offset: 0 }),
            ),
            (
                Some((
                    " comment".to_string(),
                    stack(&["source.stan", model, "comment.line.double-slash.stan"]),
                )),
                Some(Position { line: 1, offset: 2 }),
            ),
            (None, None),
            (
                Some((
                    "}".to_string(),
                    stack(&["source.stan", model, "punctuation.definition.model.end.bracket.curly.stan"]),
                )),
                Some(Position { line: 2, offset: 0 }),
            ),
            (
                Some(("x".to_string(), stack(&["source.stan", "meta.identifier.variable.stan"]))),
                Some(Position { line: 2, offset: 1 }),
            ),
            (None, None),
            (None, None),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn token_iterator_handles_content_without_trailing_newline() {
        let lexer = Lexer::new().unwrap();
        let tokens: Vec<Token> = TokenIterator::new("real", &lexer).collect();
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn state_follows_the_last_line() {
        let lexer = Lexer::new().unwrap();
        let mut iterator = TokenIterator::new("/* open\nclosed */\n", &lexer);
        assert!(iterator.state().in_block_comment());

        while iterator.next().is_some() {}
        assert_eq!(iterator.state(), &LineState::new());
    }
}
