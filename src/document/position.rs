/// A two (zero-based) coordinate value locating a lexeme in a document.
/// `offset` is a byte offset into the line, pointing before the lexeme's
/// first character.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub offset: usize,
}

impl Position {
    /// Creates a new position with a line/offset of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use stan_syntax::Position;
    ///
    /// let position = Position::new();
    /// assert_eq!(position, Position { line: 0, offset: 0 });
    /// ```
    pub fn new() -> Position {
        Position::default()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn positions_order_by_line_then_offset() {
        assert!(Position { line: 1, offset: 0 } > Position { line: 0, offset: 9 });
        assert!(Position { line: 1, offset: 2 } < Position { line: 1, offset: 3 });
    }
}
