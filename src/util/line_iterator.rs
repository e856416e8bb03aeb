/// Splits text into numbered lines, each keeping its `\n` or `\r\n`.
///
/// Text ending in a newline yields one final empty line, so that every
/// line break is followed by a line.
pub struct LineIterator<'a> {
    data: &'a str,
    line_number: usize,
    start: usize,
    done: bool,
}

impl<'a> LineIterator<'a> {
    pub fn new(data: &'a str) -> LineIterator<'a> {
        LineIterator {
            data,
            line_number: 0,
            start: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for LineIterator<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let rest = &self.data[self.start..];
        let line = match rest.find('\n') {
            Some(newline) => &rest[..=newline],
            None => {
                self.done = true;
                rest
            }
        };

        let line_number = self.line_number;
        self.start += line.len();
        self.line_number += 1;

        Some((line_number, line))
    }
}

/// Removes a trailing `\n`, `\r\n` or `\r`.
pub fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::{strip_line_terminator, LineIterator};

    #[test]
    fn next_produces_a_value_for_empty_data() {
        let mut lines = LineIterator::new("");
        assert_eq!(Some((0, "")), lines.next());
        assert_eq!(None, lines.next());
    }

    #[test]
    fn next_includes_trailing_newlines() {
        let mut lines = LineIterator::new("model {\r\n}\n");
        assert_eq!(Some((0, "model {\r\n")), lines.next());
        assert_eq!(Some((1, "}\n")), lines.next());
        assert_eq!(Some((2, "")), lines.next());
        assert_eq!(None, lines.next());
    }

    #[test]
    fn next_stops_at_end_of_data() {
        let mut lines = LineIterator::new("line\nanother line");
        lines.next();
        assert_eq!(Some((1, "another line")), lines.next());
        assert_eq!(None, lines.next());
    }

    #[test]
    fn strip_line_terminator_handles_every_style() {
        assert_eq!(strip_line_terminator("a\r\n"), "a");
        assert_eq!(strip_line_terminator("a\n"), "a");
        assert_eq!(strip_line_terminator("a\r"), "a");
        assert_eq!(strip_line_terminator("a"), "a");
    }
}
