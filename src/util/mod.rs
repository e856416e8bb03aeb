mod line_iterator;

pub use self::line_iterator::{strip_line_terminator, LineIterator};
