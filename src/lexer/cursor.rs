use crate::config::Config;
use crate::grammar::{Grammar, ScopeKind};
use crate::lexer::state::{Context, Frame, LineState};
use crate::lexer::{Lexeme, LineTokens};
use crate::util::strip_line_terminator;
use log::trace;
use syntect::parsing::{Scope, ScopeStack};
use unicode_segmentation::UnicodeSegmentation;

/// Walks a single line, applying rules at the current position and
/// collecting the lexemes they emit.
pub(crate) struct Cursor<'a, 'l> {
    pub(crate) grammar: &'l Grammar,
    pub(crate) config: &'l Config,
    line: &'a str,
    /// End of the line's content; anything past it is the line terminator.
    end: usize,
    pos: usize,
    frames: Vec<Frame>,
    lexemes: Vec<Lexeme<'a>>,
    /// Start of a run of unmatched text not yet turned into a lexeme.
    plain_start: Option<usize>,
}

impl<'a, 'l> Cursor<'a, 'l> {
    pub(crate) fn new(
        grammar: &'l Grammar,
        config: &'l Config,
        line: &'a str,
        state: &LineState,
    ) -> Cursor<'a, 'l> {
        let content = strip_line_terminator(line);

        Cursor {
            grammar,
            config,
            line,
            end: content.len(),
            pos: 0,
            frames: state.frames.clone(),
            lexemes: Vec::new(),
            plain_start: None,
        }
    }

    pub(crate) fn run(mut self) -> LineTokens<'a> {
        while self.pos < self.end {
            let rules = self.innermost().context.rules();
            if !rules.iter().any(|rule| self.apply(*rule)) {
                self.skip_grapheme();
            }
        }

        // The terminator is plain text in whatever region is still open.
        let terminator = self.line.len() - self.end;
        self.end = self.line.len();
        if terminator > 0 {
            self.skip(terminator);
        }
        self.flush();

        LineTokens {
            lexemes: self.lexemes,
            state: LineState { frames: self.frames },
        }
    }

    /// The unconsumed remainder of the line's content.
    pub(crate) fn rest(&self) -> &'a str {
        &self.line[self.pos..self.end]
    }

    pub(crate) fn innermost(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    pub(crate) fn innermost_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub(crate) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The innermost scope of the last lexeme on this line with visible text.
    pub(crate) fn previous_scope(&self) -> Option<Scope> {
        self.lexemes
            .iter()
            .rev()
            .find(|lexeme| !lexeme.value.trim().is_empty())
            .and_then(|lexeme| lexeme.scope.as_slice().last().cloned())
    }

    pub(crate) fn set_context(&mut self, context: Context) {
        self.innermost_mut().context = context;
    }

    pub(crate) fn within(&self, context: Context) -> bool {
        self.frames.iter().any(|frame| frame.context == context)
    }

    pub(crate) fn push(&mut self, context: Context) {
        self.flush();
        trace!("push {:?} at {}", context, self.pos);
        self.frames.push(Frame::new(context));
    }

    pub(crate) fn pop(&mut self) {
        self.flush();
        if self.frames.len() > 1 {
            let frame = self.frames.pop();
            trace!("pop {:?} at {}", frame.map(|f| f.context), self.pos);
        }
    }

    /// Consumes `len` bytes as a lexeme tagged with the open regions'
    /// scopes followed by `extra`.
    pub(crate) fn emit(&mut self, len: usize, extra: &[Scope]) {
        self.flush();
        let start = self.pos;
        self.pos += len;
        let scope = self.scope_stack(extra);
        self.lexemes.push(Lexeme {
            value: &self.line[start..self.pos],
            scope,
            offset: start,
        });
    }

    pub(crate) fn emit_kinds(&mut self, len: usize, kinds: &[ScopeKind]) {
        let scopes: Vec<Scope> = kinds.iter().map(|kind| self.grammar.scope(*kind)).collect();
        self.emit(len, &scopes);
    }

    /// Consumes `len` bytes as unmatched text.
    pub(crate) fn skip(&mut self, len: usize) {
        if self.plain_start.is_none() {
            self.plain_start = Some(self.pos);
        }
        self.pos += len;
    }

    pub(crate) fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let len = rest.len() - rest.trim_start().len();
        if len > 0 {
            self.skip(len);
        }
    }

    fn skip_grapheme(&mut self) {
        let len = self.rest().graphemes(true).next().map_or(1, str::len);
        self.skip(len);
    }

    fn flush(&mut self) {
        if let Some(start) = self.plain_start.take() {
            if start < self.pos {
                let scope = self.scope_stack(&[]);
                self.lexemes.push(Lexeme {
                    value: &self.line[start..self.pos],
                    scope,
                    offset: start,
                });
            }
        }
    }

    fn scope_stack(&self, extra: &[Scope]) -> ScopeStack {
        let mut stack = ScopeStack::new();
        for frame in &self.frames {
            frame.context.push_scopes(self.grammar, &mut stack);
        }
        for scope in extra {
            stack.push(*scope);
        }

        stack
    }
}
