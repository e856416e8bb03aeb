use crate::grammar::{rules, Control, Grammar, Rule, ScopeKind, Section};
use syntect::parsing::ScopeStack;

/// Which kind of name precedes a call's argument list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Callee {
    Function,
    Distribution,
}

/// An open region of the line: a begin/end construct or a structural meta
/// scope waiting for its terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Context {
    Root,
    BlockComment { documentation: bool },
    Section(Section),
    Block,
    Array,
    Parens,
    Brackets,
    Truncation,
    Call(Callee),
    PrintArguments,
    /// `open` flips once the header's `(` has been seen; `named` once a
    /// for-loop's variable has been.
    Control { kind: Control, open: bool, named: bool },
    Declaration { named: bool },
    RangeConstraints,
    AssignmentRhs,
    FunctionDeclaration { named: bool, params: bool },
    Sampling { distribution: bool },
    Target,
}

impl Context {
    pub(crate) fn rules(&self) -> &'static [Rule] {
        match *self {
            Context::Root | Context::Section(_) | Context::Block => rules::STATEMENT,
            Context::BlockComment { .. } => rules::BLOCK_COMMENT,
            Context::Declaration { .. } => rules::DECLARATION,
            Context::RangeConstraints => rules::RANGE_CONSTRAINTS,
            _ => rules::EXPRESSION,
        }
    }

    /// Contexts in which a new statement may begin.
    pub(crate) fn is_statement_level(&self) -> bool {
        matches!(*self, Context::Root | Context::Section(_) | Context::Block)
    }

    /// Regions closed by `}`.
    pub(crate) fn is_brace_region(&self) -> bool {
        matches!(*self, Context::Section(_) | Context::Block | Context::Array)
    }

    /// Contexts that end just before a `;`, leaving the terminator to the
    /// statement around them.
    pub(crate) fn ends_before_terminator(&self) -> bool {
        matches!(*self, Context::AssignmentRhs | Context::Target)
    }

    /// Pushes the scopes this region contributes to every token inside it.
    pub(crate) fn push_scopes(&self, grammar: &Grammar, stack: &mut ScopeStack) {
        let kinds: &[ScopeKind] = match *self {
            Context::Root => &[ScopeKind::Root],
            Context::BlockComment { documentation: false } => &[ScopeKind::BlockComment],
            Context::BlockComment { documentation: true } => &[ScopeKind::DocumentationComment],
            Context::Section(section) => {
                stack.push(grammar.section(section).meta);
                return;
            }
            Context::Call(Callee::Function) => &[ScopeKind::FunctionCall, ScopeKind::Arguments],
            Context::Call(Callee::Distribution) => {
                &[ScopeKind::DistributionCall, ScopeKind::Arguments]
            }
            Context::PrintArguments => &[ScopeKind::PrintArguments],
            Context::Control { kind, .. } => {
                stack.push(grammar.scope(kind.statement()));
                return;
            }
            Context::Declaration { .. } => &[ScopeKind::VariableDeclaration],
            Context::RangeConstraints => &[ScopeKind::RangeConstraints],
            Context::AssignmentRhs => &[ScopeKind::AssignmentRhs],
            Context::FunctionDeclaration { .. } => &[ScopeKind::FunctionDeclaration],
            Context::Sampling { .. } => &[ScopeKind::SamplingStatement],
            Context::Block
            | Context::Array
            | Context::Parens
            | Context::Brackets
            | Context::Truncation
            | Context::Target => &[],
        };

        for kind in kinds {
            stack.push(grammar.scope(*kind));
        }
    }
}

/// A context plus the bookkeeping local to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Frame {
    pub(crate) context: Context,
    /// `?` operators still waiting for their `:` at this nesting level.
    pub(crate) pending_ternaries: u16,
}

impl Frame {
    pub(crate) fn new(context: Context) -> Frame {
        Frame {
            context,
            pending_ternaries: 0,
        }
    }
}

/// The lexer's state at a line boundary: the stack of regions still open.
///
/// This is an explicit value rather than hidden lexer state; feed the
/// state returned for one line into the call for the next, and keep one
/// chain of states per document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineState {
    pub(crate) frames: Vec<Frame>,
}

impl Default for LineState {
    fn default() -> LineState {
        LineState {
            frames: vec![Frame::new(Context::Root)],
        }
    }
}

impl LineState {
    /// The state before the first line of a document.
    ///
    /// # Examples
    ///
    /// ```
    /// use stan_syntax::LineState;
    ///
    /// let state = LineState::new();
    /// assert!(state.is_top_level());
    /// assert_eq!(state.depth(), 0);
    /// ```
    pub fn new() -> LineState {
        LineState::default()
    }

    /// Whether no region remains open.
    pub fn is_top_level(&self) -> bool {
        self.depth() == 0
    }

    /// Whether the next line starts inside a block comment.
    pub fn in_block_comment(&self) -> bool {
        self.frames
            .last()
            .map_or(false, |frame| matches!(frame.context, Context::BlockComment { .. }))
    }

    /// The number of open regions.
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }
}
