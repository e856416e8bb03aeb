use crate::grammar::words::{self, Builtin};
use crate::grammar::{Control, Rule, ScopeKind, Section};
use crate::lexer::cursor::Cursor;
use crate::lexer::state::{Callee, Context};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static REAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:[0-9]+\.[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)").unwrap()
});

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(functions|data|transformed\s+data|parameters|transformed\s+parameters|model|generated\s+quantities)(\s*)\{",
    )
    .unwrap()
});

/// A return type (with an optional unsized array suffix) followed by a name
/// and an opening paren. Only the return type is captured; the rest is
/// lookahead.
static FUNCTION_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((?:array\s*\[[\s,]*\]\s*)?(?:void|int|real|complex|vector|row_vector|matrix|complex_vector|complex_row_vector|complex_matrix)(?:\s*\[[\s,]*\])?)\s+[A-Za-z][A-Za-z0-9_]*\s*\(",
    )
    .unwrap()
});

/// The `[ , ]` suffix of an unsized array type.
static ARRAY_DIMENSIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[[\s,]*\]").unwrap());

static TARGET_ACCUMULATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^target\s*\+=").unwrap());

/// Symbolic operators, longest spelling first so that prefixes never win.
const OPERATORS: &[(&str, ScopeKind)] = &[
    (".*=", ScopeKind::AssignmentOperator),
    ("./=", ScopeKind::AssignmentOperator),
    ("%/%", ScopeKind::ArithmeticOperator),
    ("<-", ScopeKind::DeprecatedAssignment),
    ("+=", ScopeKind::AssignmentOperator),
    ("-=", ScopeKind::AssignmentOperator),
    ("*=", ScopeKind::AssignmentOperator),
    ("/=", ScopeKind::AssignmentOperator),
    ("==", ScopeKind::LogicalOperator),
    ("!=", ScopeKind::LogicalOperator),
    ("<=", ScopeKind::LogicalOperator),
    (">=", ScopeKind::LogicalOperator),
    ("&&", ScopeKind::LogicalOperator),
    ("||", ScopeKind::LogicalOperator),
    (".*", ScopeKind::ArithmeticOperator),
    ("./", ScopeKind::ArithmeticOperator),
    ("=", ScopeKind::AssignmentOperator),
    ("<", ScopeKind::LogicalOperator),
    (">", ScopeKind::LogicalOperator),
    ("!", ScopeKind::LogicalOperator),
    ("+", ScopeKind::ArithmeticOperator),
    ("-", ScopeKind::ArithmeticOperator),
    ("*", ScopeKind::ArithmeticOperator),
    ("/", ScopeKind::ArithmeticOperator),
    ("\\", ScopeKind::ArithmeticOperator),
    ("^", ScopeKind::ArithmeticOperator),
    ("%", ScopeKind::ArithmeticOperator),
    ("'", ScopeKind::ArithmeticOperator),
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Length of the leading run of word characters.
fn word_len(text: &str) -> usize {
    text.find(|c: char| !is_word_char(c)).unwrap_or(text.len())
}

/// Whether `text` opens with a single `=`, as opposed to `==`.
fn starts_with_single_equals(text: &str) -> bool {
    text.starts_with('=') && !text.starts_with("==")
}

impl<'a, 'l> Cursor<'a, 'l> {
    /// Tries `rule` at the current position, consuming input on success.
    pub(crate) fn apply(&mut self, rule: Rule) -> bool {
        match rule {
            Rule::Include => self.include(),
            Rule::LineComment => self.line_comment(),
            Rule::BlockCommentBegin => self.block_comment_begin(),
            Rule::BlockCommentEnd => self.block_comment_end(),
            Rule::DocumentationTag => self.documentation_tag(),
            Rule::SectionHeader => self.section_header(),
            Rule::FunctionDeclaration => self.function_declaration(),
            Rule::VariableDeclaration => self.variable_declaration(),
            Rule::RangeConstraintsBegin => self.range_constraints_begin(),
            Rule::DeclarationAssignment => self.declaration_assignment(),
            Rule::ConstraintEquals => self.constraint_equals(),
            Rule::RangeConstraintsEnd => self.range_constraints_end(),
            Rule::String => self.string(),
            Rule::Number => self.number(),
            Rule::TargetAccumulator => self.target_accumulator(),
            Rule::Word => self.word(),
            Rule::Sampling => self.sampling(),
            Rule::Terminator => self.terminator(),
            Rule::Delimiter => self.delimiter(),
            Rule::Open => self.open(),
            Rule::Close => self.close(),
            Rule::Operator => self.operator(),
        }
    }

    fn include(&mut self) -> bool {
        const DIRECTIVE: &str = "#include";

        let rest = self.rest();
        if !rest.starts_with(DIRECTIVE) || rest[DIRECTIVE.len()..].starts_with(is_word_char) {
            return false;
        }
        self.emit_kinds(DIRECTIVE.len(), &[ScopeKind::Include, ScopeKind::IncludeDirective]);

        let rest = self.rest();
        let whitespace = rest.len() - rest.trim_start().len();
        if whitespace > 0 {
            self.emit_kinds(whitespace, &[ScopeKind::Include]);
        }

        let rest = self.rest();
        match rest.chars().next() {
            None => (),
            Some('"') => self.include_delimited('"', ScopeKind::IncludeDoubleQuoted),
            Some('\'') => self.include_delimited('\'', ScopeKind::IncludeSingleQuoted),
            Some('<') => self.include_delimited('>', ScopeKind::IncludeAngled),
            Some(_) => {
                let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
                self.emit_kinds(len, &[ScopeKind::Include, ScopeKind::IncludeBare]);
            }
        }

        true
    }

    fn include_delimited(&mut self, close: char, kind: ScopeKind) {
        self.emit_kinds(1, &[ScopeKind::Include, kind, ScopeKind::StringBegin]);

        let rest = self.rest();
        let closing = rest.find(close);
        let len = closing.unwrap_or(rest.len());
        if len > 0 {
            self.emit_kinds(len, &[ScopeKind::Include, kind]);
        }
        if closing.is_some() {
            self.emit_kinds(1, &[ScopeKind::Include, kind, ScopeKind::StringEnd]);
        }
    }

    fn line_comment(&mut self) -> bool {
        let rest = self.rest();
        let (delimiter, kind) = if rest.starts_with("//") {
            (2, ScopeKind::LineCommentSlash)
        } else if rest.starts_with('#') {
            (1, ScopeKind::LineCommentNumberSign)
        } else {
            return false;
        };

        self.emit_kinds(delimiter, &[kind, ScopeKind::CommentDelimiter]);
        let body = self.rest().len();
        if body > 0 {
            self.emit_kinds(body, &[kind]);
        }

        true
    }

    fn block_comment_begin(&mut self) -> bool {
        let rest = self.rest();
        if !rest.starts_with("/*") {
            return false;
        }

        // `/**/` is an empty plain comment, not the start of a doc comment.
        let documentation = rest.starts_with("/**") && !rest.starts_with("/**/");
        self.push(Context::BlockComment { documentation });
        self.emit_kinds(if documentation { 3 } else { 2 }, &[ScopeKind::CommentDelimiter]);

        true
    }

    fn block_comment_end(&mut self) -> bool {
        if !self.rest().starts_with("*/") {
            return false;
        }
        self.emit_kinds(2, &[ScopeKind::CommentDelimiter]);
        self.pop();

        true
    }

    fn documentation_tag(&mut self) -> bool {
        if self.innermost().context != (Context::BlockComment { documentation: true }) {
            return false;
        }

        let rest = self.rest();
        if !rest.starts_with('@') {
            return false;
        }
        let name = word_len(&rest[1..]);
        if name == 0 {
            return false;
        }
        self.emit_kinds(1 + name, &[ScopeKind::DocumentationTag]);

        true
    }

    fn section_header(&mut self) -> bool {
        if self.innermost().context != Context::Root {
            return false;
        }

        let rest = self.rest();
        let (header, whitespace) = match SECTION_HEADER.captures(rest) {
            Some(captures) => match (captures.get(1), captures.get(2)) {
                (Some(header), Some(whitespace)) => (header.as_str(), whitespace.len()),
                _ => return false,
            },
            None => return false,
        };
        let section = match Section::from_header(header) {
            Some(section) => section,
            None => return false,
        };

        let scopes = *self.grammar.section(section);
        self.push(Context::Section(section));
        self.emit(header.len(), &[scopes.name]);
        if whitespace > 0 {
            self.skip(whitespace);
        }
        self.emit(1, &[scopes.begin]);

        true
    }

    fn function_declaration(&mut self) -> bool {
        if !self.innermost().context.is_statement_level() {
            return false;
        }

        let return_type = match FUNCTION_SIGNATURE.captures(self.rest()).and_then(|c| c.get(1)) {
            Some(m) => m.len(),
            None => return false,
        };
        self.push(Context::FunctionDeclaration { named: false, params: false });
        self.emit_kinds(return_type, &[ScopeKind::ReturnType]);

        true
    }

    fn variable_declaration(&mut self) -> bool {
        if !self.innermost().context.is_statement_level() {
            return false;
        }

        let rest = self.rest();
        let word = &rest[..word_len(rest)];
        if !words::is_storage_type(word) {
            return false;
        }
        self.push(Context::Declaration { named: false });
        self.emit_kinds(word.len(), &[ScopeKind::VariableType]);

        true
    }

    fn range_constraints_begin(&mut self) -> bool {
        if self.innermost().context != (Context::Declaration { named: false }) {
            return false;
        }

        let rest = self.rest();
        if !rest.starts_with('<') || rest.starts_with("<=") || rest.starts_with("<-") {
            return false;
        }
        self.push(Context::RangeConstraints);
        self.emit_kinds(1, &[ScopeKind::RangeConstraintsBegin]);

        true
    }

    fn declaration_assignment(&mut self) -> bool {
        if !starts_with_single_equals(self.rest()) {
            return false;
        }
        self.push(Context::AssignmentRhs);
        self.emit_kinds(1, &[ScopeKind::DeclarationAssignment]);

        true
    }

    fn constraint_equals(&mut self) -> bool {
        if !starts_with_single_equals(self.rest()) {
            return false;
        }
        self.emit_kinds(1, &[ScopeKind::Equals]);

        true
    }

    fn range_constraints_end(&mut self) -> bool {
        let rest = self.rest();
        if !rest.starts_with('>') || rest.starts_with(">=") {
            return false;
        }
        self.emit_kinds(1, &[ScopeKind::RangeConstraintsEnd]);
        self.pop();

        true
    }

    fn string(&mut self) -> bool {
        if !self.rest().starts_with('"') {
            return false;
        }
        self.emit_kinds(1, &[ScopeKind::DoubleQuotedString, ScopeKind::StringBegin]);

        loop {
            let rest = self.rest();
            let config = self.config;
            let stop = rest
                .char_indices()
                .find(|&(_, c)| c == '"' || config.is_illegal_in_string(c));

            match stop {
                Some((offset, c)) => {
                    if offset > 0 {
                        self.emit_kinds(offset, &[ScopeKind::DoubleQuotedString]);
                    }
                    if c == '"' {
                        self.emit_kinds(1, &[ScopeKind::DoubleQuotedString, ScopeKind::StringEnd]);
                        return true;
                    }
                    self.emit_kinds(
                        c.len_utf8(),
                        &[ScopeKind::DoubleQuotedString, ScopeKind::IllegalStringCharacter],
                    );
                }
                None => {
                    if !rest.is_empty() {
                        self.emit_kinds(rest.len(), &[ScopeKind::DoubleQuotedString]);
                    }
                    debug!("string literal left unterminated at end of line");
                    return true;
                }
            }
        }
    }

    fn number(&mut self) -> bool {
        let rest = self.rest();
        let (len, kind) = if let Some(m) = REAL.find(rest) {
            (m.end(), ScopeKind::Real)
        } else if let Some(m) = INTEGER.find(rest) {
            (m.end(), ScopeKind::Integer)
        } else {
            return false;
        };

        // Digits running straight into letters make a malformed identifier.
        let trailing = word_len(&rest[len..]);
        if trailing > 0 {
            self.emit_kinds(len + trailing, &[ScopeKind::IllegalVariable]);
        } else {
            self.emit_kinds(len, &[kind]);
        }

        true
    }

    fn target_accumulator(&mut self) -> bool {
        let len = match TARGET_ACCUMULATOR.find(self.rest()) {
            Some(m) => m.end(),
            None => return false,
        };
        self.emit_kinds(len, &[ScopeKind::Target]);
        self.push(Context::Target);

        true
    }

    fn word(&mut self) -> bool {
        let rest = self.rest();
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return false;
        }
        let word = &rest[..word_len(rest)];

        if word.starts_with('_') || word.ends_with("__") {
            self.emit_kinds(word.len(), &[ScopeKind::IllegalVariable]);
        } else if words::is_reserved(word) {
            self.emit_kinds(word.len(), &[ScopeKind::Reserved]);
        } else if !self.name_slot(word) && !self.keyword(word) {
            self.identifier(word);
        }

        true
    }

    /// Words whose meaning comes from the region they appear in: declared
    /// names, parameters, loop variables, range keywords and the
    /// distribution of a sampling statement.
    fn name_slot(&mut self, word: &'a str) -> bool {
        let after = &self.rest()[word.len()..];

        match self.innermost().context {
            Context::Declaration { named: false } => {
                if words::is_storage_type(word) {
                    // Element type of an `array[...]` declaration.
                    self.emit_kinds(word.len(), &[ScopeKind::VariableType]);
                } else if !words::is_keyword(word) {
                    self.set_context(Context::Declaration { named: true });
                    self.emit_kinds(word.len(), &[ScopeKind::VariableName]);
                } else {
                    return false;
                }
                true
            }
            Context::FunctionDeclaration { named: false, params: false } => {
                if words::is_keyword(word) {
                    return false;
                }
                self.set_context(Context::FunctionDeclaration { named: true, params: false });
                self.emit_kinds(word.len(), &[ScopeKind::DeclaredFunction]);
                true
            }
            Context::FunctionDeclaration { params: true, .. } => {
                if word == "data" {
                    self.emit_kinds(word.len(), &[ScopeKind::DataModifier]);
                } else if words::is_storage_type(word) {
                    let dimensions = ARRAY_DIMENSIONS.find(after).map_or(0, |m| m.end());
                    self.emit_kinds(word.len() + dimensions, &[ScopeKind::ParamType]);
                } else if !words::is_keyword(word) {
                    self.emit_kinds(word.len(), &[ScopeKind::Parameter]);
                } else {
                    return false;
                }
                true
            }
            Context::Control { kind: Control::For, open: true, named: false } => {
                if words::is_keyword(word) {
                    return false;
                }
                self.set_context(Context::Control { kind: Control::For, open: true, named: true });
                self.emit_kinds(word.len(), &[ScopeKind::LoopVariable]);
                true
            }
            Context::RangeConstraints => {
                if !words::is_range_keyword(word) || !starts_with_single_equals(after.trim_start()) {
                    return false;
                }
                self.emit_kinds(word.len(), &[ScopeKind::RangeKeyword]);
                true
            }
            Context::Sampling { distribution: false } => {
                self.set_context(Context::Sampling { distribution: true });
                if words::is_keyword(word) {
                    return false;
                }

                let name = if words::is_distribution(word) {
                    ScopeKind::KnownDistribution
                } else {
                    ScopeKind::DistributionName
                };
                self.emit_kinds(word.len(), &[ScopeKind::DistributionCall, name]);
                if self.rest().trim_start().starts_with('(') {
                    self.skip_whitespace();
                    self.push(Context::Call(Callee::Distribution));
                    self.emit_kinds(1, &[ScopeKind::ArgumentsBegin]);
                }
                true
            }
            _ => false,
        }
    }

    fn keyword(&mut self, word: &'a str) -> bool {
        let after = &self.rest()[word.len()..];

        if let Some(kind) = Control::from_keyword(word) {
            if after.trim_start().starts_with('(') {
                self.push(Context::Control { kind, open: false, named: false });
            }
            self.emit_kinds(word.len(), &[ScopeKind::ControlKeyword]);
            return true;
        }
        if words::is_control_keyword(word) {
            self.emit_kinds(word.len(), &[ScopeKind::ControlKeyword]);
            return true;
        }

        match word {
            "T" if after.starts_with('[') => {
                self.emit_kinds(1, &[ScopeKind::Truncation]);
                self.push(Context::Truncation);
                self.emit_kinds(1, &[ScopeKind::TruncationBegin]);
            }
            "return" => self.emit_kinds(word.len(), &[ScopeKind::Return]),
            "print" | "reject" => {
                let kind = if word == "print" { ScopeKind::Print } else { ScopeKind::Reject };
                self.emit_kinds(word.len(), &[kind]);
                if self.rest().trim_start().starts_with('(') {
                    self.skip_whitespace();
                    self.push(Context::PrintArguments);
                    self.emit_kinds(1, &[ScopeKind::PrintArgumentsBegin]);
                }
            }
            "target" => self.emit_kinds(word.len(), &[ScopeKind::Target]),
            "void" => self.emit_kinds(word.len(), &[ScopeKind::StorageType]),
            _ if words::is_storage_type(word) => {
                self.emit_kinds(word.len(), &[ScopeKind::StorageType])
            }
            _ => return false,
        }

        true
    }

    fn identifier(&mut self, word: &'a str) {
        let builtin = words::builtin(word).map(|builtin| match builtin {
            Builtin::Deprecated => ScopeKind::DeprecatedFunction,
            Builtin::Ode => ScopeKind::OdeFunction,
            Builtin::AlgebraSolver => ScopeKind::AlgebraSolver,
            Builtin::Function => ScopeKind::BuiltinFunction,
        });

        if !self.rest()[word.len()..].starts_with('(') {
            self.emit_kinds(word.len(), &[builtin.unwrap_or(ScopeKind::Variable)]);
            return;
        }

        let name = match builtin {
            Some(kind) => kind,
            None if self.within(Context::Target) && words::is_density(word) => {
                ScopeKind::KnownDistribution
            }
            None => ScopeKind::FunctionName,
        };
        self.emit_kinds(word.len(), &[ScopeKind::FunctionCall, name]);
        self.push(Context::Call(Callee::Function));
        self.emit_kinds(1, &[ScopeKind::ArgumentsBegin]);
    }

    fn sampling(&mut self) -> bool {
        if !self.rest().starts_with('~') {
            return false;
        }
        self.push(Context::Sampling { distribution: false });
        self.emit_kinds(1, &[ScopeKind::SamplingOperator]);

        true
    }

    fn terminator(&mut self) -> bool {
        if !self.rest().starts_with(';') {
            return false;
        }

        while self.innermost().context.ends_before_terminator() {
            self.pop();
        }
        self.emit_kinds(1, &[ScopeKind::Terminator]);
        if let Context::Declaration { .. } | Context::Sampling { .. } = self.innermost().context {
            self.pop();
        }
        // An unanswered `?` does not outlive its statement.
        if self.innermost().context.is_statement_level() {
            self.innermost_mut().pending_ternaries = 0;
        }

        true
    }

    fn delimiter(&mut self) -> bool {
        let rest = self.rest();
        if rest.starts_with(',') {
            self.emit_kinds(1, &[ScopeKind::Comma]);
        } else if rest.starts_with('|')
            && !rest.starts_with("||")
            && matches!(self.innermost().context, Context::Call(_))
        {
            self.emit_kinds(1, &[ScopeKind::Bar]);
        } else {
            return false;
        }

        true
    }

    fn open(&mut self) -> bool {
        let context = self.innermost().context;

        match self.rest().chars().next() {
            Some('(') => match context {
                Context::Control { kind, open: false, named } => {
                    self.set_context(Context::Control { kind, open: true, named });
                    self.emit_kinds(1, &[kind.begin()]);
                }
                Context::FunctionDeclaration { named, params: false } => {
                    self.set_context(Context::FunctionDeclaration { named, params: true });
                    self.emit_kinds(1, &[ScopeKind::ParamsBegin]);
                }
                _ => {
                    self.push(Context::Parens);
                    self.emit_kinds(1, &[ScopeKind::ParensBegin]);
                }
            },
            Some('[') => {
                self.push(Context::Brackets);
                self.emit_kinds(1, &[ScopeKind::BracketsBegin]);
            }
            Some('{') => {
                // `x = {1, 2};` opens an array literal even at statement level.
                let assigned = self.previous_scope()
                    == Some(self.grammar.scope(ScopeKind::AssignmentOperator));
                if context.is_statement_level() && !assigned {
                    self.push(Context::Block);
                    self.emit_kinds(1, &[ScopeKind::BlockBegin]);
                } else {
                    self.push(Context::Array);
                    self.emit_kinds(1, &[ScopeKind::ArrayBegin]);
                }
            }
            _ => return false,
        }

        true
    }

    /// Closes the innermost region when the delimiter matches it. A stray
    /// closer still gets its end punctuation but leaves the state alone.
    fn close(&mut self) -> bool {
        let context = self.innermost().context;
        if self.rest().starts_with('}') && !context.is_brace_region() && self.close_statement() {
            return self.close();
        }

        let (kind, closes) = match (self.rest().chars().next(), context) {
            (Some(')'), Context::Parens) => (ScopeKind::ParensEnd, true),
            (Some(')'), Context::Call(_)) => (ScopeKind::ArgumentsEnd, true),
            (Some(')'), Context::PrintArguments) => (ScopeKind::PrintArgumentsEnd, true),
            (Some(')'), Context::Control { kind, open: true, .. }) => (kind.end(), true),
            (Some(')'), Context::FunctionDeclaration { params: true, .. }) => {
                (ScopeKind::ParamsEnd, true)
            }
            (Some(')'), _) => (ScopeKind::ParensEnd, false),
            (Some(']'), Context::Brackets) => (ScopeKind::BracketsEnd, true),
            (Some(']'), Context::Truncation) => (ScopeKind::TruncationEnd, true),
            (Some(']'), _) => (ScopeKind::BracketsEnd, false),
            (Some('}'), Context::Section(section)) => {
                let end = self.grammar.section(section).end;
                self.emit(1, &[end]);
                self.pop();
                return true;
            }
            (Some('}'), Context::Block) => (ScopeKind::BlockEnd, true),
            (Some('}'), Context::Array) => (ScopeKind::ArrayEnd, true),
            (Some('}'), _) => (ScopeKind::BlockEnd, false),
            _ => return false,
        };

        self.emit_kinds(1, &[kind]);
        if closes {
            self.pop();
        }

        true
    }

    /// Abandons the regions left open inside the nearest enclosing brace,
    /// so that a missing `;` or `)` does not swallow the `}` after it.
    /// Returns false, changing nothing, when no brace is open.
    fn close_statement(&mut self) -> bool {
        if !self.frames().iter().any(|frame| frame.context.is_brace_region()) {
            return false;
        }
        while !self.innermost().context.is_brace_region() {
            self.pop();
        }

        true
    }

    fn operator(&mut self) -> bool {
        let rest = self.rest();

        if rest.starts_with('?') {
            let frame = self.innermost_mut();
            frame.pending_ternaries = frame.pending_ternaries.saturating_add(1);
            self.emit_kinds(1, &[ScopeKind::TernaryOperator]);
            return true;
        }
        if rest.starts_with(':') {
            // A colon answers the innermost open `?`, if any; otherwise it
            // is a range.
            let frame = self.innermost_mut();
            let kind = if frame.pending_ternaries > 0 {
                frame.pending_ternaries -= 1;
                ScopeKind::TernaryOperator
            } else {
                ScopeKind::ColonOperator
            };
            self.emit_kinds(1, &[kind]);
            return true;
        }

        match OPERATORS.iter().find(|(op, _)| rest.starts_with(op)) {
            Some((op, kind)) => {
                self.emit_kinds(op.len(), &[*kind]);
                true
            }
            None => false,
        }
    }
}
