macro_rules! scope_kinds {
    ($($kind:ident => $name:expr,)*) => {
        /// Every fixed scope label the grammar assigns. Section-specific
        /// labels are derived from [`Section`] instead.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ScopeKind {
            $($kind,)*
        }

        impl ScopeKind {
            /// All kinds, in declaration order (which is also their index).
            pub const ALL: &'static [ScopeKind] = &[$(ScopeKind::$kind,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(ScopeKind::$kind => $name,)*
                }
            }
        }
    };
}

scope_kinds! {
    Root => "source.stan",

    LineCommentSlash => "comment.line.double-slash.stan",
    LineCommentNumberSign => "comment.line.number-sign.stan",
    BlockComment => "comment.block.stan",
    DocumentationComment => "comment.block.documentation.stan",
    CommentDelimiter => "punctuation.definition.comment.stan",
    DocumentationTag => "storage.type.class.standoc",

    DoubleQuotedString => "string.quoted.double.stan",
    StringBegin => "punctuation.definition.string.begin.stan",
    StringEnd => "punctuation.definition.string.end.stan",
    IllegalStringCharacter => "invalid.illegal.string.stan",

    Include => "meta.preprocessor.include.stan",
    IncludeDirective => "keyword.control.directive.include.stan",
    IncludeBare => "string.unquoted.include.stan",
    IncludeDoubleQuoted => "string.quoted.double.include.stan",
    IncludeSingleQuoted => "string.quoted.single.include.stan",
    IncludeAngled => "string.quoted.other.lt-gt.include.stan",

    Integer => "constant.numeric.integer.stan",
    Real => "constant.numeric.real.stan",

    Variable => "meta.identifier.variable.stan",
    IllegalVariable => "invalid.illegal.variable.stan",
    Reserved => "invalid.illegal.reserved.stan",
    DeprecatedFunction => "invalid.deprecated.function.stan",
    DeprecatedAssignment => "invalid.deprecated.assignment.stan",

    FunctionCall => "meta.function-call.stan",
    FunctionName => "meta.identifier.function.stan",
    BuiltinFunction => "support.function.stan",
    OdeFunction => "support.function.integrate_ode.stan",
    AlgebraSolver => "support.function.algebra_solver.stan",
    Arguments => "meta.arguments.stan",
    ArgumentsBegin => "punctuation.definition.arguments.begin.bracket.round.stan",
    ArgumentsEnd => "punctuation.definition.arguments.end.bracket.round.stan",

    SamplingStatement => "meta.sampling.statement.stan",
    SamplingOperator => "keyword.operator.sampling.stan",
    DistributionCall => "meta.distribution-call.stan",
    DistributionName => "meta.identifier.distribution.stan",
    KnownDistribution => "support.function.distribution.stan",
    Truncation => "keyword.other.truncation.stan",
    TruncationBegin => "punctuation.defintion.begin.truncation.backets.square.stan",
    TruncationEnd => "punctuation.defintion.end.truncation.backets.square.stan",

    ControlKeyword => "keyword.control.stan",
    Return => "keyword.other.return.stan",
    Print => "keyword.other.print.stan",
    Reject => "keyword.other.reject.stan",
    Target => "keyword.other.target.stan",

    ForStatement => "meta.for.statement.stan",
    ForBegin => "punctuation.definition.for.begin.round.bracket.stan",
    ForEnd => "punctuation.definition.for.end.round.bracket.stan",
    LoopVariable => "entity.name.variable.for.stan",
    WhileStatement => "meta.while.statement.stan",
    WhileBegin => "punctuation.definition.while.begin.round.bracket.stan",
    WhileEnd => "punctuation.definition.while.end.round.bracket.stan",
    IfStatement => "meta.if.statement.stan",
    IfBegin => "punctuation.definition.if.begin.round.bracket.stan",
    IfEnd => "punctuation.definition.if.end.round.bracket.stan",

    PrintArguments => "meta.section.print-arguments.stan",
    PrintArgumentsBegin => "punctuation.definition.print-arguments.begin.round.bracket.stan",
    PrintArgumentsEnd => "punctuation.definition.print-arguments.end.round.bracket.stan",

    LogicalOperator => "keyword.operator.logical.stan",
    ArithmeticOperator => "keyword.operator.arithmetic.stan",
    TernaryOperator => "keyword.operator.ternary.stan",
    ColonOperator => "keyword.operator.colon.stan",
    AssignmentOperator => "keyword.operator.assignment.stan",

    Comma => "punctuation.delimiter.comma.stan",
    Bar => "punctuation.delimiter.bar.stan",
    Terminator => "punctuation.terminator.statement.stan",
    ParensBegin => "punctuation.section.parens.begin.bracket.round.stan",
    ParensEnd => "punctuation.section.parens.end.bracket.round.stan",
    BracketsBegin => "punctuation.section.brackets.begin.bracket.square.stan",
    BracketsEnd => "punctuation.section.brackets.end.bracket.square.stan",
    BlockBegin => "punctuation.section.block.begin.bracket.curly.stan",
    BlockEnd => "punctuation.section.block.end.bracket.curly.stan",
    ArrayBegin => "punctuation.section.array.begin.bracket.curly.stan",
    ArrayEnd => "punctuation.section.array.end.bracket.curly.stan",

    StorageType => "storage.type.stan",
    VariableDeclaration => "meta.variable.declaration.stan",
    VariableType => "storage.type.variable.stan",
    VariableName => "entity.name.variable.stan",
    RangeConstraints => "meta.range-constraints.stan",
    RangeConstraintsBegin => "punctuation.definition.range-constraints.begin.angle.bracket.stan",
    RangeConstraintsEnd => "punctuation.definition.range-constraints.end.angle.bracket.stan",
    RangeKeyword => "keyword.other.range.stan",
    Equals => "punctuation.delimiter.equals.stan",
    AssignmentRhs => "meta.section.assignment-rhs.stan",
    DeclarationAssignment => "keyword.assignment.stan",

    FunctionDeclaration => "meta.function-declaration.stan",
    ReturnType => "storage.type.return.stan",
    DeclaredFunction => "entity.name.function.stan",
    ParamsBegin => "punctuation.definition.function-params.begin.bracket.round.stan",
    ParamsEnd => "punctuation.definition.function-params.end.bracket.round.stan",
    DataModifier => "storage.modifier.data.stan",
    ParamType => "storage.type.function-param.stan",
    Parameter => "variable.parameter.function.stan",
}

/// Program blocks, in the order a model declares them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Functions,
    Data,
    TransformedData,
    Parameters,
    TransformedParameters,
    Model,
    GeneratedQuantities,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Functions,
        Section::Data,
        Section::TransformedData,
        Section::Parameters,
        Section::TransformedParameters,
        Section::Model,
        Section::GeneratedQuantities,
    ];

    /// The header with its words joined by `-`, as used in scope labels.
    pub fn slug(self) -> &'static str {
        match self {
            Section::Functions => "functions",
            Section::Data => "data",
            Section::TransformedData => "transformed-data",
            Section::Parameters => "parameters",
            Section::TransformedParameters => "transformed-parameters",
            Section::Model => "model",
            Section::GeneratedQuantities => "generated-quantities",
        }
    }

    /// Resolves a header as written in source, where the words of
    /// multi-word headers may be separated by any run of whitespace.
    pub fn from_header(header: &str) -> Option<Section> {
        let words: Vec<&str> = header.split_whitespace().collect();
        Section::ALL
            .iter()
            .cloned()
            .find(|section| section.slug().split('-').eq(words.iter().cloned()))
    }
}

/// Statements whose parenthesised header opens a meta scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    For,
    While,
    If,
}

impl Control {
    pub fn from_keyword(word: &str) -> Option<Control> {
        match word {
            "for" => Some(Control::For),
            "while" => Some(Control::While),
            "if" => Some(Control::If),
            _ => None,
        }
    }

    pub fn statement(self) -> ScopeKind {
        match self {
            Control::For => ScopeKind::ForStatement,
            Control::While => ScopeKind::WhileStatement,
            Control::If => ScopeKind::IfStatement,
        }
    }

    pub fn begin(self) -> ScopeKind {
        match self {
            Control::For => ScopeKind::ForBegin,
            Control::While => ScopeKind::WhileBegin,
            Control::If => ScopeKind::IfBegin,
        }
    }

    pub fn end(self) -> ScopeKind {
        match self {
            Control::For => ScopeKind::ForEnd,
            Control::While => ScopeKind::WhileEnd,
            Control::If => ScopeKind::IfEnd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScopeKind, Section};

    #[test]
    fn all_is_in_discriminant_order() {
        for (index, kind) in ScopeKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index);
        }
    }

    #[test]
    fn every_label_belongs_to_the_language() {
        for kind in ScopeKind::ALL {
            let name = kind.name();
            assert!(
                name.ends_with(".stan") || name.ends_with(".standoc"),
                "{} is missing the language suffix",
                name
            );
        }
    }

    #[test]
    fn from_header_tolerates_extra_whitespace() {
        assert_eq!(Section::from_header("transformed   data"), Some(Section::TransformedData));
        assert_eq!(Section::from_header("generated\tquantities"), Some(Section::GeneratedQuantities));
        assert_eq!(Section::from_header("model"), Some(Section::Model));
        assert_eq!(Section::from_header("transformed"), None);
    }
}
