//! Ordered rule tables. At each position the lexer walks the table that
//! belongs to the innermost open context and the first rule that matches
//! wins; there is no longest-match arbitration between rules.

/// A single lexical rule. Rules are plain tags; the matching logic for
/// each lives with the lexer's cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// `#include` followed by a bare, quoted or angle-bracketed filename.
    Include,
    /// `//` and `#` comments running to end of line.
    LineComment,
    /// `/*` or `/**`, opening a comment that may span lines.
    BlockCommentBegin,
    /// `*/` closing the innermost block comment.
    BlockCommentEnd,
    /// `@tag` inside a documentation comment.
    DocumentationTag,
    /// `model {`, `transformed data {` and the other program blocks.
    SectionHeader,
    /// A return type followed by a name and `(`.
    FunctionDeclaration,
    /// A storage type opening a variable declaration.
    VariableDeclaration,
    /// `<` directly after a declaration's type.
    RangeConstraintsBegin,
    /// `=` after a declared name, opening the initializer.
    DeclarationAssignment,
    /// `=` between a range keyword and its bound.
    ConstraintEquals,
    /// `>` closing a constraint clause.
    RangeConstraintsEnd,
    String,
    Number,
    /// `target +=`, fused into a single token.
    TargetAccumulator,
    /// Identifiers and every word-shaped keyword.
    Word,
    /// `~`, opening a sampling statement.
    Sampling,
    /// `;`.
    Terminator,
    /// `,` everywhere, `|` inside call arguments.
    Delimiter,
    /// `(`, `[` and `{`.
    Open,
    /// `)`, `]` and `}`.
    Close,
    /// Symbolic operators, longest spelling first.
    Operator,
}

/// Builds a table: the given context-specific rules, then the
/// expression-level rules shared by every code context.
macro_rules! rules_then_expressions {
    ($($rule:expr),*) => {
        &[
            $($rule,)*
            Rule::LineComment,
            Rule::BlockCommentBegin,
            Rule::String,
            Rule::Number,
            Rule::TargetAccumulator,
            Rule::Word,
            Rule::Sampling,
            Rule::Terminator,
            Rule::Delimiter,
            Rule::Open,
            Rule::Close,
            Rule::Operator,
        ]
    };
}

/// Top level, program blocks and `{ ... }` statement blocks.
pub const STATEMENT: &[Rule] = rules_then_expressions![
    Rule::Include,
    Rule::SectionHeader,
    Rule::FunctionDeclaration,
    Rule::VariableDeclaration
];

/// Parens, brackets, call arguments and other expression regions.
pub const EXPRESSION: &[Rule] = rules_then_expressions![];

/// Between a declaration's type and its terminator.
pub const DECLARATION: &[Rule] =
    rules_then_expressions![Rule::RangeConstraintsBegin, Rule::DeclarationAssignment];

/// Inside `<...>` on a declared type.
pub const RANGE_CONSTRAINTS: &[Rule] =
    rules_then_expressions![Rule::ConstraintEquals, Rule::RangeConstraintsEnd];

/// Inside a block comment; everything else is comment body.
pub const BLOCK_COMMENT: &[Rule] = &[Rule::BlockCommentEnd, Rule::DocumentationTag];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_precede_operators_in_every_code_table() {
        for table in &[STATEMENT, EXPRESSION, DECLARATION, RANGE_CONSTRAINTS] {
            let comment = table.iter().position(|r| *r == Rule::BlockCommentBegin);
            let operator = table.iter().position(|r| *r == Rule::Operator);
            assert!(comment < operator);
        }
    }

    #[test]
    fn include_precedes_line_comments() {
        let include = STATEMENT.iter().position(|r| *r == Rule::Include);
        let comment = STATEMENT.iter().position(|r| *r == Rule::LineComment);
        assert!(include < comment);
    }

    #[test]
    fn declaration_assignment_precedes_generic_operators() {
        let assignment = DECLARATION.iter().position(|r| *r == Rule::DeclarationAssignment);
        let operator = DECLARATION.iter().position(|r| *r == Rule::Operator);
        assert!(assignment < operator);
    }
}
