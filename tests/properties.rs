//! Property-based tests for the line lexer.
//!
//! These check the guarantees that hold for every input rather than for
//! hand-picked lines: lexemes tile the line exactly, keywords only match
//! whole words, numeric literals are never split and malformed identifiers
//! stay a single invalid token.

use proptest::prelude::*;
use stan_syntax::grammar::words;
use stan_syntax::{Lexer, LineState};
use syntect::parsing::{Scope, ScopeStack};

fn stack(names: &[&str]) -> ScopeStack {
    let mut stack = ScopeStack::new();
    stack.push(Scope::new("source.stan").unwrap());
    for name in names {
        stack.push(Scope::new(name).unwrap());
    }
    stack
}

/// Lines built from Stan-ish fragments, so that the generated text actually
/// opens and closes regions instead of being mostly unmatched noise.
fn line_strategy() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("real ".to_string()),
        Just("vector<lower=0>[N] ".to_string()),
        Just("model {".to_string()),
        Just("}".to_string()),
        Just("/*".to_string()),
        Just("*/".to_string()),
        Just("/** @param ".to_string()),
        Just("// ".to_string()),
        Just("#include ".to_string()),
        Just("\"".to_string()),
        Just("~ normal(".to_string()),
        Just("target += ".to_string()),
        Just("for (i in 1:N) ".to_string()),
        Just("print(".to_string()),
        Just("real foo(data real x) ".to_string()),
        Just("T[".to_string()),
        "[a-z_]{1,6}",
        "[0-9.eE+-]{1,6}",
        "[(){}\\[\\]<>=;,|?:!&'~ \t]{1,3}",
        "\\PC{1,3}",
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|fragments| fragments.concat())
}

/// Valid real-literal spellings, without a sign.
fn real_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,4}\\.[0-9]{0,4}([eE][+-]?[0-9]{1,3})?",
        "\\.[0-9]{1,4}([eE][+-]?[0-9]{1,3})?",
        "[0-9]{1,4}[eE][+-]?[0-9]{1,3}",
    ]
}

fn illegal_identifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "_[a-zA-Z0-9_]{0,8}",
        "[a-zA-Z][a-zA-Z0-9_]{0,6}__",
        "[0-9]{1,3}[a-df-zA-DF-Z_][a-zA-Z0-9_]{0,5}",
    ]
}

proptest! {
    #[test]
    fn lexemes_tile_every_line(lines in prop::collection::vec(line_strategy(), 1..6)) {
        let lexer = Lexer::new().unwrap();
        let mut state = LineState::new();

        for line in &lines {
            let tokens = lexer.tokenize_line(line, &state);

            let mut offset = 0;
            for lexeme in &tokens.lexemes {
                prop_assert!(!lexeme.value.is_empty());
                prop_assert_eq!(lexeme.offset, offset);
                prop_assert_eq!(&line[offset..offset + lexeme.value.len()], lexeme.value);
                offset += lexeme.value.len();
            }
            prop_assert_eq!(offset, line.len());

            // Tokenizing is a pure function of the line and the state.
            prop_assert_eq!(&lexer.tokenize_line(line, &state), &tokens);

            state = tokens.state;
        }
    }

    #[test]
    fn keywords_only_match_whole_words(
        keyword in prop::sample::select(
            [words::CONTROL_KEYWORDS, words::STORAGE_TYPES, words::RANGE_KEYWORDS].concat()
        ),
        affix in "[a-z][a-z0-9]{0,5}",
        prefixed in any::<bool>(),
    ) {
        let word = if prefixed {
            format!("{}{}", affix, keyword)
        } else {
            format!("{}{}", keyword, affix)
        };
        prop_assume!(!words::is_keyword(&word));
        prop_assume!(!words::is_reserved(&word));
        prop_assume!(words::builtin(&word).is_none());

        let lexer = Lexer::new().unwrap();
        let tokens = lexer.tokenize_line(&word, &LineState::new());
        prop_assert_eq!(tokens.lexemes.len(), 1);
        prop_assert_eq!(tokens.lexemes[0].value, word.as_str());
        prop_assert_eq!(&tokens.lexemes[0].scope, &stack(&["meta.identifier.variable.stan"]));
    }

    #[test]
    fn real_literals_are_a_single_token(literal in real_literal_strategy()) {
        let lexer = Lexer::new().unwrap();
        let tokens = lexer.tokenize_line(&literal, &LineState::new());
        prop_assert_eq!(tokens.lexemes.len(), 1);
        prop_assert_eq!(tokens.lexemes[0].value, literal.as_str());
        prop_assert_eq!(&tokens.lexemes[0].scope, &stack(&["constant.numeric.real.stan"]));
    }

    #[test]
    fn signs_never_fuse_with_literals(sign in "[+-]", literal in real_literal_strategy()) {
        let line = format!("{}{}", sign, literal);
        let lexer = Lexer::new().unwrap();
        let tokens = lexer.tokenize_line(&line, &LineState::new());
        prop_assert_eq!(tokens.lexemes.len(), 2);
        prop_assert_eq!(tokens.lexemes[0].value, sign.as_str());
        prop_assert_eq!(&tokens.lexemes[0].scope, &stack(&["keyword.operator.arithmetic.stan"]));
        prop_assert_eq!(tokens.lexemes[1].value, literal.as_str());
    }

    #[test]
    fn illegal_identifiers_stay_one_invalid_token(word in illegal_identifier_strategy()) {
        let lexer = Lexer::new().unwrap();
        let tokens = lexer.tokenize_line(&word, &LineState::new());
        prop_assert_eq!(tokens.lexemes.len(), 1);
        prop_assert_eq!(tokens.lexemes[0].value, word.as_str());
        prop_assert_eq!(&tokens.lexemes[0].scope, &stack(&["invalid.illegal.variable.stan"]));
        prop_assert!(tokens.state.is_top_level());
    }
}
