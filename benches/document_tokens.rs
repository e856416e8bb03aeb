#![feature(test)]

extern crate stan_syntax;
extern crate test;

use stan_syntax::{Document, Lexer};
use std::path::Path;
use test::Bencher;

#[bench]
fn bench_tokens(b: &mut Bencher) {
    let lexer = Lexer::new().unwrap();
    let document = Document::from_file(Path::new("tests/fixtures/eight_schools.stan")).unwrap();

    b.iter(|| {
        // Exhaust the token iterator.
        for _ in document.tokens(&lexer) {}
    });
}

#[bench]
fn bench_lexer_construction(b: &mut Bencher) {
    b.iter(|| Lexer::new().unwrap());
}
