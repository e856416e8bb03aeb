// Scope labels and stacks
extern crate syntect;

// Grapheme cluster iteration
extern crate unicode_segmentation;

// Error definition/handling
#[macro_use]
extern crate error_chain;

pub mod config;
pub mod document;
pub mod grammar;
pub mod lexer;
pub mod util;
mod errors;

pub use crate::config::Config;
pub use crate::document::{Document, Position, Token, TokenIterator};
pub use crate::errors::*;
pub use crate::lexer::{Lexeme, Lexer, LineState, LineTokens};
