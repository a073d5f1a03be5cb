//! Lexer for scripts written in a compiled grammar.
//!
//! This crate provides:
//! - [`TokenParser`] - splits a script into [`ParsedToken`](translator_foundation::ParsedToken)s
//! - [`TokenTables`] - per-class tables of distinct token names

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod tables;
pub mod token_parser;

pub use tables::{ClassEntries, TokenEntry, TokenTables};
pub use token_parser::{LexResult, TokenParser};
