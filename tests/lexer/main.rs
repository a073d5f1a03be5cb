//! Integration tests for Layer 3: Lexer
//!
//! Tests for tokenizing scripts with a compiled grammar and building the
//! per-class token tables.

mod tables;
mod tokens;
