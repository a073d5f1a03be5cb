//! Integration tests for Layer 2: Automata
//!
//! Tests for lexer automaton synthesis and the pushdown syntax table.

mod finite;
mod pushdown;
