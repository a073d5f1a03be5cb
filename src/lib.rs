//! Translator - grammar-driven lexer and syntax checker
//!
//! This crate re-exports all layers of the translator for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: translator_runtime    — Session, REPL, CLI, serialization
//! Layer 4: translator_syntax     — Recursive descent and pushdown analyzers
//! Layer 3: translator_lexer      — Tokenizer driven by the finite automaton
//! Layer 2: translator_automaton  — Finite automaton synthesis, pushdown table
//! Layer 1: translator_grammar    — XML grammars, factorization, class narrowing
//!          translator_debug      — Tracing of every pipeline stage
//! Layer 0: translator_foundation — Ids, tokens, diagnostics, errors, options
//! ```

pub use translator_automaton as automaton;
pub use translator_debug as debug;
pub use translator_foundation as foundation;
pub use translator_grammar as grammar;
pub use translator_lexer as lexer;
pub use translator_runtime as runtime;
pub use translator_syntax as syntax;
