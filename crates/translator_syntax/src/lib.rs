//! Syntax analysis for token sequences of a compiled grammar.
//!
//! # Architecture
//!
//! ```text
//!   [ParsedToken]
//!         │
//!         ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ RecursiveParser │     │  PushdownParser  │
//! │ (factor trie)   │     │ (state table)    │
//! └─────────────────┘     └──────────────────┘
//!          │  Cursor                 │  Cursor
//!          └───────────┬─────────────┘
//!                      ▼
//!            ┌───────────────────┐
//!            │ depth-first search│  → Accepted { steps }
//!            │ (explicit stack)  │  → Rejected(Diagnostic)
//!            └───────────────────┘
//! ```
//!
//! Both strategies walk the same search through a small cursor interface, so
//! they accept the same scripts and report the same furthest-progress
//! diagnostics.
//!
//! # Modules
//!
//! - [`analyzer`] - the [`SyntaxAnalyzer`] trait, outcomes, and strategy selection
//! - [`recursive`] - descent over the live factor trie
//! - [`pushdown`] - descent over the precompiled pushdown table

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analyzer;
mod engine;
pub mod pushdown;
pub mod recursive;

pub use analyzer::{Analyzer, SyntaxAnalyzer, SyntaxOutcome};
pub use pushdown::PushdownParser;
pub use recursive::RecursiveParser;
