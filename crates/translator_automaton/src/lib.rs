//! Automata built from a compiled grammar.
//!
//! This crate provides:
//! - [`FiniteAutomaton`] - the character-class automaton the lexer runs
//! - [`PushdownAutomaton`] - the precompiled table the pushdown parser runs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod finite;
mod optimize;
pub mod pushdown;
mod synth;

pub use finite::{AcceptToken, FiniteAutomaton, FiniteState};
pub use pushdown::{PushdownAutomaton, PushdownLink, PushdownState};
