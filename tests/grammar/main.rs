//! Integration tests for Layer 1: Grammar
//!
//! Tests for XML grammar loading, factorization, left recursion handling,
//! and character class narrowing.

mod classes;
mod compile;
