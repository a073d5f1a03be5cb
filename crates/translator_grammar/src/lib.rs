//! Grammar model and compiler.
//!
//! This crate provides:
//! - [`GrammarDescription`] - the XML grammar description
//! - [`Grammar`] - the compiled node arena with factor tries
//! - [`ClassTable`] - symbol classes, token classes, and white delimiters
//! - [`Classifier`] - class narrowing used while building the lexer automaton
//! - [`display`] - raw and factorized text dumps

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod class_table;
pub mod classifier;
mod compiler;
pub mod description;
pub mod display;
pub mod grammar;
pub mod node;

pub use class_table::{ClassTable, SINGLE_DELIMITER_CLASS, SymbolCategory, SymbolClass, SymbolInfo};
pub use classifier::{Classifier, Narrowing, TerminalClassification, classify_terminals};
pub use description::{Definition, DefinitionKind, Element, GrammarDescription, TerminalSpec};
pub use grammar::Grammar;
pub use node::{ClassData, MediumData, Node, NodeKind, TerminalData, TokenTag, Trie};
