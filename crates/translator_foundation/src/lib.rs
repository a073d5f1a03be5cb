//! Core types shared by every translator stage.
//!
//! This crate provides:
//! - [`NodeId`], [`StateId`], [`TokenClassId`] - dense identifiers
//! - [`ParsedToken`] - the lexer's output unit
//! - [`Diagnostic`] - lexical, syntax, and system problems found in a script
//! - [`Error`] - compilation-time faults
//! - [`Config`] - per-stage options

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod ids;
pub mod token;
pub mod token_class;

pub use config::{Config, GrammarOptions, LexerOptions, SyntaxOptions, SyntaxStrategy};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticTag, format_expected};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use ids::{NodeId, StateId, TokenClassId};
pub use token::{ParsedToken, Position};
pub use token_class::TokenClassMap;
