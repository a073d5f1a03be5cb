//! Pipeline session, REPL, CLI, and serialization for the translator.
//!
//! This crate provides:
//! - [`Session`] - a compiled grammar with its automata, ready to check scripts
//! - [`Repl`] - interactive loop that lexes and parses each line
//! - [`serialize`] - `MessagePack` persistence of compiled artifacts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, format_report};
pub use serialize::CompiledArtifacts;
pub use session::{ScriptReport, Session};
