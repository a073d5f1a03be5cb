//! Compiled artifact serialization using `MessagePack`.
//!
//! A compiled grammar and its automata can be saved once and loaded by later
//! sessions without recompiling the XML description.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use translator_automaton::{FiniteAutomaton, PushdownAutomaton};
use translator_foundation::{Error, ErrorKind, Result};
use translator_grammar::{ClassTable, Grammar};

/// Everything a session needs to lex and parse scripts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledArtifacts {
    /// The compiled grammar.
    pub grammar: Grammar,
    /// The class table after narrowing.
    pub class_table: ClassTable,
    /// The lexer automaton.
    pub finite: FiniteAutomaton,
    /// The syntax table.
    pub pushdown: PushdownAutomaton,
}

impl CompiledArtifacts {
    /// Builds both automata for `grammar`.
    ///
    /// # Errors
    ///
    /// Returns an error if automaton synthesis fails.
    pub fn build(grammar: Grammar) -> Result<Self> {
        let finite = FiniteAutomaton::build(&grammar)?;
        let pushdown = PushdownAutomaton::compile(&grammar)?;
        Ok(Self {
            class_table: finite.class_table().clone(),
            grammar,
            finite,
            pushdown,
        })
    }
}

/// Serializes artifacts to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(artifacts: &CompiledArtifacts) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(artifacts)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes artifacts from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<CompiledArtifacts> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Saves artifacts to a file, replacing any existing one.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(artifacts: &CompiledArtifacts, path: P) -> Result<()> {
    let path = path.as_ref();
    let io_error = |action: &str, e: std::io::Error| {
        Error::new(ErrorKind::IoError(format!(
            "failed to {action} '{}': {e}",
            path.display()
        )))
    };

    let file = File::create(path).map_err(|e| io_error("create file", e))?;
    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(artifacts)?;
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to file", e))?;
    writer.flush().map_err(|e| io_error("flush file", e))?;
    Ok(())
}

/// Loads artifacts from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<CompiledArtifacts> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to open file '{}': {e}",
            path.display()
        )))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;

    from_bytes(&bytes)
}
