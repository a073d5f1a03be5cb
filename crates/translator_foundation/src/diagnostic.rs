//! Problems found while lexing or parsing a script.
//!
//! Diagnostics are data, not errors: a failed parse hands them back to the
//! caller so several independent sets can be shown without ending a session.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::token::ParsedToken;

/// Which stage produced a diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticTag {
    /// Unrecognized characters or an empty script.
    Lexical,
    /// Token sequence does not match the grammar.
    Syntax,
    /// The analyzer could not run at all.
    System,
}

impl fmt::Display for DiagnosticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
            Self::System => write!(f, "system"),
        }
    }
}

/// What went wrong.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticKind {
    /// The script contained nothing to tokenize.
    EmptyScript,
    /// The analyzer received no tokens.
    NoTokens,
    /// The lexer could not recognize some input.
    UndefinedToken,
    /// A token did not fit the grammar at its position.
    UnexpectedToken,
    /// The script ended before the grammar was satisfied.
    UnexpectedEndOfScript,
}

/// A lexical, syntax, or system diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// The stage that produced this diagnostic.
    pub tag: DiagnosticTag,
    /// The kind of problem.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// The offending tokens.
    pub tokens: Vec<ParsedToken>,
    /// Character offset of the problem.
    pub position: usize,
    /// Names the grammar would have accepted, sorted.
    pub expected: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with no tokens or expectations.
    #[must_use]
    pub fn new(tag: DiagnosticTag, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            tag,
            kind,
            message: message.into(),
            tokens: Vec::new(),
            position: 0,
            expected: Vec::new(),
        }
    }

    /// Creates the diagnostic for an empty script.
    #[must_use]
    pub fn empty_script() -> Self {
        Self::new(
            DiagnosticTag::Lexical,
            DiagnosticKind::EmptyScript,
            "Token parser received an empty script",
        )
    }

    /// Creates the diagnostic for an analyzer called without tokens.
    #[must_use]
    pub fn no_tokens() -> Self {
        Self::new(
            DiagnosticTag::System,
            DiagnosticKind::NoTokens,
            "Syntax analyzer received no tokens",
        )
    }

    /// Creates a lexical diagnostic for an unrecognized token.
    #[must_use]
    pub fn undefined_lexeme(token: &ParsedToken) -> Self {
        Self::new(
            DiagnosticTag::Lexical,
            DiagnosticKind::UndefinedToken,
            format!("Undefined token {token}"),
        )
        .with_token(token.clone())
        .at(token.in_string_position())
    }

    /// Attaches an offending token.
    #[must_use]
    pub fn with_token(mut self, token: ParsedToken) -> Self {
        self.tokens.push(token);
        self
    }

    /// Sets the character offset.
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Sets the expected names.
    #[must_use]
    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.tag, self.message)
    }
}

/// Formats an expected-name list the way diagnostics print it.
#[must_use]
pub fn format_expected(expected: &[String]) -> String {
    expected.join(" , ")
}
