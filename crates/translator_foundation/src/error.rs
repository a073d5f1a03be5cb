//! Error types for grammar compilation and artifact handling.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Only compilation-time faults are errors; problems found in a script are
//! reported as [`Diagnostic`](crate::Diagnostic) values instead.

use std::fmt;

use thiserror::Error;

/// The main error type for translator operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error for a name used before its definition.
    #[must_use]
    pub fn undefined_reference(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedReference(name.into()))
    }

    /// Creates an error for a terminal given two different exec classes.
    #[must_use]
    pub fn conflicting_exec_class(
        terminal: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::ConflictingExecClass {
            terminal: terminal.into(),
            existing: existing.into(),
            requested: requested.into(),
        })
    }

    /// Creates an error for a malformed grammar description.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedGrammar(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A name was referenced before it was defined.
    #[error("node '{0}' is referenced before it is defined")]
    UndefinedReference(String),

    /// A terminal was tagged with two different exec classes.
    #[error("terminal '{terminal}' has conflicting exec classes '{existing}' and '{requested}'")]
    ConflictingExecClass {
        /// The terminal text.
        terminal: String,
        /// The exec class already recorded.
        existing: String,
        /// The exec class that conflicts with it.
        requested: String,
    },

    /// A left-recursive medium has no alternative to bottom out on.
    #[error("medium '{0}' is left-recursive and has no non-recursive case")]
    NoBaseCase(String),

    /// Left recursion was found inside a defined token.
    #[error("defined token '{0}' contains left recursion")]
    LeftRecursionInToken(String),

    /// One automaton state would accept two different tokens.
    #[error("ambiguous state: '{existing}' and '{requested}' end at the same place")]
    AmbiguousState {
        /// The token already accepted by the state.
        existing: String,
        /// The token that tried to claim the same state.
        requested: String,
    },

    /// A looped medium would add a transition that is already defined.
    #[error("looped state already defines transition '{key}' (medium '{medium}')")]
    NonRegularLoop {
        /// The medium whose links were being spliced.
        medium: String,
        /// The colliding symbol-class key.
        key: String,
    },

    /// A medium inside a token is followed by more symbols in the same case.
    #[error("medium '{0}' cannot be followed by other symbols inside a defined token")]
    SelfInclusion(String),

    /// The grammar description could not be read.
    #[error("malformed grammar: {0}")]
    MalformedGrammar(String),

    /// The continuation stack grew past the configured limit.
    #[error("syntax analysis exceeded the maximum depth of {0}")]
    DepthExceeded(usize),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Grammar file or node name.
    pub source: Option<String>,
    /// Chain of definitions that led to the error, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a definition frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for translator operations.
pub type Result<T> = std::result::Result<T, Error>;
