//! Trace event and record types.
//!
//! Events are grouped into channels, one per pipeline stage.

use std::fmt;

use translator_foundation::{NodeId, ParsedToken, StateId};

// =============================================================================
// Channel
// =============================================================================

/// Pipeline stage an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Grammar compilation.
    Grammar,
    /// Automaton construction.
    Automaton,
    /// Tokenization.
    Lexer,
    /// Syntax analysis.
    Syntax,
}

impl Channel {
    /// Every channel, in pipeline order.
    pub const ALL: [Self; 4] = [Self::Grammar, Self::Automaton, Self::Lexer, Self::Syntax];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Grammar => "grammar",
            Self::Automaton => "automaton",
            Self::Lexer => "lexer",
            Self::Syntax => "syntax",
        })
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_string() == s)
            .ok_or_else(|| format!("unknown trace channel '{s}'"))
    }
}

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded while compiling a grammar and analyzing scripts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A grammar finished compiling.
    GrammarCompiled {
        /// Number of nodes in the arena.
        nodes: usize,
        /// Number of factors created by factorization.
        factors: usize,
        /// Whether left recursion was kept as loop factors.
        left_recursion: bool,
    },

    /// The lexer automaton was built and optimized.
    FiniteAutomatonBuilt {
        /// Number of states after optimization.
        states: usize,
    },

    /// The pushdown table was compiled.
    PushdownCompiled {
        /// Number of states.
        states: usize,
    },

    /// The lexer consumed one character.
    LexerStep {
        /// The character.
        symbol: char,
        /// State before the step.
        from: StateId,
        /// State after the step; `None` when the buffered token was emitted.
        to: Option<StateId>,
    },

    /// The lexer produced a token.
    TokenEmitted {
        /// The token.
        token: ParsedToken,
    },

    /// The syntax search entered a nonterminal.
    SyntaxDive {
        /// Index of the current token.
        token_index: usize,
        /// The nonterminal entered.
        node: NodeId,
    },

    /// The syntax search abandoned a branch.
    SyntaxBacktrack {
        /// Index of the token the branch stopped at.
        token_index: usize,
    },

    /// The syntax search accepted the script.
    SyntaxSuccess {
        /// Number of search steps taken.
        steps: usize,
    },

    /// The syntax search rejected the script.
    SyntaxError {
        /// Character offset of the failure.
        position: usize,
        /// Diagnostic message.
        message: String,
    },

    /// Free-form note.
    Custom {
        /// Channel to file the note under.
        channel: Channel,
        /// The note.
        message: String,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GrammarCompiled { .. } => "grammar-compiled",
            Self::FiniteAutomatonBuilt { .. } => "finite-automaton-built",
            Self::PushdownCompiled { .. } => "pushdown-compiled",
            Self::LexerStep { .. } => "lexer-step",
            Self::TokenEmitted { .. } => "token-emitted",
            Self::SyntaxDive { .. } => "syntax-dive",
            Self::SyntaxBacktrack { .. } => "syntax-backtrack",
            Self::SyntaxSuccess { .. } => "syntax-success",
            Self::SyntaxError { .. } => "syntax-error",
            Self::Custom { .. } => "custom",
        }
    }

    /// Returns the channel this event is filed under.
    #[must_use]
    pub fn channel(&self) -> Channel {
        match self {
            Self::GrammarCompiled { .. } => Channel::Grammar,
            Self::FiniteAutomatonBuilt { .. } | Self::PushdownCompiled { .. } => Channel::Automaton,
            Self::LexerStep { .. } | Self::TokenEmitted { .. } => Channel::Lexer,
            Self::SyntaxDive { .. }
            | Self::SyntaxBacktrack { .. }
            | Self::SyntaxSuccess { .. }
            | Self::SyntaxError { .. } => Channel::Syntax,
            Self::Custom { channel, .. } => *channel,
        }
    }

    /// Returns true if this event ends a syntax analysis.
    #[must_use]
    pub fn is_verdict(&self) -> bool {
        matches!(self, Self::SyntaxSuccess { .. } | Self::SyntaxError { .. })
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// The pipeline run this event belongs to.
    pub run: u64,
    /// Timestamp in nanoseconds since session start.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, run: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            run,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }

    /// Returns the event channel.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.event.channel()
    }
}

// =============================================================================
// Tests
// =============================================================================
