//! The analyzer interface and strategy selection.

use translator_automaton::PushdownAutomaton;
use translator_debug::Tracer;
use translator_foundation::{Diagnostic, ParsedToken, Result, SyntaxOptions, SyntaxStrategy};
use translator_grammar::Grammar;

use crate::pushdown::PushdownParser;
use crate::recursive::RecursiveParser;

// =============================================================================
// Syntax Outcome
// =============================================================================

/// Verdict of one syntax analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxOutcome {
    /// The tokens form a sentence of the grammar.
    Accepted {
        /// Search frames visited before acceptance.
        steps: usize,
    },
    /// The tokens were rejected.
    Rejected(Diagnostic),
}

impl SyntaxOutcome {
    /// Returns true for [`SyntaxOutcome::Accepted`].
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The diagnostic of a rejection.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected(diagnostic) => Some(diagnostic),
        }
    }
}

// =============================================================================
// Syntax Analyzer
// =============================================================================

/// Decides whether a token sequence is a sentence of a grammar.
pub trait SyntaxAnalyzer {
    /// Options this analyzer runs with.
    fn options(&self) -> &SyntaxOptions;

    /// Analyzes `tokens`, recording dives, backtracks, and the verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DepthExceeded`](translator_foundation::ErrorKind::DepthExceeded)
    /// when the grammar loops without consuming tokens.
    fn analyze_traced(&self, tokens: &[ParsedToken], tracer: &mut Tracer) -> Result<SyntaxOutcome>;

    /// Analyzes `tokens` without tracing.
    ///
    /// # Errors
    ///
    /// See [`SyntaxAnalyzer::analyze_traced`].
    fn analyze(&self, tokens: &[ParsedToken]) -> Result<SyntaxOutcome> {
        self.analyze_traced(tokens, &mut Tracer::disabled())
    }
}

// =============================================================================
// Analyzer
// =============================================================================

/// The analyzer chosen by [`SyntaxOptions::strategy`].
#[derive(Clone, Debug)]
pub enum Analyzer<'a> {
    /// Descent over the factor trie.
    Recursive(RecursiveParser<'a>),
    /// Descent over the pushdown table.
    Pushdown(PushdownParser<'a>),
}

impl<'a> Analyzer<'a> {
    /// Builds the analyzer `options` asks for.
    #[must_use]
    pub fn new(grammar: &'a Grammar, automaton: &'a PushdownAutomaton, options: SyntaxOptions) -> Self {
        match options.strategy {
            SyntaxStrategy::RecursiveDescent => Self::Recursive(RecursiveParser::new(grammar, options)),
            SyntaxStrategy::PushdownTable => Self::Pushdown(PushdownParser::new(automaton, options)),
        }
    }

    /// The strategy in use.
    #[must_use]
    pub fn strategy(&self) -> SyntaxStrategy {
        match self {
            Self::Recursive(_) => SyntaxStrategy::RecursiveDescent,
            Self::Pushdown(_) => SyntaxStrategy::PushdownTable,
        }
    }
}

impl SyntaxAnalyzer for Analyzer<'_> {
    fn options(&self) -> &SyntaxOptions {
        match self {
            Self::Recursive(parser) => parser.options(),
            Self::Pushdown(parser) => parser.options(),
        }
    }

    fn analyze_traced(&self, tokens: &[ParsedToken], tracer: &mut Tracer) -> Result<SyntaxOutcome> {
        match self {
            Self::Recursive(parser) => parser.analyze_traced(tokens, tracer),
            Self::Pushdown(parser) => parser.analyze_traced(tokens, tracer),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
