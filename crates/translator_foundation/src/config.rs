//! Options for each pipeline stage.
//!
//! Every stage reads a small struct with a `Default` and `with_*` builders.
//! [`Config`] bundles them for hosts that drive the whole pipeline.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Grammar
// =============================================================================

/// Options for grammar compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrammarOptions {
    /// List terminals that appear inside defined tokens as standalone tokens.
    pub include_terminals_inside_defined_tokens: bool,
    /// Rewrite left recursion into right recursion.
    pub convert_left_recursion_to_right: bool,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        Self {
            include_terminals_inside_defined_tokens: false,
            convert_left_recursion_to_right: true,
        }
    }
}

impl GrammarOptions {
    /// Builder method to list token-internal terminals.
    #[must_use]
    pub fn with_terminals_inside_defined_tokens(mut self, include: bool) -> Self {
        self.include_terminals_inside_defined_tokens = include;
        self
    }

    /// Builder method to toggle left-recursion conversion.
    #[must_use]
    pub fn with_left_recursion_conversion(mut self, convert: bool) -> Self {
        self.convert_left_recursion_to_right = convert;
        self
    }
}

// =============================================================================
// Lexer
// =============================================================================

/// Options for the token parser.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LexerOptions {
    /// Columns a tab advances.
    pub tab_width: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self { tab_width: 4 }
    }
}

impl LexerOptions {
    /// Builder method to set the tab width.
    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }
}

// =============================================================================
// Syntax
// =============================================================================

/// How the syntax analyzer walks the grammar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SyntaxStrategy {
    /// Descend the live factor trie of the compiled grammar.
    RecursiveDescent,
    /// Walk the precompiled pushdown automaton table.
    #[default]
    PushdownTable,
}

impl fmt::Display for SyntaxStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecursiveDescent => write!(f, "recursive"),
            Self::PushdownTable => write!(f, "pushdown"),
        }
    }
}

impl FromStr for SyntaxStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" | "recursive-descent" => Ok(Self::RecursiveDescent),
            "pushdown" | "pushdown-table" => Ok(Self::PushdownTable),
            other => Err(format!("unknown syntax strategy: {other}")),
        }
    }
}

/// Options for syntax analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyntaxOptions {
    /// Which analyzer to run.
    pub strategy: SyntaxStrategy,
    /// Drop undefined tokens instead of failing on them.
    pub ignore_undefined_tokens: bool,
    /// Largest continuation stack allowed before giving up.
    pub max_depth: usize,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            strategy: SyntaxStrategy::default(),
            ignore_undefined_tokens: false,
            max_depth: 10_000,
        }
    }
}

impl SyntaxOptions {
    /// Builder method to choose the strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SyntaxStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder method to skip undefined tokens.
    #[must_use]
    pub fn with_ignore_undefined_tokens(mut self, ignore: bool) -> Self {
        self.ignore_undefined_tokens = ignore;
        self
    }

    /// Builder method to set the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

// =============================================================================
// Config
// =============================================================================

/// Options for the whole pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Grammar compilation options.
    pub grammar: GrammarOptions,
    /// Lexer options.
    pub lexer: LexerOptions,
    /// Syntax analysis options.
    pub syntax: SyntaxOptions,
}

impl Config {
    /// Preset for grammar authoring: left recursion kept, live trie descent,
    /// undefined tokens tolerated.
    #[must_use]
    pub fn authoring() -> Self {
        Self {
            grammar: GrammarOptions::default().with_left_recursion_conversion(false),
            lexer: LexerOptions::default(),
            syntax: SyntaxOptions::default()
                .with_strategy(SyntaxStrategy::RecursiveDescent)
                .with_ignore_undefined_tokens(true),
        }
    }

    /// Builder method to replace grammar options.
    #[must_use]
    pub fn with_grammar(mut self, grammar: GrammarOptions) -> Self {
        self.grammar = grammar;
        self
    }

    /// Builder method to replace lexer options.
    #[must_use]
    pub fn with_lexer(mut self, lexer: LexerOptions) -> Self {
        self.lexer = lexer;
        self
    }

    /// Builder method to replace syntax options.
    #[must_use]
    pub fn with_syntax(mut self, syntax: SyntaxOptions) -> Self {
        self.syntax = syntax;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.grammar.convert_left_recursion_to_right);
        assert!(!config.grammar.include_terminals_inside_defined_tokens);
        assert_eq!(config.lexer.tab_width, 4);
        assert_eq!(config.syntax.strategy, SyntaxStrategy::PushdownTable);
    }

    #[test]
    fn strategy_round_trips_through_text() {
        for strategy in [SyntaxStrategy::RecursiveDescent, SyntaxStrategy::PushdownTable] {
            assert_eq!(strategy.to_string().parse::<SyntaxStrategy>(), Ok(strategy));
        }
        assert!("lalr".parse::<SyntaxStrategy>().is_err());
    }

    #[test]
    fn authoring_preset() {
        let config = Config::authoring();
        assert!(!config.grammar.convert_left_recursion_to_right);
        assert_eq!(config.syntax.strategy, SyntaxStrategy::RecursiveDescent);
        assert!(config.syntax.ignore_undefined_tokens);
    }
}
