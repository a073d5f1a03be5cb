//! Integration tests for Layer 4: Syntax
//!
//! Tests both analysis strategies over lexed scripts: acceptance, left
//! recursion, diagnostics, and agreement between the strategies.

mod diagnostics;
mod strategies;

use translator_automaton::{FiniteAutomaton, PushdownAutomaton};
use translator_foundation::{
    GrammarOptions, LexerOptions, Result, SyntaxOptions, SyntaxStrategy,
};
use translator_grammar::Grammar;
use translator_lexer::TokenParser;
use translator_syntax::{Analyzer, SyntaxAnalyzer, SyntaxOutcome};

pub const STRATEGIES: [SyntaxStrategy; 2] =
    [SyntaxStrategy::RecursiveDescent, SyntaxStrategy::PushdownTable];

/// A compiled grammar with both automata.
pub struct Fixture {
    pub grammar: Grammar,
    pub finite: FiniteAutomaton,
    pub pushdown: PushdownAutomaton,
}

impl Fixture {
    pub fn new(xml: &str) -> Self {
        Self::with_options(xml, &GrammarOptions::default())
    }

    pub fn with_options(xml: &str, options: &GrammarOptions) -> Self {
        let grammar = Grammar::from_xml(xml, options).unwrap();
        let finite = FiniteAutomaton::build(&grammar).unwrap();
        let pushdown = PushdownAutomaton::compile(&grammar).unwrap();
        Self {
            grammar,
            finite,
            pushdown,
        }
    }

    pub fn try_analyze(&self, script: &str, options: SyntaxOptions) -> Result<SyntaxOutcome> {
        let lexed = TokenParser::new(&self.grammar, &self.finite, LexerOptions::default())
            .parse(script);
        Analyzer::new(&self.grammar, &self.pushdown, options).analyze(&lexed.tokens)
    }

    pub fn analyze(&self, script: &str, strategy: SyntaxStrategy) -> SyntaxOutcome {
        self.try_analyze(script, SyntaxOptions::default().with_strategy(strategy))
            .unwrap()
    }
}
