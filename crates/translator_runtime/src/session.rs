//! A compiled grammar and everything needed to check scripts against it.
//!
//! The session owns the grammar, both automata, the options, and a tracer.
//! [`Session::run`] takes a script through the whole pipeline: tokenize,
//! then analyze with the configured strategy.

use std::path::Path;

use translator_automaton::{FiniteAutomaton, PushdownAutomaton};
use translator_debug::{TraceEvent, Tracer};
use translator_foundation::{Config, Diagnostic, DiagnosticKind, ParsedToken, Result};
use translator_grammar::Grammar;
use translator_lexer::{LexResult, TokenParser};
use translator_syntax::{Analyzer, SyntaxAnalyzer, SyntaxOutcome};

use crate::serialize::CompiledArtifacts;

// =============================================================================
// Script Report
// =============================================================================

/// Everything learned about one script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptReport {
    /// Tokens produced by the lexer.
    pub tokens: Vec<ParsedToken>,
    /// Lexical diagnostics.
    pub lexical: Vec<Diagnostic>,
    /// Syntax verdict; `None` when the script was empty.
    pub outcome: Option<SyntaxOutcome>,
}

impl ScriptReport {
    /// Returns true if the script parsed.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.outcome.as_ref().is_some_and(SyntaxOutcome::is_accepted)
    }

    /// Lexical diagnostics followed by the syntax diagnostic, if any.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.lexical
            .iter()
            .chain(self.outcome.as_ref().and_then(SyntaxOutcome::diagnostic))
    }
}

// =============================================================================
// Session
// =============================================================================

/// A compiled grammar ready to check scripts.
pub struct Session {
    config: Config,
    artifacts: CompiledArtifacts,
    tracer: Tracer,
}

impl Session {
    /// Builds the automata for `grammar`.
    ///
    /// # Errors
    ///
    /// Returns an error if automaton synthesis fails.
    pub fn new(grammar: Grammar, config: Config) -> Result<Self> {
        Self::with_tracer(grammar, config, Tracer::disabled())
    }

    /// Builds the automata for `grammar`, recording each stage in `tracer`.
    ///
    /// # Errors
    ///
    /// Returns an error if automaton synthesis fails.
    pub fn with_tracer(grammar: Grammar, config: Config, mut tracer: Tracer) -> Result<Self> {
        tracer.record(TraceEvent::GrammarCompiled {
            nodes: grammar.nodes().len(),
            factors: grammar.factors().count(),
            left_recursion: grammar.has_left_recursion(),
        });
        let artifacts = CompiledArtifacts::build(grammar)?;
        tracer.record(TraceEvent::FiniteAutomatonBuilt {
            states: artifacts.finite.len(),
        });
        tracer.record(TraceEvent::PushdownCompiled {
            states: artifacts.pushdown.len(),
        });

        Ok(Self {
            config,
            artifacts,
            tracer,
        })
    }

    /// Compiles an XML grammar and builds its automata.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed or any compilation stage fails.
    pub fn from_xml(xml: &str, config: Config) -> Result<Self> {
        let grammar = Grammar::from_xml(xml, &config.grammar)?;
        Self::new(grammar, config)
    }

    /// Loads and compiles an XML grammar file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any compilation stage
    /// fails.
    pub fn load(path: impl AsRef<Path>, config: Config, tracer: Tracer) -> Result<Self> {
        let grammar = Grammar::load(path, &config.grammar)?;
        Self::with_tracer(grammar, config, tracer)
    }

    /// Wraps previously compiled artifacts.
    #[must_use]
    pub fn from_artifacts(artifacts: CompiledArtifacts, config: Config) -> Self {
        Self {
            config,
            artifacts,
            tracer: Tracer::disabled(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The options in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the options. Grammar options only take effect on
    /// the next compilation.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The compiled grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.artifacts.grammar
    }

    /// The lexer automaton.
    #[must_use]
    pub fn finite_automaton(&self) -> &FiniteAutomaton {
        &self.artifacts.finite
    }

    /// The syntax table.
    #[must_use]
    pub fn pushdown_automaton(&self) -> &PushdownAutomaton {
        &self.artifacts.pushdown
    }

    /// The compiled artifacts.
    #[must_use]
    pub fn artifacts(&self) -> &CompiledArtifacts {
        &self.artifacts
    }

    /// The tracer.
    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Mutable access to the tracer.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Names of listed terminals, for completion.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        self.grammar()
            .listed_terminals()
            .map(|node| node.name.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Tokenizes a script.
    pub fn lex(&mut self, script: &str) -> LexResult {
        let artifacts = &self.artifacts;
        TokenParser::new(&artifacts.grammar, &artifacts.finite, self.config.lexer.clone())
            .parse_traced(script, &mut self.tracer)
    }

    /// Analyzes tokens with the configured strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the search exceeds the configured depth.
    pub fn analyze(&mut self, tokens: &[ParsedToken]) -> Result<SyntaxOutcome> {
        let artifacts = &self.artifacts;
        Analyzer::new(&artifacts.grammar, &artifacts.pushdown, self.config.syntax.clone())
            .analyze_traced(tokens, &mut self.tracer)
    }

    /// Tokenizes and analyzes a script.
    ///
    /// # Errors
    ///
    /// Returns an error if the search exceeds the configured depth.
    pub fn run(&mut self, script: &str) -> Result<ScriptReport> {
        self.tracer.begin_run();
        let LexResult {
            tokens,
            diagnostics,
        } = self.lex(script);

        let empty = diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::EmptyScript);
        let outcome = if empty {
            None
        } else {
            Some(self.analyze(&tokens)?)
        };

        Ok(ScriptReport {
            tokens,
            lexical: diagnostics,
            outcome,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
