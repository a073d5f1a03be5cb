//! Descent over the live factor trie.
//!
//! Positions are medium and factor ids of the compiled grammar; nothing is
//! precomputed beyond what the grammar already holds.

use translator_debug::Tracer;
use translator_foundation::{NodeId, ParsedToken, Result, SyntaxOptions};
use translator_grammar::{Grammar, Trie};

use crate::analyzer::{SyntaxAnalyzer, SyntaxOutcome};
use crate::engine::{self, Cursor, Dive};

/// Syntax analyzer that walks the grammar's tries directly.
#[derive(Clone, Debug)]
pub struct RecursiveParser<'g> {
    grammar: &'g Grammar,
    options: SyntaxOptions,
}

impl<'g> RecursiveParser<'g> {
    /// Creates an analyzer for `grammar`.
    #[must_use]
    pub fn new(grammar: &'g Grammar, options: SyntaxOptions) -> Self {
        Self { grammar, options }
    }

    /// The grammar being walked.
    #[must_use]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }
}

impl SyntaxAnalyzer for RecursiveParser<'_> {
    fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    fn analyze_traced(&self, tokens: &[ParsedToken], tracer: &mut Tracer) -> Result<SyntaxOutcome> {
        engine::analyze(&TrieCursor(self.grammar), tokens, &self.options, tracer)
    }
}

struct TrieCursor<'g>(&'g Grammar);

impl TrieCursor<'_> {
    fn trie(&self, at: NodeId) -> Option<&Trie> {
        self.0.get(at).and_then(|node| node.trie())
    }

    fn is_token_key(&self, id: NodeId) -> bool {
        self.0.get(id).is_some_and(|node| node.is_token_key())
    }

    fn token_names(&self, trie: &Trie, out: &mut Vec<String>) {
        for (head, _) in &trie.cases {
            if let Some(key) = self.0.get(*head).filter(|key| key.is_token_key()) {
                out.push(key.name.clone());
            }
        }
    }
}

impl Cursor for TrieCursor<'_> {
    type Position = NodeId;

    fn start(&self) -> NodeId {
        self.0.axiom()
    }

    fn is_interruptable(&self, at: NodeId) -> bool {
        self.trie(at).is_some_and(|trie| trie.is_interruptable)
    }

    fn recursion(&self, at: NodeId) -> Option<NodeId> {
        self.trie(at).and_then(|trie| trie.recursion)
    }

    fn step(&self, at: NodeId, token: NodeId) -> Option<Option<NodeId>> {
        self.trie(at)?
            .cases
            .iter()
            .find(|(head, _)| *head == token && self.is_token_key(*head))
            .map(|(_, next)| *next)
    }

    fn dives(&self, at: NodeId, out: &mut Vec<Dive<NodeId>>) {
        let Some(trie) = self.trie(at) else { return };
        for (head, next) in &trie.cases {
            if !self.is_token_key(*head) && self.trie(*head).is_some() {
                out.push(Dive {
                    node: *head,
                    entered: *head,
                    continuation: *next,
                });
            }
        }
    }

    fn expected(&self, at: NodeId, out: &mut Vec<String>) {
        let Some(trie) = self.trie(at) else { return };
        self.token_names(trie, out);
        for (head, _) in &trie.cases {
            if self.is_token_key(*head) {
                continue;
            }
            if let Some(inner) = self.trie(*head) {
                self.token_names(inner, out);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
