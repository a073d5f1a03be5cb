//! Descent over the precompiled pushdown table.

use translator_automaton::{PushdownAutomaton, PushdownState};
use translator_debug::Tracer;
use translator_foundation::{NodeId, ParsedToken, Result, StateId, SyntaxOptions};

use crate::analyzer::{SyntaxAnalyzer, SyntaxOutcome};
use crate::engine::{self, Cursor, Dive};

/// Syntax analyzer driven by a [`PushdownAutomaton`].
///
/// The table carries everything the search needs, so the grammar itself is
/// not consulted once the table is compiled.
#[derive(Clone, Debug)]
pub struct PushdownParser<'p> {
    automaton: &'p PushdownAutomaton,
    options: SyntaxOptions,
}

impl<'p> PushdownParser<'p> {
    /// Creates an analyzer over `automaton`.
    #[must_use]
    pub fn new(automaton: &'p PushdownAutomaton, options: SyntaxOptions) -> Self {
        Self { automaton, options }
    }

    /// The table being walked.
    #[must_use]
    pub fn automaton(&self) -> &'p PushdownAutomaton {
        self.automaton
    }
}

impl SyntaxAnalyzer for PushdownParser<'_> {
    fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    fn analyze_traced(&self, tokens: &[ParsedToken], tracer: &mut Tracer) -> Result<SyntaxOutcome> {
        engine::analyze(&TableCursor(self.automaton), tokens, &self.options, tracer)
    }
}

struct TableCursor<'p>(&'p PushdownAutomaton);

impl TableCursor<'_> {
    fn token_names(&self, state: &PushdownState, out: &mut Vec<String>) {
        out.extend(
            state
                .links
                .keys()
                .filter_map(|key| self.0.token_name(*key))
                .map(str::to_string),
        );
    }
}

impl Cursor for TableCursor<'_> {
    type Position = StateId;

    fn start(&self) -> StateId {
        self.0.start_state()
    }

    fn is_interruptable(&self, at: StateId) -> bool {
        self.0.state(at).is_some_and(|s| s.is_interruptable)
    }

    fn recursion(&self, at: StateId) -> Option<StateId> {
        self.0.state(at).and_then(|s| s.recursion)
    }

    fn step(&self, at: StateId, token: NodeId) -> Option<Option<StateId>> {
        self.0.state(at)?.link(token).map(|link| link.dive_in)
    }

    fn dives(&self, at: StateId, out: &mut Vec<Dive<StateId>>) {
        let Some(state) = self.0.state(at) else { return };
        for (node, link) in &state.dives {
            if let Some(entered) = link.dive_in {
                out.push(Dive {
                    node: *node,
                    entered,
                    continuation: link.factor_out,
                });
            }
        }
    }

    fn expected(&self, at: StateId, out: &mut Vec<String>) {
        let Some(state) = self.0.state(at) else { return };
        self.token_names(state, out);
        for (_, link) in &state.dives {
            if let Some(inner) = link.dive_in.and_then(|id| self.0.state(id)) {
                self.token_names(inner, out);
            }
        }
    }
}
