//! The deterministic character-class automaton driven by the lexer.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use translator_foundation::{Result, StateId};
use translator_grammar::{ClassTable, Grammar};

use crate::optimize::optimize_finite_states;
use crate::synth::Synthesizer;

/// Token recognized when the lexer stops in a state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcceptToken {
    /// Defined token name, or the terminal text for generic terminals.
    pub name: String,
    /// Token class name.
    pub class: String,
}

/// A state of the finite automaton.
///
/// `links` is `None` for states with no outgoing transitions; an empty map is
/// never published.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FiniteState {
    /// Symbol-class key to next state.
    pub links: Option<BTreeMap<String, StateId>>,
    /// Set when stopping here yields a token.
    pub token: Option<AcceptToken>,
}

impl FiniteState {
    /// Returns the transition for a symbol class.
    #[must_use]
    pub fn link(&self, class: &str) -> Option<StateId> {
        self.links.as_ref().and_then(|l| l.get(class).copied())
    }
}

/// The lexer automaton together with the class table its keys refer to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FiniteAutomaton {
    states: Vec<FiniteState>,
    start_state: StateId,
    class_table: ClassTable,
    narrowed: BTreeMap<String, Vec<char>>,
}

impl FiniteAutomaton {
    /// Builds and optimizes the automaton for every defined token of
    /// `grammar` plus the generic terminal paths.
    ///
    /// # Errors
    ///
    /// Returns an error for left recursion inside a token, a medium followed
    /// by more symbols inside a token, two tokens ending in the same state,
    /// or a loop that would redefine an existing transition.
    pub fn build(grammar: &Grammar) -> Result<Self> {
        let synthesis = Synthesizer::new(grammar).run()?;
        let (states, start_state) = optimize_finite_states(synthesis.states, synthesis.start_state);
        Ok(Self {
            states,
            start_state,
            class_table: synthesis.narrowing.table,
            narrowed: synthesis.narrowing.removed,
        })
    }

    /// Assembles an automaton from parts.
    #[must_use]
    pub fn from_parts(states: Vec<FiniteState>, start_state: StateId, class_table: ClassTable) -> Self {
        Self {
            states,
            start_state,
            class_table,
            narrowed: BTreeMap::new(),
        }
    }

    /// All states in id order.
    #[must_use]
    pub fn states(&self) -> &[FiniteState] {
        &self.states
    }

    /// A state by id.
    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&FiniteState> {
        self.states.get(id.index())
    }

    /// The state the lexer starts in.
    #[must_use]
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// The narrowed class table.
    #[must_use]
    pub fn class_table(&self) -> &ClassTable {
        &self.class_table
    }

    /// Characters split out of each narrowed class.
    #[must_use]
    pub fn narrowed(&self) -> &BTreeMap<String, Vec<char>> {
        &self.narrowed
    }

    /// Number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if there are no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl fmt::Display for FiniteAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, state) in self.states.iter().enumerate() {
            write!(f, "{}", StateId(index))?;
            if let Some(token) = &state.token {
                write!(f, " [{}:{}]", token.name, token.class)?;
            }
            if let Some(links) = &state.links {
                for (class, next) in links {
                    write!(f, " {class}->{next}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
