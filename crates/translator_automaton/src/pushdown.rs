//! Precompiled pushdown table for syntax analysis.
//!
//! Every medium and factor reachable from the axiom becomes one state. Token
//! keys of its trie become direct transitions; nonterminal keys become dives
//! that push the continuation and enter the key's own state.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use translator_foundation::{Error, NodeId, Result, StateId};
use translator_grammar::Grammar;

/// Where to go after a transition or dive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PushdownLink {
    /// State entered next. `None` means the derivation ends here.
    pub dive_in: Option<StateId>,
    /// State resumed once the entered state finishes. Only set on dives.
    pub factor_out: Option<StateId>,
}

/// One medium or factor of the grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PushdownState {
    /// The node this state was compiled from.
    pub origin: NodeId,
    /// Token key to transition.
    pub links: BTreeMap<NodeId, PushdownLink>,
    /// Nonterminal dives, in trie order.
    pub dives: Vec<(NodeId, PushdownLink)>,
    /// Some alternative may end here.
    pub is_interruptable: bool,
    /// Loop state pushed when this state is entered.
    pub recursion: Option<StateId>,
}

impl PushdownState {
    /// Transition for a token id.
    #[must_use]
    pub fn link(&self, token: NodeId) -> Option<&PushdownLink> {
        self.links.get(&token)
    }
}

/// The compiled pushdown table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PushdownAutomaton {
    states: Vec<PushdownState>,
    start_state: StateId,
    token_names: BTreeMap<NodeId, String>,
}

impl PushdownAutomaton {
    /// Compiles the table for `grammar`, starting at its axiom.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a trie refers to a node without one.
    pub fn compile(grammar: &Grammar) -> Result<Self> {
        let mut ids: HashMap<NodeId, StateId> = HashMap::new();
        let mut order: Vec<NodeId> = Vec::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        let mut state_of = |node: NodeId, order: &mut Vec<NodeId>, queue: &mut VecDeque<NodeId>| {
            *ids.entry(node).or_insert_with(|| {
                order.push(node);
                queue.push_back(node);
                StateId(order.len() - 1)
            })
        };

        let start_state = state_of(grammar.axiom(), &mut order, &mut queue);
        let mut states: Vec<PushdownState> = Vec::new();
        let mut token_names = BTreeMap::new();

        while let Some(origin) = queue.pop_front() {
            let node = grammar.node(origin);
            let trie = node
                .trie()
                .ok_or_else(|| Error::internal(format!("{node} has no trie")))?;

            let mut state = PushdownState {
                origin,
                links: BTreeMap::new(),
                dives: Vec::new(),
                is_interruptable: trie.is_interruptable,
                recursion: None,
            };

            for (head, next) in &trie.cases {
                let key = grammar.node(*head);
                let continuation = next.map(|n| state_of(n, &mut order, &mut queue));
                if key.is_token_key() {
                    token_names.insert(*head, key.name.clone());
                    state.links.entry(*head).or_insert(PushdownLink {
                        dive_in: continuation,
                        factor_out: None,
                    });
                } else if key.trie().is_some() {
                    let entered = state_of(*head, &mut order, &mut queue);
                    state.dives.push((
                        *head,
                        PushdownLink {
                            dive_in: Some(entered),
                            factor_out: continuation,
                        },
                    ));
                }
            }
            state.recursion = trie.recursion.map(|r| state_of(r, &mut order, &mut queue));
            states.push(state);
        }

        Ok(Self {
            states,
            start_state,
            token_names,
        })
    }

    /// All states; index is the state id.
    #[must_use]
    pub fn states(&self) -> &[PushdownState] {
        &self.states
    }

    /// A state by id.
    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&PushdownState> {
        self.states.get(id.index())
    }

    /// State of the axiom.
    #[must_use]
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Display name of a token key.
    #[must_use]
    pub fn token_name(&self, id: NodeId) -> Option<&str> {
        self.token_names.get(&id).map(String::as_str)
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

impl fmt::Display for PushdownAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn target(link: Option<StateId>) -> String {
            link.map_or_else(|| "end".to_string(), |s| s.to_string())
        }

        for (index, state) in self.states.iter().enumerate() {
            write!(f, "{} {}", StateId(index), state.origin)?;
            if state.is_interruptable {
                write!(f, " ^")?;
            }
            for (token, link) in &state.links {
                let name = self.token_name(*token).unwrap_or("?");
                write!(f, " {name}->{}", target(link.dive_in))?;
            }
            for (node, link) in &state.dives {
                write!(f, " {node}=>{}/{}", target(link.dive_in), target(link.factor_out))?;
            }
            if let Some(recursion) = state.recursion {
                write!(f, " loop {recursion}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
