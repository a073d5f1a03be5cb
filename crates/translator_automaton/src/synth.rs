//! Finite automaton synthesis from the factorized token definitions.
//!
//! States are created on a draft arena rooted at state 0. Each defined token is
//! walked through its trie; nested mediums are entered in place and a second
//! visit of the same medium becomes a loop whose transitions are copied from
//! the first visit once the token is finished.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use translator_foundation::{Error, ErrorKind, NodeId, Result, StateId};
use translator_grammar::{Classifier, Grammar, Narrowing, NodeKind, SINGLE_DELIMITER_CLASS, Trie};

use crate::finite::AcceptToken;

/// Unoptimized synthesis output.
pub(crate) struct Synthesis {
    pub states: Vec<DraftState>,
    pub start_state: StateId,
    pub narrowing: Narrowing,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct DraftState {
    pub links: BTreeMap<String, StateId>,
    pub token: Option<AcceptToken>,
}

/// Bookkeeping for the token being walked.
#[derive(Default)]
struct TokenWalk {
    /// Transitions a medium created at its entry state; `None` while the medium
    /// is still being walked.
    visited: HashMap<NodeId, Option<BTreeMap<String, StateId>>>,
    /// States where a medium was met again.
    loops: Vec<(StateId, NodeId)>,
}

pub(crate) struct Synthesizer<'g> {
    grammar: &'g Grammar,
    classifier: Classifier,
    states: Vec<DraftState>,
}

const ROOT: StateId = StateId(0);

impl<'g> Synthesizer<'g> {
    pub(crate) fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            classifier: Classifier::new(grammar.class_table()),
            states: vec![DraftState::default()],
        }
    }

    pub(crate) fn run(mut self) -> Result<Synthesis> {
        let tokens: Vec<NodeId> = self.grammar.tokens().map(|n| n.id).collect();
        for token in tokens {
            self.token_states(token)?;
        }

        self.generic_terminal_states()?;
        self.single_delimiter_state();
        self.fix_narrowed_links();

        Ok(Synthesis {
            states: self.states,
            start_state: ROOT,
            narrowing: self.classifier.finish(),
        })
    }

    // -------------------------------------------------------------------------
    // State arena
    // -------------------------------------------------------------------------

    fn push_state(&mut self) -> StateId {
        self.states.push(DraftState::default());
        StateId(self.states.len() - 1)
    }

    fn follow_or_create(&mut self, from: StateId, key: &str) -> StateId {
        if let Some(next) = self.states[from.index()].links.get(key) {
            return *next;
        }
        let next = self.push_state();
        self.states[from.index()].links.insert(key.to_string(), next);
        next
    }

    fn accept(&mut self, state: StateId, token: &AcceptToken) -> Result<()> {
        let slot = &mut self.states[state.index()].token;
        match slot {
            Some(existing) if existing.name != token.name => Err(Error::new(ErrorKind::AmbiguousState {
                existing: existing.name.clone(),
                requested: token.name.clone(),
            })),
            Some(_) => Ok(()),
            None => {
                *slot = Some(token.clone());
                Ok(())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Defined tokens
    // -------------------------------------------------------------------------

    fn token_states(&mut self, token: NodeId) -> Result<()> {
        let grammar = self.grammar;
        let node = grammar.node(token);
        let Some(tag) = node.token_tag() else {
            return Err(Error::internal(format!("{node} is not a defined token")));
        };
        let accept = AcceptToken {
            name: node.name.clone(),
            class: tag.token_class.clone(),
        };

        let mut walk = TokenWalk::default();
        walk.visited.insert(token, None);
        let links = self.walk_medium(token, ROOT, &accept, &mut walk)?;
        walk.visited.insert(token, Some(links));
        self.close_loops(&walk)
    }

    fn walk_medium(
        &mut self,
        medium: NodeId,
        state: StateId,
        accept: &AcceptToken,
        walk: &mut TokenWalk,
    ) -> Result<BTreeMap<String, StateId>> {
        let grammar = self.grammar;
        let trie = grammar
            .node(medium)
            .trie()
            .ok_or_else(|| Error::internal(format!("{} has no trie", grammar.node(medium))))?;
        self.walk_trie(trie, state, accept, walk)
    }

    /// Walks one trie level from `state`, returning the transitions taken or
    /// created at `state` itself.
    fn walk_trie(
        &mut self,
        trie: &'g Trie,
        state: StateId,
        accept: &AcceptToken,
        walk: &mut TokenWalk,
    ) -> Result<BTreeMap<String, StateId>> {
        let grammar = self.grammar;
        if trie.recursion.is_some() {
            return Err(Error::new(ErrorKind::LeftRecursionInToken(accept.name.clone())));
        }
        if trie.is_interruptable {
            self.accept(state, accept)?;
        }

        let mut links = BTreeMap::new();

        for (head, next) in trie.cases.iter().filter(|(h, _)| grammar.node(*h).is_terminal()) {
            let keys = self.classifier.classes_of_terminal(&grammar.node(*head).name);
            let mut current = state;
            for key in &keys {
                let target = self.follow_or_create(current, key);
                if current == state {
                    links.insert(key.clone(), target);
                }
                current = target;
            }
            self.walk_next(*next, current, accept, walk)?;
        }

        for (head, next) in trie.cases.iter().filter(|(h, _)| grammar.node(*h).is_medium()) {
            let node = grammar.node(*head);
            if next.is_some() {
                return Err(Error::new(ErrorKind::SelfInclusion(node.name.clone())));
            }
            match walk.visited.get(head) {
                Some(_) => {
                    if node.trie().is_some_and(|t| t.is_interruptable) {
                        self.accept(state, accept)?;
                    }
                    walk.loops.push((state, *head));
                }
                None => {
                    walk.visited.insert(*head, None);
                    let nested = self.walk_medium(*head, state, accept, walk)?;
                    links.extend(nested.iter().map(|(k, v)| (k.clone(), *v)));
                    walk.visited.insert(*head, Some(nested));
                }
            }
        }

        for (head, next) in &trie.cases {
            let node = grammar.node(*head);
            match &node.kind {
                NodeKind::Class(class) => {
                    let target = self.follow_or_create(state, &class.symbol_class);
                    links.insert(class.symbol_class.clone(), target);
                    self.walk_next(*next, target, accept, walk)?;
                }
                NodeKind::Factor(_) => {
                    return Err(Error::new(ErrorKind::LeftRecursionInToken(accept.name.clone())));
                }
                NodeKind::Terminal(_) | NodeKind::Medium(_) => {}
            }
        }

        Ok(links)
    }

    fn walk_next(
        &mut self,
        next: Option<NodeId>,
        state: StateId,
        accept: &AcceptToken,
        walk: &mut TokenWalk,
    ) -> Result<()> {
        let grammar = self.grammar;
        match next.and_then(|n| grammar.node(n).trie()) {
            Some(trie) => self.walk_trie(trie, state, accept, walk).map(|_| ()),
            None => self.accept(state, accept),
        }
    }

    /// Copies the transitions a looping medium created on its first visit
    /// into every state where it was met again.
    fn close_loops(&mut self, walk: &TokenWalk) -> Result<()> {
        for (state, medium) in &walk.loops {
            let Some(Some(links)) = walk.visited.get(medium) else {
                return Err(Error::internal(format!(
                    "loop to {} was never closed",
                    self.grammar.node(*medium)
                )));
            };
            for (key, target) in links {
                let existing = self.states[state.index()].links.get(key).copied();
                match existing {
                    None => {
                        self.states[state.index()].links.insert(key.clone(), *target);
                    }
                    Some(existing) if existing == *target => {}
                    Some(_) => {
                        return Err(Error::new(ErrorKind::NonRegularLoop {
                            medium: self.grammar.node(*medium).name.clone(),
                            key: key.clone(),
                        }));
                    }
                }
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Generic terminals
    // -------------------------------------------------------------------------

    /// Builds a path for every generic unclassified terminal, for every
    /// listed terminal inside a declared class that no token already reads
    /// whole, and for every character promoted out of a narrowed class. A
    /// promoted character never overrides a token already accepted at the end
    /// of its path.
    fn generic_terminal_states(&mut self) -> Result<()> {
        let grammar = self.grammar;
        let unclassified = grammar.class_table().unclassified_token_class_name().to_string();
        let mut done: BTreeSet<String> = BTreeSet::new();

        let covered = grammar
            .listed_terminals()
            .filter(|n| n.as_terminal().is_some_and(|t| !t.is_control))
            .map(|n| n.name.as_str());
        let generic: Vec<&str> = grammar
            .unclassified_terminals()
            .iter()
            .map(String::as_str)
            .chain(covered)
            .collect();

        for text in generic {
            if done.contains(text) {
                continue;
            }
            let is_covered = !grammar.unclassified_terminals().iter().any(|t| t == text);
            if is_covered && self.reads_whole(text) {
                continue;
            }
            done.insert(text.to_string());
            let end = self.terminal_path(text);
            let accept = AcceptToken {
                name: text.to_string(),
                class: unclassified.clone(),
            };
            self.accept(end, &accept)?;
        }

        let mut pending = self.classifier.take_promoted();
        while let Some(text) = pending.pop() {
            if done.insert(text.clone()) {
                let end = self.terminal_path(&text);
                let slot = &mut self.states[end.index()].token;
                if slot.is_none() {
                    *slot = Some(AcceptToken {
                        name: text,
                        class: unclassified.clone(),
                    });
                }
            }
            pending.extend(self.classifier.take_promoted());
        }
        Ok(())
    }

    /// Whether `text` already leads from the start state to an accepting
    /// state. Characters narrowed out of a class still follow that class.
    fn reads_whole(&self, text: &str) -> bool {
        let table = self.classifier.table();
        let removed = self.classifier.removed();
        let mut state = ROOT;
        for ch in text.chars() {
            let Some(class) = table.symbol_info(ch).class else {
                return false;
            };
            let links = &self.states[state.index()].links;
            let next = links.get(class).or_else(|| {
                removed
                    .iter()
                    .find(|(_, chars)| chars.contains(&ch))
                    .and_then(|(from, _)| links.get(from))
            });
            match next {
                Some(next) => state = *next,
                None => return false,
            }
        }
        self.states[state.index()].token.is_some()
    }

    fn terminal_path(&mut self, text: &str) -> StateId {
        let keys = self.classifier.classes_of_terminal(text);
        let mut current = ROOT;
        for key in &keys {
            current = self.follow_or_create(current, key);
        }
        current
    }

    fn single_delimiter_state(&mut self) {
        let table = self.grammar.class_table();
        let accept = AcceptToken {
            name: table.unclassified_token_class_name().to_string(),
            class: table.unclassified_token_class_name().to_string(),
        };
        let target = self.follow_or_create(ROOT, SINGLE_DELIMITER_CLASS);
        self.states[target.index()].token.get_or_insert(accept);
    }

    // -------------------------------------------------------------------------
    // Narrowed classes
    // -------------------------------------------------------------------------

    /// Adds a character-keyed transition next to every transition keyed by a
    /// class that lost that character.
    fn fix_narrowed_links(&mut self) {
        let removed = self.classifier.removed().clone();
        let mut merged: HashMap<(StateId, StateId), StateId> = HashMap::new();
        let mut index = 0;
        while index < self.states.len() {
            let links: Vec<(String, StateId)> = self.states[index]
                .links
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect();
            for (key, target) in links {
                let Some(chars) = removed.get(&key) else {
                    continue;
                };
                for ch in chars {
                    let char_key = ch.to_string();
                    let existing = self.states[index].links.get(&char_key).copied();
                    let target = match existing {
                        None => target,
                        Some(existing) if existing == target => continue,
                        Some(existing) => self.merge_states(existing, target, &mut merged),
                    };
                    self.states[index].links.insert(char_key, target);
                }
            }
            index += 1;
        }
    }

    /// Creates a state that behaves like both `primary` and `secondary`.
    /// The token of `primary` wins.
    fn merge_states(
        &mut self,
        primary: StateId,
        secondary: StateId,
        memo: &mut HashMap<(StateId, StateId), StateId>,
    ) -> StateId {
        if let Some(done) = memo.get(&(primary, secondary)) {
            return *done;
        }
        let merged = self.push_state();
        memo.insert((primary, secondary), merged);

        let first = self.states[primary.index()].clone();
        let second = self.states[secondary.index()].clone();
        let mut links = first.links.clone();
        for (key, target) in second.links {
            match first.links.get(&key) {
                None => {
                    links.insert(key, target);
                }
                Some(existing) if *existing == target => {}
                Some(existing) => {
                    let nested = self.merge_states(*existing, target, memo);
                    links.insert(key, nested);
                }
            }
        }

        let state = &mut self.states[merged.index()];
        state.links = links;
        state.token = first.token.or(second.token);
        merged
    }
}
