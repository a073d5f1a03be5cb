//! The compiled grammar and its node queries.

use std::collections::BTreeMap;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use translator_foundation::{GrammarOptions, NodeId, Result};

use crate::class_table::ClassTable;
use crate::compiler;
use crate::description::GrammarDescription;
use crate::node::Node;

/// A compiled grammar.
///
/// Holds the node arena, the class table, and the terminals the automaton
/// builder must handle generically. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grammar {
    nodes: Vec<Node>,
    axiom: NodeId,
    class_table: ClassTable,
    unclassified_terminals: Vec<String>,
    has_left_recursion: bool,
    definition_order: Vec<NodeId>,
    terminal_index: BTreeMap<String, NodeId>,
    token_index: BTreeMap<String, NodeId>,
}

impl Grammar {
    /// Compiles a grammar description.
    ///
    /// # Errors
    ///
    /// Returns an error for undefined references, conflicting exec classes,
    /// duplicate definitions, or left recursion with no base case.
    pub fn compile(description: &GrammarDescription, options: &GrammarOptions) -> Result<Self> {
        compiler::compile(description, options)
    }

    /// Parses and compiles an XML grammar description.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed or compilation fails.
    pub fn from_xml(text: &str, options: &GrammarOptions) -> Result<Self> {
        Self::compile(&GrammarDescription::from_xml(text)?, options)
    }

    /// Loads and compiles an XML grammar file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or compilation fails.
    pub fn load(path: impl AsRef<Path>, options: &GrammarOptions) -> Result<Self> {
        Self::compile(&GrammarDescription::load(path)?, options)
    }

    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        axiom: NodeId,
        class_table: ClassTable,
        unclassified_terminals: Vec<String>,
        has_left_recursion: bool,
        definition_order: Vec<NodeId>,
    ) -> Self {
        let terminal_index = nodes
            .iter()
            .filter(|n| n.as_terminal().is_some_and(|t| t.is_listed))
            .map(|n| (n.name.clone(), n.id))
            .collect();
        let token_index = nodes
            .iter()
            .filter(|n| n.is_defined_token())
            .map(|n| (n.name.clone(), n.id))
            .collect();
        Self {
            nodes,
            axiom,
            class_table,
            unclassified_terminals,
            has_left_recursion,
            definition_order,
            terminal_index,
            token_index,
        }
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this grammar.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The node with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in id order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The top-level medium.
    #[must_use]
    pub fn axiom(&self) -> NodeId {
        self.axiom
    }

    /// The class table as declared by the grammar, before narrowing.
    #[must_use]
    pub fn class_table(&self) -> &ClassTable {
        &self.class_table
    }

    /// Unclassified terminals the lexer recognizes through generic paths:
    /// those that overlap another one and every multi-character one.
    #[must_use]
    pub fn unclassified_terminals(&self) -> &[String] {
        &self.unclassified_terminals
    }

    /// True when left recursion was kept as loop factors.
    #[must_use]
    pub fn has_left_recursion(&self) -> bool {
        self.has_left_recursion
    }

    /// Nonterminals in definition order, followed by rewrite tails by name.
    pub fn definitions(&self) -> impl Iterator<Item = &Node> {
        self.definition_order.iter().map(|id| self.node(*id))
    }

    /// Every terminal, listed or not.
    pub fn terminals(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_terminal())
    }

    /// Terminals that the lexer can emit on their own.
    pub fn listed_terminals(&self) -> impl Iterator<Item = &Node> {
        self.terminal_index.values().map(|id| self.node(*id))
    }

    /// Classes and mediums.
    pub fn nonterminals(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_class() || n.is_medium())
    }

    /// Defined tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_defined_token())
    }

    /// Mediums, including defined tokens.
    pub fn mediums(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_medium())
    }

    /// Symbol classes.
    pub fn classes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_class())
    }

    /// Factors created by factorization.
    pub fn factors(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_factor())
    }

    /// A listed terminal by its text.
    #[must_use]
    pub fn terminal_by_name(&self, name: &str) -> Option<NodeId> {
        self.terminal_index.get(name).copied()
    }

    /// A defined token by its name.
    #[must_use]
    pub fn token_by_name(&self, name: &str) -> Option<NodeId> {
        self.token_index.get(name).copied()
    }
}
