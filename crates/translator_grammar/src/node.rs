//! Grammar nodes stored in the compiled arena.
//!
//! Every cross-reference between nodes is a [`NodeId`] into the arena owned by
//! [`Grammar`](crate::Grammar), so cycles (a medium referring to itself, a
//! recursion loop pointing back at its own factor) need no special handling.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use translator_foundation::{NodeId, TokenClassId};

// =============================================================================
// Trie
// =============================================================================

/// The factorized form of a medium or factor.
///
/// `cases` maps each head symbol to the factor that continues it, or to `None`
/// when the derivation ends right after the head.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trie {
    /// Head symbol and continuation, in order of first appearance.
    pub cases: Vec<(NodeId, Option<NodeId>)>,
    /// Some alternative may end at this point.
    pub is_interruptable: bool,
    /// Loop factor that repeats the left-recursive tail, when left recursion
    /// was kept instead of rewritten.
    pub recursion: Option<NodeId>,
}

impl Trie {
    /// Returns the continuation registered for `head`.
    #[must_use]
    pub fn continuation(&self, head: NodeId) -> Option<Option<NodeId>> {
        self.cases
            .iter()
            .find(|(key, _)| *key == head)
            .map(|(_, next)| *next)
    }

    /// Returns true if nothing can be matched here.
    #[must_use]
    pub fn is_bottom(&self) -> bool {
        self.cases.is_empty() && self.recursion.is_none()
    }
}

// =============================================================================
// Node Data
// =============================================================================

/// A literal terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalData {
    /// Not wholly covered by one grammar-declared symbol class.
    pub is_control: bool,
    /// Appears outside defined tokens (or token terminals are listed).
    pub is_listed: bool,
    /// Token class id; terminals always belong to the unclassified class.
    pub token_class_id: TokenClassId,
    /// Terminals that open a statement stream.
    pub streamers: Vec<String>,
    /// Terminals that close a statement stream.
    pub breakers: Vec<String>,
    /// Maximum statements in one stream.
    pub stream_max_count: Option<u32>,
    /// Operator binding strength.
    pub operator_priority: Option<u32>,
}

/// A symbol class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassData {
    /// Key of the class in the class table.
    pub symbol_class: String,
    /// Characters declared for the class.
    pub symbols: String,
}

/// Token class of a defined token.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenTag {
    /// Token class name.
    pub token_class: String,
    /// Token class id.
    pub token_class_id: TokenClassId,
}

/// A nonterminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MediumData {
    /// Raw alternatives.
    pub cases: Vec<Vec<NodeId>>,
    /// Factorized alternatives.
    pub trie: Trie,
    /// Present when the medium is a defined token.
    pub token: Option<TokenTag>,
    /// Created while rewriting left recursion.
    pub is_synthetic: bool,
}

/// What a node is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// A literal.
    Terminal(TerminalData),
    /// A symbol class.
    Class(ClassData),
    /// A nonterminal or defined token.
    Medium(MediumData),
    /// A trie node created by factorization.
    Factor(Trie),
}

// =============================================================================
// Node
// =============================================================================

/// A node of the compiled grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Dense arena index.
    pub id: NodeId,
    /// Literal text, definition name, or a generated name for factors.
    pub name: String,
    /// Downstream execution tag.
    pub exec_class: Option<String>,
    /// Node payload.
    pub kind: NodeKind,
}

impl Node {
    /// Returns true for terminals.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal(_))
    }

    /// Returns true for symbol classes.
    #[must_use]
    pub fn is_class(&self) -> bool {
        matches!(self.kind, NodeKind::Class(_))
    }

    /// Returns true for mediums, including defined tokens.
    #[must_use]
    pub fn is_medium(&self) -> bool {
        matches!(self.kind, NodeKind::Medium(_))
    }

    /// Returns true for factors.
    #[must_use]
    pub fn is_factor(&self) -> bool {
        matches!(self.kind, NodeKind::Factor(_))
    }

    /// Returns true for defined tokens.
    #[must_use]
    pub fn is_defined_token(&self) -> bool {
        self.token_tag().is_some()
    }

    /// Returns true if a lexer token can carry this node's id.
    #[must_use]
    pub fn is_token_key(&self) -> bool {
        self.is_terminal() || self.is_defined_token()
    }

    /// Terminal payload.
    #[must_use]
    pub fn as_terminal(&self) -> Option<&TerminalData> {
        match &self.kind {
            NodeKind::Terminal(t) => Some(t),
            _ => None,
        }
    }

    /// Class payload.
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.kind {
            NodeKind::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Medium payload.
    #[must_use]
    pub fn as_medium(&self) -> Option<&MediumData> {
        match &self.kind {
            NodeKind::Medium(m) => Some(m),
            _ => None,
        }
    }

    /// Token class of a defined token.
    #[must_use]
    pub fn token_tag(&self) -> Option<&TokenTag> {
        self.as_medium().and_then(|m| m.token.as_ref())
    }

    /// Factorized form of a medium or factor.
    #[must_use]
    pub fn trie(&self) -> Option<&Trie> {
        match &self.kind {
            NodeKind::Medium(m) => Some(&m.trie),
            NodeKind::Factor(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn trie_mut(&mut self) -> Option<&mut Trie> {
        match &mut self.kind {
            NodeKind::Medium(m) => Some(&mut m.trie),
            NodeKind::Factor(t) => Some(t),
            _ => None,
        }
    }

    /// Rewrites every node reference through `map`.
    pub(crate) fn remap(&mut self, map: &[NodeId]) {
        self.id = map[self.id.index()];
        if let NodeKind::Medium(m) = &mut self.kind {
            for case in &mut m.cases {
                for id in case.iter_mut() {
                    *id = map[id.index()];
                }
            }
        }
        if let Some(trie) = self.trie_mut() {
            for (head, next) in &mut trie.cases {
                *head = map[head.index()];
                *next = next.map(|n| map[n.index()]);
            }
            trie.recursion = trie.recursion.map(|n| map[n.index()]);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Terminal(_) => write!(f, "{}", self.name),
            _ => write!(f, "<{}>", self.name),
        }
    }
}
