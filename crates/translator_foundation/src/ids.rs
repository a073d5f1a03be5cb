//! Dense identifiers for grammar nodes, automaton states, and token classes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a node in the compiled grammar arena.
///
/// Ids are dense and stable: they are assigned once, after the node list has
/// been sorted, and never change afterwards.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a state in a finite or pushdown automaton.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateId(pub usize);

impl StateId {
    /// Returns the raw state index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Small integer naming a token class (identifier, constant, keyword, ...).
///
/// Class `0` is always the unclassified class that keywords and punctuation
/// belong to. [`TokenClassId::UNDEFINED`] is reserved for tokens the lexer
/// could not recognize.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenClassId(pub u32);

impl TokenClassId {
    /// The class of terminals that are not part of any defined token.
    pub const UNCLASSIFIED: Self = Self(0);

    /// The reserved class of unrecognized input.
    pub const UNDEFINED: Self = Self(u32::MAX);

    /// Returns true if this is the reserved undefined class.
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for TokenClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "TokenClassId(undefined)")
        } else {
            write!(f, "TokenClassId({})", self.0)
        }
    }
}

impl fmt::Display for TokenClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "undefined")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
