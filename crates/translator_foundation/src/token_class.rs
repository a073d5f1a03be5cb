//! Bidirectional map between token class names and their ids.

use im::OrdMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::TokenClassId;

/// Token class names and ids, looked up in either direction.
///
/// Backed by persistent maps, so cloning a table is O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenClassMap {
    by_name: OrdMap<String, TokenClassId>,
    by_id: OrdMap<TokenClassId, String>,
}

impl TokenClassMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` under `id`, replacing any previous pairing of either.
    pub fn insert(&mut self, name: impl Into<String>, id: TokenClassId) {
        let name = name.into();
        if let Some(old_id) = self.by_name.remove(&name) {
            self.by_id.remove(&old_id);
        }
        if let Some(old_name) = self.by_id.remove(&id) {
            self.by_name.remove(&old_name);
        }
        self.by_name.insert(name.clone(), id);
        self.by_id.insert(id, name);
    }

    /// Returns the id registered for `name`, assigning the next free one if
    /// the name is new. The reserved undefined id is never handed out.
    pub fn intern(&mut self, name: &str) -> TokenClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let next = self
            .by_id
            .keys()
            .filter(|id| !id.is_undefined())
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(0);
        let id = TokenClassId(next);
        self.insert(name, id);
        id
    }

    /// Looks up the id of a class name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<TokenClassId> {
        self.by_name.get(name).copied()
    }

    /// Looks up the name of a class id.
    #[must_use]
    pub fn name_of(&self, id: TokenClassId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no classes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterates classes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenClassId, &str)> {
        self.by_id.iter().map(|(id, name)| (*id, name.as_str()))
    }
}
