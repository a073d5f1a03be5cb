//! Per-class token tables.
//!
//! Each token class gets its own table of distinct token names, numbered in
//! order of first appearance. Later stages refer to identifiers and constants
//! by their slot in these tables.

use std::collections::{BTreeMap, HashMap};

use translator_foundation::{ParsedToken, TokenClassId};

/// Distinct names of one token class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassEntries {
    names: Vec<String>,
    slots: HashMap<String, usize>,
}

impl ClassEntries {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(slot) = self.slots.get(name) {
            return *slot;
        }
        let slot = self.names.len();
        self.names.push(name.to_string());
        self.slots.insert(name.to_string(), slot);
        slot
    }

    /// Names in slot order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Slot of a name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table has no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One token placed in its class table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenEntry<'a> {
    /// Index of the token in the script.
    pub index: usize,
    /// The token text.
    pub name: &'a str,
    /// The token class.
    pub class: TokenClassId,
    /// Slot of the name in its class table.
    pub slot: usize,
}

/// Class tables for a token sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenTables {
    tables: BTreeMap<TokenClassId, ClassEntries>,
    tokens: Vec<(String, TokenClassId, usize)>,
}

impl TokenTables {
    /// Builds the tables for `tokens`.
    #[must_use]
    pub fn build(tokens: &[ParsedToken]) -> Self {
        let mut tables: BTreeMap<TokenClassId, ClassEntries> = BTreeMap::new();
        let tokens = tokens
            .iter()
            .map(|token| {
                let slot = tables.entry(token.token_class_id).or_default().intern(&token.name);
                (token.name.clone(), token.token_class_id, slot)
            })
            .collect();
        Self { tables, tokens }
    }

    /// The table of one class.
    #[must_use]
    pub fn table(&self, class: TokenClassId) -> Option<&ClassEntries> {
        self.tables.get(&class)
    }

    /// Classes that have a table, in id order.
    pub fn classes(&self) -> impl Iterator<Item = TokenClassId> + '_ {
        self.tables.keys().copied()
    }

    /// Every token with its slot, in script order.
    pub fn entries(&self) -> impl Iterator<Item = TokenEntry<'_>> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, (name, class, slot))| TokenEntry {
                index,
                name,
                class: *class,
                slot: *slot,
            })
    }
}
