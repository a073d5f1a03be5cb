//! Symbol classes, token classes, and white delimiters.
//!
//! A [`ClassTable`] is an immutable value once published. Narrowing a class
//! during automaton synthesis happens on a [`Classifier`](crate::Classifier)
//! that owns its own copy; the persistent vector underneath makes that copy
//! O(1).

use im::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use translator_foundation::{TokenClassId, TokenClassMap};

/// Name of the class that gathers one-character delimiters.
pub const SINGLE_DELIMITER_CLASS: &str = "singleDelimiter";

/// How the lexer treats a character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymbolCategory {
    /// Member of a symbol class.
    Classified,
    /// Separates tokens and is otherwise ignored.
    WhiteDelimiter,
    /// Neither.
    Undefined,
}

/// Result of [`ClassTable::symbol_info`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo<'a> {
    /// The character's category.
    pub category: SymbolCategory,
    /// The class containing the character, for classified characters.
    pub class: Option<&'a str>,
}

/// A named set of characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolClass {
    /// Class key.
    pub name: String,
    /// Member characters.
    pub symbols: String,
}

/// Lookup tables shared by the automaton builder and the lexer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassTable {
    symbol_classes: Vector<SymbolClass>,
    token_classes: TokenClassMap,
    white_delimiters: String,
    unclassified_token_class_name: String,
    undefined_token_class_name: String,
}

impl ClassTable {
    /// Creates a table with no symbol classes.
    ///
    /// The unclassified class is registered as id 0 and the undefined class
    /// under [`TokenClassId::UNDEFINED`].
    #[must_use]
    pub fn new(
        unclassified_token_class_name: impl Into<String>,
        undefined_token_class_name: impl Into<String>,
        white_delimiters: impl Into<String>,
    ) -> Self {
        let unclassified_token_class_name = unclassified_token_class_name.into();
        let undefined_token_class_name = undefined_token_class_name.into();
        let mut token_classes = TokenClassMap::new();
        token_classes.insert(unclassified_token_class_name.clone(), TokenClassId::UNCLASSIFIED);
        token_classes.insert(undefined_token_class_name.clone(), TokenClassId::UNDEFINED);
        Self {
            symbol_classes: Vector::new(),
            token_classes,
            white_delimiters: white_delimiters.into(),
            unclassified_token_class_name,
            undefined_token_class_name,
        }
    }

    /// Token class of terminals outside defined tokens.
    #[must_use]
    pub fn unclassified_token_class_name(&self) -> &str {
        &self.unclassified_token_class_name
    }

    /// Token class of unrecognized input.
    #[must_use]
    pub fn undefined_token_class_name(&self) -> &str {
        &self.undefined_token_class_name
    }

    /// Characters that separate tokens.
    #[must_use]
    pub fn white_delimiters(&self) -> &str {
        &self.white_delimiters
    }

    /// Token class names and ids.
    #[must_use]
    pub fn token_classes(&self) -> &TokenClassMap {
        &self.token_classes
    }

    pub(crate) fn token_classes_mut(&mut self) -> &mut TokenClassMap {
        &mut self.token_classes
    }

    /// Symbol classes in registration order.
    pub fn symbol_classes(&self) -> impl Iterator<Item = &SymbolClass> {
        self.symbol_classes.iter()
    }

    /// Characters of a class.
    #[must_use]
    pub fn class_symbols(&self, name: &str) -> Option<&str> {
        self.symbol_classes
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.symbols.as_str())
    }

    /// Registers or replaces a class.
    pub fn set_class(&mut self, name: impl Into<String>, symbols: impl Into<String>) {
        let name = name.into();
        let symbols = symbols.into();
        if let Some(index) = self.symbol_classes.iter().position(|c| c.name == name) {
            self.symbol_classes.set(index, SymbolClass { name, symbols });
        } else {
            self.symbol_classes.push_back(SymbolClass { name, symbols });
        }
    }

    /// Classifies a character.
    ///
    /// The first class containing the character wins. Otherwise the character
    /// is a white delimiter if listed as one, and undefined if not.
    #[must_use]
    pub fn symbol_info(&self, ch: char) -> SymbolInfo<'_> {
        if let Some(class) = self.symbol_classes.iter().find(|c| c.symbols.contains(ch)) {
            return SymbolInfo {
                category: SymbolCategory::Classified,
                class: Some(class.name.as_str()),
            };
        }
        let category = if self.white_delimiters.contains(ch) {
            SymbolCategory::WhiteDelimiter
        } else {
            SymbolCategory::Undefined
        };
        SymbolInfo {
            category,
            class: None,
        }
    }

}
