//! Character classification of terminals.
//!
//! Two stages live here. [`classify_terminals`] runs once during grammar
//! compilation and decides which terminals are covered by declared classes.
//! [`Classifier`] runs during automaton synthesis and narrows classes so that
//! each terminal character gets a class of its own when needed.

use std::collections::BTreeMap;

use crate::class_table::{ClassTable, SINGLE_DELIMITER_CLASS, SymbolCategory};

// =============================================================================
// Compile-Time Classification
// =============================================================================

/// How the listed terminals relate to the declared symbol classes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerminalClassification {
    /// Terminals not wholly inside one declared class, deduplicated.
    pub unclassified: Vec<String>,
    /// Unclassified terminals that contain or are contained in another one.
    pub intersected: Vec<String>,
}

/// Returns the class every character of `text` belongs to, if there is one.
fn covering_class<'a>(text: &str, declared: &'a [(String, String)]) -> Option<&'a str> {
    let mut covering: Option<&str> = None;
    for ch in text.chars() {
        let class = declared
            .iter()
            .find(|(_, symbols)| symbols.contains(ch))
            .map(|(name, _)| name.as_str())?;
        match covering {
            None => covering = Some(class),
            Some(existing) if existing != class => return None,
            Some(_) => {}
        }
    }
    covering
}

/// Splits `terminals` against the `declared` classes and registers the
/// generated classes in `table`.
///
/// One-character terminals that overlap no other unclassified terminal are
/// gathered in the single-delimiter class. Every character of an intersected
/// terminal that is not a single delimiter gets its own class.
pub fn classify_terminals<'a>(
    terminals: impl IntoIterator<Item = &'a str>,
    declared: &[(String, String)],
    table: &mut ClassTable,
) -> TerminalClassification {
    let mut unclassified: Vec<String> = Vec::new();
    for text in terminals {
        if covering_class(text, declared).is_none() && !unclassified.iter().any(|t| t == text) {
            unclassified.push(text.to_string());
        }
    }

    let intersected: Vec<String> = unclassified
        .iter()
        .filter(|t| {
            unclassified
                .iter()
                .any(|other| other != *t && (other.contains(t.as_str()) || t.contains(other.as_str())))
        })
        .cloned()
        .collect();

    for (name, symbols) in declared {
        table.set_class(name.clone(), symbols.clone());
    }

    let single_delimiters: String = unclassified
        .iter()
        .filter(|t| !intersected.contains(t) && t.chars().count() == 1)
        .map(String::as_str)
        .collect();
    table.set_class(SINGLE_DELIMITER_CLASS, single_delimiters.clone());

    for terminal in &intersected {
        for ch in terminal.chars() {
            if !single_delimiters.contains(ch) {
                table.set_class(ch.to_string(), ch.to_string());
            }
        }
    }

    TerminalClassification {
        unclassified,
        intersected,
    }
}

// =============================================================================
// Narrowing
// =============================================================================

/// The narrowed class table and what was taken out of each class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Narrowing {
    /// The final class table.
    pub table: ClassTable,
    /// Characters removed from each narrowed class, in removal order.
    pub removed: BTreeMap<String, Vec<char>>,
}

/// Decomposes terminal literals into symbol classes, narrowing classes as it
/// goes.
///
/// Owns a private copy of the class table; the grammar's table is never
/// touched. Call [`Classifier::finish`] to get the published result.
#[derive(Clone, Debug)]
pub struct Classifier {
    table: ClassTable,
    removed: BTreeMap<String, Vec<char>>,
    promoted: Vec<String>,
}

impl Classifier {
    /// Starts from a copy of `table`.
    #[must_use]
    pub fn new(table: &ClassTable) -> Self {
        Self {
            table: table.clone(),
            removed: BTreeMap::new(),
            promoted: Vec::new(),
        }
    }

    /// The class table in its current state.
    #[must_use]
    pub fn table(&self) -> &ClassTable {
        &self.table
    }

    /// Characters removed from each narrowed class so far.
    #[must_use]
    pub fn removed(&self) -> &BTreeMap<String, Vec<char>> {
        &self.removed
    }

    /// Returns the class key of each character of `text`.
    ///
    /// A character in a multi-character class is moved into a new singleton
    /// class. A character in no class gets a singleton class too. White
    /// delimiters are skipped.
    pub fn classes_of_terminal(&mut self, text: &str) -> Vec<String> {
        let mut classes = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let (category, class) = {
                let info = self.table.symbol_info(ch);
                (info.category, info.class.map(str::to_string))
            };
            match (category, class) {
                (SymbolCategory::Classified, Some(class)) => {
                    let symbols = self.table.class_symbols(&class).unwrap_or_default();
                    if symbols.chars().count() > 1 {
                        let narrowed: String = symbols.chars().filter(|c| *c != ch).collect();
                        self.table.set_class(class.clone(), narrowed);
                        self.table.set_class(ch.to_string(), ch.to_string());
                        self.removed.entry(class).or_default().push(ch);
                        self.promoted.push(ch.to_string());
                        classes.push(ch.to_string());
                    } else {
                        classes.push(class);
                    }
                }
                (SymbolCategory::Undefined, _) => {
                    self.table.set_class(ch.to_string(), ch.to_string());
                    classes.push(ch.to_string());
                }
                _ => {}
            }
        }
        classes
    }

    /// Takes the characters promoted to their own class since the last call.
    ///
    /// Each of them must also be reachable as a standalone terminal.
    pub fn take_promoted(&mut self) -> Vec<String> {
        std::mem::take(&mut self.promoted)
    }

    /// Publishes the narrowed table.
    #[must_use]
    pub fn finish(self) -> Narrowing {
        Narrowing {
            table: self.table,
            removed: self.removed,
        }
    }
}
