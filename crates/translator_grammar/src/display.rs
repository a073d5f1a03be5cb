//! Text dumps of a compiled grammar.
//!
//! Raw form lists every alternative: `<A>::=a<B>|^`. Factorized form prints
//! the trie: `<S>::=a(b(c(d)|^))`, with kept left recursion in braces.

use std::fmt::Write;

use translator_foundation::NodeId;

use crate::grammar::Grammar;
use crate::node::{NodeKind, Trie};

fn symbol(grammar: &Grammar, id: NodeId) -> String {
    grammar.node(id).to_string()
}

/// Prints every definition with its raw alternatives, one per line.
#[must_use]
pub fn grammar_text(grammar: &Grammar) -> String {
    let mut out = String::new();
    for node in grammar.definitions() {
        let alternatives: Vec<String> = match &node.kind {
            NodeKind::Class(class) => class.symbols.chars().map(String::from).collect(),
            NodeKind::Medium(medium) => medium
                .cases
                .iter()
                .map(|case| {
                    if case.is_empty() {
                        "^".to_string()
                    } else {
                        case.iter().map(|id| symbol(grammar, *id)).collect()
                    }
                })
                .collect(),
            _ => continue,
        };
        let _ = writeln!(out, "{node}::={}", alternatives.join("|"));
    }
    out
}

fn trie_text(grammar: &Grammar, trie: &Trie, out: &mut String) {
    let mut first = true;
    for (head, next) in &trie.cases {
        if !first {
            out.push('|');
        }
        first = false;
        out.push_str(&symbol(grammar, *head));
        if let Some(next) = next.and_then(|n| grammar.node(n).trie()) {
            out.push('(');
            trie_text(grammar, next, out);
            out.push(')');
        }
    }
    if trie.is_interruptable {
        if !first {
            out.push('|');
        }
        out.push('^');
    }
    if let Some(repeat) = trie.recursion.and_then(|r| grammar.node(r).trie()) {
        for (tail, _) in &repeat.cases {
            if let Some(tail) = grammar.node(*tail).trie() {
                out.push('{');
                trie_text(grammar, tail, out);
                out.push('}');
            }
        }
    }
}

/// Prints the trie of every medium, one per line.
#[must_use]
pub fn factorized_text(grammar: &Grammar) -> String {
    let mut out = String::new();
    for node in grammar.definitions() {
        if let Some(medium) = node.as_medium() {
            let _ = write!(out, "{node}::=");
            trie_text(grammar, &medium.trie, &mut out);
            out.push('\n');
        }
    }
    out
}
