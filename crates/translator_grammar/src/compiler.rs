//! Grammar compilation: node construction, left-recursion handling,
//! factorization, and id assignment.
//!
//! Nodes are first created in a draft arena indexed by creation order. Once
//! every factor exists the arena is sorted into its published order and all
//! references are rewritten through the resulting permutation.

use std::collections::HashMap;

use translator_foundation::{Error, ErrorContext, ErrorKind, GrammarOptions, NodeId, Result, TokenClassId};

use crate::class_table::ClassTable;
use crate::classifier::classify_terminals;
use crate::description::{Definition, DefinitionKind, Element, GrammarDescription, TerminalSpec};
use crate::grammar::Grammar;
use crate::node::{ClassData, MediumData, Node, NodeKind, TerminalData, TokenTag, Trie};

// =============================================================================
// Draft Arena
// =============================================================================

struct Compiler<'a> {
    options: &'a GrammarOptions,
    nodes: Vec<Node>,
    nonterminals: HashMap<String, NodeId>,
    terminals: HashMap<String, NodeId>,
    definition_order: Vec<NodeId>,
    factor_count: usize,
}

/// Compiles a grammar description.
pub(crate) fn compile(description: &GrammarDescription, options: &GrammarOptions) -> Result<Grammar> {
    let mut compiler = Compiler {
        options,
        nodes: Vec::new(),
        nonterminals: HashMap::new(),
        terminals: HashMap::new(),
        definition_order: Vec::new(),
        factor_count: 0,
    };

    let axiom = compiler.define(&description.axiom, false)?;
    if !compiler.nodes[axiom.index()].is_medium() {
        return Err(Error::malformed(format!(
            "axiom '{}' must be a medium",
            description.axiom.name
        )));
    }

    let mut class_table = ClassTable::new(
        description.unclassified_token_class_name.clone(),
        description.undefined_token_class_name.clone(),
        description.white_delimiters.clone(),
    );
    compiler.assign_token_classes(&mut class_table);
    let unclassified_terminals = compiler.classify(&mut class_table);

    let original_mediums: Vec<NodeId> = compiler.medium_ids();
    let has_left_recursion = if options.convert_left_recursion_to_right {
        compiler.eliminate_left_recursion(&original_mediums)?;
        for id in compiler.medium_ids() {
            compiler.factorize_medium(id, false)?;
        }
        false
    } else {
        let mut found = false;
        for id in original_mediums {
            found |= compiler.factorize_medium(id, true)?;
        }
        found
    };

    Ok(compiler.publish(axiom, class_table, unclassified_terminals, has_left_recursion))
}

impl Compiler<'_> {
    fn push(&mut self, name: impl Into<String>, exec_class: Option<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            name: name.into(),
            exec_class,
            kind,
        });
        id
    }

    fn medium_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.is_medium()).map(|n| n.id).collect()
    }

    fn medium_mut(&mut self, id: NodeId) -> Result<&mut MediumData> {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Medium(m) => Ok(m),
            _ => Err(Error::internal(format!("node {id} is not a medium"))),
        }
    }

    // -------------------------------------------------------------------------
    // Node construction
    // -------------------------------------------------------------------------

    fn define(&mut self, definition: &Definition, inside_token: bool) -> Result<NodeId> {
        if self.nonterminals.contains_key(&definition.name) {
            return Err(Error::malformed(format!(
                "node '{}' is defined more than once",
                definition.name
            )));
        }

        let (kind, exec_class, inside_token) = match &definition.kind {
            DefinitionKind::Class {
                symbol_class,
                symbols,
            } => (
                NodeKind::Class(ClassData {
                    symbol_class: symbol_class.clone(),
                    symbols: symbols.clone(),
                }),
                None,
                inside_token,
            ),
            DefinitionKind::Token {
                token_class,
                exec_class,
            } => (
                NodeKind::Medium(MediumData {
                    token: Some(TokenTag {
                        token_class: token_class.clone(),
                        token_class_id: TokenClassId::UNCLASSIFIED,
                    }),
                    ..MediumData::default()
                }),
                exec_class.clone(),
                true,
            ),
            DefinitionKind::Medium => (NodeKind::Medium(MediumData::default()), None, inside_token),
        };

        let id = self.push(definition.name.clone(), exec_class, kind);
        self.nonterminals.insert(definition.name.clone(), id);
        self.definition_order.push(id);

        if self.nodes[id.index()].is_medium() {
            let mut cases = Vec::with_capacity(definition.cases.len());
            for case in &definition.cases {
                let mut sequence = Vec::with_capacity(case.len());
                for element in case {
                    let node = self.element(element, inside_token).map_err(|mut e| {
                        let context = e
                            .context
                            .take()
                            .unwrap_or_else(ErrorContext::new)
                            .with_frame(definition.name.clone());
                        e.with_context(context)
                    })?;
                    sequence.push(node);
                }
                cases.push(sequence);
            }
            self.medium_mut(id)?.cases = cases;
        }

        Ok(id)
    }

    fn element(&mut self, element: &Element, inside_token: bool) -> Result<NodeId> {
        let id = match element {
            Element::Definition(definition) => self.define(definition, inside_token),
            Element::Reference(name) => self
                .nonterminals
                .get(name)
                .copied()
                .ok_or_else(|| Error::undefined_reference(name.clone())),
            Element::Terminal(spec) => self.terminal(spec, inside_token),
        }?;

        // Classes only take part in lexing, inside defined tokens.
        let node = &self.nodes[id.index()];
        if node.is_class() && !inside_token {
            return Err(Error::malformed(format!(
                "class '{}' is used outside a defined token",
                node.name
            )));
        }
        Ok(id)
    }

    fn terminal(&mut self, spec: &TerminalSpec, inside_token: bool) -> Result<NodeId> {
        let listed = !inside_token || self.options.include_terminals_inside_defined_tokens;

        if let Some(&id) = self.terminals.get(&spec.text) {
            let node = &mut self.nodes[id.index()];
            if let Some(requested) = &spec.exec_class {
                match &node.exec_class {
                    Some(existing) if existing != requested => {
                        return Err(Error::conflicting_exec_class(
                            spec.text.clone(),
                            existing.clone(),
                            requested.clone(),
                        ));
                    }
                    _ => node.exec_class = Some(requested.clone()),
                }
            }
            if let NodeKind::Terminal(data) = &mut node.kind {
                data.is_listed |= listed;
            }
            return Ok(id);
        }

        let id = self.push(
            spec.text.clone(),
            spec.exec_class.clone(),
            NodeKind::Terminal(TerminalData {
                is_control: false,
                is_listed: listed,
                token_class_id: TokenClassId::UNCLASSIFIED,
                streamers: spec.streamers.clone(),
                breakers: spec.breakers.clone(),
                stream_max_count: spec.stream_max_count,
                operator_priority: spec.operator_priority,
            }),
        );
        self.terminals.insert(spec.text.clone(), id);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    fn assign_token_classes(&mut self, table: &mut ClassTable) {
        for node in &mut self.nodes {
            if let NodeKind::Medium(MediumData {
                token: Some(tag), ..
            }) = &mut node.kind
            {
                tag.token_class_id = table.token_classes_mut().intern(&tag.token_class);
            }
        }
    }

    fn classify(&mut self, table: &mut ClassTable) -> Vec<String> {
        let declared: Vec<(String, String)> = self
            .nodes
            .iter()
            .filter_map(|n| n.as_class())
            .map(|c| (c.symbol_class.clone(), c.symbols.clone()))
            .collect();

        let listed: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.as_terminal().is_some_and(|t| t.is_listed))
            .map(|n| n.name.clone())
            .collect();

        let classification = classify_terminals(listed.iter().map(String::as_str), &declared, table);

        for node in &mut self.nodes {
            let name = node.name.clone();
            if let NodeKind::Terminal(data) = &mut node.kind {
                data.is_control = classification.unclassified.contains(&name);
            }
        }

        classification
            .unclassified
            .into_iter()
            .filter(|t| classification.intersected.contains(t) || t.chars().count() > 1)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Left recursion
    // -------------------------------------------------------------------------

    fn split_recursive(&self, id: NodeId) -> (Vec<Vec<NodeId>>, Vec<Vec<NodeId>>) {
        let cases = self.nodes[id.index()]
            .as_medium()
            .map(|m| m.cases.clone())
            .unwrap_or_default();
        cases.into_iter().partition(|case| case.first() == Some(&id))
    }

    /// Rewrites `A ::= A a | b` into `A ::= b | b A(0)` and
    /// `A(0) ::= a A(0) | a`, one tail medium per non-recursive case.
    fn eliminate_left_recursion(&mut self, mediums: &[NodeId]) -> Result<()> {
        for &id in mediums {
            let (recursive, base) = self.split_recursive(id);
            if recursive.is_empty() {
                continue;
            }
            let name = self.nodes[id.index()].name.clone();
            if base.is_empty() {
                return Err(Error::new(ErrorKind::NoBaseCase(name)));
            }

            let beheaded: Vec<Vec<NodeId>> = recursive.iter().map(|c| c[1..].to_vec()).collect();
            let mut cases = base.clone();
            for (index, sequence) in base.iter().enumerate() {
                let tail = self.push(
                    format!("{name}({index})"),
                    None,
                    NodeKind::Medium(MediumData {
                        is_synthetic: true,
                        ..MediumData::default()
                    }),
                );
                let mut tail_cases = Vec::with_capacity(beheaded.len() * 2);
                for alpha in &beheaded {
                    let mut looping = alpha.clone();
                    looping.push(tail);
                    tail_cases.push(looping);
                    tail_cases.push(alpha.clone());
                }
                self.medium_mut(tail)?.cases = tail_cases;

                let mut extended = sequence.clone();
                extended.push(tail);
                cases.push(extended);
            }
            self.medium_mut(id)?.cases = cases;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Factorization
    // -------------------------------------------------------------------------

    /// Builds the trie of a medium. With `keep_recursion`, left-recursive
    /// cases become a loop factor instead; returns whether any were found.
    fn factorize_medium(&mut self, id: NodeId, keep_recursion: bool) -> Result<bool> {
        let owner = self.nodes[id.index()].name.clone();
        let (recursive, base) = if keep_recursion {
            self.split_recursive(id)
        } else {
            let cases = self.nodes[id.index()]
                .as_medium()
                .map(|m| m.cases.clone())
                .unwrap_or_default();
            (Vec::new(), cases)
        };

        if !recursive.is_empty() && base.is_empty() {
            return Err(Error::new(ErrorKind::NoBaseCase(owner)));
        }

        let mut trie = self.factorize(&owner, &base).unwrap_or_default();

        if !recursive.is_empty() {
            let beheaded: Vec<Vec<NodeId>> = recursive.iter().map(|c| c[1..].to_vec()).collect();
            if let Some(tail) = self.factorize(&owner, &beheaded) {
                let tail = self.push_factor(&owner, tail);
                let repeat = self.push_factor(&owner, Trie::default());
                if let NodeKind::Factor(t) = &mut self.nodes[repeat.index()].kind {
                    t.cases.push((tail, Some(repeat)));
                    t.is_interruptable = true;
                }
                trie.recursion = Some(repeat);
            }
        }

        self.medium_mut(id)?.trie = trie;
        Ok(!recursive.is_empty())
    }

    fn push_factor(&mut self, owner: &str, trie: Trie) -> NodeId {
        self.factor_count += 1;
        let name = format!("{owner}'{}", self.factor_count);
        self.push(name, None, NodeKind::Factor(trie))
    }

    /// Groups `cases` by head and recurses on the tails.
    ///
    /// Returns `None` when every case is empty.
    fn factorize(&mut self, owner: &str, cases: &[Vec<NodeId>]) -> Option<Trie> {
        let mut groups: Vec<(Option<NodeId>, Vec<&[NodeId]>)> = Vec::new();
        for case in cases {
            let head = case.first().copied();
            match groups.iter_mut().find(|(h, _)| *h == head) {
                Some((_, members)) => members.push(case),
                None => groups.push((head, vec![case])),
            }
        }

        if groups.len() == 1 && groups[0].0.is_none() {
            return None;
        }

        let mut trie = Trie::default();
        for (head, members) in groups {
            let Some(head) = head else {
                trie.is_interruptable = true;
                continue;
            };
            let tails: Vec<Vec<NodeId>> = members.iter().map(|m| m[1..].to_vec()).collect();
            match self.factorize(owner, &tails) {
                Some(next) => {
                    let factor = self.push_factor(owner, next);
                    trie.cases.push((head, Some(factor)));
                }
                None => {
                    trie.cases.push((head, None));
                    if members.len() > 1 {
                        trie.is_interruptable = true;
                    }
                }
            }
        }
        Some(trie)
    }

    // -------------------------------------------------------------------------
    // Publishing
    // -------------------------------------------------------------------------

    fn rank(node: &Node) -> u8 {
        match &node.kind {
            NodeKind::Terminal(t) if t.is_listed => 0,
            NodeKind::Medium(m) if m.token.is_some() => 1,
            NodeKind::Class(_) => 2,
            NodeKind::Medium(m) if !m.is_synthetic => 3,
            NodeKind::Medium(_) | NodeKind::Factor(_) => 4,
            NodeKind::Terminal(_) => 5,
        }
    }

    fn publish(
        self,
        axiom: NodeId,
        class_table: ClassTable,
        unclassified_terminals: Vec<String>,
        has_left_recursion: bool,
    ) -> Grammar {
        let mut order: Vec<NodeId> = self.nodes.iter().map(|n| n.id).collect();
        order.sort_by_key(|id| Self::rank(&self.nodes[id.index()]));

        let mut map = vec![NodeId(0); self.nodes.len()];
        for (new, old) in order.iter().enumerate() {
            map[old.index()] = NodeId(new);
        }

        let mut nodes: Vec<Node> = self.nodes;
        for node in &mut nodes {
            node.remap(&map);
        }
        nodes.sort_by_key(|n| n.id);

        let mut definition_order: Vec<NodeId> =
            self.definition_order.iter().map(|id| map[id.index()]).collect();
        let mut synthetic: Vec<&Node> = nodes
            .iter()
            .filter(|n| n.as_medium().is_some_and(|m| m.is_synthetic))
            .collect();
        synthetic.sort_by(|a, b| a.name.cmp(&b.name));
        definition_order.extend(synthetic.iter().map(|n| n.id));

        Grammar::from_parts(
            nodes,
            map[axiom.index()],
            class_table,
            unclassified_terminals,
            has_left_recursion,
            definition_order,
        )
    }
}
