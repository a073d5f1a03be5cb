//! Reading grammar descriptions from XML.
//!
//! The document looks like:
//!
//! ```xml
//! <g unclassified-token-class-name="keyword"
//!    unsupported-token-class-name="undefined"
//!    white-delimiters=" \t\n\r">
//!   <d name="program">
//!     <c><t>begin</t><n>body</n><t>end</t></c>
//!   </d>
//! </g>
//! ```
//!
//! `d` defines a node (a class with `symbol-class` and a `cta` child, a
//! defined token with `token-class`, or a plain medium), `c` is one case,
//! `n` references an earlier definition and `t` is a terminal literal.

use std::path::Path;

use translator_foundation::{Error, ErrorContext, Result};

// =============================================================================
// Description Tree
// =============================================================================

/// A parsed but not yet compiled grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarDescription {
    /// Token class of terminals outside defined tokens.
    pub unclassified_token_class_name: String,
    /// Token class given to unrecognized input.
    pub undefined_token_class_name: String,
    /// Characters that separate tokens.
    pub white_delimiters: String,
    /// The top-level definition.
    pub axiom: Definition,
}

/// A `d` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// Definition name.
    pub name: String,
    /// What the definition declares.
    pub kind: DefinitionKind,
    /// Alternatives, in document order.
    pub cases: Vec<Vec<Element>>,
}

/// The three flavors of `d`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefinitionKind {
    /// A symbol class.
    Class {
        /// The class key used by the lexer.
        symbol_class: String,
        /// The characters in the class.
        symbols: String,
    },
    /// A defined token compiled into the lexer.
    Token {
        /// Token class name.
        token_class: String,
        /// Downstream execution tag.
        exec_class: Option<String>,
    },
    /// A plain nonterminal.
    Medium,
}

/// One element of a case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// `n`: a reference to an earlier definition.
    Reference(String),
    /// `t`: a literal terminal.
    Terminal(TerminalSpec),
    /// A nested `d`.
    Definition(Box<Definition>),
}

/// A `t` element with its metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TerminalSpec {
    /// The literal text.
    pub text: String,
    /// Downstream execution tag (`statement`, `operator`, ...).
    pub exec_class: Option<String>,
    /// Terminals that open a statement stream.
    pub streamers: Vec<String>,
    /// Terminals that close a statement stream.
    pub breakers: Vec<String>,
    /// Maximum statements in one stream.
    pub stream_max_count: Option<u32>,
    /// Operator binding strength.
    pub operator_priority: Option<u32>,
}

impl TerminalSpec {
    /// Creates a terminal with no metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// XML Reader
// =============================================================================

impl GrammarDescription {
    /// Parses a grammar description from XML text.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedGrammar`](translator_foundation::ErrorKind::MalformedGrammar)
    /// if the XML is invalid or does not follow the grammar schema.
    pub fn from_xml(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| Error::malformed(format!("invalid XML: {e}")))?;
        let root = doc.root_element();
        if root.tag_name().name() != "g" {
            return Err(Error::malformed(format!(
                "root element must be 'g', found '{}'",
                root.tag_name().name()
            )));
        }

        let unclassified_token_class_name = required_attribute(root, "unclassified-token-class-name")?;
        let undefined_token_class_name = required_attribute(root, "unsupported-token-class-name")?;
        let white_delimiters = unescape_delimiters(
            root.attribute("white-delimiters").unwrap_or(" \\t\\n\\r"),
        );

        let mut definitions = elements(root);
        let first = definitions
            .next()
            .ok_or_else(|| Error::malformed("grammar has no top-level definition"))?;
        if first.tag_name().name() != "d" {
            return Err(unsupported_tag(first));
        }
        if let Some(extra) = definitions.next() {
            return Err(Error::malformed(format!(
                "grammar must have exactly one top-level definition, found extra '{}'",
                extra.tag_name().name()
            )));
        }

        let axiom = read_definition(first)?;
        Ok(Self {
            unclassified_token_class_name,
            undefined_token_class_name,
            white_delimiters,
            axiom,
        })
    }

    /// Reads and parses a grammar description file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a malformed grammar
    /// error if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::new(translator_foundation::ErrorKind::IoError(e.to_string())))?;
        Self::from_xml(&text).map_err(|mut e| {
            let context = e
                .context
                .take()
                .unwrap_or_else(ErrorContext::new)
                .with_source(path.display().to_string());
            e.with_context(context)
        })
    }
}

fn elements<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    node.children().filter(roxmltree::Node::is_element)
}

fn required_attribute(node: roxmltree::Node<'_, '_>, name: &str) -> Result<String> {
    node.attribute(name).map(str::to_string).ok_or_else(|| {
        Error::malformed(format!(
            "element '{}' is missing attribute '{name}'",
            node.tag_name().name()
        ))
    })
}

fn unsupported_tag(node: roxmltree::Node<'_, '_>) -> Error {
    Error::malformed(format!(
        "unsupported tag '{}' was found in grammar",
        node.tag_name().name()
    ))
}

fn unescape_delimiters(raw: &str) -> String {
    raw.replace("\\t", "\t")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
}

fn split_pipes(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split('|').map(str::to_string).collect())
        .unwrap_or_default()
}

fn read_definition(node: roxmltree::Node<'_, '_>) -> Result<Definition> {
    let name = required_attribute(node, "name")?;

    let kind = if let Some(symbol_class) = node.attribute("symbol-class") {
        let symbols = elements(node)
            .find(|n| n.tag_name().name() == "cta")
            .and_then(|n| n.text())
            .ok_or_else(|| Error::malformed(format!("class '{name}' has no 'cta' element")))?;
        DefinitionKind::Class {
            symbol_class: symbol_class.to_string(),
            symbols: symbols.to_string(),
        }
    } else if let Some(token_class) = node.attribute("token-class") {
        DefinitionKind::Token {
            token_class: token_class.to_string(),
            exec_class: node.attribute("exec-class").map(str::to_string),
        }
    } else {
        DefinitionKind::Medium
    };

    let mut cases = Vec::new();
    for case in elements(node).filter(|n| n.tag_name().name() == "c") {
        let mut sequence = Vec::new();
        for element in elements(case) {
            sequence.push(read_element(element).map_err(|mut e| {
                let context = e
                    .context
                    .take()
                    .unwrap_or_default()
                    .with_frame(name.clone());
                e.with_context(context)
            })?);
        }
        cases.push(sequence);
    }

    Ok(Definition { name, kind, cases })
}

fn read_element(node: roxmltree::Node<'_, '_>) -> Result<Element> {
    match node.tag_name().name() {
        "d" => Ok(Element::Definition(Box::new(read_definition(node)?))),
        "n" => Ok(Element::Reference(node.text().unwrap_or_default().to_string())),
        "t" => {
            let parse_number = |attr: &str| -> Result<Option<u32>> {
                node.attribute(attr)
                    .map(|v| {
                        v.trim().parse::<u32>().map_err(|_| {
                            Error::malformed(format!("attribute '{attr}' is not a number: '{v}'"))
                        })
                    })
                    .transpose()
            };
            Ok(Element::Terminal(TerminalSpec {
                text: node.text().unwrap_or_default().to_string(),
                exec_class: node
                    .attribute("exec-class")
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
                streamers: split_pipes(node.attribute("streamers")),
                breakers: split_pipes(node.attribute("breakers")),
                stream_max_count: parse_number("stream-max-count")?,
                operator_priority: parse_number("operator-priority")?,
            }))
        }
        _ => Err(unsupported_tag(node)),
    }
}
