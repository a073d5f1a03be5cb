//! Integration tests for grammar compilation
//!
//! Tests factorization, left recursion rewriting, and compile errors.

use translator_foundation::{ErrorKind, GrammarOptions};
use translator_grammar::Grammar;
use translator_grammar::display::{factorized_text, grammar_text};

fn compile(xml: &str) -> Grammar {
    Grammar::from_xml(xml, &GrammarOptions::default()).unwrap()
}

fn keep_recursion() -> GrammarOptions {
    GrammarOptions::default().with_left_recursion_conversion(false)
}

const SUMS: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="A">
        <c>
          <d name="B">
            <c><t>x</t></c>
            <c><t>y</t></c>
          </d>
        </c>
        <c><n>A</n><t>c</t><n>B</n></c>
        <c><n>A</n><t>e</t><n>B</n></c>
      </d>
    </g>"#;

// =============================================================================
// Factorization
// =============================================================================

#[test]
fn common_prefixes_are_shared() {
    let xml = r#"
        <g unclassified-token-class-name="k" unsupported-token-class-name="u">
          <d name="S">
            <c><t>if</t><t>x</t><t>then</t><t>x</t></c>
            <c><t>if</t><t>x</t><t>then</t><t>x</t><t>else</t><t>x</t></c>
          </d>
        </g>"#;
    let grammar = compile(xml);
    assert_eq!(factorized_text(&grammar), "<S>::=if(x(then(x(else(x)|^))))\n");
}

#[test]
fn empty_case_makes_the_trie_interruptable() {
    let xml = r#"
        <g unclassified-token-class-name="k" unsupported-token-class-name="u">
          <d name="S">
            <c><t>a</t><n>S</n></c>
            <c/>
          </d>
        </g>"#;
    let grammar = compile(xml);
    let trie = grammar.node(grammar.axiom()).trie().unwrap();
    assert!(trie.is_interruptable);
    assert_eq!(trie.cases.len(), 1);
    assert_eq!(grammar_text(&grammar), "<S>::=a<S>|^\n");
}

#[test]
fn compilation_is_deterministic() {
    let first = compile(SUMS);
    let second = compile(SUMS);
    assert_eq!(first, second);
    assert_eq!(factorized_text(&first), factorized_text(&second));
}

// =============================================================================
// Left Recursion
// =============================================================================

#[test]
fn left_recursion_is_rewritten_to_a_tail() {
    let grammar = compile(SUMS);
    assert!(!grammar.has_left_recursion());
    assert_eq!(
        factorized_text(&grammar),
        "<A>::=<B>(<A(0)>|^)\n<B>::=x|y\n<A(0)>::=c(<B>(<A(0)>|^))|e(<B>(<A(0)>|^))\n"
    );
}

#[test]
fn kept_left_recursion_becomes_a_loop() {
    let grammar = Grammar::from_xml(SUMS, &keep_recursion()).unwrap();
    assert!(grammar.has_left_recursion());
    assert!(factorized_text(&grammar).starts_with("<A>::=<B>{c(<B>)|e(<B>)}\n"));
}

#[test]
fn left_recursion_needs_a_base_case() {
    let xml = r#"
        <g unclassified-token-class-name="k" unsupported-token-class-name="u">
          <d name="A"><c><n>A</n><t>x</t></c><c><n>A</n><t>y</t></c></d>
        </g>"#;
    let err = Grammar::from_xml(xml, &GrammarOptions::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoBaseCase(ref name) if name == "A"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn references_must_be_defined_first() {
    let xml = r#"
        <g unclassified-token-class-name="k" unsupported-token-class-name="u">
          <d name="S"><c><n>missing</n></c></d>
        </g>"#;
    let err = Grammar::from_xml(xml, &GrammarOptions::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedReference(ref name) if name == "missing"));
}

#[test]
fn broken_xml_is_malformed() {
    let err = Grammar::from_xml("<g><d name=", &GrammarOptions::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedGrammar(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Grammar::load("/nonexistent/grammar.xml", &GrammarOptions::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IoError(_)));
}
