//! Integration tests for the finite automaton
//!
//! Tests token paths, generic terminals, narrowing, and synthesis errors.

use translator_automaton::FiniteAutomaton;
use translator_foundation::{ErrorKind, GrammarOptions, StateId};
use translator_grammar::{Grammar, SINGLE_DELIMITER_CLASS};

fn build(xml: &str) -> FiniteAutomaton {
    let grammar = Grammar::from_xml(xml, &GrammarOptions::default()).unwrap();
    FiniteAutomaton::build(&grammar).unwrap()
}

/// Follows `keys` from the start state.
fn walk(fa: &FiniteAutomaton, keys: &[&str]) -> Option<StateId> {
    keys.iter().try_fold(fa.start_state(), |state, key| {
        fa.state(state).and_then(|s| s.link(key))
    })
}

fn accepted(fa: &FiniteAutomaton, keys: &[&str]) -> Option<String> {
    let state = walk(fa, keys)?;
    fa.state(state)?.token.as_ref().map(|t| t.name.clone())
}

const ASSIGNMENTS: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="program">
        <c>
          <d name="id" token-class="identifier">
            <c><d name="letter" symbol-class="letter"><cta>abcdefghijklmnopqrstuvwxyz</cta></d></c>
            <c><n>id</n><n>letter</n></c>
          </d>
          <t>:=</t>
          <t>:</t>
          <t>;</t>
        </c>
      </d>
    </g>"#;

const SIGNED: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="S">
        <c>
          <d name="number" token-class="constant">
            <c><d name="digit" symbol-class="digit"><cta>0123456789</cta></d></c>
            <c><d name="sign" symbol-class="sign"><cta>+-</cta></d><n>digit</n></c>
          </d>
          <d name="inc" token-class="operator"><c><t>+</t><t>+</t></c></d>
        </c>
      </d>
    </g>"#;

// =============================================================================
// Token Paths
// =============================================================================

#[test]
fn identifiers_loop_on_letters() {
    let fa = build(ASSIGNMENTS);
    assert_eq!(accepted(&fa, &["letter"]), Some("id".to_string()));
    assert_eq!(
        accepted(&fa, &["letter", "letter", "letter"]),
        Some("id".to_string())
    );
}

#[test]
fn overlapping_terminals_share_a_path() {
    let fa = build(ASSIGNMENTS);
    assert_eq!(accepted(&fa, &[":"]), Some(":".to_string()));
    assert_eq!(accepted(&fa, &[":", "="]), Some(":=".to_string()));
    assert_eq!(accepted(&fa, &["="]), None);
}

#[test]
fn single_delimiters_end_immediately() {
    let fa = build(ASSIGNMENTS);
    let state = walk(&fa, &[SINGLE_DELIMITER_CLASS]).unwrap();
    let state = fa.state(state).unwrap();
    assert_eq!(state.token.as_ref().unwrap().class, "keyword");
    assert!(state.links.is_none());
}

#[test]
fn synthesis_is_deterministic() {
    let grammar = Grammar::from_xml(ASSIGNMENTS, &GrammarOptions::default()).unwrap();
    let first = FiniteAutomaton::build(&grammar).unwrap();
    let second = FiniteAutomaton::build(&grammar).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

// =============================================================================
// Narrowing
// =============================================================================

#[test]
fn terminal_characters_leave_their_class() {
    let fa = build(SIGNED);
    assert_eq!(fa.narrowed().get("sign"), Some(&vec!['+']));
    assert_eq!(fa.class_table().class_symbols("sign"), Some("-"));
    assert_eq!(fa.class_table().class_symbols("+"), Some("+"));
}

#[test]
fn narrowed_character_keeps_both_meanings() {
    let fa = build(SIGNED);
    assert_eq!(accepted(&fa, &["+", "+"]), Some("inc".to_string()));
    assert_eq!(accepted(&fa, &["+", "digit"]), Some("number".to_string()));
    assert_eq!(accepted(&fa, &["sign", "digit"]), Some("number".to_string()));
    assert_eq!(accepted(&fa, &["digit"]), Some("number".to_string()));
}

#[test]
fn grammar_table_is_left_alone() {
    let grammar = Grammar::from_xml(SIGNED, &GrammarOptions::default()).unwrap();
    FiniteAutomaton::build(&grammar).unwrap();
    assert_eq!(grammar.class_table().class_symbols("sign"), Some("+-"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn tokens_ending_together_are_ambiguous() {
    let xml = r#"
        <g unclassified-token-class-name="k" unsupported-token-class-name="u">
          <d name="S">
            <c>
              <d name="bit" token-class="binary"><c><d name="digit" symbol-class="digit"><cta>01</cta></d></c></d>
              <d name="flag" token-class="boolean"><c><n>digit</n></c></d>
            </c>
          </d>
        </g>"#;
    let grammar = Grammar::from_xml(xml, &GrammarOptions::default()).unwrap();
    let err = FiniteAutomaton::build(&grammar).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AmbiguousState { .. }));
}

#[test]
fn kept_left_recursion_cannot_enter_a_token() {
    let options = GrammarOptions::default().with_left_recursion_conversion(false);
    let grammar = Grammar::from_xml(ASSIGNMENTS, &options).unwrap();
    let err = FiniteAutomaton::build(&grammar).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LeftRecursionInToken(ref name) if name == "id"));
}
