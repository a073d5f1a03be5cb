//! Integration tests for tokenizing
//!
//! Tests longest match, terminal lookup, narrowing, positions, and undefined
//! input.

use translator_automaton::FiniteAutomaton;
use translator_foundation::{DiagnosticKind, GrammarOptions, LexerOptions, TokenClassId};
use translator_grammar::Grammar;
use translator_lexer::{LexResult, TokenParser};

const ASSIGNMENTS: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="program">
        <c>
          <d name="id" token-class="identifier">
            <c><d name="letter" symbol-class="letter"><cta>abcdefghijklmnopqrstuvwxyz</cta></d></c>
            <c><n>id</n><n>letter</n></c>
            <c><n>id</n><d name="digit" symbol-class="digit"><cta>0123456789</cta></d></c>
          </d>
          <t>while</t>
          <t>do</t>
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

const OPERATORS: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="S">
        <c>
          <d name="number" token-class="constant">
            <c><d name="digit" symbol-class="digit"><cta>0123456789</cta></d></c>
            <c><d name="sign" symbol-class="sign"><cta>+-</cta></d><n>digit</n></c>
          </d>
        </c>
        <c><t>++</t></c>
        <c><t>+</t></c>
      </d>
    </g>"#;

struct Fixture {
    grammar: Grammar,
    automaton: FiniteAutomaton,
}

impl Fixture {
    fn new(xml: &str) -> Self {
        let grammar = Grammar::from_xml(xml, &GrammarOptions::default()).unwrap();
        let automaton = FiniteAutomaton::build(&grammar).unwrap();
        Self { grammar, automaton }
    }

    fn lex(&self, script: &str) -> LexResult {
        self.lex_with(script, LexerOptions::default())
    }

    fn lex_with(&self, script: &str, options: LexerOptions) -> LexResult {
        TokenParser::new(&self.grammar, &self.automaton, options).parse(script)
    }
}

fn names(result: &LexResult) -> Vec<&str> {
    result.tokens.iter().map(|t| t.name.as_str()).collect()
}

// =============================================================================
// Recognition
// =============================================================================

#[test]
fn every_listed_terminal_lexes_as_itself() {
    for xml in [ASSIGNMENTS, OPERATORS] {
        let fixture = Fixture::new(xml);
        for terminal in fixture.grammar.listed_terminals() {
            let result = fixture.lex(&terminal.name);
            assert!(result.is_clean(), "{}", terminal.name);
            assert_eq!(result.tokens.len(), 1, "{}", terminal.name);
            assert_eq!(result.tokens[0].id, Some(terminal.id));
        }
    }
}

#[test]
fn terminals_inside_a_token_class_stay_distinct() {
    let fixture = Fixture::new(OPERATORS);
    let result = fixture.lex("++ + +5 -7 ++3");
    assert!(result.is_clean());
    assert_eq!(names(&result), vec!["++", "+", "+5", "-7", "++", "3"]);

    let inc = fixture.grammar.terminal_by_name("++");
    let plus = fixture.grammar.terminal_by_name("+");
    let number = fixture.grammar.token_by_name("number");
    assert_eq!(result.tokens[0].id, inc);
    assert_eq!(result.tokens[1].id, plus);
    assert_eq!(result.tokens[2].id, number);
    assert_eq!(result.tokens[3].id, number);
    assert_eq!(result.tokens[4].id, inc);
    assert_eq!(result.tokens[5].id, number);
}

#[test]
fn keywords_are_terminals_and_other_words_are_identifiers() {
    let fixture = Fixture::new(ASSIGNMENTS);
    let result = fixture.lex("while x do x := y1");
    assert_eq!(names(&result), vec!["while", "x", "do", "x", ":=", "y1"]);

    let id = fixture.grammar.token_by_name("id");
    assert_eq!(result.tokens[0].id, fixture.grammar.terminal_by_name("while"));
    assert_eq!(result.tokens[0].token_class_id, TokenClassId::UNCLASSIFIED);
    assert_eq!(result.tokens[1].id, id);
    assert_eq!(result.tokens[5].id, id);
}

#[test]
fn tokens_need_no_spaces_between_them() {
    let fixture = Fixture::new(ASSIGNMENTS);
    let result = fixture.lex("x:=y;z:w");
    assert_eq!(names(&result), vec!["x", ":=", "y", ";", "z", ":", "w"]);
}

#[test]
fn narrowed_sign_still_starts_numbers() {
    let fixture = Fixture::new(SIGNED);
    let result = fixture.lex("++ +5 -7 3");
    assert!(result.is_clean());
    assert_eq!(names(&result), vec!["++", "+5", "-7", "3"]);

    let inc = fixture.grammar.token_by_name("inc");
    let number = fixture.grammar.token_by_name("number");
    assert_eq!(result.tokens[0].id, inc);
    assert!(result.tokens[1..].iter().all(|t| t.id == number));
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn rows_and_offsets_are_tracked() {
    let fixture = Fixture::new(ASSIGNMENTS);
    let result = fixture.lex("x;\ny");
    let y = &result.tokens[2];
    assert_eq!(y.row_index(), 1);
    assert_eq!(y.in_string_position(), 3);
    assert_eq!(y.to_string(), format!("y at ({})", y.position));
}

#[test]
fn tab_width_is_configurable() {
    let fixture = Fixture::new(ASSIGNMENTS);
    let result = fixture.lex_with("\tx", LexerOptions::default().with_tab_width(2));
    assert_eq!(result.tokens[0].in_row_position(), 2);
    assert_eq!(result.tokens[0].in_string_position(), 1);
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn whitespace_only_script_is_empty() {
    let fixture = Fixture::new(ASSIGNMENTS);
    let result = fixture.lex("  \n ");
    assert!(result.tokens.is_empty());
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::EmptyScript);
}

#[test]
fn unknown_characters_are_undefined_tokens() {
    let fixture = Fixture::new(ASSIGNMENTS);
    let result = fixture.lex("x # y");
    assert_eq!(names(&result), vec!["x", "#", "y"]);
    assert!(result.tokens[1].is_undefined());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UndefinedToken);
    assert_eq!(result.diagnostics[0].position, 2);
}

// =============================================================================
// Property Tests
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn word() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z][a-z0-9]{0,5}",
            Just("while".to_string()),
            Just(":=".to_string()),
            Just(":".to_string()),
            Just(";".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn spaced_words_lex_one_to_one(words in prop::collection::vec(word(), 1..20)) {
            let fixture = Fixture::new(ASSIGNMENTS);
            let result = fixture.lex(&words.join(" "));
            prop_assert!(result.is_clean());
            prop_assert_eq!(names(&result), words.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
