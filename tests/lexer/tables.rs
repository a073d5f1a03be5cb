//! Integration tests for token tables

use translator_automaton::FiniteAutomaton;
use translator_foundation::{GrammarOptions, LexerOptions, TokenClassId};
use translator_grammar::Grammar;
use translator_lexer::{TokenParser, TokenTables};

const GRAMMAR: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="program">
        <c>
          <d name="id" token-class="identifier">
            <c><d name="letter" symbol-class="letter"><cta>abcdefghijklmnopqrstuvwxyz</cta></d></c>
            <c><n>id</n><n>letter</n></c>
          </d>
          <t>:=</t>
          <t>;</t>
        </c>
      </d>
    </g>"#;

fn tables(script: &str) -> TokenTables {
    let grammar = Grammar::from_xml(GRAMMAR, &GrammarOptions::default()).unwrap();
    let automaton = FiniteAutomaton::build(&grammar).unwrap();
    let result = TokenParser::new(&grammar, &automaton, LexerOptions::default()).parse(script);
    TokenTables::build(&result.tokens)
}

#[test]
fn identifiers_are_numbered_by_first_use() {
    let tables = tables("b := a; a := b; c := a");
    let identifiers = tables.table(TokenClassId(1)).unwrap();
    assert_eq!(identifiers.names(), &["b", "a", "c"]);
    assert_eq!(identifiers.slot("c"), Some(2));
}

#[test]
fn keywords_have_their_own_table() {
    let tables = tables("b := a; a := b");
    let keywords = tables.table(TokenClassId::UNCLASSIFIED).unwrap();
    assert_eq!(keywords.names(), &[":=", ";"]);
    assert_eq!(tables.classes().collect::<Vec<_>>(), vec![TokenClassId(0), TokenClassId(1)]);
}

#[test]
fn entries_follow_the_script() {
    let tables = tables("b := a; a := b");
    let slots: Vec<(usize, usize)> = tables.entries().map(|e| (e.index, e.slot)).collect();
    assert_eq!(
        slots,
        vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 1), (5, 0), (6, 0)]
    );
}
