//! Integration tests for the pushdown table
//!
//! Tests state coverage, dives, and loop states for kept left recursion.

use translator_automaton::PushdownAutomaton;
use translator_foundation::GrammarOptions;
use translator_grammar::Grammar;

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

fn compile(options: &GrammarOptions) -> (Grammar, PushdownAutomaton) {
    let grammar = Grammar::from_xml(SUMS, options).unwrap();
    let pda = PushdownAutomaton::compile(&grammar).unwrap();
    (grammar, pda)
}

#[test]
fn every_state_comes_from_a_trie() {
    let (grammar, pda) = compile(&GrammarOptions::default());
    assert!(!pda.is_empty());
    for state in pda.states() {
        let node = grammar.node(state.origin);
        assert!(node.is_medium() || node.is_factor(), "{node}");
    }
}

#[test]
fn axiom_dives_into_its_operand() {
    let (grammar, pda) = compile(&GrammarOptions::default());
    let start = pda.state(pda.start_state()).unwrap();
    assert_eq!(start.origin, grammar.axiom());
    assert!(start.links.is_empty());

    let b = grammar.mediums().find(|n| n.name == "B").unwrap().id;
    let (operand, link) = start.dives[0];
    assert_eq!(operand, b);
    let entered = pda.state(link.dive_in.unwrap()).unwrap();
    assert_eq!(entered.origin, operand);
    assert!(link.factor_out.is_some());
}

#[test]
fn operand_terminals_end_the_derivation() {
    let (grammar, pda) = compile(&GrammarOptions::default());
    let b = grammar.mediums().find(|n| n.name == "B").unwrap().id;
    let state = pda.states().iter().find(|s| s.origin == b).unwrap();

    for name in ["x", "y"] {
        let terminal = grammar.terminal_by_name(name).unwrap();
        assert_eq!(state.link(terminal).unwrap().dive_in, None);
        assert_eq!(pda.token_name(terminal), Some(name));
    }
    assert!(!state.is_interruptable);
}

#[test]
fn kept_recursion_adds_a_loop_state() {
    let options = GrammarOptions::default().with_left_recursion_conversion(false);
    let (_, pda) = compile(&options);
    let start = pda.state(pda.start_state()).unwrap();
    let repeat = pda.state(start.recursion.unwrap()).unwrap();
    assert!(repeat.is_interruptable);
    assert!(pda.to_string().contains(" loop "));
}

#[test]
fn compiling_twice_gives_the_same_table() {
    let (grammar, first) = compile(&GrammarOptions::default());
    let second = PushdownAutomaton::compile(&grammar).unwrap();
    assert_eq!(first, second);
}
