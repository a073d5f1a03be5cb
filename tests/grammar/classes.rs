//! Integration tests for character classes
//!
//! Tests terminal classification during compilation and class narrowing
//! during automaton synthesis.

use translator_foundation::GrammarOptions;
use translator_grammar::{
    Classifier, ClassTable, Grammar, SINGLE_DELIMITER_CLASS, SymbolCategory, classify_terminals,
};

const KEYWORDS: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="program">
        <c>
          <d name="word" token-class="identifier">
            <c><d name="letter" symbol-class="letter"><cta>abcdefghijklmnopqrstuvwxyz</cta></d></c>
            <c><n>word</n><n>letter</n></c>
          </d>
          <t>while</t>
          <t>-&gt;</t>
          <t>:=</t>
          <t>:</t>
          <t>;</t>
        </c>
      </d>
    </g>"#;

fn declared() -> Vec<(String, String)> {
    vec![
        ("digit".to_string(), "0123456789".to_string()),
        ("sign".to_string(), "+-".to_string()),
    ]
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn covered_terminals_stay_classified() {
    let grammar = Grammar::from_xml(KEYWORDS, &GrammarOptions::default()).unwrap();
    let mut unclassified = grammar.unclassified_terminals().to_vec();
    unclassified.sort();
    assert_eq!(unclassified, vec!["->", ":", ":="]);
}

#[test]
fn lone_single_characters_become_delimiters() {
    let grammar = Grammar::from_xml(KEYWORDS, &GrammarOptions::default()).unwrap();
    assert!(!grammar.unclassified_terminals().iter().any(|t| t == ";"));
    let semicolon = grammar.terminal_by_name(";").unwrap();
    assert!(grammar.node(semicolon).as_terminal().unwrap().is_control);
    assert_eq!(grammar.class_table().class_symbols(SINGLE_DELIMITER_CLASS), Some(";"));
}

#[test]
fn overlapping_terminals_get_character_classes() {
    let grammar = Grammar::from_xml(KEYWORDS, &GrammarOptions::default()).unwrap();
    let table = grammar.class_table();
    assert_eq!(table.class_symbols(SINGLE_DELIMITER_CLASS), Some(";"));
    assert_eq!(table.class_symbols(":"), Some(":"));
    assert_eq!(table.class_symbols("="), Some("="));
    assert_eq!(table.class_symbols("letter"), Some("abcdefghijklmnopqrstuvwxyz"));
}

#[test]
fn white_delimiters_are_not_classes() {
    let grammar = Grammar::from_xml(KEYWORDS, &GrammarOptions::default()).unwrap();
    let table = grammar.class_table();
    assert_eq!(table.symbol_info(' ').category, SymbolCategory::WhiteDelimiter);
    assert_eq!(table.symbol_info('@').category, SymbolCategory::Undefined);
    assert_eq!(table.symbol_info('w').class, Some("letter"));
}

// =============================================================================
// Narrowing
// =============================================================================

#[test]
fn narrowing_splits_a_shared_class() {
    let mut table = ClassTable::new("keyword", "undefined", " ");
    classify_terminals(["--", "-"], &declared(), &mut table);
    let mut classifier = Classifier::new(&table);

    assert_eq!(classifier.classes_of_terminal("--"), vec!["-", "-"]);
    assert_eq!(classifier.table().class_symbols("sign"), Some("+"));
    assert_eq!(classifier.take_promoted(), vec!["-".to_string()]);

    let narrowing = classifier.finish();
    assert_eq!(narrowing.removed.get("sign"), Some(&vec!['-']));
    assert_eq!(narrowing.table.class_symbols("-"), Some("-"));
}

#[test]
fn single_character_classes_are_not_narrowed() {
    let mut table = ClassTable::new("keyword", "undefined", " ");
    classify_terminals(["7"], &[("seven".to_string(), "7".to_string())], &mut table);
    let mut classifier = Classifier::new(&table);

    assert_eq!(classifier.classes_of_terminal("77"), vec!["seven", "seven"]);
    assert!(classifier.take_promoted().is_empty());
    assert!(classifier.finish().removed.is_empty());
}
