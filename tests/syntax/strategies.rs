//! Integration tests for the two analysis strategies

use translator_foundation::GrammarOptions;

use crate::{Fixture, STRATEGIES};

const LIST: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="S">
        <c><t>a</t><n>S</n></c>
        <c><t>b</t></c>
      </d>
    </g>"#;

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

pub const STATEMENTS: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="program">
        <c>
          <d name="statement">
            <c>
              <d name="id" token-class="identifier">
                <c><d name="letter" symbol-class="letter"><cta>abcdefghijklmnopqrstuvwxyz</cta></d></c>
                <c><n>id</n><n>letter</n></c>
              </d>
              <t>:=</t>
              <n>id</n>
            </c>
            <c><t>skip</t></c>
            <c><t>while</t><n>id</n><t>do</t><n>statement</n></c>
          </d>
        </c>
        <c><n>statement</n><t>;</t><n>program</n></c>
      </d>
    </g>"#;

/// `B (c B | e B)*` with `B` one of `x`, `y`.
fn is_sum(script: &str) -> bool {
    let symbols: Vec<char> = script.chars().filter(|c| !c.is_whitespace()).collect();
    !symbols.is_empty()
        && symbols.len() % 2 == 1
        && symbols.iter().enumerate().all(|(i, c)| {
            if i % 2 == 0 {
                matches!(c, 'x' | 'y')
            } else {
                matches!(c, 'c' | 'e')
            }
        })
}

const SUM_SCRIPTS: [&str; 10] = [
    "x", "y", "xcy", "xey", "xcyex", "ycxcxey", "c", "xc", "xx", "xcc",
];

#[test]
fn right_recursion_accepts_its_sentences() {
    let fixture = Fixture::new(LIST);
    for strategy in STRATEGIES {
        for script in ["b", "ab", "aaaab"] {
            assert!(fixture.analyze(script, strategy).is_accepted(), "{strategy} {script}");
        }
        for script in ["a", "ba", "bb", "aab b"] {
            assert!(!fixture.analyze(script, strategy).is_accepted(), "{strategy} {script}");
        }
    }
}

#[test]
fn rewritten_left_recursion_keeps_the_language() {
    let fixture = Fixture::new(SUMS);
    for strategy in STRATEGIES {
        for script in SUM_SCRIPTS {
            assert_eq!(
                fixture.analyze(script, strategy).is_accepted(),
                is_sum(script),
                "{strategy} {script}"
            );
        }
    }
}

#[test]
fn kept_left_recursion_keeps_the_language() {
    let options = GrammarOptions::default().with_left_recursion_conversion(false);
    let fixture = Fixture::with_options(SUMS, &options);
    for strategy in STRATEGIES {
        for script in SUM_SCRIPTS {
            assert_eq!(
                fixture.analyze(script, strategy).is_accepted(),
                is_sum(script),
                "{strategy} {script}"
            );
        }
    }
}

#[test]
fn statements_nest() {
    let fixture = Fixture::new(STATEMENTS);
    let script = "while x do while y do skip; x := y; skip";
    for strategy in STRATEGIES {
        assert!(fixture.analyze(script, strategy).is_accepted(), "{strategy}");
    }
}

#[test]
fn strategies_agree_on_every_verdict() {
    let fixture = Fixture::new(STATEMENTS);
    let scripts = [
        "skip",
        "x := y",
        "x := y; skip; abc := d",
        "while x do skip",
        "while do skip",
        "x :=",
        "skip;",
        "skip skip",
        "x := y z",
        "; skip",
        "while x skip",
    ];
    for script in scripts {
        let [recursive, pushdown] = STRATEGIES.map(|s| fixture.analyze(script, s));
        assert_eq!(recursive.is_accepted(), pushdown.is_accepted(), "{script}");
        assert_eq!(recursive.diagnostic(), pushdown.diagnostic(), "{script}");
    }
}
