//! Integration tests for syntax diagnostics
//!
//! Tests furthest-position reporting, expected names, undefined tokens, and
//! the depth limit.

use translator_foundation::{DiagnosticKind, DiagnosticTag, ErrorKind, SyntaxOptions};

use crate::strategies::STATEMENTS;
use crate::{Fixture, STRATEGIES};

const LIST: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="S">
        <c><t>a</t><n>S</n></c>
        <c><t>b</t></c>
      </d>
    </g>"#;

const NESTED: &str = r#"
    <g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
      <d name="S">
        <c><t>(</t><n>S</n><t>)</t><n>S</n></c>
        <c><t>x</t></c>
        <c/>
      </d>
    </g>"#;

#[test]
fn early_end_lists_what_could_follow() {
    let fixture = Fixture::new(LIST);
    for strategy in STRATEGIES {
        let outcome = fixture.analyze("aaa", strategy);
        let d = outcome.diagnostic().unwrap();
        assert_eq!(d.tag, DiagnosticTag::Syntax);
        assert_eq!(d.kind, DiagnosticKind::UnexpectedEndOfScript);
        assert_eq!(d.position, 3);
        assert_eq!(d.expected, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(d.message, "Unexpected end of script. Expected: a , b");
    }
}

#[test]
fn trailing_tokens_expect_the_end() {
    let fixture = Fixture::new(LIST);
    for strategy in STRATEGIES {
        let outcome = fixture.analyze("ba", strategy);
        let d = outcome.diagnostic().unwrap();
        assert_eq!(d.kind, DiagnosticKind::UnexpectedToken);
        assert_eq!(d.message, "Unexpected token a at (1;2). Expected: end of script");
        assert!(d.expected.is_empty());
    }
}

#[test]
fn furthest_failure_wins() {
    let fixture = Fixture::new(STATEMENTS);
    for strategy in STRATEGIES {
        let outcome = fixture.analyze("skip; x := ; skip", strategy);
        let d = outcome.diagnostic().unwrap();
        assert_eq!(d.kind, DiagnosticKind::UnexpectedToken);
        assert_eq!(d.position, 11);
        assert_eq!(d.expected, vec!["id".to_string()]);
        assert_eq!(d.tokens[0].name, ";");
    }
}

#[test]
fn undefined_tokens_stop_the_analysis() {
    let fixture = Fixture::new(STATEMENTS);
    for strategy in STRATEGIES {
        let outcome = fixture.analyze("x := @ y", strategy);
        let d = outcome.diagnostic().unwrap();
        assert_eq!(d.tag, DiagnosticTag::Syntax);
        assert_eq!(d.kind, DiagnosticKind::UndefinedToken);
        assert_eq!(d.position, 5);
    }
}

#[test]
fn undefined_tokens_can_be_skipped() {
    let fixture = Fixture::new(STATEMENTS);
    for strategy in STRATEGIES {
        let options = SyntaxOptions::default()
            .with_strategy(strategy)
            .with_ignore_undefined_tokens(true);
        let outcome = fixture.try_analyze("x := @ y", options).unwrap();
        assert!(outcome.is_accepted(), "{strategy}");
    }
}

#[test]
fn empty_alternatives_accept_nothing_between_brackets() {
    let fixture = Fixture::new(NESTED);
    for strategy in STRATEGIES {
        for script in ["x", "()", "(x)(x)", "((x)x)"] {
            assert!(fixture.analyze(script, strategy).is_accepted(), "{strategy} {script}");
        }
        for script in ["(", ")", "(x", "x)"] {
            assert!(!fixture.analyze(script, strategy).is_accepted(), "{strategy} {script}");
        }
    }
}

#[test]
fn deep_nesting_hits_the_depth_limit() {
    let fixture = Fixture::new(NESTED);
    for strategy in STRATEGIES {
        let options = SyntaxOptions::default()
            .with_strategy(strategy)
            .with_max_depth(3);
        let err = fixture.try_analyze("((((((x))))))", options).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DepthExceeded(3)), "{strategy}");
    }
}
