//! Integration tests for sessions and artifact persistence

use translator_debug::{Tracer, TracerConfig};
use translator_foundation::{
    Config, DiagnosticKind, DiagnosticTag, SyntaxOptions, SyntaxStrategy,
};
use translator_runtime::{CompiledArtifacts, Session, serialize};

use crate::STATEMENTS;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("translator_it_{}_{name}", std::process::id()))
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn grammar_file_round_trip() {
    let path = temp_path("grammar.xml");
    std::fs::write(&path, STATEMENTS).unwrap();

    let mut session = Session::load(&path, Config::default(), Tracer::disabled()).unwrap();
    assert!(session.run("x := y; skip").unwrap().is_accepted());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn lexical_and_syntax_diagnostics_are_both_reported() {
    let mut session = Session::from_xml(STATEMENTS, Config::default()).unwrap();
    let report = session.run("x := @").unwrap();
    let tags: Vec<_> = report.diagnostics().map(|d| (d.tag, d.kind)).collect();
    assert_eq!(
        tags,
        vec![
            (DiagnosticTag::Lexical, DiagnosticKind::UndefinedToken),
            (DiagnosticTag::Syntax, DiagnosticKind::UndefinedToken),
        ]
    );
}

#[test]
fn ignoring_undefined_tokens_keeps_the_lexical_diagnostic() {
    let config = Config::default()
        .with_syntax(SyntaxOptions::default().with_ignore_undefined_tokens(true));
    let mut session = Session::from_xml(STATEMENTS, config).unwrap();
    let report = session.run("x := @ y").unwrap();
    assert!(report.is_accepted());
    assert_eq!(report.lexical.len(), 1);
}

#[test]
fn both_strategies_through_the_session() {
    for strategy in [SyntaxStrategy::RecursiveDescent, SyntaxStrategy::PushdownTable] {
        let config = Config::default().with_syntax(SyntaxOptions::default().with_strategy(strategy));
        let mut session = Session::from_xml(STATEMENTS, config).unwrap();
        assert!(session.run("skip; a := b").unwrap().is_accepted(), "{strategy}");
        let report = session.run("skip; a :=").unwrap();
        let d = report.outcome.as_ref().and_then(|o| o.diagnostic()).unwrap();
        assert_eq!(d.kind, DiagnosticKind::UnexpectedEndOfScript, "{strategy}");
    }
}

#[test]
fn tracing_counts_runs() {
    let tracer = Tracer::new(TracerConfig::new().enabled());
    let grammar = translator_grammar::Grammar::from_xml(STATEMENTS, &Default::default()).unwrap();
    let mut session = Session::with_tracer(grammar, Config::default(), tracer).unwrap();
    session.run("skip").unwrap();
    session.run("skip; skip").unwrap();

    let buffer = session.tracer().buffer();
    assert_eq!(buffer.records_for_run(1).iter().filter(|r| r.event_type() == "token-emitted").count(), 1);
    assert_eq!(buffer.records_for_run(2).iter().filter(|r| r.event_type() == "token-emitted").count(), 3);
    assert_eq!(buffer.by_event_type("syntax-success").len(), 2);
}

// =============================================================================
// Artifacts
// =============================================================================

#[test]
fn saved_artifacts_behave_like_the_grammar() {
    let session = Session::from_xml(STATEMENTS, Config::default()).unwrap();
    let path = temp_path("artifacts.msgpack");
    serialize::save_to_file(session.artifacts(), &path).unwrap();

    let artifacts: CompiledArtifacts = serialize::load_from_file(&path).unwrap();
    assert_eq!(&artifacts, session.artifacts());

    let mut restored = Session::from_artifacts(artifacts, Config::default());
    for script in ["skip", "x := y; skip", "x :=", "skip skip"] {
        let mut original = Session::from_xml(STATEMENTS, Config::default()).unwrap();
        assert_eq!(
            restored.run(script).unwrap(),
            original.run(script).unwrap(),
            "{script}"
        );
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn artifacts_keep_the_narrowed_class_table() {
    let session = Session::from_xml(STATEMENTS, Config::default()).unwrap();
    let artifacts = session.artifacts();
    assert_eq!(&artifacts.class_table, artifacts.finite.class_table());
}
