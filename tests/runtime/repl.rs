//! Integration tests for the REPL with a scripted editor

use translator_foundation::{Config, Result};
use translator_runtime::{LineEditor, ReadResult, Repl, Session};

use crate::STATEMENTS;

/// Feeds prepared lines and remembers what was completed and recorded.
#[derive(Default)]
struct ScriptedEditor {
    lines: Vec<String>,
    history: Vec<String>,
    keywords: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().rev().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.pop().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
        self.read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }
}

fn repl(lines: &[&str]) -> Repl<ScriptedEditor> {
    let session = Session::from_xml(STATEMENTS, Config::default()).unwrap();
    Repl::with_editor(ScriptedEditor::new(lines), session).without_banner()
}

#[test]
fn eval_reports_verdicts() {
    let mut repl = repl(&[]);
    assert_eq!(repl.eval("skip").unwrap(), "OK\n");
    let out = repl.eval("skip;").unwrap();
    assert!(out.starts_with("[syntax] Unexpected end of script"), "{out}");
}

#[test]
fn factorized_dump_lists_every_medium() {
    let mut repl = repl(&[]);
    let out = repl.eval(":factorized").unwrap();
    assert!(out.contains("<program>::="));
    assert!(out.contains("<statement>::="));
}

#[test]
fn run_consumes_lines_until_end_of_input() {
    let mut repl = repl(&["skip", "x := y;\\", "skip"]);
    repl.run().unwrap();
    assert_eq!(repl.session().tracer().current_run(), 2);
}
