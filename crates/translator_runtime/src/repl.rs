//! The interactive REPL.
//!
//! Each entered script is tokenized and analyzed against the session's
//! grammar. Lines starting with `:` are commands; a trailing `\` continues
//! the script on the next line.

use std::fmt::Write;

use translator_foundation::{Error, Result};
use translator_grammar::display;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::{ScriptReport, Session};

const HELP: &str = "\
Commands:
  :help         show this help
  :tokens       toggle the token listing after each script
  :grammar      print the grammar definitions
  :factorized   print the factorized grammar
  :automaton    print the lexer automaton
  :pushdown     print the syntax table
  :trace        toggle tracing of each run
  :quit         exit
Anything else is checked as a script. End a line with \\ to continue it.";

// =============================================================================
// Report Formatting
// =============================================================================

/// Renders a script report for the terminal.
///
/// Accepted scripts print `OK`; rejections print every diagnostic.
#[must_use]
pub fn format_report(session: &Session, report: &ScriptReport, show_tokens: bool) -> String {
    let mut out = String::new();

    if show_tokens {
        let classes = session.grammar().class_table().token_classes();
        for token in &report.tokens {
            let class = classes.name_of(token.token_class_id).unwrap_or("?");
            let _ = writeln!(out, "  {token} [{class}]");
        }
    }

    for diagnostic in report.diagnostics() {
        let _ = writeln!(out, "{diagnostic}");
    }
    if report.is_accepted() {
        out.push_str("OK\n");
    }
    out
}

// =============================================================================
// Repl
// =============================================================================

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    show_tokens: bool,
    prompt: String,
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        editor.set_keywords(session.keywords());
        Self {
            editor,
            session,
            show_banner: true,
            show_tokens: false,
            prompt: "> ".to_string(),
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Lists tokens after each script.
    #[must_use]
    pub const fn with_tokens(mut self, show: bool) -> Self {
        self.show_tokens = show;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until `:quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            println!(
                "translator {} - {} strategy. Type :help for commands.",
                env!("CARGO_PKG_VERSION"),
                self.session.config().syntax.strategy
            );
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        println!();
        Ok(())
    }

    /// Returns `Ok(false)` when the loop should stop.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&input);

        if matches!(trimmed, ":quit" | ":q") {
            return Ok(false);
        }
        print!("{}", self.eval(&input)?);
        Ok(true)
    }

    /// Reads one script, joining lines that end with `\`.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(Some(String::new())),
            ReadResult::Eof => return Ok(None),
        };

        while let Some(stripped) = input.strip_suffix('\\') {
            input = stripped.to_string();
            match self.editor.read_continuation(&self.continuation_prompt)? {
                ReadResult::Line(line) => {
                    input.push('\n');
                    input.push_str(&line);
                }
                ReadResult::Interrupted => {
                    println!("Input cancelled.");
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    return Err(Error::internal("unexpected EOF in multi-line input"));
                }
            }
        }

        Ok(Some(input))
    }

    /// Runs a command or checks a script, returning what to print.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands or when the syntax search
    /// exceeds its depth limit.
    pub fn eval(&mut self, input: &str) -> Result<String> {
        let trimmed = input.trim();
        if is_command(trimmed) {
            return self.command(trimmed);
        }

        let report = self.session.run(input)?;
        let mut out = format_report(&self.session, &report, self.show_tokens);

        let tracer = self.session.tracer();
        if tracer.is_enabled() {
            let records = tracer.buffer().records_for_run(tracer.current_run());
            out.push_str(&tracer.format_records(&records));
            out.push('\n');
        }
        Ok(out)
    }

    fn command(&mut self, command: &str) -> Result<String> {
        let out = match command {
            ":help" | ":h" => format!("{HELP}\n"),
            ":tokens" => {
                self.show_tokens = !self.show_tokens;
                format!("token listing {}\n", on_off(self.show_tokens))
            }
            ":grammar" => display::grammar_text(self.session.grammar()),
            ":factorized" => display::factorized_text(self.session.grammar()),
            ":automaton" => format!("{}\n", self.session.finite_automaton()),
            ":pushdown" => format!("{}\n", self.session.pushdown_automaton()),
            ":trace" => {
                let tracer = self.session.tracer_mut();
                if tracer.is_enabled() {
                    tracer.disable();
                } else {
                    tracer.enable();
                }
                format!("tracing {}\n", on_off(tracer.is_enabled()))
            }
            other => {
                return Err(Error::internal(format!(
                    "unknown command '{other}', try :help"
                )));
            }
        };
        Ok(out)
    }
}

/// `:name` lines are commands; scripts may still start with a terminal like `:=`.
fn is_command(line: &str) -> bool {
    line.strip_prefix(':')
        .is_some_and(|rest| rest.starts_with(char::is_alphabetic))
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

// =============================================================================
// Tests
// =============================================================================
