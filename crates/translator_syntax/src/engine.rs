//! Depth-first search shared by both syntax strategies.
//!
//! A [`Cursor`] says what can happen at a position of the grammar: which token
//! moves where, which nonterminals can be entered, whether the position may
//! end. [`Search`] drives a cursor with an explicit work stack and keeps a
//! trace of how far each branch got, so a rejection is reported at the
//! furthest point any branch reached.

use std::borrow::Cow;

use im::Vector;

use translator_debug::Tracer;
use translator_foundation::{
    Diagnostic, DiagnosticKind, DiagnosticTag, Error, ErrorKind, NodeId, ParsedToken, Result,
    SyntaxOptions, format_expected,
};

use crate::analyzer::SyntaxOutcome;

// =============================================================================
// Cursor
// =============================================================================

/// A nonterminal case at some position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Dive<P> {
    /// The nonterminal key, for tracing.
    pub node: NodeId,
    /// Position entered.
    pub entered: P,
    /// Position resumed once the entered one finishes.
    pub continuation: Option<P>,
}

/// Read-only view of a grammar for the search.
pub(crate) trait Cursor {
    type Position: Copy + Eq;

    fn start(&self) -> Self::Position;

    fn is_interruptable(&self, at: Self::Position) -> bool;

    /// Loop position pushed whenever `at` is entered.
    fn recursion(&self, at: Self::Position) -> Option<Self::Position>;

    /// Where the token case for `token` continues: `None` if `at` has no such
    /// case, `Some(None)` if the derivation ends after it.
    fn step(&self, at: Self::Position, token: NodeId) -> Option<Option<Self::Position>>;

    /// Nonterminal cases, in grammar order.
    fn dives(&self, at: Self::Position, out: &mut Vec<Dive<Self::Position>>);

    /// Token names acceptable at `at`, nonterminal keys expanded one level.
    fn expected(&self, at: Self::Position, out: &mut Vec<String>);
}

// =============================================================================
// Search
// =============================================================================

#[derive(Clone, Debug)]
struct Frame<P: Clone> {
    token: usize,
    at: P,
    stack: Vector<P>,
    /// Moves made since the last consumed token.
    idle: usize,
}

/// How far one branch got.
#[derive(Clone, Copy, Debug)]
struct Entry<P> {
    position: usize,
    /// Token at `position`; `None` at the end of the script.
    token: Option<usize>,
    /// Where expectations come from; `None` when only the end of the script
    /// would do.
    expects: Option<P>,
}

/// Runs `cursor` over `tokens` with the preconditions both strategies share.
pub(crate) fn analyze<C: Cursor>(
    cursor: &C,
    tokens: &[ParsedToken],
    options: &SyntaxOptions,
    tracer: &mut Tracer,
) -> Result<SyntaxOutcome> {
    let tokens: Cow<'_, [ParsedToken]> = if options.ignore_undefined_tokens {
        Cow::Owned(tokens.iter().filter(|t| !t.is_undefined()).cloned().collect())
    } else {
        Cow::Borrowed(tokens)
    };

    Search {
        cursor,
        tokens: &tokens,
        max_depth: options.max_depth,
    }
    .run(tracer)
}

struct Search<'a, C: Cursor> {
    cursor: &'a C,
    tokens: &'a [ParsedToken],
    max_depth: usize,
}

impl<C: Cursor> Search<'_, C> {
    fn run(&self, tracer: &mut Tracer) -> Result<SyntaxOutcome> {
        let Some(last) = self.tokens.last() else {
            return Ok(Self::reject(Diagnostic::no_tokens(), tracer));
        };
        let end_of_script = last.end_position();

        let mut entries: Vec<Entry<C::Position>> = Vec::new();
        let mut dives = Vec::new();
        let mut successors = Vec::new();
        let mut work = vec![self.enter(0, self.cursor.start(), Vector::new(), 0)?];
        let mut steps = 0;

        while let Some(Frame { token, at, stack, idle }) = work.pop() {
            steps += 1;
            successors.clear();

            match self.tokens.get(token) {
                None => {
                    if stack.is_empty() && self.cursor.is_interruptable(at) {
                        return Ok(Self::accept(steps, tracer));
                    }
                    entries.push(Entry {
                        position: end_of_script,
                        token: None,
                        expects: Some(at),
                    });
                }
                Some(current) => {
                    let Some(id) = current.id else {
                        return Ok(Self::reject(self.undefined(current, at), tracer));
                    };
                    entries.push(Entry {
                        position: current.in_string_position(),
                        token: Some(token),
                        expects: Some(at),
                    });

                    match self.cursor.step(at, id) {
                        Some(Some(next)) => successors.push(Frame {
                            token: token + 1,
                            at: next,
                            stack: stack.clone(),
                            idle: 0,
                        }),
                        Some(None) => {
                            let mut rest = stack.clone();
                            match rest.pop_back() {
                                Some(top) => successors.push(Frame {
                                    token: token + 1,
                                    at: top,
                                    stack: rest,
                                    idle: 0,
                                }),
                                None => match self.tokens.get(token + 1) {
                                    None => return Ok(Self::accept(steps, tracer)),
                                    Some(trailing) => entries.push(Entry {
                                        position: trailing.in_string_position(),
                                        token: Some(token + 1),
                                        expects: None,
                                    }),
                                },
                            }
                        }
                        None => {}
                    }
                }
            }

            dives.clear();
            self.cursor.dives(at, &mut dives);
            for dive in &dives {
                tracer.syntax_dive(token, dive.node);
                let mut inner = stack.clone();
                if let Some(continuation) = dive.continuation {
                    inner.push_back(continuation);
                }
                successors.push(self.enter(token, dive.entered, inner, idle + 1)?);
            }

            if self.cursor.is_interruptable(at) {
                let mut rest = stack;
                if let Some(top) = rest.pop_back() {
                    successors.push(Frame {
                        token,
                        at: top,
                        stack: rest,
                        idle: idle + 1,
                    });
                }
            }

            if successors.is_empty() {
                tracer.syntax_backtrack(token);
            }
            work.extend(successors.drain(..).rev());
        }

        Ok(Self::reject(self.diagnose(&entries), tracer))
    }

    /// Frame for entering `at`, with its recursion loop pushed.
    fn enter(
        &self,
        token: usize,
        at: C::Position,
        mut stack: Vector<C::Position>,
        idle: usize,
    ) -> Result<Frame<C::Position>> {
        if let Some(repeat) = self.cursor.recursion(at) {
            stack.push_back(repeat);
        }
        if stack.len() > self.max_depth || idle > self.max_depth {
            return Err(Error::new(ErrorKind::DepthExceeded(self.max_depth)));
        }
        Ok(Frame {
            token,
            at,
            stack,
            idle,
        })
    }

    fn accept(steps: usize, tracer: &mut Tracer) -> SyntaxOutcome {
        tracer.syntax_success(steps);
        SyntaxOutcome::Accepted { steps }
    }

    fn reject(diagnostic: Diagnostic, tracer: &mut Tracer) -> SyntaxOutcome {
        tracer.syntax_error(diagnostic.position, &diagnostic.message);
        SyntaxOutcome::Rejected(diagnostic)
    }

    // -------------------------------------------------------------------------
    // Diagnosis
    // -------------------------------------------------------------------------

    fn expected_at(&self, positions: impl IntoIterator<Item = C::Position>) -> Vec<String> {
        let mut expected = Vec::new();
        for at in positions {
            self.cursor.expected(at, &mut expected);
        }
        expected.sort();
        expected.dedup();
        expected
    }

    fn undefined(&self, token: &ParsedToken, at: C::Position) -> Diagnostic {
        Diagnostic::new(
            DiagnosticTag::Syntax,
            DiagnosticKind::UndefinedToken,
            format!("Undefined token {token}"),
        )
        .with_token(token.clone())
        .at(token.in_string_position())
        .with_expected(self.expected_at([at]))
    }

    /// Reports the furthest position any branch reached.
    fn diagnose(&self, entries: &[Entry<C::Position>]) -> Diagnostic {
        let furthest = entries.iter().map(|e| e.position).max().unwrap_or(0);
        let at_furthest = || entries.iter().filter(move |e| e.position == furthest);

        let expected = self.expected_at(at_furthest().filter_map(|e| e.expects));
        let listed = if expected.is_empty() {
            "end of script".to_string()
        } else {
            format_expected(&expected)
        };

        let offending = at_furthest()
            .find_map(|e| e.token)
            .and_then(|index| self.tokens.get(index));

        let diagnostic = match offending {
            Some(token) => Diagnostic::new(
                DiagnosticTag::Syntax,
                DiagnosticKind::UnexpectedToken,
                format!("Unexpected token {token}. Expected: {listed}"),
            )
            .with_token(token.clone()),
            None => {
                let diagnostic = Diagnostic::new(
                    DiagnosticTag::Syntax,
                    DiagnosticKind::UnexpectedEndOfScript,
                    format!("Unexpected end of script. Expected: {listed}"),
                );
                match self.tokens.last() {
                    Some(last) => diagnostic.with_token(last.clone()),
                    None => diagnostic,
                }
            }
        };
        diagnostic.at(furthest).with_expected(expected)
    }
}

// =============================================================================
// Tests
// =============================================================================
