//! Tokenization over the finite automaton.
//!
//! The token parser walks the script one character at a time. A character
//! whose class has a transition from the current state is appended to the
//! buffer; otherwise the buffer is emitted as a token and the same character
//! is tried again from the start state. Whatever remains buffered at the end
//! of the script is emitted as the last token.

use translator_automaton::FiniteAutomaton;
use translator_debug::Tracer;
use translator_foundation::{Diagnostic, LexerOptions, ParsedToken, Position, StateId};
use translator_grammar::{Grammar, SymbolCategory};

// =============================================================================
// Lex Result
// =============================================================================

/// Tokens of a script and the lexical problems found along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexResult {
    /// Tokens in script order, undefined ones included.
    pub tokens: Vec<ParsedToken>,
    /// One diagnostic per undefined token, or one for an empty script.
    pub diagnostics: Vec<Diagnostic>,
}

impl LexResult {
    /// Returns true if no diagnostics were produced.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// =============================================================================
// Token Parser
// =============================================================================

/// Splits scripts into tokens of one grammar.
#[derive(Clone, Debug)]
pub struct TokenParser<'a> {
    grammar: &'a Grammar,
    automaton: &'a FiniteAutomaton,
    options: LexerOptions,
}

impl<'a> TokenParser<'a> {
    /// Creates a token parser for `grammar` driven by `automaton`.
    #[must_use]
    pub fn new(grammar: &'a Grammar, automaton: &'a FiniteAutomaton, options: LexerOptions) -> Self {
        Self {
            grammar,
            automaton,
            options,
        }
    }

    /// Tokenizes a script.
    #[must_use]
    pub fn parse(&self, script: &str) -> LexResult {
        self.parse_traced(script, &mut Tracer::disabled())
    }

    /// Tokenizes a script, recording each step in `tracer`.
    pub fn parse_traced(&self, script: &str, tracer: &mut Tracer) -> LexResult {
        let mut result = LexResult::default();
        if script.trim().is_empty() {
            result.diagnostics.push(Diagnostic::empty_script());
            return result;
        }

        let table = self.automaton.class_table();
        let start = self.automaton.start_state();
        let mut state = start;
        let mut buffer = String::new();
        let mut cursor = Position::default();

        for symbol in script.chars() {
            loop {
                let info = table.symbol_info(symbol);
                let link = info
                    .class
                    .and_then(|class| self.automaton.state(state).and_then(|s| s.link(class)));

                if let Some(next) = link {
                    tracer.lexer_step(symbol, state, Some(next));
                    buffer.push(symbol);
                    state = next;
                    break;
                }

                if buffer.is_empty() {
                    if info.category == SymbolCategory::Undefined {
                        let token = ParsedToken::undefined(symbol.to_string(), cursor);
                        Self::emit(&mut result, token, tracer);
                    }
                    break;
                }

                tracer.lexer_step(symbol, state, None);
                let origin = cursor.back(buffer.chars().count());
                let token = self.resolve(&buffer, state, origin);
                Self::emit(&mut result, token, tracer);
                buffer.clear();
                state = start;
            }
            self.advance(&mut cursor, symbol);
        }

        if !buffer.is_empty() {
            let origin = cursor.back(buffer.chars().count());
            let token = self.resolve(&buffer, state, origin);
            Self::emit(&mut result, token, tracer);
        }

        result
    }

    fn emit(result: &mut LexResult, token: ParsedToken, tracer: &mut Tracer) {
        tracer.token_emitted(&token);
        if token.is_undefined() {
            result.diagnostics.push(Diagnostic::undefined_lexeme(&token));
        }
        result.tokens.push(token);
    }

    /// Names the buffered text: a listed terminal first, then the token the
    /// state accepts, else undefined.
    fn resolve(&self, buffer: &str, state: StateId, position: Position) -> ParsedToken {
        let accepted = self.automaton.state(state).and_then(|s| s.token.as_ref());
        let unclassified = self.automaton.class_table().unclassified_token_class_name();

        if let Some(id) = self.grammar.terminal_by_name(buffer) {
            let class = self
                .grammar
                .node(id)
                .as_terminal()
                .map(|t| t.token_class_id)
                .unwrap_or_default();
            return ParsedToken::new(buffer, id, class, position);
        }

        match accepted {
            Some(token) if token.class != unclassified => {
                match self.grammar.token_by_name(&token.name) {
                    Some(id) => {
                        let class = self
                            .grammar
                            .node(id)
                            .token_tag()
                            .map(|t| t.token_class_id)
                            .unwrap_or_default();
                        ParsedToken::new(buffer, id, class, position)
                    }
                    None => ParsedToken::undefined(buffer, position),
                }
            }
            _ => ParsedToken::undefined(buffer, position),
        }
    }

    fn advance(&self, cursor: &mut Position, symbol: char) {
        cursor.in_string_position += 1;
        match symbol {
            '\t' => cursor.in_row_position += self.options.tab_width,
            '\n' => cursor.row_index += 1,
            '\r' => cursor.in_row_position = 0,
            _ => cursor.in_row_position += 1,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
