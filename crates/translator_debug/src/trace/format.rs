//! Trace output formatters.

use std::fmt::Write;

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }

    fn describe(event: &TraceEvent) -> String {
        match event {
            TraceEvent::GrammarCompiled {
                nodes,
                factors,
                left_recursion,
            } => {
                let recursion = if *left_recursion { ", left recursion kept" } else { "" };
                format!("GRAMMAR {nodes} nodes, {factors} factors{recursion}")
            }
            TraceEvent::FiniteAutomatonBuilt { states } => format!("FINITE {states} states"),
            TraceEvent::PushdownCompiled { states } => format!("PUSHDOWN {states} states"),
            TraceEvent::LexerStep { symbol, from, to } => match to {
                Some(to) => format!("  STEP {symbol:?} {from} -> {to}"),
                None => format!("  STEP {symbol:?} {from} -> emit"),
            },
            TraceEvent::TokenEmitted { token } => {
                let id = token.id.map_or_else(|| "undefined".to_string(), |id| id.to_string());
                format!("  TOKEN {token} {id}")
            }
            TraceEvent::SyntaxDive { token_index, node } => format!("  DIVE {node} @{token_index}"),
            TraceEvent::SyntaxBacktrack { token_index } => format!("  BACKTRACK @{token_index}"),
            TraceEvent::SyntaxSuccess { steps } => format!("ACCEPTED after {steps} steps"),
            TraceEvent::SyntaxError { position, message } => {
                format!("REJECTED at {position}: {message}")
            }
            TraceEvent::Custom { message, .. } => format!("  NOTE {message}"),
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut prefix = String::new();

        if self.show_ids {
            let _ = write!(prefix, "[{:06}] ", record.id);
        }

        let _ = write!(prefix, "R{:04} {:<9} ", record.run, record.channel());

        if self.show_timestamps {
            let _ = write!(
                prefix,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        format!("{prefix}{}", Self::describe(&record.event))
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print JSON.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn event_fields(event: &TraceEvent) -> String {
        match event {
            TraceEvent::GrammarCompiled {
                nodes,
                factors,
                left_recursion,
            } => format!("\"nodes\":{nodes},\"factors\":{factors},\"left_recursion\":{left_recursion}"),
            TraceEvent::FiniteAutomatonBuilt { states } | TraceEvent::PushdownCompiled { states } => {
                format!("\"states\":{states}")
            }
            TraceEvent::LexerStep { symbol, from, to } => {
                let to = to.map_or_else(|| "null".to_string(), |s| s.index().to_string());
                format!(
                    "\"symbol\":\"{}\",\"from\":{},\"to\":{to}",
                    Self::escape_string(&symbol.to_string()),
                    from.index()
                )
            }
            TraceEvent::TokenEmitted { token } => {
                let id = token.id.map_or_else(|| "null".to_string(), |id| id.index().to_string());
                format!(
                    "\"name\":\"{}\",\"id\":{id},\"class\":{},\"position\":{}",
                    Self::escape_string(&token.name),
                    token.token_class_id.0,
                    token.in_string_position()
                )
            }
            TraceEvent::SyntaxDive { token_index, node } => {
                format!("\"token_index\":{token_index},\"node\":{}", node.index())
            }
            TraceEvent::SyntaxBacktrack { token_index } => format!("\"token_index\":{token_index}"),
            TraceEvent::SyntaxSuccess { steps } => format!("\"steps\":{steps}"),
            TraceEvent::SyntaxError { position, message } => format!(
                "\"position\":{position},\"message\":\"{}\"",
                Self::escape_string(message)
            ),
            TraceEvent::Custom { message, .. } => {
                format!("\"message\":\"{}\"", Self::escape_string(message))
            }
        }
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        format!(
            "{{\"id\":{},\"run\":{},\"timestamp_ns\":{},\"channel\":\"{}\",\"type\":\"{}\",{}}}",
            record.id,
            record.run,
            record.timestamp_ns,
            record.channel(),
            record.event_type(),
            Self::event_fields(&record.event)
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
