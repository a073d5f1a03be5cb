//! Tracing for the translator pipeline.
//!
//! A [`Tracer`] records what each stage did into a ring buffer, optionally
//! echoing each record to stderr. Disabled tracers return from
//! [`Tracer::record`] before doing any work.

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{Channel, TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use translator_foundation::{NodeId, ParsedToken, StateId};

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Debug, Default)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Write to stderr.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Whether to use JSON format.
    pub json_format: bool,
    /// Channels to record (empty = all).
    pub channels: Vec<Channel>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10000,
            output: TraceOutput::None,
            json_format: false,
            channels: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to use JSON format.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Builder method to record only some channels.
    #[must_use]
    pub fn only_channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = channels;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records pipeline events.
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_run: u64,
    start_time: Instant,
    human_formatter: HumanFormatter,
    json_formatter: JsonFormatter,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            current_run: 0,
            start_time: Instant::now(),
            human_formatter: HumanFormatter::new(),
            json_formatter: JsonFormatter::new(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Creates an enabled tracer that outputs to stderr.
    #[must_use]
    pub fn to_stderr() -> Self {
        Self::new(TracerConfig::new().enabled().to_stderr())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Starts a new pipeline run and returns its number.
    pub fn begin_run(&mut self) -> u64 {
        self.current_run += 1;
        self.current_run
    }

    /// Returns the current run number.
    #[must_use]
    pub fn current_run(&self) -> u64 {
        self.current_run
    }

    /// Sets whether to use JSON output format.
    pub fn set_json_format(&mut self, json: bool) {
        self.config.json_format = json;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Records a trace event.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.channels.is_empty() && !self.config.channels.contains(&event.channel()) {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.current_run, timestamp_ns, event);

        if let TraceOutput::Stderr = self.config.output {
            if let Some(record) = self.buffer.last() {
                let line = self.format_record(record);
                let _ = writeln!(io::stderr(), "{line}");
            }
        }
    }

    /// Formats a record using the current format settings.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json_formatter.format(record)
        } else {
            self.human_formatter.format(record)
        }
    }

    /// Formats multiple records.
    #[must_use]
    pub fn format_records(&self, records: &[&TraceRecord]) -> String {
        if self.config.json_format {
            self.json_formatter.format_many(records)
        } else {
            self.human_formatter.format_many(records)
        }
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Clears the records of one channel.
    pub fn clear_channel(&mut self, channel: Channel) {
        self.buffer.clear_channel(channel);
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Convenience methods for common events
    // -------------------------------------------------------------------------

    /// Records a lexer step.
    #[inline]
    pub fn lexer_step(&mut self, symbol: char, from: StateId, to: Option<StateId>) {
        self.record(TraceEvent::LexerStep { symbol, from, to });
    }

    /// Records an emitted token.
    #[inline]
    pub fn token_emitted(&mut self, token: &ParsedToken) {
        if self.is_enabled() {
            self.record(TraceEvent::TokenEmitted {
                token: token.clone(),
            });
        }
    }

    /// Records a dive into a nonterminal.
    #[inline]
    pub fn syntax_dive(&mut self, token_index: usize, node: NodeId) {
        self.record(TraceEvent::SyntaxDive { token_index, node });
    }

    /// Records an abandoned branch.
    #[inline]
    pub fn syntax_backtrack(&mut self, token_index: usize) {
        self.record(TraceEvent::SyntaxBacktrack { token_index });
    }

    /// Records an accepted script.
    #[inline]
    pub fn syntax_success(&mut self, steps: usize) {
        self.record(TraceEvent::SyntaxSuccess { steps });
    }

    /// Records a rejected script.
    #[inline]
    pub fn syntax_error(&mut self, position: usize, message: &str) {
        if self.is_enabled() {
            self.record(TraceEvent::SyntaxError {
                position,
                message: message.to_string(),
            });
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

// =============================================================================
// Tests
// =============================================================================
