//! Tracing for the translator.
//!
//! This crate provides:
//! - [`Tracer`] - records pipeline events per channel
//! - [`TraceBuffer`] - the ring buffer behind it
//! - [`HumanFormatter`] and [`JsonFormatter`] - record output

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    Channel, HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceEvent, TraceFormatter,
    TraceOutput, TraceRecord, Tracer, TracerConfig,
};
