//! Tooling primitives for observing the simulation tick by tick.
//!
//! Kept engine-agnostic: a presentation layer can record events into a
//! [`VecTraceSink`], forward them to `tracing`, or drop them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{tags, LogTraceSink, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink};
