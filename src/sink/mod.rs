// src/sink/mod.rs

//! Line-oriented output sinks for visited vertex ids.
//!
//! Concurrent branches emit through a shared sink, so every implementation
//! must keep single lines intact. Relative order of near-simultaneous visits
//! is not guaranteed.

use std::fmt::Debug;
use std::io::{self, Write};

pub mod memory;

pub use memory::MemorySink;

/// Abstract output sink for visit records.
pub trait VisitSink: Send + Sync + Debug {
    /// Write one line containing `vertex`.
    fn emit(&self, vertex: &str) -> io::Result<()>;
}

/// Implementation that writes to the process's stdout.
///
/// Each line is written while holding the stdout lock.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl VisitSink for StdoutSink {
    fn emit(&self, vertex: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{vertex}")?;
        out.flush()
    }
}

impl<S: VisitSink + ?Sized> VisitSink for std::sync::Arc<S> {
    fn emit(&self, vertex: &str) -> io::Result<()> {
        (**self).emit(vertex)
    }
}
