// src/sink/memory.rs

use std::io;
use std::sync::{Arc, Mutex};

use super::VisitSink;

/// In-memory sink that records emitted lines in order.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to the hooks.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VisitSink for MemorySink {
    fn emit(&self, vertex: &str) -> io::Result<()> {
        let mut guard = self
            .lines
            .lock()
            .map_err(|_| io::Error::other("memory sink lock poisoned"))?;
        guard.push(vertex.to_string());
        Ok(())
    }
}
