//! Observability events emitted during `correct()`.
//!
//! The core emits, it does not format: sinks are pluggable observers
//! registered on the Corrector. Observers must not block; the matcher calls
//! them inline. `EventBuffer` is the in-memory sink used by tests.
//!
//! `trace_id` is a per-call value drawn from a process-wide counter. It is
//! carried by value in every event of that call and never stored on the
//! Corrector.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

static TRACE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_trace_id() -> u64 {
    TRACE_COUNTER.fetch_add(1, Ordering::Relaxed) + 1
}

/// Which check rejected a candidate (evaluation-mode diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedCheck {
    Exclusion,
    MissingKeyword,
    Tolerance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An accepted rewrite. `start`/`end` are byte offsets into the input.
    Correction {
        trace_id: u64,
        start: usize,
        end: usize,
        surface: String,
        canonical: String,
        score: f64,
    },
    /// A phonetic conversion failed on a sub-span; the window was treated
    /// as non-matching.
    FuzzyError {
        trace_id: u64,
        span: String,
        reason: String,
    },
    /// The corrector is passing text through unchanged.
    Degraded { trace_id: u64, reason: String },
    /// Evaluation-mode diagnostic for a rejected high-similarity candidate.
    Warning {
        trace_id: u64,
        start: usize,
        end: usize,
        canonical: String,
        check: RejectedCheck,
    },
}

impl Event {
    pub fn trace_id(&self) -> u64 {
        match self {
            Event::Correction { trace_id, .. }
            | Event::FuzzyError { trace_id, .. }
            | Event::Degraded { trace_id, .. }
            | Event::Warning { trace_id, .. } => *trace_id,
        }
    }
}

/// Non-suspending callback interface. Implementations must be cheap; the
/// matcher never yields to an observer.
pub trait EventObserver: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// In-memory observer for tests and evaluation harnesses.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Mutex<Vec<Event>>,
}

impl EventBuffer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Copy out everything observed so far.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Event> {
        self.events.lock().map(|mut e| std::mem::take(&mut *e)).unwrap_or_default()
    }

    pub fn corrections(&self) -> Vec<Event> {
        self.snapshot()
            .into_iter()
            .filter(|e| matches!(e, Event::Correction { .. }))
            .collect()
    }
}

impl EventObserver for EventBuffer {
    fn on_event(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_ids_are_fresh() {
        let a = next_trace_id();
        let b = next_trace_id();
        assert!(b > a);
    }

    #[test]
    fn buffer_collects_and_drains() {
        let buf = EventBuffer::new();
        buf.on_event(&Event::Degraded {
            trace_id: 1,
            reason: "test".into(),
        });
        assert_eq!(buf.snapshot().len(), 1);
        assert_eq!(buf.take().len(), 1);
        assert!(buf.snapshot().is_empty());
    }
}
