//! In-memory log capture for the TUI Logs panel.
//!
//! [`LogCollector`] is a `tracing` layer that records events, including their
//! structured fields, into a bounded ring buffer. [`LogReader`] hands out
//! snapshots of that buffer.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// A single captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Seconds since the collector was created.
    pub elapsed_secs: f64,
    pub level: Level,
    /// Module path the event came from.
    pub target: String,
    pub message: String,
    /// Structured fields other than `message`, in recording order.
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Fields rendered as `key=value` pairs separated by spaces.
    pub fn fields_display(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug)]
struct RingBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    started: Instant,
}

impl RingBuffer {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            started: Instant::now(),
        }
    }

    fn push(&mut self, level: Level, target: String, visitor: FieldVisitor) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            elapsed_secs: self.started.elapsed().as_secs_f64(),
            level,
            target,
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// A `tracing` layer that captures events into a shared ring buffer.
///
/// Attach it to a `tracing_subscriber` registry alongside the usual layers.
#[derive(Debug, Clone)]
pub struct LogCollector {
    buffer: Arc<Mutex<RingBuffer>>,
}

impl LogCollector {
    /// Create a collector keeping at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(RingBuffer::new(capacity))),
        }
    }

    pub fn reader(&self) -> LogReader {
        LogReader {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl<S: Subscriber> Layer<S> for LogCollector {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        if let Ok(mut buf) = self.buffer.lock() {
            buf.push(*metadata.level(), metadata.target().to_string(), visitor);
        }
    }
}

/// A read handle for the log buffer.
#[derive(Debug, Clone)]
pub struct LogReader {
    buffer: Arc<Mutex<RingBuffer>>,
}

impl LogReader {
    /// Snapshot of all captured entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .map(|buf| buf.entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().map(|buf| buf.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries retained.
    pub fn capacity(&self) -> usize {
        self.buffer.lock().map(|buf| buf.capacity).unwrap_or(0)
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn record(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    #[test]
    fn test_captures_level_and_message() {
        let collector = LogCollector::new(100);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        tracing::info!("summary requested");
        tracing::warn!("empty input");

        let entries = reader.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[0].message, "summary requested");
        assert_eq!(entries[1].level, Level::WARN);
    }

    #[test]
    fn test_captures_structured_fields() {
        let collector = LogCollector::new(10);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        tracing::debug!(sentences = 4, theme = "dark", "document analyzed");

        let entries = reader.entries();
        assert_eq!(entries[0].message, "document analyzed");
        assert_eq!(entries[0].fields_display(), "sentences=4 theme=dark");
    }

    #[test]
    fn test_engine_events_are_captured() {
        let collector = LogCollector::new(10);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        crate::summarize("One. Two. Three. Four.");

        let entries = reader.entries();
        let analyzed = entries
            .iter()
            .find(|e| e.message == "document analyzed")
            .expect("engine logs its analysis");
        assert!(analyzed.fields_display().contains("sentences=4"));
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let collector = LogCollector::new(3);
        let reader = collector.reader();
        let _guard = tracing_subscriber::registry().with(collector).set_default();

        for word in ["one", "two", "three", "four"] {
            tracing::info!("{word}");
        }

        let entries = reader.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "two");
        assert_eq!(reader.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let collector = LogCollector::new(0);
        let reader = collector.reader();
        assert!(reader.is_empty());
        assert_eq!(reader.capacity(), 1);
    }
}
