#![deny(unsafe_code)]

//! Précis core: extractive summarization.
//!
//! The [`SummaryEngine`] turns a document into a summary made of its
//! highest-scoring sentences, and [`count_words`] measures both sides. Hosts
//! (the CLI and the TUI) go through [`job`] to validate input and to run the
//! engine off their interactive thread.

/// Compile-time build metadata (version, git hash, profile).
pub mod build_info;
/// Host-side summary jobs: validation, background execution, progress.
pub mod job;
/// In-memory log collector for the TUI.
pub mod logging;
/// Sentence splitting, frequency scoring, and selection.
pub mod summarizer;
/// Word counting.
pub mod words;

pub use job::{JobError, JobEvent, JobUpdate, SummaryOutcome, SummaryRequest};
pub use logging::{LogCollector, LogEntry, LogReader};
pub use summarizer::{Analysis, Stage, SummaryEngine, summarize};
pub use words::count_words;
