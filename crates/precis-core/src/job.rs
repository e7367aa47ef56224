//! Summary jobs: the boundary between a host UI and the engine.
//!
//! A host validates input by building a [`SummaryRequest`], then either runs
//! it inline with [`SummaryRequest::run`] or hands it to [`spawn_summary`],
//! which computes it on the blocking pool and streams [`JobEvent`]s back.
//!
//! Jobs cannot be interrupted. A host that no longer wants a result drops it
//! when it arrives, matching on the job id carried by every [`JobUpdate`].

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::summarizer::{Analysis, Stage, SummaryEngine};
use crate::words::count_words;

/// Failures a host reports to its user. The engine itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobError {
    #[error("Please enter text to summarize.")]
    EmptyInput,

    /// The worker task panicked or was cancelled. Under the release
    /// profile's `panic = "abort"` a panic ends the process instead.
    #[error("an error occurred while generating the summary: {0}")]
    Failed(String),
}

/// Validated, trimmed input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    text: String,
}

impl SummaryRequest {
    /// Accept `text` unless it is empty or whitespace-only.
    pub fn new(text: impl AsRef<str>) -> Result<Self, JobError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            warn!("rejected empty summary request");
            return Err(JobError::EmptyInput);
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn run(&self) -> SummaryOutcome {
        self.run_with_progress(|_| {})
    }

    /// Summarize and count words, reporting each completed stage.
    pub fn run_with_progress(&self, mut on_stage: impl FnMut(Stage)) -> SummaryOutcome {
        let analysis = SummaryEngine::new().analyze_with_progress(&self.text, &mut on_stage);
        let outcome = SummaryOutcome::from_analysis(&self.text, &analysis);
        on_stage(Stage::Rendering);

        debug!(
            input_words = outcome.input_words,
            summary_words = outcome.summary_words,
            selected = outcome.selected_count,
            "summary ready"
        );
        outcome
    }
}

/// Everything a host displays after a successful job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryOutcome {
    pub summary: String,
    pub input_words: usize,
    pub summary_words: usize,
    pub sentence_count: usize,
    pub selected_count: usize,
}

impl SummaryOutcome {
    /// Render `analysis` of `text` and count the words on both sides.
    pub fn from_analysis(text: &str, analysis: &Analysis<'_>) -> Self {
        let summary = analysis.render();
        Self {
            input_words: count_words(text),
            summary_words: count_words(summary.as_str()),
            sentence_count: analysis.sentences.len(),
            selected_count: analysis.selected().len(),
            summary,
        }
    }
}

/// Identifier a host assigns to each job it spawns.
pub type JobId = u64;

/// Progress or completion of a background job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Progress(Stage),
    Finished(Result<SummaryOutcome, JobError>),
}

/// A [`JobEvent`] tagged with the job it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct JobUpdate {
    pub job: JobId,
    pub event: JobEvent,
}

/// Run `request` on the blocking pool, sending progress and the final result
/// to `updates`. Exactly one [`JobEvent::Finished`] is sent per job.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_summary(
    job: JobId,
    request: SummaryRequest,
    updates: mpsc::UnboundedSender<JobUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let progress = updates.clone();
        let work = tokio::task::spawn_blocking(move || {
            request.run_with_progress(|stage| {
                let _ = progress.send(JobUpdate {
                    job,
                    event: JobEvent::Progress(stage),
                });
            })
        });

        let result = work.await.map_err(|e| {
            warn!(job, error = %e, "summary task failed");
            JobError::Failed(e.to_string())
        });
        // The host may have gone away; nothing left to notify.
        let _ = updates.send(JobUpdate {
            job,
            event: JobEvent::Finished(result),
        });
    })
}

/// Run `request` on the blocking pool and wait for its outcome.
pub async fn run_in_background(request: SummaryRequest) -> Result<SummaryOutcome, JobError> {
    tokio::task::spawn_blocking(move || request.run())
        .await
        .map_err(|e| JobError::Failed(e.to_string()))
}
