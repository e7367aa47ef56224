//! Extractive summary engine.
//!
//! Splits a document into sentences, scores every sentence by the document-wide
//! frequency of its words, and keeps the top-scoring half. The selected
//! sentences are emitted in score order (highest first), not document order.
//!
//! Ties between equal scores are broken by first occurrence in the document.
//! Identical sentences share a single scoring entry, so a document that repeats
//! a sentence offers fewer candidates than it has sentences.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Titles whose trailing period never ends a sentence.
const TITLE_EXCLUSIONS: [&str; 3] = ["Mr", "Mrs", "Dr"];

/// A period followed by a run of ASCII whitespace.
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.[ \t\n\x0B\x0C\r]+").expect("sentence break pattern compiles")
});

/// A run of ASCII whitespace, the only characters that separate words.
pub(crate) static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\x0B\x0C\r]+").expect("whitespace pattern compiles"));

/// A step of the summary computation, reported once it has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Splitting,
    Counting,
    Scoring,
    Ranking,
    Rendering,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Splitting,
        Stage::Counting,
        Stage::Scoring,
        Stage::Ranking,
        Stage::Rendering,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Splitting => "splitting sentences",
            Stage::Counting => "counting words",
            Stage::Scoring => "scoring sentences",
            Stage::Ranking => "ranking sentences",
            Stage::Rendering => "rendering summary",
        }
    }

    /// Share of the work done once this stage has completed, in `(0.0, 1.0]`.
    pub fn fraction(self) -> f64 {
        let position = Self::ALL.iter().position(|&s| s == self).unwrap_or(0) + 1;
        position as f64 / Self::ALL.len() as f64
    }
}

/// Document-wide occurrence count of every normalized token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Count the tokens of every sentence into one table.
    pub fn from_sentences(sentences: &[&str]) -> Self {
        let mut counts = HashMap::new();
        for token in sentences.iter().flat_map(|s| tokens(s)) {
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of `token`; unknown tokens count zero.
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries sorted by descending count, then alphabetically.
    pub fn most_frequent(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// A candidate sentence and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredSentence<'a> {
    /// The sentence exactly as split from the document.
    pub text: &'a str,
    /// Zero-based index of its first occurrence in the document.
    pub position: usize,
    /// Sum of the frequencies of its tokens.
    pub score: usize,
}

/// Intermediate results of one summary computation.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    /// Every sentence in document order, duplicates included.
    pub sentences: Vec<&'a str>,
    pub frequencies: FrequencyTable,
    /// Distinct sentences by descending score, ties in document order.
    pub ranked: Vec<ScoredSentence<'a>>,
    /// Requested summary length: half the sentence count, rounded down.
    pub summary_len: usize,
}

impl<'a> Analysis<'a> {
    /// The sentences that make up the summary, highest score first.
    ///
    /// Shorter than `summary_len` when duplicate sentences collapsed the
    /// candidate set below it.
    pub fn selected(&self) -> &[ScoredSentence<'a>] {
        &self.ranked[..self.summary_len.min(self.ranked.len())]
    }

    /// Join the selected sentences into prose with a single trailing period.
    pub fn render(&self) -> String {
        let texts: Vec<&str> = self.selected().iter().map(|s| s.text).collect();
        format!("{}.", texts.join(". "))
    }
}

/// The summarizer. Stateless: every call builds its own tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryEngine;

impl SummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Summarize `document`. Total over all input; an empty or single-sentence
    /// document yields `"."`.
    pub fn summarize(&self, document: &str) -> String {
        self.summarize_with_progress(document, |_| {})
    }

    /// Summarize `document`, reporting each completed [`Stage`] to `on_stage`.
    pub fn summarize_with_progress(&self, document: &str, mut on_stage: impl FnMut(Stage)) -> String {
        let summary = self.analyze_with_progress(document, &mut on_stage).render();
        on_stage(Stage::Rendering);
        summary
    }

    /// Run the computation up to selection and expose its intermediate tables.
    pub fn analyze<'a>(&self, document: &'a str) -> Analysis<'a> {
        self.analyze_with_progress(document, |_| {})
    }

    /// Like [`analyze`](Self::analyze), reporting every stage but
    /// [`Stage::Rendering`].
    pub fn analyze_with_progress<'a>(
        &self,
        document: &'a str,
        mut on_stage: impl FnMut(Stage),
    ) -> Analysis<'a> {
        let sentences = split_sentences(document);
        on_stage(Stage::Splitting);

        let frequencies = FrequencyTable::from_sentences(&sentences);
        on_stage(Stage::Counting);

        let mut ranked = score_sentences(&sentences, &frequencies);
        on_stage(Stage::Scoring);

        // Stable: equal scores keep document order.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        let summary_len = sentences.len() / 2;
        on_stage(Stage::Ranking);

        debug!(
            sentences = sentences.len(),
            distinct_tokens = frequencies.len(),
            candidates = ranked.len(),
            summary_len,
            "document analyzed"
        );

        Analysis {
            sentences,
            frequencies,
            ranked,
            summary_len,
        }
    }
}

/// Summarize with a default [`SummaryEngine`].
pub fn summarize(document: &str) -> String {
    SummaryEngine::new().summarize(document)
}

/// Split `document` at every period followed by whitespace, except after the
/// titles `Mr`, `Mrs`, and `Dr`.
///
/// A document without any break is returned whole, even when empty. Otherwise
/// empty pieces at the end are dropped. The last sentence keeps a final period
/// since nothing follows it.
pub fn split_sentences(document: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for found in SENTENCE_BREAK.find_iter(document) {
        let head = &document[..found.start()];
        if TITLE_EXCLUSIONS.iter().any(|title| head.ends_with(title)) {
            continue;
        }
        sentences.push(&document[start..found.start()]);
        start = found.end();
    }

    if sentences.is_empty() {
        return vec![document];
    }
    sentences.push(&document[start..]);
    while sentences.last().is_some_and(|s| s.is_empty()) {
        sentences.pop();
    }
    sentences
}

/// Lower-case `word` and keep only ASCII letters.
///
/// Lower-casing happens first: some non-ASCII letters fold to ASCII ones.
pub fn normalize_token(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect()
}

/// Normalized, non-empty tokens of `sentence`.
pub fn tokens(sentence: &str) -> impl Iterator<Item = String> + '_ {
    WHITESPACE
        .split(sentence)
        .map(normalize_token)
        .filter(|token| !token.is_empty())
}

fn score_sentences<'a>(sentences: &[&'a str], table: &FrequencyTable) -> Vec<ScoredSentence<'a>> {
    let mut seen = HashSet::new();
    sentences
        .iter()
        .enumerate()
        .filter(|(_, text)| seen.insert(**text))
        .map(|(position, &text)| ScoredSentence {
            text,
            position,
            score: tokens(text).map(|token| table.count(&token)).sum(),
        })
        .collect()
}
