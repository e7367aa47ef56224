//! Fuzz target for the summarizer.
//!
//! Run with: cargo +nightly fuzz run fuzz_summarize

#![no_main]

use libfuzzer_sys::fuzz_target;
use precis_core::{SummaryEngine, count_words};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let analysis = SummaryEngine::new().analyze(text);
    assert!(analysis.selected().len() <= analysis.summary_len);
    assert!(analysis.summary_len <= analysis.sentences.len() / 2);

    let summary = analysis.render();
    assert!(summary.ends_with('.'));
    let _ = count_words(summary.as_str());
    let _ = count_words(text);
});
