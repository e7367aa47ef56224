//! Summarizer panel: input passage, generated summary, word counts.

use precis_core::job::JobId;
use precis_core::{Stage, SummaryOutcome};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use super::PanelState;
use crate::theme::Theme;

/// State of the job the panel is waiting on.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    job: JobId,
    /// Last completed stage, if any.
    stage: Option<Stage>,
}

/// Side-by-side input and summary panes.
pub struct SummarizerPanel {
    input: String,
    summary: String,
    input_words: usize,
    summary_words: usize,
    pending: Option<Pending>,
    error: Option<String>,
    scroll_offset: usize,
}

impl SummarizerPanel {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            summary: String::new(),
            input_words: 0,
            summary_words: 0,
            pending: None,
            error: None,
            scroll_offset: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Word counts shown under the input and summary panes.
    pub fn word_counts(&self) -> (usize, usize) {
        (self.input_words, self.summary_words)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn delete_back(&mut self) {
        self.input.pop();
    }

    /// Append pasted text, normalizing line endings.
    pub fn paste(&mut self, text: &str) {
        self.input.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
    }

    /// Reset everything and forget any job in flight.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// The job whose results this panel will accept.
    pub fn pending_job(&self) -> Option<JobId> {
        self.pending.map(|p| p.job)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn begin(&mut self, job: JobId) {
        self.pending = Some(Pending { job, stage: None });
        self.error = None;
    }

    pub fn record_stage(&mut self, stage: Stage) {
        if let Some(pending) = &mut self.pending {
            pending.stage = Some(stage);
        }
    }

    /// Completed fraction of the pending job, 0.0 when idle.
    pub fn progress(&self) -> f64 {
        self.pending
            .and_then(|p| p.stage)
            .map(Stage::fraction)
            .unwrap_or(0.0)
    }

    pub fn finish(&mut self, outcome: SummaryOutcome) {
        self.pending = None;
        self.summary = outcome.summary;
        self.input_words = outcome.input_words;
        self.summary_words = outcome.summary_words;
    }

    /// Show `message` and leave the previous summary and counts in place.
    pub fn fail(&mut self, message: String) {
        self.pending = None;
        self.error = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn line_count(&self) -> usize {
        self.input.lines().count().max(self.summary.lines().count())
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        editing: bool,
        show_progress: bool,
    ) {
        let gauge_height = if show_progress && self.is_busy() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(gauge_height)])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);
        let scroll = (u16::try_from(self.scroll_offset).unwrap_or(u16::MAX), 0);

        let input_title = if editing {
            " Input Passage [editing] "
        } else {
            " Input Passage "
        };
        let input_text = if editing {
            Text::styled(format!("{}█", self.input), theme.base())
        } else if self.input.is_empty() {
            Text::styled("  press i to type or paste a passage", theme.muted())
        } else {
            Text::styled(self.input.as_str(), theme.base())
        };
        let input = Paragraph::new(input_text)
            .block(theme.block(input_title, editing).title_bottom(word_count_line(self.input_words)))
            .wrap(Wrap { trim: false })
            .scroll(scroll);
        frame.render_widget(input, panes[0]);

        let summary_text = if self.summary.is_empty() {
            Text::styled("  press s to summarize", theme.muted())
        } else {
            Text::styled(self.summary.as_str(), theme.base())
        };
        let summary = Paragraph::new(summary_text)
            .block(
                theme
                    .block(" Generated Summary ", false)
                    .title_bottom(word_count_line(self.summary_words)),
            )
            .wrap(Wrap { trim: false })
            .scroll(scroll);
        frame.render_widget(summary, panes[1]);

        if gauge_height > 0 {
            let label = self
                .pending
                .and_then(|p| p.stage)
                .map(Stage::label)
                .unwrap_or("starting");
            let gauge = Gauge::default()
                .block(theme.block(" Summarizing ", false))
                .gauge_style(Style::default().fg(theme.accent).bg(theme.background))
                .ratio(self.progress())
                .label(label);
            frame.render_widget(gauge, chunks[1]);
        }

        if let Some(message) = &self.error {
            let popup = centered_rect(50, 5, area);
            let dialog = Paragraph::new(message.as_str())
                .style(theme.base())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(" Error ")
                        .title_bottom(Line::from(" Esc to dismiss ").right_aligned())
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.error)),
                );
            frame.render_widget(Clear, popup);
            frame.render_widget(dialog, popup);
        }
    }
}

impl Default for SummarizerPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelState for SummarizerPanel {
    fn scroll_down(&mut self, n: usize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max);
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.line_count().saturating_sub(1);
    }
}

fn word_count_line(count: usize) -> Line<'static> {
    Line::from(format!(" Word Count: {count} ")).right_aligned()
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use precis_core::SummaryRequest;
    use precis_test_utils::documents;

    #[test]
    fn test_new_panel_is_empty() {
        let panel = SummarizerPanel::new();
        assert_eq!(panel.input(), "");
        assert_eq!(panel.summary(), "");
        assert_eq!(panel.word_counts(), (0, 0));
        assert!(!panel.is_busy());
    }

    #[test]
    fn test_editing() {
        let mut panel = SummarizerPanel::new();
        for c in "Hi!".chars() {
            panel.insert_char(c);
        }
        panel.delete_back();
        assert_eq!(panel.input(), "Hi");

        panel.paste(" there.\r\nNext line.\rLast.");
        assert_eq!(panel.input(), "Hi there.\nNext line.\nLast.");
    }

    #[test]
    fn test_delete_back_on_empty() {
        let mut panel = SummarizerPanel::new();
        panel.delete_back();
        assert_eq!(panel.input(), "");
    }

    #[test]
    fn test_job_lifecycle() {
        let mut panel = SummarizerPanel::new();
        panel.begin(3);
        assert_eq!(panel.pending_job(), Some(3));
        assert_eq!(panel.progress(), 0.0);

        panel.record_stage(Stage::Scoring);
        assert_eq!(panel.progress(), Stage::Scoring.fraction());

        let outcome = SummaryRequest::new(documents::CAT_AND_DOG).unwrap().run();
        panel.finish(outcome);
        assert!(!panel.is_busy());
        assert_eq!(panel.summary(), "The cat sat.");
        assert_eq!(panel.word_counts(), (9, 3));
        assert_eq!(panel.progress(), 0.0);
    }

    #[test]
    fn test_failure_keeps_previous_summary() {
        let mut panel = SummarizerPanel::new();
        panel.begin(1);
        panel.finish(SummaryRequest::new(documents::CAT_AND_DOG).unwrap().run());

        panel.begin(2);
        panel.fail("boom".to_string());
        assert_eq!(panel.error(), Some("boom"));
        assert_eq!(panel.summary(), "The cat sat.");
        assert_eq!(panel.word_counts(), (9, 3));

        panel.dismiss_error();
        assert_eq!(panel.error(), None);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut panel = SummarizerPanel::new();
        panel.paste(documents::TITLED);
        panel.begin(5);
        panel.clear();
        assert_eq!(panel.input(), "");
        assert_eq!(panel.pending_job(), None);
        assert_eq!(panel.word_counts(), (0, 0));
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut panel = SummarizerPanel::new();
        panel.paste("a\nb\nc\nd");
        panel.scroll_down(10);
        assert_eq!(panel.scroll_offset, 3);
        panel.scroll_up(1);
        assert_eq!(panel.scroll_offset, 2);
        panel.scroll_to_top();
        assert_eq!(panel.scroll_offset, 0);
        panel.scroll_to_bottom();
        assert_eq!(panel.scroll_offset, 3);
    }

    #[test]
    fn test_centered_rect_clips() {
        let area = Rect::new(0, 0, 40, 4);
        let popup = centered_rect(50, 5, area);
        assert_eq!(popup, Rect::new(0, 0, 40, 4));

        let popup = centered_rect(10, 2, Rect::new(0, 0, 20, 10));
        assert_eq!(popup, Rect::new(5, 4, 10, 2));
    }
}
