//! Logs panel: live view of captured tracing events.

use precis_core::{LogEntry, LogReader};
use ratatui::{
    prelude::*,
    widgets::{List, ListItem, Paragraph},
};
use tracing::Level;

use super::PanelState;
use crate::theme::Theme;

/// Scrollable log viewer that follows new entries until scrolled up.
pub struct LogsPanel {
    reader: LogReader,
    /// Snapshot taken on the last refresh.
    entries: Vec<LogEntry>,
    /// Lines scrolled up from the newest entry.
    scroll_offset: usize,
    auto_follow: bool,
}

impl LogsPanel {
    pub fn new(reader: LogReader) -> Self {
        Self {
            reader,
            entries: Vec::new(),
            scroll_offset: 0,
            auto_follow: true,
        }
    }

    /// Refresh cached entries from the log reader.
    pub fn refresh(&mut self) {
        self.entries = self.reader.entries();
        if self.auto_follow {
            self.scroll_offset = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        if self.entries.is_empty() {
            let empty = Paragraph::new("  (no log entries yet)")
                .style(theme.muted())
                .block(theme.block(" Logs (0) ", focused));
            frame.render_widget(empty, area);
            return;
        }

        let visible_height = area.height.saturating_sub(2) as usize;
        let total = self.entries.len();
        let skip = total.saturating_sub(visible_height + self.scroll_offset);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .skip(skip)
            .take(visible_height)
            .map(|entry| {
                let mut spans = vec![
                    Span::styled(format!("{:>8.2}s ", entry.elapsed_secs), theme.muted()),
                    Span::styled(format!("{:>5} ", entry.level), level_style(entry.level, theme)),
                    Span::styled(format!("{}: ", entry.target), theme.muted()),
                    Span::styled(entry.message.as_str(), theme.base()),
                ];
                if !entry.fields.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", entry.fields_display()),
                        theme.muted(),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let follow = if self.auto_follow { " [follow]" } else { "" };
        let title = format!(" Logs ({total}){follow} ");
        let list = List::new(items).block(theme.block(title, focused));
        frame.render_widget(list, area);
    }
}

fn level_style(level: Level, theme: &Theme) -> Style {
    let color = match level {
        Level::ERROR => theme.error,
        Level::WARN => Color::Yellow,
        Level::INFO => theme.accent,
        Level::DEBUG => Color::Blue,
        Level::TRACE => theme.muted,
    };
    Style::default().fg(color)
}

impl PanelState for LogsPanel {
    fn scroll_down(&mut self, n: usize) {
        if self.scroll_offset > n {
            self.scroll_offset -= n;
        } else {
            self.scroll_offset = 0;
            self.auto_follow = true;
        }
    }

    fn scroll_up(&mut self, n: usize) {
        self.auto_follow = false;
        let max_offset = self.entries.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max_offset);
    }

    fn scroll_to_top(&mut self) {
        self.auto_follow = false;
        self.scroll_offset = self.entries.len().saturating_sub(1);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.auto_follow = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precis_core::LogCollector;
    use tracing_subscriber::layer::SubscriberExt;

    fn panel_after_summaries(count: usize) -> LogsPanel {
        let collector = LogCollector::new(1000);
        let reader = collector.reader();
        let subscriber = tracing_subscriber::registry().with(collector);
        let _guard = tracing::subscriber::set_default(subscriber);
        for i in 0..count {
            tracing::info!(job = i, "summary requested");
        }

        let mut panel = LogsPanel::new(reader);
        panel.refresh();
        panel
    }

    #[test]
    fn test_new_panel_starts_empty() {
        let panel = LogsPanel::new(LogCollector::new(10).reader());
        assert_eq!(panel.len(), 0);
        assert!(panel.auto_follow);
    }

    #[test]
    fn test_refresh_captures_entries_with_fields() {
        let panel = panel_after_summaries(5);
        assert_eq!(panel.len(), 5);
        assert_eq!(panel.entries[4].fields_display(), "job=4");
    }

    #[test]
    fn test_scroll_up_disables_follow() {
        let mut panel = panel_after_summaries(20);
        panel.scroll_up(5);
        assert!(!panel.auto_follow);
        assert_eq!(panel.scroll_offset, 5);
    }

    #[test]
    fn test_scroll_down_to_bottom_resumes_follow() {
        let mut panel = panel_after_summaries(20);
        panel.scroll_up(3);
        panel.scroll_down(10);
        assert!(panel.auto_follow);
        assert_eq!(panel.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_to_top_and_bottom() {
        let mut panel = panel_after_summaries(20);
        panel.scroll_to_top();
        assert!(!panel.auto_follow);
        assert_eq!(panel.scroll_offset, 19);

        panel.scroll_to_bottom();
        assert!(panel.auto_follow);
        assert_eq!(panel.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_up_clamped() {
        let mut panel = panel_after_summaries(5);
        panel.scroll_up(100);
        assert_eq!(panel.scroll_offset, 4);
    }

    #[test]
    fn test_refresh_keeps_offset_when_not_following() {
        let mut panel = panel_after_summaries(10);
        panel.scroll_up(2);
        panel.refresh();
        assert_eq!(panel.scroll_offset, 2);
    }
}
