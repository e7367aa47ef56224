//! Config panel: the resolved configuration as highlighted TOML.

use precis_config::AppConfig;
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::PanelState;
use crate::theme::Theme;

pub struct ConfigPanel {
    lines: Vec<String>,
    scroll_offset: usize,
}

impl ConfigPanel {
    /// Render `config` as TOML, headed by a comment naming where it came from.
    pub fn new(config: &AppConfig, source: &str) -> Self {
        let body = config
            .to_toml()
            .unwrap_or_else(|e| format!("# failed to render configuration: {e}"));
        let lines = std::iter::once(format!("# source: {source}"))
            .chain(body.lines().map(String::from))
            .collect();
        Self {
            lines,
            scroll_offset: 0,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let visible_height = area.height.saturating_sub(2) as usize;

        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(visible_height)
            .map(|line| highlight(line, theme))
            .collect();

        let title = format!(" Config ({} lines) ", self.lines.len());
        let paragraph = Paragraph::new(visible_lines)
            .block(theme.block(title, focused))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

fn highlight<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    if line.starts_with('#') {
        Line::from(Span::styled(line, theme.muted()))
    } else if line.starts_with('[') {
        Line::from(Span::styled(line, theme.accent()))
    } else if let Some((key, value)) = line.split_once(" = ") {
        Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Yellow)),
            Span::styled(" = ", theme.base()),
            Span::styled(value, Style::default().fg(theme.accent)),
        ])
    } else {
        Line::from(Span::styled(line, theme.base()))
    }
}

impl PanelState for ConfigPanel {
    fn scroll_down(&mut self, n: usize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + n).min(max);
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.lines.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precis_config::ThemeMode;
    use precis_test_utils::config::TestConfigBuilder;

    #[test]
    fn test_lines_start_with_source() {
        let panel = ConfigPanel::new(&AppConfig::default(), "defaults");
        assert_eq!(panel.lines[0], "# source: defaults");
        assert!(panel.lines.iter().any(|l| l == "[ui]"));
        assert!(panel.lines.iter().any(|l| l == "theme = \"dark\""));
    }

    #[test]
    fn test_reflects_configured_theme() {
        let config = TestConfigBuilder::new().theme(ThemeMode::Light).build();
        let panel = ConfigPanel::new(&config, "precis.toml");
        assert!(panel.lines.iter().any(|l| l == "theme = \"light\""));
    }

    #[test]
    fn test_highlight_kinds() {
        let theme = Theme::DARK;
        assert_eq!(highlight("# note", &theme).spans.len(), 1);
        assert_eq!(highlight("[ui]", &theme).spans.len(), 1);
        assert_eq!(highlight("tick_rate_ms = 100", &theme).spans.len(), 3);
    }

    #[test]
    fn test_scroll() {
        let mut panel = ConfigPanel::new(&AppConfig::default(), "defaults");
        let last = panel.lines.len() - 1;

        panel.scroll_down(2);
        assert_eq!(panel.scroll_offset, 2);
        panel.scroll_up(5);
        assert_eq!(panel.scroll_offset, 0);
        panel.scroll_to_bottom();
        assert_eq!(panel.scroll_offset, last);
        panel.scroll_down(3);
        assert_eq!(panel.scroll_offset, last);
    }
}
