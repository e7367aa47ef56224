//! Core TUI application state and event handling.

use precis_config::AppConfig;
use precis_core::job::JobId;
use precis_core::{JobEvent, JobUpdate, LogReader, SummaryRequest, build_info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};
use tracing::{debug, error, info};

use crate::keymap::{Action, InputMode, KeyMapper};
use crate::panels::{ConfigPanel, LogsPanel, PanelState, SummarizerPanel};
use crate::theme::Theme;

/// The panels available in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Summarizer,
    Logs,
    Config,
}

impl Panel {
    pub fn title(self) -> &'static str {
        match self {
            Panel::Summarizer => "Summarizer",
            Panel::Logs => "Logs",
            Panel::Config => "Config",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Panel::Summarizer => 0,
            Panel::Logs => 1,
            Panel::Config => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Panel::Summarizer => Panel::Logs,
            Panel::Logs => Panel::Config,
            Panel::Config => Panel::Summarizer,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Panel::Summarizer => Panel::Config,
            Panel::Logs => Panel::Summarizer,
            Panel::Config => Panel::Logs,
        }
    }
}

const ALL_PANELS: [Panel; 3] = [Panel::Summarizer, Panel::Logs, Panel::Config];

/// Work the event loop must carry out after an action.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Run `request` in the background and report back as `job`.
    Spawn { job: JobId, request: SummaryRequest },
}

/// TUI application state.
pub struct App {
    pub should_quit: bool,
    pub active_panel: Panel,
    pub mode: InputMode,
    pub keymap: KeyMapper,
    /// Palette handed to every panel on render.
    pub theme: Theme,
    pub show_progress: bool,
    pub summarizer: SummarizerPanel,
    pub logs: LogsPanel,
    pub config_panel: ConfigPanel,
    last_job: JobId,
}

impl App {
    /// Create an app from `config`, loaded from `config_source`.
    pub fn new(config: &AppConfig, config_source: &str, log_reader: LogReader) -> Self {
        Self {
            should_quit: false,
            active_panel: Panel::Summarizer,
            mode: InputMode::Normal,
            keymap: KeyMapper::new(),
            theme: Theme::for_mode(config.ui.theme),
            show_progress: config.ui.show_progress,
            summarizer: SummarizerPanel::new(),
            logs: LogsPanel::new(log_reader),
            config_panel: ConfigPanel::new(config, config_source),
            last_job: 0,
        }
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) -> Effect {
        let action = self.keymap.resolve(key, self.mode);
        self.handle_action(action)
    }

    /// Pasted text always goes to the input passage.
    pub fn handle_paste(&mut self, text: &str) {
        self.active_panel = Panel::Summarizer;
        self.summarizer.paste(text);
    }

    /// Process a resolved action.
    pub fn handle_action(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPanel => self.active_panel = self.active_panel.next(),
            Action::PrevPanel => self.active_panel = self.active_panel.prev(),
            Action::GoToPanel(n) => {
                if let Some(&panel) = ALL_PANELS.get(n) {
                    self.active_panel = panel;
                }
            }
            Action::ScrollDown => self.active_panel_state_mut().scroll_down(1),
            Action::ScrollUp => self.active_panel_state_mut().scroll_up(1),
            Action::HalfPageDown => self.active_panel_state_mut().scroll_down(10),
            Action::HalfPageUp => self.active_panel_state_mut().scroll_up(10),
            Action::ScrollToTop => self.active_panel_state_mut().scroll_to_top(),
            Action::ScrollToBottom => self.active_panel_state_mut().scroll_to_bottom(),
            Action::EnterInsert => {
                self.active_panel = Panel::Summarizer;
                self.mode = InputMode::Insert;
            }
            Action::ExitInsert => self.mode = InputMode::Normal,
            Action::InsertChar(c) => self.summarizer.insert_char(c),
            Action::DeleteBack => self.summarizer.delete_back(),
            Action::Summarize => return self.start_summary(),
            Action::Clear => {
                if let Some(job) = self.summarizer.pending_job() {
                    info!(job, "abandoning summary in progress");
                }
                self.summarizer.clear();
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                info!(theme = %self.theme.mode, "theme toggled");
            }
            Action::Dismiss => self.summarizer.dismiss_error(),
            Action::None => {}
        }
        Effect::None
    }

    fn start_summary(&mut self) -> Effect {
        self.active_panel = Panel::Summarizer;
        if let Some(job) = self.summarizer.pending_job() {
            debug!(job, "summary already in progress");
            return Effect::None;
        }

        match SummaryRequest::new(self.summarizer.input()) {
            Ok(request) => {
                self.last_job += 1;
                let job = self.last_job;
                self.summarizer.begin(job);
                info!(job, bytes = request.text().len(), "summary requested");
                Effect::Spawn { job, request }
            }
            Err(err) => {
                self.summarizer.fail(err.to_string());
                Effect::None
            }
        }
    }

    /// Apply progress or a result from a background job. Updates from jobs
    /// the panel no longer waits on are dropped.
    pub fn apply_update(&mut self, update: JobUpdate) {
        let job = update.job;
        if self.summarizer.pending_job() != Some(job) {
            debug!(job, "discarding update from abandoned job");
            return;
        }

        match update.event {
            JobEvent::Progress(stage) => self.summarizer.record_stage(stage),
            JobEvent::Finished(Ok(outcome)) => {
                info!(
                    job,
                    input_words = outcome.input_words,
                    summary_words = outcome.summary_words,
                    "summary displayed"
                );
                self.summarizer.finish(outcome);
            }
            JobEvent::Finished(Err(err)) => {
                error!(job, error = %err, "summary failed");
                self.summarizer.fail(err.to_string());
            }
        }
    }

    /// Tick: refresh data from live sources.
    pub fn tick(&mut self) {
        self.logs.refresh();
    }

    fn active_panel_state_mut(&mut self) -> &mut dyn PanelState {
        match self.active_panel {
            Panel::Summarizer => &mut self.summarizer,
            Panel::Logs => &mut self.logs,
            Panel::Config => &mut self.config_panel,
        }
    }

    /// Get the status line text.
    pub fn status_line(&self) -> String {
        match self.mode {
            InputMode::Insert => " INSERT  Esc:done  Enter:newline  type or paste the passage".to_string(),
            InputMode::Normal => format!(
                " NORMAL  q:quit  i:edit  s:summarize  c:clear  t:theme({theme})  Tab/1-3:panels  j/k:scroll  [{panel}]",
                theme = self.theme.mode,
                panel = self.active_panel.title()
            ),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let theme = &self.theme;
        frame.render_widget(Block::default().style(theme.base()), frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Min(1),    // main content
                Constraint::Length(1), // status bar
            ])
            .split(frame.area());

        let header = Tabs::new(ALL_PANELS.iter().map(|p| p.title()))
            .select(self.active_panel.index())
            .style(theme.bar())
            .highlight_style(theme.accent())
            .block(
                Block::default()
                    .title(format!(" Précis {} ", build_info::version_string()))
                    .borders(Borders::BOTTOM)
                    .style(theme.bar()),
            );
        frame.render_widget(header, chunks[0]);

        match self.active_panel {
            Panel::Summarizer => self.summarizer.render(
                frame,
                chunks[1],
                theme,
                self.mode == InputMode::Insert,
                self.show_progress,
            ),
            Panel::Logs => self.logs.render(frame, chunks[1], theme, true),
            Panel::Config => self.config_panel.render(frame, chunks[1], theme, true),
        }

        let status = Paragraph::new(self.status_line()).style(theme.bar());
        frame.render_widget(status, chunks[2]);
    }
}
