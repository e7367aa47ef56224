//! Modal keybindings.
//!
//! Normal mode uses vim-style navigation plus single-key commands
//! (`s` summarize, `c` clear, `t` toggle theme). Insert mode sends printable
//! keys to the input editor until `Esc`.

use crossterm::event::KeyCode;

/// Which keys edit text and which run commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// An action the TUI can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPanel,
    PrevPanel,
    GoToPanel(usize),
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    ScrollToTop,
    ScrollToBottom,
    EnterInsert,
    ExitInsert,
    InsertChar(char),
    DeleteBack,
    Summarize,
    Clear,
    ToggleTheme,
    Dismiss,
    None,
}

/// Key mapper with support for multi-key sequences.
pub struct KeyMapper {
    /// Pending first key of a two-key sequence (the first `g` in `gg`).
    pending: Option<KeyCode>,
}

impl KeyMapper {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Feed a key code and return the resolved action for `mode`.
    pub fn resolve(&mut self, key: KeyCode, mode: InputMode) -> Action {
        match mode {
            InputMode::Insert => {
                self.pending = None;
                Self::resolve_insert(key)
            }
            InputMode::Normal => self.resolve_normal(key),
        }
    }

    fn resolve_insert(key: KeyCode) -> Action {
        match key {
            KeyCode::Esc => Action::ExitInsert,
            KeyCode::Enter => Action::InsertChar('\n'),
            KeyCode::Tab => Action::InsertChar('\t'),
            KeyCode::Backspace => Action::DeleteBack,
            KeyCode::Char(c) => Action::InsertChar(c),
            _ => Action::None,
        }
    }

    fn resolve_normal(&mut self, key: KeyCode) -> Action {
        if let Some(prev) = self.pending.take() {
            return match (prev, key) {
                (KeyCode::Char('g'), KeyCode::Char('g')) => Action::ScrollToTop,
                // Unknown sequence: treat the second key as a fresh press.
                _ => self.resolve_normal(key),
            };
        }

        match key {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => Action::Dismiss,

            // Commands
            KeyCode::Char('i') | KeyCode::Char('a') => Action::EnterInsert,
            KeyCode::Char('s') | KeyCode::Enter => Action::Summarize,
            KeyCode::Char('c') => Action::Clear,
            KeyCode::Char('t') => Action::ToggleTheme,

            // Panel switching
            KeyCode::Tab | KeyCode::Char('l') => Action::NextPanel,
            KeyCode::BackTab | KeyCode::Char('h') => Action::PrevPanel,
            KeyCode::Char('1') => Action::GoToPanel(0),
            KeyCode::Char('2') => Action::GoToPanel(1),
            KeyCode::Char('3') => Action::GoToPanel(2),

            // Vim scrolling
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('d') | KeyCode::PageDown => Action::HalfPageDown,
            KeyCode::Char('u') | KeyCode::PageUp => Action::HalfPageUp,
            KeyCode::Char('G') | KeyCode::End => Action::ScrollToBottom,
            KeyCode::Home => Action::ScrollToTop,

            KeyCode::Char('g') => {
                self.pending = Some(key);
                Action::None
            }

            _ => Action::None,
        }
    }
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(km: &mut KeyMapper, key: KeyCode) -> Action {
        km.resolve(key, InputMode::Normal)
    }

    #[test]
    fn test_normal_commands() {
        let mut km = KeyMapper::new();
        assert_eq!(normal(&mut km, KeyCode::Char('q')), Action::Quit);
        assert_eq!(normal(&mut km, KeyCode::Char('s')), Action::Summarize);
        assert_eq!(normal(&mut km, KeyCode::Enter), Action::Summarize);
        assert_eq!(normal(&mut km, KeyCode::Char('c')), Action::Clear);
        assert_eq!(normal(&mut km, KeyCode::Char('t')), Action::ToggleTheme);
        assert_eq!(normal(&mut km, KeyCode::Char('i')), Action::EnterInsert);
        assert_eq!(normal(&mut km, KeyCode::Esc), Action::Dismiss);
    }

    #[test]
    fn test_navigation() {
        let mut km = KeyMapper::new();
        assert_eq!(normal(&mut km, KeyCode::Tab), Action::NextPanel);
        assert_eq!(normal(&mut km, KeyCode::Char('h')), Action::PrevPanel);
        assert_eq!(normal(&mut km, KeyCode::Char('3')), Action::GoToPanel(2));
        assert_eq!(normal(&mut km, KeyCode::Char('j')), Action::ScrollDown);
        assert_eq!(normal(&mut km, KeyCode::Char('u')), Action::HalfPageUp);
        assert_eq!(normal(&mut km, KeyCode::Char('G')), Action::ScrollToBottom);
    }

    #[test]
    fn test_gg_sequence() {
        let mut km = KeyMapper::new();
        assert_eq!(normal(&mut km, KeyCode::Char('g')), Action::None);
        assert_eq!(normal(&mut km, KeyCode::Char('g')), Action::ScrollToTop);
    }

    #[test]
    fn test_invalid_sequence_falls_through() {
        let mut km = KeyMapper::new();
        assert_eq!(normal(&mut km, KeyCode::Char('g')), Action::None);
        assert_eq!(normal(&mut km, KeyCode::Char('t')), Action::ToggleTheme);
    }

    #[test]
    fn test_insert_mode_types_letters() {
        let mut km = KeyMapper::new();
        assert_eq!(
            km.resolve(KeyCode::Char('q'), InputMode::Insert),
            Action::InsertChar('q')
        );
        assert_eq!(
            km.resolve(KeyCode::Enter, InputMode::Insert),
            Action::InsertChar('\n')
        );
        assert_eq!(
            km.resolve(KeyCode::Backspace, InputMode::Insert),
            Action::DeleteBack
        );
        assert_eq!(km.resolve(KeyCode::Esc, InputMode::Insert), Action::ExitInsert);
    }

    #[test]
    fn test_insert_mode_drops_pending_sequence() {
        let mut km = KeyMapper::new();
        assert_eq!(normal(&mut km, KeyCode::Char('g')), Action::None);
        assert_eq!(
            km.resolve(KeyCode::Char('g'), InputMode::Insert),
            Action::InsertChar('g')
        );
        assert_eq!(normal(&mut km, KeyCode::Char('g')), Action::None);
    }
}
