//! Color palettes for the dark and light themes.
//!
//! A [`Theme`] is an immutable value. Toggling the theme swaps which palette
//! the app hands to its panels; nothing is recolored in place.

use precis_config::ThemeMode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

/// Every color a panel may draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Text area and window background.
    pub background: Color,
    pub text: Color,
    /// Header and status bar background.
    pub panel: Color,
    /// Highlights: active tab, progress gauge, focused borders.
    pub accent: Color,
    /// Secondary text such as hints and timestamps.
    pub muted: Color,
    pub error: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        mode: ThemeMode::Dark,
        background: Color::Black,
        text: Color::White,
        panel: Color::DarkGray,
        accent: Color::Rgb(0, 153, 76),
        muted: Color::Gray,
        error: Color::LightRed,
    };

    pub const LIGHT: Theme = Theme {
        mode: ThemeMode::Light,
        background: Color::White,
        text: Color::Black,
        panel: Color::Gray,
        accent: Color::Rgb(0, 102, 204),
        muted: Color::DarkGray,
        error: Color::Red,
    };

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::DARK,
            ThemeMode::Light => Self::LIGHT,
        }
    }

    /// The palette for the other mode.
    pub fn toggled(self) -> Self {
        Self::for_mode(self.mode.toggled())
    }

    /// Body text on the window background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Header and status bar style.
    pub fn bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// A bordered block; `focused` draws the border in the accent color.
    pub fn block<'a>(&self, title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
        let border = if focused {
            Style::default().fg(self.accent)
        } else {
            self.muted()
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border)
            .style(self.base())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}
