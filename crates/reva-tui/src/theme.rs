use ratatui::style::{Color, Modifier, Style};

use reva_core::LoadState;

/// Color theme for the TUI.
pub struct Theme {
    pub selected: Color,
    pub error: Color,
    pub warning: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Marigold on black, the default.
    pub fn marigold() -> Self {
        Self {
            selected: Color::Rgb(255, 170, 0),
            error: Color::Red,
            warning: Color::Yellow,

            header_fg: Color::Black,
            header_bg: Color::Rgb(255, 170, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(60, 40, 10),
            active: Color::Rgb(255, 120, 60),
            spinner: Color::Rgb(255, 170, 0),
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, rose accents, deep plum header.
    pub fn modern() -> Self {
        Self {
            selected: Color::Rgb(0, 200, 120),
            error: Color::Rgb(255, 80, 80),
            warning: Color::Rgb(255, 200, 0),

            header_fg: Color::White,
            header_bg: Color::Rgb(90, 30, 80),
            border: Color::Rgb(70, 60, 80),
            text: Color::White,
            dim: Color::Rgb(130, 120, 140),
            highlight_bg: Color::Rgb(50, 30, 60),
            active: Color::Rgb(230, 90, 150),
            spinner: Color::Rgb(230, 90, 150),
            footer_fg: Color::Rgb(130, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    /// Theme by config name; unknown names fall back to the default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::marigold(),
        }
    }

    pub fn load_state_color<T>(&self, state: &LoadState<T>) -> Color {
        match state {
            LoadState::Loading => self.spinner,
            LoadState::Ready(_) => self.text,
            LoadState::Failed(_) => self.error,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
