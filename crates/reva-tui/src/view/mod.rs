pub mod banner;
pub mod decoration_types;
pub mod events;
pub mod gallery;
pub mod help;
pub mod notice;
pub mod quit_confirm;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use reva_core::LoadState;

use crate::app::{App, InputMode};
use crate::theme::Theme;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Create a centered rectangle of the given width (columns) and height (rows).
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Split a screen into header, optional search bar and body.
pub fn split_screen(area: Rect, app: &App) -> (Rect, Option<Rect>, Rect) {
    let has_search = app.input_mode == InputMode::Search || !app.search_query.is_empty();
    let mut constraints = vec![Constraint::Length(1)];
    if has_search {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(3));
    let chunks = Layout::vertical(constraints).split(area);
    if has_search {
        (chunks[0], Some(chunks[1]), chunks[2])
    } else {
        (chunks[0], None, chunks[1])
    }
}

/// Header row: `<tag> <title>` plus the selection badge on the right.
pub fn render_header(f: &mut Frame, area: Rect, app: &App, tag: &str, title: &str) {
    let theme = &app.theme;
    let count = app.selected_count();
    let badge = if count > 0 {
        format!(" \u{2665} {} selected ", count)
    } else {
        String::new()
    };
    let title_width = (area.width as usize).saturating_sub(tag.len() + badge.len() + 4);
    let spans = vec![
        Span::styled(format!(" {tag} "), theme.header_style()),
        Span::styled(
            format!(" {}", truncate(title, title_width)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
    if !badge.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                badge,
                Style::default()
                    .fg(theme.selected)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Right),
            area,
        );
    }
}

pub fn render_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let cursor = if app.input_mode == InputMode::Search {
        "\u{2588}"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.search_query, Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.active)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Render the `Loading` or `Failed` body of a screen. Returns `false` when
/// the state is `Ready` and the caller should draw its table.
pub fn render_load_state<T>(
    f: &mut Frame,
    area: Rect,
    state: &LoadState<T>,
    theme: &Theme,
    tick: usize,
    noun: &str,
) -> bool {
    let lines = match state {
        LoadState::Ready(_) => return false,
        LoadState::Loading => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {} Loading {}...", spinner_char(tick), noun),
                Style::default().fg(theme.load_state_color(state)),
            )),
        ],
        LoadState::Failed(msg) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {msg}"),
                Style::default()
                    .fg(theme.load_state_color(state))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "  r",
                    Style::default()
                        .fg(theme.active)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(": try again", Style::default().fg(theme.dim)),
            ]),
        ],
    };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
    true
}

/// Centered placeholder for an empty (or fully filtered-out) list.
pub fn render_empty(f: &mut Frame, area: Rect, theme: &Theme, noun: &str, query: &str) {
    let msg = if query.is_empty() {
        format!("No {noun} found")
    } else {
        format!("No {noun} match \"{query}\"")
    };
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(msg, Style::default().fg(theme.dim))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    );
    f.render_widget(paragraph, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App, hints: &str) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    if app.exporting {
        spans.push(Span::styled(
            format!(" {} Generating PDF ", spinner_char(app.tick)),
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.active)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(format!(" {hints}"), theme.footer_style()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Mandap", 10), "Mandap");
        assert_eq!(truncate("Marigold Canopy", 6), "Marig\u{2026}");
        assert_eq!(truncate("Mehendi", 0), "");
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner_char(0), spinner_char(SPINNER_FRAMES.len()));
    }
}
