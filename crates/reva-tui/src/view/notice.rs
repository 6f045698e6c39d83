use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::Notice;
use crate::theme::Theme;
use crate::view::centered_rect;

/// Render a blocking notice (empty selection, export outcome).
pub fn render(f: &mut Frame, theme: &Theme, notice: &Notice) {
    let area = f.area();
    let width = (notice.body.chars().count() as u16 + 6).clamp(36, area.width.max(36));
    let popup = centered_rect(width, 7, area);
    let accent = if notice.is_error {
        theme.error
    } else {
        theme.active
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", notice.body),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Enter",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(": dismiss", Style::default().fg(theme.dim)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(format!(" {} ", notice.title)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
