use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::centered_rect;

const BANNER_ART: &[&str] = &[
    r"  ____                 ",
    r" |  _ \ _____   ____ _ ",
    r" | |_) / _ \ \ / / _` |",
    r" |  _ <  __/\ V / (_| |",
    r" |_| \_\___| \_/ \__,_|",
];

/// Render the catalog landing banner as a centered overlay.
pub fn render(f: &mut Frame, theme: &Theme, tick: usize) {
    let area = f.area();

    // Don't render if terminal too narrow
    if area.width < 44 || area.height < 12 {
        return;
    }

    let popup = centered_rect(44, 11, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));
    for art_line in BANNER_ART {
        lines.push(Line::from(Span::styled(
            *art_line,
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    let dots = ".".repeat((tick % 4) + 1);
    lines.push(Line::from(Span::styled(
        format!("Wedding decoration catalog{:<4}", dots),
        Style::default().fg(theme.dim),
    )));
    lines.push(Line::from(Span::styled(
        "press any key",
        Style::default().fg(theme.dim),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
