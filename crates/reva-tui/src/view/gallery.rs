use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use reva_core::DecorationImage;
use reva_core::validation::is_valid_image_url;

use crate::app::App;
use crate::theme::Theme;
use crate::view::{
    render_empty, render_footer, render_header, render_load_state, render_search_bar,
    split_screen, truncate,
};

/// Render the image gallery of one decoration type, with the selection
/// summary on the right when the terminal is wide enough.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let (header, search, body) = split_screen(area, app);
    let title = match app.gallery.state().ready() {
        Some(view) => {
            let (_, event_name) = view.event_ref();
            match (event_name, view.decoration_type_name()) {
                ("", "") => "Gallery".to_string(),
                ("", t) => t.to_string(),
                (e, "") => e.to_string(),
                (e, t) => format!("{e} \u{203A} {t}"),
            }
        }
        None => "Gallery".to_string(),
    };
    render_header(f, header, app, "Gallery", &title);
    if let Some(search) = search {
        render_search_bar(f, search, app);
    }

    let (table_area, panel_area) = if body.width >= 90 {
        let chunks = Layout::horizontal([Constraint::Min(40), Constraint::Length(34)]).split(body);
        (chunks[0], Some(chunks[1]))
    } else {
        (body, None)
    };

    if !render_load_state(f, table_area, app.gallery.state(), &app.theme, app.tick, "images") {
        render_table(f, table_area, app);
        app.visible_rows = table_area.height.saturating_sub(3) as usize;
    }
    if let Some(panel) = panel_area {
        render_selection_panel(f, panel, app);
    }

    render_footer(
        f,
        footer_area,
        app,
        "Space:select  e:export PDF  c:clear  Esc:back  /:search  ?:help  q:quit",
    );
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(view) = app.gallery.state().ready() else {
        return;
    };
    let indices = app.visible_indices();
    if indices.is_empty() {
        render_empty(f, area, theme, "images", &app.search_query);
        return;
    }

    let desc_width = (area.width as usize).saturating_sub(36);
    let header = Row::new(["", "Image", "Description"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = indices
        .iter()
        .map(|&i| {
            let image = &view.images[i];
            let (mark, mark_style) = if app.is_image_selected(image.id) {
                (
                    "[\u{2665}]",
                    Style::default()
                        .fg(theme.selected)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("[ ]", Style::default().fg(theme.dim))
            };
            Row::new(vec![
                Cell::from(mark).style(mark_style),
                Cell::from(truncate(&image.name, 28)).style(Style::default().fg(theme.text)),
                Cell::from(description_line(image, desc_width, theme)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(29),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(format!(" {} images ", view.images.len())),
        )
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

const INVALID_URL_MARK: &str = "\u{26a0} invalid image URL";

/// Description cell text, with a warning appended when the URL cannot be shown.
fn description_line(image: &DecorationImage, width: usize, theme: &Theme) -> Line<'static> {
    let dim = Style::default().fg(theme.dim);
    if is_valid_image_url(&image.image_url) {
        return Line::from(Span::styled(truncate(image.description_text(), width), dim));
    }
    let mut spans = Vec::new();
    let description = image.description_text();
    if !description.is_empty() {
        let room = width.saturating_sub(INVALID_URL_MARK.chars().count() + 2);
        spans.push(Span::styled(truncate(description, room), dim));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(INVALID_URL_MARK, Style::default().fg(theme.warning)));
    Line::from(spans)
}

fn render_selection_panel(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut lines: Vec<Line> = Vec::new();
    let width = (area.width as usize).saturating_sub(6);

    if let Ok(store) = app.session.selection() {
        if store.is_empty() {
            lines.push(Line::from(Span::styled(
                " Nothing selected yet",
                Style::default().fg(theme.dim),
            )));
        }
        for name in store.decoration_type_names() {
            let label = if name.is_empty() { "(unknown)" } else { name };
            lines.push(Line::from(Span::styled(
                format!(" {}", truncate(label, width + 2)),
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            )));
            for image in store.list_by_decoration_type(name) {
                lines.push(Line::from(Span::styled(
                    format!("   {}", truncate(&image.image_name, width)),
                    Style::default().fg(theme.text),
                )));
            }
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" Selection ({}) ", app.selected_count())),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, description: Option<&str>) -> DecorationImage {
        DecorationImage {
            id: 7,
            name: "Rose Arch".into(),
            image_url: url.into(),
            description: description.map(str::to_string),
            decoration_type_id: Some(10),
            decoration_type_name: Some("Mandap".into()),
            is_active: None,
            display_order: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn invalid_url_keeps_description() {
        let theme = Theme::marigold();
        let line = description_line(
            &image("https://cdn.example.com/page.html", Some("Pink roses")),
            60,
            &theme,
        );
        assert_eq!(text(&line), "Pink roses  \u{26a0} invalid image URL");
        assert_eq!(line.spans[2].style.fg, Some(theme.warning));
    }

    #[test]
    fn valid_url_shows_description_only() {
        let theme = Theme::marigold();
        let line = description_line(
            &image("https://cdn.example.com/rose.jpg", Some("Pink roses")),
            60,
            &theme,
        );
        assert_eq!(text(&line), "Pink roses");
    }

    #[test]
    fn invalid_url_without_description_shows_warning() {
        let theme = Theme::marigold();
        let line = description_line(&image("not a url", None), 60, &theme);
        assert_eq!(text(&line), "\u{26a0} invalid image URL");
    }
}
