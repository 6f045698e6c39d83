use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::app::App;
use crate::view::{
    render_empty, render_footer, render_header, render_load_state, render_search_bar,
    split_screen, truncate,
};

/// Render the event list.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let (header, search, body) = split_screen(area, app);
    render_header(f, header, app, "Reva", "Wedding events");
    if let Some(search) = search {
        render_search_bar(f, search, app);
    }

    if !render_load_state(f, body, app.events.state(), &app.theme, app.tick, "events") {
        render_table(f, body, app);
        app.visible_rows = body.height.saturating_sub(3) as usize;
    }

    render_footer(
        f,
        footer_area,
        app,
        "Enter:open  /:search  r:retry  ?:help  q:quit",
    );
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(events) = app.events.state().ready() else {
        return;
    };
    let indices = app.visible_indices();
    if indices.is_empty() {
        render_empty(f, area, theme, "events", &app.search_query);
        return;
    }

    let desc_width = (area.width as usize).saturating_sub(34);
    let header = Row::new(["Event", "Types", "Description"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = indices
        .iter()
        .map(|&i| {
            let event = &events[i];
            let types = if event.decoration_types.is_empty() {
                "\u{2014}".to_string()
            } else {
                event.decoration_types.len().to_string()
            };
            let name_style = if event.active() {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.dim)
            };
            Row::new(vec![
                Cell::from(truncate(&event.name, 24)).style(name_style),
                Cell::from(types).style(Style::default().fg(theme.dim)),
                Cell::from(truncate(event.description_text(), desc_width))
                    .style(Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(25),
        Constraint::Length(6),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(format!(" {} of {} ", indices.len(), events.len())),
        )
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}
