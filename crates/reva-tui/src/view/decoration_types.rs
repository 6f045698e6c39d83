use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::app::App;
use crate::view::{
    render_empty, render_footer, render_header, render_load_state, render_search_bar,
    split_screen, truncate,
};

/// Render the decoration types of one event.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let (header, search, body) = split_screen(area, app);
    let title = match app.decoration_types.state().ready() {
        Some(view) if !view.event_name().is_empty() => format!("{} decorations", view.event_name()),
        _ => "Decorations".to_string(),
    };
    render_header(f, header, app, "Event", &title);
    if let Some(search) = search {
        render_search_bar(f, search, app);
    }

    if !render_load_state(
        f,
        body,
        app.decoration_types.state(),
        &app.theme,
        app.tick,
        "decoration types",
    ) {
        render_table(f, body, app);
        app.visible_rows = body.height.saturating_sub(3) as usize;
    }

    render_footer(
        f,
        footer_area,
        app,
        "Enter:open  Esc:back  /:search  r:retry  ?:help  q:quit",
    );
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(view) = app.decoration_types.state().ready() else {
        return;
    };
    let indices = app.visible_indices();
    if indices.is_empty() {
        render_empty(f, area, theme, "decoration types", &app.search_query);
        return;
    }

    let desc_width = (area.width as usize).saturating_sub(34);
    let header = Row::new(["#", "Decoration", "Description"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = indices
        .iter()
        .map(|&i| {
            let t = &view.decoration_types[i];
            let order = t
                .display_order
                .map(|o| o.to_string())
                .unwrap_or_else(|| "\u{2014}".to_string());
            Row::new(vec![
                Cell::from(order).style(Style::default().fg(theme.dim)),
                Cell::from(truncate(&t.name, 24)).style(Style::default().fg(theme.text)),
                Cell::from(truncate(t.description_text(), desc_width))
                    .style(Style::default().fg(theme.dim)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(25),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}
