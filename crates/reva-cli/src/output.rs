use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use reva_core::validation::is_valid_image_url;
use reva_core::{DecorationImage, DecorationType, Event, SelectionStore};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn print_heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", title.bold())?;
    } else {
        writeln!(w, "{}", title)?;
    }
    Ok(())
}

/// "No events found" or "No events match "q"".
pub fn print_empty(
    w: &mut dyn Write,
    noun: &str,
    query: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = if query.is_empty() {
        format!("No {} found", noun)
    } else {
        format!("No {} match \"{}\"", noun, query)
    };
    if color.enabled() {
        writeln!(w, "{}", msg.dimmed())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}

fn print_row(
    w: &mut dyn Write,
    id: i64,
    name: &str,
    description: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        write!(w, "{:>5}  {}", id.to_string().cyan(), name.bold())?;
        if !description.is_empty() {
            write!(w, "  {}", description.dimmed())?;
        }
    } else {
        write!(w, "{:>5}  {}", id, name)?;
        if !description.is_empty() {
            write!(w, "  {}", description)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

pub fn print_events(
    w: &mut dyn Write,
    events: &[&Event],
    query: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if events.is_empty() {
        return print_empty(w, "events", query, color);
    }
    for event in events {
        print_row(w, event.id, &event.name, event.description_text(), color)?;
    }
    Ok(())
}

/// Full detail for one event, including the decoration types nested in it.
pub fn print_event_detail(w: &mut dyn Write, event: &Event, color: ColorMode) -> std::io::Result<()> {
    print_heading(w, &event.name, color)?;
    writeln!(w, "  id:     {}", event.id)?;
    if !event.description_text().is_empty() {
        writeln!(w, "  about:  {}", event.description_text())?;
    }
    writeln!(w, "  active: {}", if event.active() { "yes" } else { "no" })?;
    if let Some(created) = event.created() {
        writeln!(w, "  since:  {}", created.format("%Y-%m-%d"))?;
    }
    if !event.decoration_types.is_empty() {
        writeln!(w)?;
        writeln!(w, "Decoration types:")?;
        for t in &event.decoration_types {
            print_row(w, t.id, &t.name, t.description_text(), color)?;
        }
    }
    Ok(())
}

pub fn print_decoration_types(
    w: &mut dyn Write,
    event_name: &str,
    types: &[&DecorationType],
    query: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if !event_name.is_empty() {
        print_heading(w, &format!("{} decorations", event_name), color)?;
    }
    if types.is_empty() {
        return print_empty(w, "decoration types", query, color);
    }
    for t in types {
        print_row(w, t.id, &t.name, t.description_text(), color)?;
    }
    Ok(())
}

/// Gallery listing. Images whose URL cannot be displayed are flagged.
pub fn print_images(
    w: &mut dyn Write,
    decoration_type_name: &str,
    images: &[&DecorationImage],
    query: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if !decoration_type_name.is_empty() {
        print_heading(w, decoration_type_name, color)?;
    }
    if images.is_empty() {
        return print_empty(w, "images", query, color);
    }
    for image in images {
        print_row(w, image.id, &image.name, image.description_text(), color)?;
        if is_valid_image_url(&image.image_url) {
            writeln!(w, "       {}", image.image_url)?;
        } else if color.enabled() {
            writeln!(w, "       {} {}", "invalid image URL:".yellow(), image.image_url)?;
        } else {
            writeln!(w, "       invalid image URL: {}", image.image_url)?;
        }
    }
    Ok(())
}

pub fn print_image_detail(
    w: &mut dyn Write,
    image: &DecorationImage,
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, &image.name, color)?;
    writeln!(w, "  id:     {}", image.id)?;
    if let Some(type_name) = image.decoration_type_name.as_deref() {
        match image.decoration_type_id {
            Some(type_id) => writeln!(w, "  type:   {} (#{})", type_name, type_id)?,
            None => writeln!(w, "  type:   {}", type_name)?,
        }
    }
    if !image.description_text().is_empty() {
        writeln!(w, "  about:  {}", image.description_text())?;
    }
    if is_valid_image_url(&image.image_url) {
        writeln!(w, "  url:    {}", image.image_url)?;
    } else if color.enabled() {
        writeln!(w, "  url:    {} {}", image.image_url, "(invalid image URL)".yellow())?;
    } else {
        writeln!(w, "  url:    {} (invalid image URL)", image.image_url)?;
    }
    Ok(())
}

/// Selected images grouped by decoration type, in selection order.
pub fn print_selection(
    w: &mut dyn Write,
    selection: &SelectionStore,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Selected {} image(s):", selection.len())?;
    for name in selection.decoration_type_names() {
        if color.enabled() {
            writeln!(w, "  {}", name.bold())?;
        } else {
            writeln!(w, "  {}", name)?;
        }
        for image in selection.list_by_decoration_type(name) {
            writeln!(w, "    - {} (#{})", image.image_name, image.image_id)?;
        }
    }
    Ok(())
}

pub fn print_export_done(w: &mut dyn Write, path: &Path, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Saved".green(), path.display())?;
    } else {
        writeln!(w, "Saved {}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, name: &str, description: Option<&str>) -> Event {
        Event {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            is_active: None,
            created_at: Some("2024-03-01T10:15:30".into()),
            updated_at: None,
            decoration_types: vec![],
        }
    }

    fn image(id: i64, name: &str, url: &str) -> DecorationImage {
        DecorationImage {
            id,
            name: name.to_string(),
            image_url: url.to_string(),
            description: None,
            decoration_type_id: Some(1),
            decoration_type_name: None,
            is_active: None,
            display_order: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn events_plain_rows() {
        let haldi = event(1, "Haldi", Some("Turmeric"));
        let sangeet = event(2, "Sangeet", None);
        let out = render(|w| print_events(w, &[&haldi, &sangeet], "", ColorMode(false)));
        assert_eq!(out, "    1  Haldi  Turmeric\n    2  Sangeet\n");
    }

    #[test]
    fn empty_listing_mentions_query() {
        let out = render(|w| print_events(w, &[], "musi", ColorMode(false)));
        assert_eq!(out, "No events match \"musi\"\n");
        let out = render(|w| print_events(w, &[], "", ColorMode(false)));
        assert_eq!(out, "No events found\n");
    }

    #[test]
    fn detail_shows_creation_date() {
        let haldi = event(1, "Haldi", None);
        let out = render(|w| print_event_detail(w, &haldi, ColorMode(false)));
        assert!(out.starts_with("Haldi\n"));
        assert!(out.contains("active: yes"));
        assert!(out.contains("since:  2024-03-01"));
    }

    #[test]
    fn invalid_image_urls_are_flagged() {
        let good = image(1, "Rose Arch", "https://cdn.example.com/rose.jpg");
        let bad = image(2, "Broken", "https://cdn.example.com/page.html");
        let out = render(|w| print_images(w, "Mandap", &[&good, &bad], "", ColorMode(false)));
        assert!(out.contains("       https://cdn.example.com/rose.jpg\n"));
        assert!(out.contains("invalid image URL: https://cdn.example.com/page.html"));
    }

    #[test]
    fn image_detail_lists_type_and_url() {
        let mut rose = image(7, "Rose Arch", "https://cdn.example.com/rose.jpg");
        rose.decoration_type_name = Some("Mandap".into());
        rose.description = Some("Pink roses".into());
        let out = render(|w| print_image_detail(w, &rose, ColorMode(false)));
        assert_eq!(
            out,
            "Rose Arch\n  id:     7\n  type:   Mandap (#1)\n  about:  Pink roses\n  url:    https://cdn.example.com/rose.jpg\n"
        );

        let broken = image(8, "Broken", "ftp://cdn.example.com/x.jpg");
        let out = render(|w| print_image_detail(w, &broken, ColorMode(false)));
        assert!(out.ends_with("  url:    ftp://cdn.example.com/x.jpg (invalid image URL)\n"));
    }

    #[test]
    fn selection_grouped_by_type() {
        let mut store = SelectionStore::new();
        store.add(&image(7, "Rose Arch", "https://a/b.jpg"), "Mandap");
        store.add(&image(8, "Lights", "https://a/c.jpg"), "Stage");
        store.add(&image(9, "Canopy", "https://a/d.jpg"), "Mandap");
        let out = render(|w| print_selection(w, &store, ColorMode(false)));
        assert_eq!(
            out,
            "Selected 3 image(s):\n  Mandap\n    - Rose Arch (#7)\n    - Canopy (#9)\n  Stage\n    - Lights (#8)\n"
        );
    }
}
