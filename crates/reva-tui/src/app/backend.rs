use super::{App, Notice};
use crate::tui_event::BackendEvent;

impl App {
    /// Apply a backend event. Load results for a ticket that is no longer
    /// current are dropped by the loader.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::EventsLoaded { ticket, result } => {
                if self.events.complete(&ticket, result) {
                    self.clamp_cursor();
                }
            }
            BackendEvent::DecorationTypesLoaded { ticket, result } => {
                if self.decoration_types.complete(&ticket, result) {
                    self.clamp_cursor();
                }
            }
            BackendEvent::GalleryLoaded { ticket, result } => {
                if self.gallery.complete(&ticket, result) {
                    self.clamp_cursor();
                }
            }
            BackendEvent::PdfExported { result } => {
                self.exporting = false;
                self.notice = Some(match result {
                    Ok(path) => Notice::info("PDF saved", path.display().to_string()),
                    Err(msg) => Notice::error("Export failed", msg),
                });
            }
        }
    }
}
