use std::path::PathBuf;

use reva_core::screens::{DecorationTypesView, GalleryView};
use reva_core::{Event, LoadTicket, PdfGenerationRequest};

/// Commands sent from the TUI to the backend.
#[derive(Debug)]
pub enum BackendCommand {
    LoadEvents { ticket: LoadTicket<()> },
    LoadDecorationTypes { ticket: LoadTicket<i64> },
    LoadGallery { ticket: LoadTicket<i64> },
    /// Generate the PDF for `request` and write it to `dir/file_name`.
    ExportPdf {
        request: PdfGenerationRequest,
        dir: PathBuf,
        file_name: String,
        base64: bool,
    },
}

/// Events flowing from backend tasks to the TUI. Load results carry the
/// ticket they were started with and an already user-facing error message.
#[derive(Debug)]
pub enum BackendEvent {
    EventsLoaded {
        ticket: LoadTicket<()>,
        result: Result<Vec<Event>, String>,
    },
    DecorationTypesLoaded {
        ticket: LoadTicket<i64>,
        result: Result<DecorationTypesView, String>,
    },
    GalleryLoaded {
        ticket: LoadTicket<i64>,
        result: Result<GalleryView, String>,
    },
    PdfExported { result: Result<PathBuf, String> },
}
