use std::sync::Arc;

use tokio::sync::mpsc;

use reva_core::screens::{self, ScreenKind};
use reva_core::{CatalogBackend, CoreError, pdf};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Receive commands until the TUI drops its sender. Each command runs on its
/// own task so a slow load never blocks the next one.
pub async fn run(
    backend: Arc<dyn CatalogBackend>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let backend = Arc::clone(&backend);
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = execute(backend.as_ref(), cmd).await;
            // Receiver gone means the TUI is shutting down.
            let _ = tx.send(event);
        });
    }
    tracing::debug!("backend command channel closed");
}

/// Run one command to completion and describe the outcome.
pub async fn execute(backend: &dyn CatalogBackend, cmd: BackendCommand) -> BackendEvent {
    match cmd {
        BackendCommand::LoadEvents { ticket } => {
            let result = screens::load_events(backend, ticket.cancel_token()).await;
            BackendEvent::EventsLoaded {
                result: ScreenKind::Events.into_message(result),
                ticket,
            }
        }
        BackendCommand::LoadDecorationTypes { ticket } => {
            let result =
                screens::load_decoration_types(backend, *ticket.param(), ticket.cancel_token())
                    .await;
            BackendEvent::DecorationTypesLoaded {
                result: ScreenKind::DecorationTypes.into_message(result),
                ticket,
            }
        }
        BackendCommand::LoadGallery { ticket } => {
            let result =
                screens::load_gallery(backend, *ticket.param(), ticket.cancel_token()).await;
            BackendEvent::GalleryLoaded {
                result: ScreenKind::Gallery.into_message(result),
                ticket,
            }
        }
        BackendCommand::ExportPdf {
            request,
            dir,
            file_name,
            base64,
        } => {
            let result = if base64 {
                pdf::export_pdf_base64(backend, &request, &dir, &file_name).await
            } else {
                pdf::export_pdf(backend, &request, &dir, &file_name).await
            };
            BackendEvent::PdfExported {
                result: result.map_err(|e| export_failure_message(&e)),
            }
        }
    }
}

fn export_failure_message(err: &CoreError) -> String {
    tracing::warn!(error = %err, "PDF export failed");
    match err {
        CoreError::EmptySelection => err.to_string(),
        CoreError::Io(e) => format!("Could not save PDF: {e}"),
        _ => "Failed to generate PDF. Please try again.".to_string(),
    }
}
