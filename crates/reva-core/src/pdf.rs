//! Turning the selection into a downloaded PDF.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::CoreError;
use crate::api::CatalogBackend;
use crate::models::PdfGenerationRequest;
use crate::selection::SelectionStore;

const PDF_MAGIC: &[u8] = b"%PDF";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

impl PdfGenerationRequest {
    /// Build the export request for everything currently selected.
    ///
    /// An empty selection is rejected here so it never reaches the backend.
    pub fn from_selection(
        event_id: i64,
        event_name: &str,
        selection: &SelectionStore,
    ) -> Result<Self, CoreError> {
        if selection.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        Ok(Self {
            event_id,
            event_name: event_name.to_string(),
            selected_images: selection.all().to_vec(),
        })
    }
}

/// File name offered for a gallery download:
/// `wedding-<decoration type, lowercased, whitespace runs as '-'>-images.pdf`.
pub fn download_file_name(decoration_type_name: &str) -> String {
    let slug = WHITESPACE_RE.replace_all(&decoration_type_name.to_lowercase(), "-").into_owned();
    format!("wedding-{slug}-images.pdf")
}

/// The backend's attachment name:
/// `wedding_customization_<event, non-alphanumerics as '_'>_<yyyyMMdd_HHmmss>.pdf`.
pub fn customization_file_name(event_name: &str, at: NaiveDateTime) -> String {
    let sanitized = NON_ALNUM_RE.replace_all(event_name, "_");
    format!(
        "wedding_customization_{}_{}.pdf",
        sanitized,
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Pick the download name, falling back to the timestamped event name when
/// the decoration type is unknown.
pub fn export_file_name(decoration_type_name: &str, event_name: &str) -> String {
    if decoration_type_name.trim().is_empty() {
        customization_file_name(event_name, chrono::Local::now().naive_local())
    } else {
        download_file_name(decoration_type_name)
    }
}

/// Request the PDF as raw bytes and write it to `dir/file_name`.
pub async fn export_pdf(
    backend: &dyn CatalogBackend,
    request: &PdfGenerationRequest,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, CoreError> {
    tracing::debug!(backend = backend.name(), images = request.selected_images.len(), "exporting PDF");
    let bytes = backend.generate_pdf(request).await?;
    write_pdf(dir, file_name, &bytes).await
}

/// Request the PDF through the base64 endpoint, decode it and write it.
pub async fn export_pdf_base64(
    backend: &dyn CatalogBackend,
    request: &PdfGenerationRequest,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, CoreError> {
    tracing::debug!(
        backend = backend.name(),
        images = request.selected_images.len(),
        "exporting PDF (base64)"
    );
    let envelope = backend.generate_pdf_base64(request).await?;
    let encoded = envelope.into_result().map_err(|e| match e {
        CoreError::Backend { message, .. } | CoreError::NotFound(message) => CoreError::Pdf(message),
        other => other,
    })?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| CoreError::Pdf(format!("invalid base64 payload: {e}")))?;
    write_pdf(dir, file_name, &bytes).await
}

async fn write_pdf(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, CoreError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(CoreError::Pdf("response is not a PDF document".to_string()));
    }
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "PDF saved");
    Ok(path)
}
