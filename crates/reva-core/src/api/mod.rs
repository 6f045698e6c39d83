//! Catalog backend trait and implementations.

pub mod http;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use crate::CoreError;
use crate::models::{ApiResponse, DecorationImage, DecorationType, Event, PdfGenerationRequest};

pub use http::HttpCatalog;

/// Boxed future returned by every backend call.
///
/// `Err` means no envelope was obtained (transport failure); a backend-side
/// failure arrives as `Ok` with `success == false`.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CoreError>> + Send + 'a>>;

/// The read-only catalog API plus PDF generation.
pub trait CatalogBackend: Send + Sync {
    /// Short label used in logs (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// `GET /events`
    fn events(&self) -> BackendFuture<'_, ApiResponse<Vec<Event>>>;

    /// `GET /events/{id}`
    fn event(&self, id: i64) -> BackendFuture<'_, ApiResponse<Event>>;

    /// `GET /events/search?q=`
    fn search_events<'a>(&'a self, query: &'a str) -> BackendFuture<'a, ApiResponse<Vec<Event>>>;

    /// `GET /decoration-types`
    fn decoration_types(&self) -> BackendFuture<'_, ApiResponse<Vec<DecorationType>>>;

    /// `GET /decoration-types/event/{eventId}`
    fn decoration_types_for_event(
        &self,
        event_id: i64,
    ) -> BackendFuture<'_, ApiResponse<Vec<DecorationType>>>;

    /// `GET /decoration-types/{id}`
    fn decoration_type(&self, id: i64) -> BackendFuture<'_, ApiResponse<DecorationType>>;

    /// `GET /decoration-images`
    fn decoration_images(&self) -> BackendFuture<'_, ApiResponse<Vec<DecorationImage>>>;

    /// `GET /decoration-images/{id}`
    fn decoration_image(&self, id: i64) -> BackendFuture<'_, ApiResponse<DecorationImage>>;

    /// `GET /decoration-images/decoration-type/{decorationTypeId}`
    fn images_for_decoration_type(
        &self,
        decoration_type_id: i64,
    ) -> BackendFuture<'_, ApiResponse<Vec<DecorationImage>>>;

    /// `POST /pdf/generate`, returning the raw PDF bytes.
    fn generate_pdf<'a>(&'a self, request: &'a PdfGenerationRequest) -> BackendFuture<'a, Vec<u8>>;

    /// `POST /pdf/generate-base64`, returning the envelope around the encoded PDF.
    fn generate_pdf_base64<'a>(
        &'a self,
        request: &'a PdfGenerationRequest,
    ) -> BackendFuture<'a, ApiResponse<String>>;
}
