//! In-memory catalog backend for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use base64::Engine as _;

use super::{BackendFuture, CatalogBackend};
use crate::models::{ApiResponse, DecorationImage, DecorationType, Event, PdfGenerationRequest};
use crate::{CoreError, RESOURCE_NOT_FOUND};

/// Minimal bytes that pass the `%PDF` magic check.
pub const MOCK_PDF: &[u8] = b"%PDF-1.4\n% reva mock\n%%EOF\n";

/// Identifies one backend call for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Events,
    Event,
    SearchEvents,
    DecorationTypes,
    DecorationTypesForEvent,
    DecorationType,
    DecorationImages,
    DecorationImage,
    ImagesForDecorationType,
    GeneratePdf,
    GeneratePdfBase64,
}

/// A failure [`MockCatalog`] returns instead of fixture data.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// No envelope at all (connection refused, timeout).
    Transport(String),
    /// `success: false` without an error code.
    Backend(String),
    /// `success: false` with `RESOURCE_NOT_FOUND`.
    NotFound(String),
}

/// A hand-rolled [`CatalogBackend`] serving fixture data.
///
/// Supports:
/// - per-endpoint failure injection, changeable after construction
/// - per-call latency keyed by endpoint and route id
/// - call counting via [`call_count()`](MockCatalog::call_count)
pub struct MockCatalog {
    events: Vec<Event>,
    decoration_types: Vec<DecorationType>,
    images: Vec<DecorationImage>,
    pdf_bytes: Vec<u8>,
    failures: Mutex<HashMap<Endpoint, MockFailure>>,
    delays: Mutex<HashMap<(Endpoint, i64), Duration>>,
    calls: Mutex<HashMap<Endpoint, usize>>,
    total_calls: AtomicUsize,
    last_pdf_request: Mutex<Option<PdfGenerationRequest>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            decoration_types: Vec::new(),
            images: Vec::new(),
            pdf_bytes: MOCK_PDF.to_vec(),
            failures: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
            last_pdf_request: Mutex::new(None),
        }
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_decoration_types(mut self, decoration_types: Vec<DecorationType>) -> Self {
        self.decoration_types = decoration_types;
        self
    }

    pub fn with_images(mut self, images: Vec<DecorationImage>) -> Self {
        self.images = images;
        self
    }

    pub fn with_pdf_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.pdf_bytes = bytes;
        self
    }

    pub fn with_failure(self, endpoint: Endpoint, failure: MockFailure) -> Self {
        self.set_failure(endpoint, failure);
        self
    }

    pub fn set_failure(&self, endpoint: Endpoint, failure: MockFailure) {
        lock(&self.failures).insert(endpoint, failure);
    }

    pub fn clear_failure(&self, endpoint: Endpoint) {
        lock(&self.failures).remove(&endpoint);
    }

    /// Latency for calls to `endpoint` with route id `id`.
    pub fn set_delay_for(&self, endpoint: Endpoint, id: i64, delay: Duration) {
        lock(&self.delays).insert((endpoint, id), delay);
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        lock(&self.calls).get(&endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn last_pdf_request(&self) -> Option<PdfGenerationRequest> {
        lock(&self.last_pdf_request).clone()
    }

    fn record(&self, endpoint: Endpoint, id: Option<i64>) -> (Option<MockFailure>, Option<Duration>) {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.calls).entry(endpoint).or_insert(0) += 1;
        let failure = lock(&self.failures).get(&endpoint).cloned();
        let delay = id.and_then(|id| lock(&self.delays).get(&(endpoint, id)).copied());
        (failure, delay)
    }

    fn respond<T: Send + 'static>(
        &self,
        endpoint: Endpoint,
        id: Option<i64>,
        data: Option<T>,
        missing: String,
    ) -> BackendFuture<'_, ApiResponse<T>> {
        let (failure, delay) = self.record(endpoint, id);
        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match failure {
                Some(MockFailure::Transport(msg)) => Err(CoreError::Transport(msg)),
                Some(MockFailure::Backend(msg)) => Ok(ApiResponse::failure(msg, None)),
                Some(MockFailure::NotFound(msg)) => {
                    Ok(ApiResponse::failure(msg, Some(RESOURCE_NOT_FOUND)))
                }
                None => match data {
                    Some(data) => Ok(ApiResponse::ok(data)),
                    None => Ok(ApiResponse::failure(missing, Some(RESOURCE_NOT_FOUND))),
                },
            }
        })
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CatalogBackend for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    fn events(&self) -> BackendFuture<'_, ApiResponse<Vec<Event>>> {
        self.respond(Endpoint::Events, None, Some(self.events.clone()), String::new())
    }

    fn event(&self, id: i64) -> BackendFuture<'_, ApiResponse<Event>> {
        let found = self.events.iter().find(|e| e.id == id).cloned();
        self.respond(
            Endpoint::Event,
            Some(id),
            found,
            format!("Event not found with id: {id}"),
        )
    }

    fn search_events<'a>(&'a self, query: &'a str) -> BackendFuture<'a, ApiResponse<Vec<Event>>> {
        let needle = query.to_lowercase();
        let hits = self
            .events
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.respond(Endpoint::SearchEvents, None, Some(hits), String::new())
    }

    fn decoration_types(&self) -> BackendFuture<'_, ApiResponse<Vec<DecorationType>>> {
        self.respond(
            Endpoint::DecorationTypes,
            None,
            Some(self.decoration_types.clone()),
            String::new(),
        )
    }

    fn decoration_types_for_event(
        &self,
        event_id: i64,
    ) -> BackendFuture<'_, ApiResponse<Vec<DecorationType>>> {
        let types = self
            .decoration_types
            .iter()
            .filter(|t| t.event_id == Some(event_id))
            .cloned()
            .collect();
        self.respond(
            Endpoint::DecorationTypesForEvent,
            Some(event_id),
            Some(types),
            String::new(),
        )
    }

    fn decoration_type(&self, id: i64) -> BackendFuture<'_, ApiResponse<DecorationType>> {
        let found = self.decoration_types.iter().find(|t| t.id == id).cloned();
        self.respond(
            Endpoint::DecorationType,
            Some(id),
            found,
            format!("Decoration type not found with id: {id}"),
        )
    }

    fn decoration_images(&self) -> BackendFuture<'_, ApiResponse<Vec<DecorationImage>>> {
        self.respond(
            Endpoint::DecorationImages,
            None,
            Some(self.images.clone()),
            String::new(),
        )
    }

    fn decoration_image(&self, id: i64) -> BackendFuture<'_, ApiResponse<DecorationImage>> {
        let found = self.images.iter().find(|i| i.id == id).cloned();
        self.respond(
            Endpoint::DecorationImage,
            Some(id),
            found,
            format!("Decoration image not found with id: {id}"),
        )
    }

    fn images_for_decoration_type(
        &self,
        decoration_type_id: i64,
    ) -> BackendFuture<'_, ApiResponse<Vec<DecorationImage>>> {
        let images = self
            .images
            .iter()
            .filter(|i| i.decoration_type_id == Some(decoration_type_id))
            .cloned()
            .collect();
        self.respond(
            Endpoint::ImagesForDecorationType,
            Some(decoration_type_id),
            Some(images),
            String::new(),
        )
    }

    fn generate_pdf<'a>(&'a self, request: &'a PdfGenerationRequest) -> BackendFuture<'a, Vec<u8>> {
        let (failure, delay) = self.record(Endpoint::GeneratePdf, Some(request.event_id));
        *lock(&self.last_pdf_request) = Some(request.clone());
        let bytes = self.pdf_bytes.clone();
        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match failure {
                Some(MockFailure::Transport(msg)) => Err(CoreError::Transport(msg)),
                Some(MockFailure::Backend(msg)) | Some(MockFailure::NotFound(msg)) => {
                    Err(CoreError::Pdf(msg))
                }
                None => Ok(bytes),
            }
        })
    }

    fn generate_pdf_base64<'a>(
        &'a self,
        request: &'a PdfGenerationRequest,
    ) -> BackendFuture<'a, ApiResponse<String>> {
        *lock(&self.last_pdf_request) = Some(request.clone());
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.pdf_bytes);
        self.respond(
            Endpoint::GeneratePdfBase64,
            Some(request.event_id),
            Some(encoded),
            String::new(),
        )
    }
}
