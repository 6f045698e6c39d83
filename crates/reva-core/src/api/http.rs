use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{BackendFuture, CatalogBackend};
use crate::models::{ApiResponse, DecorationImage, DecorationType, Event, PdfGenerationRequest};
use crate::{Config, CoreError, RESOURCE_NOT_FOUND};

const USER_AGENT: &str = concat!("reva/", env!("CARGO_PKG_VERSION"));

/// [`CatalogBackend`] over the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpCatalog {
    /// Fails with [`CoreError::Config`] when `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CoreError> {
        let base_url = base_url.into();
        match reqwest::Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) => return Err(CoreError::Config(format!("unsupported base URL: {base_url}"))),
            Err(e) => return Err(CoreError::Config(format!("invalid base URL {base_url}: {e}"))),
        }
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(base_url, client, timeout))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: String) -> Result<ApiResponse<T>, CoreError> {
        let url = self.url(&path);
        tracing::debug!(%url, "GET");
        let resp = self.client.get(&url).timeout(self.timeout).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            CoreError::from(e)
        })?;
        decode_envelope(resp).await
    }

    async fn post_pdf(&self, request: &PdfGenerationRequest) -> Result<Vec<u8>, CoreError> {
        let url = self.url("/pdf/generate");
        tracing::info!(
            %url,
            event = %request.event_name,
            images = request.selected_images.len(),
            "requesting PDF"
        );
        let resp = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "PDF generation rejected");
            return Err(CoreError::Pdf(format!("HTTP {status}")));
        }
        let bytes = resp.bytes().await?;
        tracing::info!(bytes = bytes.len(), "PDF received");
        Ok(bytes.to_vec())
    }

    async fn post_pdf_base64(
        &self,
        request: &PdfGenerationRequest,
    ) -> Result<ApiResponse<String>, CoreError> {
        let url = self.url("/pdf/generate-base64");
        tracing::info!(
            %url,
            event = %request.event_name,
            images = request.selected_images.len(),
            "requesting base64 PDF"
        );
        let resp = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;
        decode_envelope(resp).await
    }
}

/// Decode a response body as an envelope.
///
/// Error statuses still carry an envelope when the backend's exception
/// handler produced one. A bare 404 becomes a not-found envelope; any other
/// non-JSON error page is a transport failure.
async fn decode_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiResponse<T>, CoreError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    match serde_json::from_slice::<ApiResponse<T>>(&body) {
        Ok(mut envelope) => {
            if status == reqwest::StatusCode::NOT_FOUND && envelope.error_code.is_none() {
                envelope.error_code = Some(RESOURCE_NOT_FOUND.to_string());
            }
            if !envelope.success {
                tracing::debug!(
                    %status,
                    code = envelope.error_code.as_deref().unwrap_or(""),
                    message = envelope.message.as_deref().unwrap_or(""),
                    "backend reported failure"
                );
            }
            Ok(envelope)
        }
        Err(_) if status == reqwest::StatusCode::NOT_FOUND => {
            Ok(ApiResponse::failure("Resource not found", Some(RESOURCE_NOT_FOUND)))
        }
        Err(_) if !status.is_success() => Err(CoreError::Transport(format!("HTTP {status}"))),
        Err(e) => Err(CoreError::Decode(e.to_string())),
    }
}

impl CatalogBackend for HttpCatalog {
    fn name(&self) -> &str {
        "http"
    }

    fn events(&self) -> BackendFuture<'_, ApiResponse<Vec<Event>>> {
        Box::pin(self.get_envelope("/events".to_string()))
    }

    fn event(&self, id: i64) -> BackendFuture<'_, ApiResponse<Event>> {
        Box::pin(self.get_envelope(format!("/events/{id}")))
    }

    fn search_events<'a>(&'a self, query: &'a str) -> BackendFuture<'a, ApiResponse<Vec<Event>>> {
        // The controller binds `name`; the published client contract uses `q`.
        let encoded = urlencoding::encode(query);
        Box::pin(self.get_envelope(format!("/events/search?q={encoded}&name={encoded}")))
    }

    fn decoration_types(&self) -> BackendFuture<'_, ApiResponse<Vec<DecorationType>>> {
        Box::pin(self.get_envelope("/decoration-types".to_string()))
    }

    fn decoration_types_for_event(
        &self,
        event_id: i64,
    ) -> BackendFuture<'_, ApiResponse<Vec<DecorationType>>> {
        Box::pin(self.get_envelope(format!("/decoration-types/event/{event_id}")))
    }

    fn decoration_type(&self, id: i64) -> BackendFuture<'_, ApiResponse<DecorationType>> {
        Box::pin(self.get_envelope(format!("/decoration-types/{id}")))
    }

    fn decoration_images(&self) -> BackendFuture<'_, ApiResponse<Vec<DecorationImage>>> {
        Box::pin(self.get_envelope("/decoration-images".to_string()))
    }

    fn decoration_image(&self, id: i64) -> BackendFuture<'_, ApiResponse<DecorationImage>> {
        Box::pin(self.get_envelope(format!("/decoration-images/{id}")))
    }

    fn images_for_decoration_type(
        &self,
        decoration_type_id: i64,
    ) -> BackendFuture<'_, ApiResponse<Vec<DecorationImage>>> {
        Box::pin(self.get_envelope(format!(
            "/decoration-images/decoration-type/{decoration_type_id}"
        )))
    }

    fn generate_pdf<'a>(&'a self, request: &'a PdfGenerationRequest) -> BackendFuture<'a, Vec<u8>> {
        Box::pin(self.post_pdf(request))
    }

    fn generate_pdf_base64<'a>(
        &'a self,
        request: &'a PdfGenerationRequest,
    ) -> BackendFuture<'a, ApiResponse<String>> {
        Box::pin(self.post_pdf_base64(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let catalog = HttpCatalog::new("http://localhost:8080/api/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(catalog.url("/events/3"), "http://localhost:8080/api/v1/events/3");
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        for bad in ["localhost:8080/api/v1", "ftp://catalog.local/api/v1", ""] {
            assert!(
                matches!(
                    HttpCatalog::new(bad, Duration::from_secs(1)),
                    Err(CoreError::Config(_))
                ),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn from_config_uses_timeout() {
        let config = Config {
            timeout_secs: 3,
            ..Config::default()
        };
        let catalog = HttpCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.timeout, Duration::from_secs(3));
        assert_eq!(catalog.base_url(), crate::DEFAULT_BASE_URL);
    }
}
