use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub mod api;
pub mod config_file;
pub mod filter;
pub mod load;
pub mod models;
pub mod pdf;
pub mod screens;
pub mod selection;
pub mod session;
pub mod validation;

// Re-export for convenience
pub use api::{CatalogBackend, HttpCatalog};
pub use filter::{Searchable, filter, filtered_indices};
pub use load::{LoadState, LoadTicket, ScreenLoader};
pub use models::{ApiResponse, DecorationImage, DecorationType, Event, PdfGenerationRequest, SelectedImage};
pub use selection::{SelectionStore, SubscriptionId};
pub use session::Session;

/// Default backend base URL, including the API version prefix.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error code the backend attaches to envelopes for missing entities.
pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";

#[derive(Error, Debug)]
pub enum CoreError {
    /// Network-level failure: connect, timeout, non-JSON error page.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with `success: false`.
    #[error("backend error: {message}")]
    Backend {
        message: String,
        error_code: Option<String>,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("Please select at least one image to generate PDF")]
    EmptySelection,
    #[error("selection store accessed outside an active session")]
    NoActiveSession,
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("request cancelled")]
    Cancelled,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CoreError::Transport(format!("request timed out: {e}"))
        } else if e.is_decode() {
            CoreError::Decode(e.to_string())
        } else {
            CoreError::Transport(e.to_string())
        }
    }
}

impl CoreError {
    /// Whether this failure happened below the envelope (no usable backend answer).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CoreError::Transport(_) | CoreError::Decode(_) | CoreError::Io(_)
        )
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Directory exported PDFs are written to.
    pub output_dir: PathBuf,
    /// Use the base64 endpoint instead of the binary one.
    pub use_base64: bool,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: PathBuf::from("."),
            use_base64: false,
        }
    }
}
