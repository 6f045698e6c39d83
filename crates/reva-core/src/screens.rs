//! Data loads behind the three catalog screens.
//!
//! Each loader issues the screen's primary fetch (plus the parent-entity
//! fetch for the decoration-type and gallery screens) and turns the answer
//! into a view or a [`CoreError`]. [`ScreenKind::into_message`] converts the
//! error into the single message a screen displays.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::CoreError;
use crate::api::CatalogBackend;
use crate::models::{ApiResponse, DecorationImage, DecorationType, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Events,
    DecorationTypes,
    Gallery,
}

impl ScreenKind {
    /// What the screen lists, as used in messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::DecorationTypes => "decoration types",
            Self::Gallery => "images",
        }
    }

    /// The message shown when a load fails with `err`.
    pub fn failure_message(self, err: &CoreError) -> String {
        match err {
            e if e.is_transport() => {
                format!("Error loading {}. Please try again.", self.noun())
            }
            CoreError::NotFound(msg) if !msg.is_empty() => msg.clone(),
            CoreError::Cancelled => "Request cancelled".to_string(),
            _ => format!("Failed to fetch {}", self.noun()),
        }
    }

    /// Log a failed load and reduce it to its display message.
    pub fn into_message<T>(self, result: Result<T, CoreError>) -> Result<T, String> {
        result.map_err(|e| {
            tracing::warn!(screen = self.noun(), error = %e, "screen load failed");
            self.failure_message(&e)
        })
    }
}

/// Everything the decoration-type screen renders for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationTypesView {
    /// Parent event; `None` when the backend could not supply it.
    pub event: Option<Event>,
    pub decoration_types: Vec<DecorationType>,
}

impl DecorationTypesView {
    pub fn event_name(&self) -> &str {
        self.event.as_ref().map(|e| e.name.as_str()).unwrap_or("")
    }
}

/// Everything the gallery screen renders for one decoration type.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    pub decoration_type: Option<DecorationType>,
    pub images: Vec<DecorationImage>,
}

impl GalleryView {
    /// Name recorded on images selected from this gallery.
    pub fn decoration_type_name(&self) -> &str {
        self.decoration_type
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or("")
    }

    /// Owning event as `(id, name)`, `(0, "")` when unknown.
    pub fn event_ref(&self) -> (i64, &str) {
        match &self.decoration_type {
            Some(t) => (t.event_id.unwrap_or(0), t.event_name.as_deref().unwrap_or("")),
            None => (0, ""),
        }
    }
}

/// Run `fut` unless `cancel` fires first.
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, CoreError>>,
) -> Result<T, CoreError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(CoreError::Cancelled),
        result = fut => result,
    }
}

/// Keep a parent entity only from a success envelope.
fn parent_entity<T>(envelope: ApiResponse<T>, what: &str) -> Option<T> {
    if !envelope.success {
        tracing::warn!(
            entity = what,
            message = envelope.message.as_deref().unwrap_or(""),
            "parent entity unavailable"
        );
        return None;
    }
    envelope.data
}

pub async fn load_events(
    backend: &dyn CatalogBackend,
    cancel: &CancellationToken,
) -> Result<Vec<Event>, CoreError> {
    cancellable(cancel, async {
        let events = backend.events().await?.into_result()?;
        tracing::debug!(backend = backend.name(), count = events.len(), "events loaded");
        Ok::<_, CoreError>(events)
    })
    .await
}

pub async fn load_decoration_types(
    backend: &dyn CatalogBackend,
    event_id: i64,
    cancel: &CancellationToken,
) -> Result<DecorationTypesView, CoreError> {
    cancellable(cancel, async {
        let (event, types) = tokio::join!(
            backend.event(event_id),
            backend.decoration_types_for_event(event_id)
        );
        let event = parent_entity(event?, "event");
        let decoration_types = types?.into_result()?;
        tracing::debug!(
            backend = backend.name(),
            event_id,
            count = decoration_types.len(),
            "decoration types loaded"
        );
        Ok::<_, CoreError>(DecorationTypesView {
            event,
            decoration_types,
        })
    })
    .await
}

pub async fn load_gallery(
    backend: &dyn CatalogBackend,
    decoration_type_id: i64,
    cancel: &CancellationToken,
) -> Result<GalleryView, CoreError> {
    cancellable(cancel, async {
        let (decoration_type, images) = tokio::join!(
            backend.decoration_type(decoration_type_id),
            backend.images_for_decoration_type(decoration_type_id)
        );
        let decoration_type = parent_entity(decoration_type?, "decoration type");
        let images = images?.into_result()?;
        tracing::debug!(
            backend = backend.name(),
            decoration_type_id,
            count = images.len(),
            "images loaded"
        );
        Ok::<_, CoreError>(GalleryView {
            decoration_type,
            images,
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_by_failure_kind() {
        let kind = ScreenKind::Events;
        assert_eq!(
            kind.failure_message(&CoreError::Transport("refused".into())),
            "Error loading events. Please try again."
        );
        assert_eq!(
            kind.failure_message(&CoreError::Backend {
                message: "db down".into(),
                error_code: None
            }),
            "Failed to fetch events"
        );
        assert_eq!(
            ScreenKind::Gallery.failure_message(&CoreError::NotFound(
                "Decoration type not found with id: 3".into()
            )),
            "Decoration type not found with id: 3"
        );
        assert_eq!(
            ScreenKind::DecorationTypes.failure_message(&CoreError::NotFound(String::new())),
            "Failed to fetch decoration types"
        );
    }

    #[test]
    fn gallery_event_ref_defaults() {
        let view = GalleryView {
            decoration_type: None,
            images: vec![],
        };
        assert_eq!(view.event_ref(), (0, ""));
        assert_eq!(view.decoration_type_name(), "");
    }
}
