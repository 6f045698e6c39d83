//! Wire types for the catalog backend.
//!
//! The backend owns every catalog entity; the client only reads them. Names
//! copied from a parent (`event_name`, `decoration_type_name`) are snapshots
//! taken when the backend built the response.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{CoreError, RESOURCE_NOT_FOUND};

/// Accept `null` or a missing key for list fields.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a backend timestamp (ISO-8601 local date-time, optional fraction).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.trim().parse().ok()
}

/// A top-level catalog category (a wedding ceremony).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub decoration_types: Vec<DecorationType>,
}

/// A decoration area within an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, alias = "images", deserialize_with = "null_as_empty")]
    pub decoration_images: Vec<DecorationImage>,
}

/// A single browsable catalog image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationImage {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub decoration_type_id: Option<i64>,
    #[serde(default)]
    pub decoration_type_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

macro_rules! impl_common_accessors {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Description text, empty when the backend sent none.
                pub fn description_text(&self) -> &str {
                    self.description.as_deref().unwrap_or("")
                }

                /// Entities without an explicit flag are treated as active.
                pub fn active(&self) -> bool {
                    self.is_active.unwrap_or(true)
                }

                pub fn created(&self) -> Option<NaiveDateTime> {
                    self.created_at.as_deref().and_then(parse_timestamp)
                }

                pub fn updated(&self) -> Option<NaiveDateTime> {
                    self.updated_at.as_deref().and_then(parse_timestamp)
                }
            }
        )*
    };
}

impl_common_accessors!(Event, DecorationType, DecorationImage);

/// Common response envelope wrapping every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Missing and `null` both read as `None`.
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: Some("OK".to_string()),
            data: Some(data),
            timestamp: Some(chrono::Local::now().naive_local().to_string()),
            error_code: None,
        }
    }

    pub fn failure(message: impl Into<String>, error_code: Option<&str>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            timestamp: Some(chrono::Local::now().naive_local().to_string()),
            error_code: error_code.map(str::to_string),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.error_code.as_deref() == Some(RESOURCE_NOT_FOUND)
    }

    /// Unwrap the payload, turning a failure envelope into an error.
    pub fn into_result(self) -> Result<T, CoreError> {
        let message = self.message.unwrap_or_default();
        if !self.success {
            if self.error_code.as_deref() == Some(RESOURCE_NOT_FOUND) {
                return Err(CoreError::NotFound(message));
            }
            return Err(CoreError::Backend {
                message,
                error_code: self.error_code,
            });
        }
        self.data
            .ok_or_else(|| CoreError::Decode("success envelope without data".to_string()))
    }
}

/// A client-local record of a chosen image.
///
/// Serialized with the same keys the PDF endpoint expects for each entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedImage {
    pub image_id: i64,
    pub image_name: String,
    pub image_url: String,
    /// Decoration-type name at the time of selection; never refreshed.
    pub decoration_type_name: String,
}

impl SelectedImage {
    pub fn from_image(image: &DecorationImage, decoration_type_name: &str) -> Self {
        Self {
            image_id: image.id,
            image_name: image.name.clone(),
            image_url: image.image_url.clone(),
            decoration_type_name: decoration_type_name.to_string(),
        }
    }
}

/// Body of `POST /pdf/generate` and `POST /pdf/generate-base64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfGenerationRequest {
    pub event_id: i64,
    pub event_name: String,
    pub selected_images: Vec<SelectedImage>,
}
