use crate::database::tables::Image;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Query parameters ---

/// Scope narrowing for image listings and detail views. Absent fields mean
/// "no filter"; `page` only applies to listings and is ignored elsewhere.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ImageScopeParams {
    /// Narrow to images carrying this tag.
    pub tag: Option<String>,
    /// Narrow to images owned by this user.
    pub username: Option<String>,
    /// Narrow to images filed under this album.
    pub album_id: Option<i64>,
    #[serde(default = "default_page")]
    pub page: i64,
}

const fn default_page() -> i64 {
    1
}

// --- Request payloads ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub title: Option<String>,
    /// Album to file the image under; the viewer must own it or moderate
    /// albums.
    pub album_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Resolved through the geolocation lookup to pre-fill `place_text`.
    pub place_id: Option<i64>,
    /// Free-form location; takes precedence over `place_id`.
    pub place_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    pub title: Option<String>,
    pub album_id: Option<i64>,
    /// Replaces the full tag set when present.
    pub tags: Option<Vec<String>>,
    pub place_text: Option<String>,
}

// --- Response payloads ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: i64,
    pub owner_id: i64,
    pub album_id: Option<i64>,
    pub title: Option<String>,
    pub place_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl ImageResponse {
    #[must_use]
    pub fn new(image: Image, tags: Vec<String>) -> Self {
        Self {
            id: image.id,
            owner_id: image.owner_id,
            album_id: image.album_id,
            title: image.title,
            place_text: image.place_text,
            created_at: image.created_at,
            updated_at: image.updated_at,
            tags,
        }
    }
}

/// Slim neighbor reference for browsing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub id: i64,
    pub title: Option<String>,
}

impl From<Image> for ImageSummary {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            title: image.title,
        }
    }
}

/// Image detail plus its place in the scope's browsing order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetailResponse {
    pub image: ImageResponse,
    /// Number of in-scope images before this one.
    pub position: i64,
    pub total: i64,
    pub previous: Option<ImageSummary>,
    pub next: Option<ImageSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedImagesResponse {
    pub items: Vec<Image>,
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
}
