use crate::database::tables::AlbumWithCount;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Request payloads ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub name: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

const fn default_is_public() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub name: Option<String>,
    pub is_public: Option<bool>,
    /// New cover image; must be one of the album's own images.
    pub head_id: Option<i64>,
}

// --- Query parameters ---

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAlbumsParams {
    /// Narrow the listing to albums owned by this user.
    pub username: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
}

pub(crate) const fn default_page() -> i64 {
    1
}

// --- Response payloads ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedAlbumsResponse {
    pub items: Vec<AlbumWithCount>,
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
}
