use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a single image record in the database.
///
/// The id is monotonic (AUTOINCREMENT) and doubles as the navigation
/// ordering key for previous/next browsing.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: i64,
    pub owner_id: i64,
    pub album_id: Option<i64>,
    pub title: Option<String>,
    pub place_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
