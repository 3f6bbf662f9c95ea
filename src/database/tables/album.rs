use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a single album in the database.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub is_public: bool,
    /// Cover image id. Weak reference, cleared when the image goes away.
    pub head_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Album row joined with its owner's name and image count, for listings.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumWithCount {
    pub id: i64,
    pub owner_id: i64,
    pub owner_username: String,
    pub name: String,
    pub is_public: bool,
    pub head_id: Option<i64>,
    pub images_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
