use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Represents a user in the application.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub email: String,
}

/// User record including the password hash. Never serialized.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Named permission tokens, stored as TEXT in `user_capability`.
///
/// The write capabilities gate one operation each; the moderate capabilities
/// widen view/edit scope past ownership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    AddAlbum,
    ChangeAlbum,
    DeleteAlbum,
    AddImage,
    ChangeImage,
    DeleteImage,
    ModerateAlbums,
    ModerateImages,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AddAlbum => "add_album",
            Self::ChangeAlbum => "change_album",
            Self::DeleteAlbum => "delete_album",
            Self::AddImage => "add_image",
            Self::ChangeImage => "change_image",
            Self::DeleteImage => "delete_image",
            Self::ModerateAlbums => "moderate_albums",
            Self::ModerateImages => "moderate_images",
        };
        f.write_str(s)
    }
}
