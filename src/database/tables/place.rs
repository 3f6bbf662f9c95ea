use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named place used to pre-fill the location of a new image.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Place {
    pub id: i64,
    pub name: String,
}
