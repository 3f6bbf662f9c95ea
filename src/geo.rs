//! Optional geolocation lookup, injected as a capability so deployments
//! without place data can run with the null implementation.

use crate::database::stores::PlaceStore;
use async_trait::async_trait;
use color_eyre::Result;
use sqlx::SqlitePool;

#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve a place id to its display name.
    async fn place_name(&self, place_id: i64) -> Result<Option<String>>;
}

/// Lookup backed by the `place` table.
pub struct DbGeoLookup {
    pool: SqlitePool,
}

impl DbGeoLookup {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeoLookup for DbGeoLookup {
    async fn place_name(&self, place_id: i64) -> Result<Option<String>> {
        let place = PlaceStore::find_by_id(&self.pool, place_id).await?;
        Ok(place.map(|p| p.name))
    }
}

/// Absent geolocation capability: never resolves anything.
pub struct NoGeoLookup;

#[async_trait]
impl GeoLookup for NoGeoLookup {
    async fn place_name(&self, _place_id: i64) -> Result<Option<String>> {
        Ok(None)
    }
}
