use crate::database::DbError;
use crate::database::tables::Place;
use sqlx::{Executor, Sqlite};

pub struct PlaceStore;

impl PlaceStore {
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        place_id: i64,
    ) -> Result<Option<Place>, DbError> {
        Ok(
            sqlx::query_as::<_, Place>("SELECT id, name FROM place WHERE id = ?")
                .bind(place_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
    ) -> Result<Place, DbError> {
        Ok(
            sqlx::query_as::<_, Place>("INSERT INTO place (name) VALUES (?) RETURNING id, name")
                .bind(name)
                .fetch_one(executor)
                .await?,
        )
    }
}
