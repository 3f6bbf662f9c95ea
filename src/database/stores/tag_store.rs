use crate::database::DbError;
use crate::database::tables::Tag;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct TagStore;

impl TagStore {
    /// Resolves a tag token to its tag record.
    pub async fn find_by_name(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
    ) -> Result<Option<Tag>, DbError> {
        Ok(
            sqlx::query_as::<_, Tag>("SELECT id, name FROM tag WHERE name = ?")
                .bind(name)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Creates the tag if it does not exist yet and returns it either way.
    pub async fn upsert(
        executor: impl Executor<'_, Database = Sqlite>,
        name: &str,
    ) -> Result<Tag, DbError> {
        Ok(sqlx::query_as::<_, Tag>(
            r"
            INSERT INTO tag (name)
            VALUES (?)
            ON CONFLICT (name) DO UPDATE SET name = excluded.name
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(executor)
        .await?)
    }

    /// Links a tag to an image. Linking twice is a no-op.
    pub async fn attach(
        executor: impl Executor<'_, Database = Sqlite>,
        image_id: i64,
        tag_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(
            sqlx::query("INSERT OR IGNORE INTO image_tag (image_id, tag_id) VALUES (?, ?)")
                .bind(image_id)
                .bind(tag_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn clear_image_tags(
        executor: impl Executor<'_, Database = Sqlite>,
        image_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM image_tag WHERE image_id = ?")
            .bind(image_id)
            .execute(executor)
            .await?)
    }

    pub async fn names_for_image(
        executor: impl Executor<'_, Database = Sqlite>,
        image_id: i64,
    ) -> Result<Vec<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            r"
            SELECT t.name
            FROM tag t
            JOIN image_tag it ON it.tag_id = t.id
            WHERE it.image_id = ?
            ORDER BY t.name
            ",
        )
        .bind(image_id)
        .fetch_all(executor)
        .await?)
    }
}
