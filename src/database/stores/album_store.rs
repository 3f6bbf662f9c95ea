use crate::database::DbError;
use crate::database::tables::{Album, AlbumWithCount};
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, QueryBuilder, Sqlite};

pub struct AlbumStore;

impl AlbumStore {
    /// Creates a new album for the given owner.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
        name: &str,
        is_public: bool,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            INSERT INTO album (owner_id, name, is_public)
            VALUES (?, ?, ?)
            RETURNING id, owner_id, name, is_public, head_id, created_at, updated_at
            ",
        )
        .bind(owner_id)
        .bind(name)
        .bind(is_public)
        .fetch_one(executor)
        .await?)
    }

    /// Updates the details of an album. Pass `None` for fields that should
    /// remain unchanged.
    pub async fn update(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
        name: Option<String>,
        is_public: Option<bool>,
        head_id: Option<i64>,
    ) -> Result<Album, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            UPDATE album
            SET name       = COALESCE(?, name),
                is_public  = COALESCE(?, is_public),
                head_id    = COALESCE(?, head_id),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING id, owner_id, name, is_public, head_id, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(is_public)
        .bind(head_id)
        .bind(album_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<Option<Album>, DbError> {
        Ok(sqlx::query_as::<_, Album>(
            r"
            SELECT id, owner_id, name, is_public, head_id, created_at, updated_at
            FROM album
            WHERE id = ?
            ",
        )
        .bind(album_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM album WHERE id = ?")
            .bind(album_id)
            .execute(executor)
            .await?)
    }

    /// Lists albums with owner name and image count, optionally narrowed to
    /// one owner, ordered by id for stable pagination.
    pub async fn list_with_count(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AlbumWithCount>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT a.id, a.owner_id, u.username AS owner_username, a.name, a.is_public, \
             a.head_id, COUNT(i.id) AS images_count, a.created_at, a.updated_at \
             FROM album a \
             JOIN app_user u ON u.id = a.owner_id \
             LEFT JOIN image i ON i.album_id = a.id",
        );
        if let Some(owner_id) = owner_id {
            query.push(" WHERE a.owner_id = ").push_bind(owner_id);
        }
        query.push(" GROUP BY a.id ORDER BY a.id LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        Ok(query
            .build_query_as::<AlbumWithCount>()
            .fetch_all(executor)
            .await?)
    }

    pub async fn count(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: Option<i64>,
    ) -> Result<i64, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM album");
        if let Some(owner_id) = owner_id {
            query.push(" WHERE owner_id = ").push_bind(owner_id);
        }
        Ok(query.build_query_scalar::<i64>().fetch_one(executor).await?)
    }

    /// Re-derives the album's cached state from its images: keeps the
    /// current head if it still belongs to the album, otherwise falls back
    /// to the oldest image, and bumps `updated_at`.
    pub async fn refresh_aggregate(
        executor: impl Executor<'_, Database = Sqlite>,
        album_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            UPDATE album
            SET head_id    = COALESCE(
                    (SELECT id FROM image WHERE album_id = ? AND id = album.head_id),
                    (SELECT MIN(id) FROM image WHERE album_id = ?)
                ),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            ",
        )
        .bind(album_id)
        .bind(album_id)
        .bind(album_id)
        .execute(executor)
        .await?)
    }
}
