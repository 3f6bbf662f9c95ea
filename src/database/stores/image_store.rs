use crate::database::DbError;
use crate::database::tables::Image;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, QueryBuilder, Sqlite};

/// Narrowing applied to image queries. Fields hold already-resolved ids;
/// `None` means "no filter". Predicates are appended in declaration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageScope {
    pub tag_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub album_id: Option<i64>,
}

const IMAGE_COLUMNS: &str =
    "i.id, i.owner_id, i.album_id, i.title, i.place_text, i.created_at, i.updated_at";

pub struct ImageStore;

impl ImageStore {
    /// Starts a query over `image` with the scope's predicates applied.
    /// Callers append ordering/limits or extra conditions before building.
    fn scoped(select: &str, scope: ImageScope) -> QueryBuilder<'static, Sqlite> {
        let mut query = QueryBuilder::<Sqlite>::new(select);
        query.push(" FROM image i");
        if let Some(tag_id) = scope.tag_id {
            query.push(" JOIN image_tag it ON it.image_id = i.id AND it.tag_id = ");
            query.push_bind(tag_id);
        }
        query.push(" WHERE 1 = 1");
        if let Some(owner_id) = scope.owner_id {
            query.push(" AND i.owner_id = ");
            query.push_bind(owner_id);
        }
        if let Some(album_id) = scope.album_id {
            query.push(" AND i.album_id = ");
            query.push_bind(album_id);
        }
        query
    }

    /// Lists images in scope in ascending id order.
    pub async fn list(
        executor: impl Executor<'_, Database = Sqlite>,
        scope: ImageScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Image>, DbError> {
        let mut query = Self::scoped(&format!("SELECT {IMAGE_COLUMNS}"), scope);
        query.push(" ORDER BY i.id LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);
        Ok(query.build_query_as::<Image>().fetch_all(executor).await?)
    }

    pub async fn count(
        executor: impl Executor<'_, Database = Sqlite>,
        scope: ImageScope,
    ) -> Result<i64, DbError> {
        let mut query = Self::scoped("SELECT COUNT(*)", scope);
        Ok(query.build_query_scalar::<i64>().fetch_one(executor).await?)
    }

    /// Number of in-scope images with an id strictly below the given one,
    /// i.e. the image's position in the browsing order.
    pub async fn position(
        executor: impl Executor<'_, Database = Sqlite>,
        scope: ImageScope,
        image_id: i64,
    ) -> Result<i64, DbError> {
        let mut query = Self::scoped("SELECT COUNT(*)", scope);
        query.push(" AND i.id < ");
        query.push_bind(image_id);
        Ok(query.build_query_scalar::<i64>().fetch_one(executor).await?)
    }

    /// Fetches an image by id, but only if the scope contains it.
    pub async fn find_in_scope(
        executor: impl Executor<'_, Database = Sqlite>,
        scope: ImageScope,
        image_id: i64,
    ) -> Result<Option<Image>, DbError> {
        let mut query = Self::scoped(&format!("SELECT {IMAGE_COLUMNS}"), scope);
        query.push(" AND i.id = ");
        query.push_bind(image_id);
        Ok(query
            .build_query_as::<Image>()
            .fetch_optional(executor)
            .await?)
    }

    /// The in-scope image with the smallest id above the given one.
    pub async fn next_after(
        executor: impl Executor<'_, Database = Sqlite>,
        scope: ImageScope,
        image_id: i64,
    ) -> Result<Option<Image>, DbError> {
        let mut query = Self::scoped(&format!("SELECT {IMAGE_COLUMNS}"), scope);
        query.push(" AND i.id > ");
        query.push_bind(image_id);
        query.push(" ORDER BY i.id ASC LIMIT 1");
        Ok(query
            .build_query_as::<Image>()
            .fetch_optional(executor)
            .await?)
    }

    /// The in-scope image with the LARGEST id below the given one. Not the
    /// first row of the filter in default order; previous/next are not
    /// symmetric in that way.
    pub async fn previous_before(
        executor: impl Executor<'_, Database = Sqlite>,
        scope: ImageScope,
        image_id: i64,
    ) -> Result<Option<Image>, DbError> {
        let mut query = Self::scoped(&format!("SELECT {IMAGE_COLUMNS}"), scope);
        query.push(" AND i.id < ");
        query.push_bind(image_id);
        query.push(" ORDER BY i.id DESC LIMIT 1");
        Ok(query
            .build_query_as::<Image>()
            .fetch_optional(executor)
            .await?)
    }

    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        owner_id: i64,
        album_id: Option<i64>,
        title: Option<String>,
        place_text: Option<String>,
    ) -> Result<Image, DbError> {
        Ok(sqlx::query_as::<_, Image>(
            r"
            INSERT INTO image (owner_id, album_id, title, place_text)
            VALUES (?, ?, ?, ?)
            RETURNING id, owner_id, album_id, title, place_text, created_at, updated_at
            ",
        )
        .bind(owner_id)
        .bind(album_id)
        .bind(title)
        .bind(place_text)
        .fetch_one(executor)
        .await?)
    }

    /// Updates an image. Pass `None` for fields that should remain unchanged.
    pub async fn update(
        executor: impl Executor<'_, Database = Sqlite>,
        image_id: i64,
        title: Option<String>,
        album_id: Option<i64>,
        place_text: Option<String>,
    ) -> Result<Image, DbError> {
        Ok(sqlx::query_as::<_, Image>(
            r"
            UPDATE image
            SET title      = COALESCE(?, title),
                album_id   = COALESCE(?, album_id),
                place_text = COALESCE(?, place_text),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING id, owner_id, album_id, title, place_text, created_at, updated_at
            ",
        )
        .bind(title)
        .bind(album_id)
        .bind(place_text)
        .bind(image_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        image_id: i64,
    ) -> Result<Option<Image>, DbError> {
        Ok(sqlx::query_as::<_, Image>(
            r"
            SELECT id, owner_id, album_id, title, place_text, created_at, updated_at
            FROM image
            WHERE id = ?
            ",
        )
        .bind(image_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete(
        executor: impl Executor<'_, Database = Sqlite>,
        image_id: i64,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM image WHERE id = ?")
            .bind(image_id)
            .execute(executor)
            .await?)
    }
}
