use crate::database::DbError;
use crate::database::tables::{Capability, User, UserWithPassword};
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Executor, Sqlite};

pub struct UserStore;

impl UserStore {
    /// Creates a new user.
    pub async fn create(
        executor: impl Executor<'_, Database = Sqlite>,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (username, email, password)
            VALUES (?, ?, ?)
            RETURNING id, created_at, updated_at, username, email
            ",
        )
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, created_at, updated_at, username, email
            FROM app_user
            WHERE id = ?
            ",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_username(
        executor: impl Executor<'_, Database = Sqlite>,
        username: &str,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, created_at, updated_at, username, email
            FROM app_user
            WHERE username = ?
            ",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_username_with_password(
        executor: impl Executor<'_, Database = Sqlite>,
        username: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            r"
            SELECT id, created_at, updated_at, username, email, password
            FROM app_user
            WHERE username = ?
            ",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?)
    }

    /// Retrieves all capability tokens granted to a user.
    pub async fn capabilities(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
    ) -> Result<Vec<Capability>, DbError> {
        Ok(sqlx::query_scalar::<_, Capability>(
            r"
            SELECT capability
            FROM user_capability
            WHERE user_id = ?
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Grants a capability to a user. Granting twice is a no-op.
    pub async fn grant(
        executor: impl Executor<'_, Database = Sqlite>,
        user_id: i64,
        capability: Capability,
    ) -> Result<SqliteQueryResult, DbError> {
        Ok(sqlx::query(
            r"
            INSERT OR IGNORE INTO user_capability (user_id, capability)
            VALUES (?, ?)
            ",
        )
        .bind(user_id)
        .bind(capability)
        .execute(executor)
        .await?)
    }
}
