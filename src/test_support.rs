//! Shared arrange helpers for the service tests.

use crate::database::pool::get_db_pool;
use crate::database::stores::UserStore;
use crate::database::tables::{Capability, User};
use crate::routes::auth::viewer::Viewer;
use crate::settings::DatabaseSettings;
use sqlx::SqlitePool;

/// Fresh in-memory database with all migrations applied. Capped to a single
/// connection so the memory database is shared across acquires.
pub async fn memory_pool() -> SqlitePool {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".into(),
        max_connections: 1,
    };
    get_db_pool(&settings).await.expect("in-memory database")
}

/// Creates a user with the given capabilities. The stored password hash is
/// junk; tests that exercise login seed their own user with a real hash.
pub async fn seed_user(pool: &SqlitePool, username: &str, capabilities: &[Capability]) -> User {
    let email = format!("{username}@example.com");
    let user = UserStore::create(pool, username, &email, "unusable-hash")
        .await
        .expect("create user");
    for capability in capabilities {
        UserStore::grant(pool, user.id, *capability)
            .await
            .expect("grant capability");
    }
    user
}

pub fn viewer(user: &User, capabilities: &[Capability]) -> Viewer {
    Viewer::authenticated(user.clone(), capabilities.iter().copied())
}
