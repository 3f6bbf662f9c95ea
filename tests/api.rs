//! End-to-end tests driving the HTTP surface through the router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use imagestore::database::pool::get_db_pool;
use imagestore::database::stores::UserStore;
use imagestore::database::tables::Capability;
use imagestore::geo::DbGeoLookup;
use imagestore::routes::auth::hashing::hash_password;
use imagestore::routes::create_router;
use imagestore::settings::{
    ApiSettings, AppSettings, AuthSettings, DatabaseSettings, LoggingSettings, PaginationSettings,
};
use imagestore::state::ApiContext;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const PASSWORD: &str = "correct horse battery staple";

const ALL_CAPS: [Capability; 8] = [
    Capability::AddAlbum,
    Capability::ChangeAlbum,
    Capability::DeleteAlbum,
    Capability::AddImage,
    Capability::ChangeImage,
    Capability::DeleteImage,
    Capability::ModerateAlbums,
    Capability::ModerateImages,
];

async fn test_context() -> ApiContext {
    let database = DatabaseSettings {
        url: "sqlite::memory:".into(),
        max_connections: 1,
    };
    let pool = get_db_pool(&database).await.expect("in-memory database");
    let settings = AppSettings {
        api: ApiSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database,
        auth: AuthSettings {
            jwt_secret: "test-secret".into(),
            token_expiry_minutes: 60,
        },
        pagination: PaginationSettings {
            albums_per_page: 20,
            images_per_page: 20,
        },
        logging: LoggingSettings {
            level: "warn".into(),
        },
    };
    ApiContext {
        geo: Arc::new(DbGeoLookup::new(pool.clone())),
        pool,
        settings,
    }
}

async fn seed_user(context: &ApiContext, username: &str, capabilities: &[Capability]) -> i64 {
    let hash = hash_password(PASSWORD.as_bytes()).expect("hash password");
    let email = format!("{username}@example.com");
    let user = UserStore::create(&context.pool, username, &email, &hash)
        .await
        .expect("create user");
    for capability in capabilities {
        UserStore::grant(&context.pool, user.id, *capability)
            .await
            .expect("grant capability");
    }
    user.id
}

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = router.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse body")
    };
    (status, value)
}

async fn login(router: &Router, username: &str) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn root_reports_service_info() {
    let context = test_context().await;
    let router = create_router(context);

    let (status, body) = request(&router, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "imagestore");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let context = test_context().await;
    seed_user(&context, "ansel", &[]).await;
    let router = create_router(context);

    let (status, _) = request(
        &router,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "username": "ansel", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_and_capability_less_writes_are_rejected() {
    let context = test_context().await;
    seed_user(&context, "nocaps", &[]).await;
    let router = create_router(context);

    let (status, _) = request(
        &router,
        "POST",
        "/albums",
        None,
        Some(json!({ "name": "Sierra" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&router, "nocaps").await;
    let (status, _) = request(
        &router,
        "POST",
        "/albums",
        Some(&token),
        Some(json!({ "name": "Sierra" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn album_and_image_lifecycle() {
    let context = test_context().await;
    let ansel_id = seed_user(&context, "ansel", &ALL_CAPS).await;
    let router = create_router(context);
    let token = login(&router, "ansel").await;

    // Create an album; a spoofed owner in the payload is ignored.
    let (status, album) = request(
        &router,
        "POST",
        "/albums",
        Some(&token),
        Some(json!({ "name": "Sierra", "isPublic": true, "ownerId": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(album["ownerId"], json!(ansel_id));
    let album_id = album["id"].as_i64().expect("album id");

    // File three images into it, again with a spoofed owner.
    let mut image_ids = Vec::new();
    for title in ["one", "two", "three"] {
        let (status, image) = request(
            &router,
            "POST",
            "/images",
            Some(&token),
            Some(json!({
                "title": title,
                "albumId": album_id,
                "tags": ["trip"],
                "ownerId": 9999,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(image["ownerId"], json!(ansel_id));
        image_ids.push(image["id"].as_i64().expect("image id"));
    }

    // The first image became the album head.
    let (status, albums) = request(&router, "GET", "/albums?username=ansel", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(albums["totalItems"], json!(1));
    assert_eq!(albums["items"][0]["headId"], json!(image_ids[0]));
    assert_eq!(albums["items"][0]["imagesCount"], json!(3));

    // Album-scoped listing and tag narrowing agree.
    let (status, page) = request(
        &router,
        "GET",
        &format!("/images?albumId={album_id}&tag=trip"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalItems"], json!(3));

    // Middle image knows both neighbors.
    let (status, detail) = request(
        &router,
        "GET",
        &format!("/images/{}?albumId={album_id}", image_ids[1]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["previous"]["id"], json!(image_ids[0]));
    assert_eq!(detail["next"]["id"], json!(image_ids[2]));
    assert_eq!(detail["position"], json!(1));
    assert_eq!(detail["total"], json!(3));
    assert_eq!(detail["image"]["tags"], json!(["trip"]));

    // Deleting the album keeps the images and detaches them.
    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/albums/{album_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, detail) = request(
        &router,
        "GET",
        &format!("/images/{}", image_ids[0]),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["image"]["albumId"], Value::Null);
}

#[tokio::test]
async fn private_album_is_forbidden_not_hidden() {
    let context = test_context().await;
    seed_user(&context, "ansel", &ALL_CAPS).await;
    seed_user(&context, "diane", &[]).await;
    let router = create_router(context);
    let token = login(&router, "ansel").await;

    let (_, album) = request(
        &router,
        "POST",
        "/albums",
        Some(&token),
        Some(json!({ "name": "Hidden", "isPublic": false })),
    )
    .await;
    let album_id = album["id"].as_i64().expect("album id");
    let (_, image) = request(
        &router,
        "POST",
        "/images",
        Some(&token),
        Some(json!({ "albumId": album_id })),
    )
    .await;
    let image_id = image["id"].as_i64().expect("image id");

    // Anonymous viewers and other users get an explicit 403.
    let scoped = format!("/images?albumId={album_id}");
    let (status, _) = request(&router, "GET", &scoped, None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let diane_token = login(&router, "diane").await;
    let (status, _) = request(&router, "GET", &scoped, Some(&diane_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = request(
        &router,
        "GET",
        &format!("/images/{image_id}"),
        Some(&diane_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner still sees everything.
    let (status, _) = request(&router, "GET", &scoped, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unresolvable_scope_parameters_are_not_found() {
    let context = test_context().await;
    let router = create_router(context);

    let (status, _) = request(&router, "GET", "/images?tag=missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&router, "GET", "/albums?username=nobody", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&router, "GET", "/images?username=nobody", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_scope_never_exposes_foreign_entities() {
    let context = test_context().await;
    seed_user(&context, "ansel", &ALL_CAPS).await;
    seed_user(
        &context,
        "diane",
        &[Capability::ChangeAlbum, Capability::DeleteImage],
    )
    .await;
    let router = create_router(context);
    let ansel_token = login(&router, "ansel").await;
    let diane_token = login(&router, "diane").await;

    let (_, album) = request(
        &router,
        "POST",
        "/albums",
        Some(&ansel_token),
        Some(json!({ "name": "Sierra" })),
    )
    .await;
    let (_, image) = request(
        &router,
        "POST",
        "/images",
        Some(&ansel_token),
        Some(json!({ "title": "Dome" })),
    )
    .await;

    // Diane holds the capabilities but does not own the records: 404, not 403.
    let (status, _) = request(
        &router,
        "PUT",
        &format!("/albums/{}", album["id"]),
        Some(&diane_token),
        Some(json!({ "name": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &router,
        "DELETE",
        &format!("/images/{}", image["id"]),
        Some(&diane_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
