pub mod albums;
pub mod auth;
pub mod images;
pub mod root;

use crate::state::ApiContext;
use axum::routing::{get, post};
use axum::Router;
use tower_http::{trace::TraceLayer, LatencyUnit};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

// --- API Documentation ---
#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::get_me,
        // Album handlers
        albums::handlers::list_albums,
        albums::handlers::create_album,
        albums::handlers::update_album,
        albums::handlers::delete_album,
        // Image handlers
        images::handlers::list_images,
        images::handlers::get_image,
        images::handlers::create_image,
        images::handlers::update_image,
        images::handlers::delete_image,
    ),
    components(
        schemas(
            root::handlers::ServiceInfo,
            // Auth schemas
            crate::database::tables::User,
            crate::database::tables::Capability,
            auth::interfaces::LoginRequest,
            auth::interfaces::TokenResponse,
            // Album schemas
            crate::database::tables::Album,
            crate::database::tables::AlbumWithCount,
            albums::interfaces::CreateAlbumRequest,
            albums::interfaces::UpdateAlbumRequest,
            albums::interfaces::PaginatedAlbumsResponse,
            // Image schemas
            crate::database::tables::Image,
            crate::database::tables::Tag,
            images::interfaces::CreateImageRequest,
            images::interfaces::UpdateImageRequest,
            images::interfaces::ImageResponse,
            images::interfaces::ImageSummary,
            images::interfaces::ImageDetailResponse,
            images::interfaces::PaginatedImagesResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Albums", description = "Create, browse, and manage albums"),
        (name = "Images", description = "Browse and manage images within their visibility scope"),
        (name = "Auth", description = "Token-based authentication")
    )
)]
struct ApiDoc;

/// A modifier to add bearer token security to the `OpenAPI` specification.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

// --- Router Construction ---
pub fn create_router(context: ApiContext) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(Scalar::with_url("/docs", openapi))
        .route("/", get(root::handlers::root))
        .route("/auth/login", post(auth::handlers::login))
        .route("/auth/me", get(auth::handlers::get_me))
        .route(
            "/albums",
            get(albums::handlers::list_albums).post(albums::handlers::create_album),
        )
        .route(
            "/albums/{album_id}",
            axum::routing::put(albums::handlers::update_album)
                .delete(albums::handlers::delete_album),
        )
        .route(
            "/images",
            get(images::handlers::list_images).post(images::handlers::create_image),
        )
        .route(
            "/images/{image_id}",
            get(images::handlers::get_image)
                .put(images::handlers::update_image)
                .delete(images::handlers::delete_image),
        )
        .with_state(context)
        .layer(
            TraceLayer::new_for_http().on_response(
                tower_http::trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(LatencyUnit::Micros),
            ),
        )
}
