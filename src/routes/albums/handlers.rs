use super::error::AlbumsError;
use super::interfaces::{
    CreateAlbumRequest, ListAlbumsParams, PaginatedAlbumsResponse, UpdateAlbumRequest,
};
use super::service;
use crate::database::tables::Album;
use crate::routes::auth::viewer::Viewer;
use crate::state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

/// List albums, optionally narrowed to one owner.
#[utoipa::path(
    get,
    path = "/albums",
    tag = "Albums",
    params(ListAlbumsParams),
    responses(
        (status = 200, description = "A page of albums.", body = PaginatedAlbumsResponse),
        (status = 404, description = "The given username does not exist."),
    )
)]
pub async fn list_albums(
    State(context): State<ApiContext>,
    Query(params): Query<ListAlbumsParams>,
) -> Result<Json<PaginatedAlbumsResponse>, AlbumsError> {
    let page = service::list_albums(&context.pool, &context.settings.pagination, params).await?;
    Ok(Json(page))
}

/// Create a new album owned by the requesting user.
#[utoipa::path(
    post,
    path = "/albums",
    tag = "Albums",
    request_body = CreateAlbumRequest,
    responses(
        (status = 201, description = "Album created.", body = Album),
        (status = 401, description = "Authentication required."),
        (status = 403, description = "Missing the add-album capability."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_album(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Json(payload): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<Album>), AlbumsError> {
    let album = service::create_album(&context.pool, &viewer, payload).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// Update an album's name, visibility, or cover image.
#[utoipa::path(
    put,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(
        ("album_id" = i64, Path, description = "The id of the album to update.")
    ),
    request_body = UpdateAlbumRequest,
    responses(
        (status = 200, description = "Album updated.", body = Album),
        (status = 404, description = "Album not found within the viewer's edit scope."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_album(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Path(album_id): Path<i64>,
    Json(payload): Json<UpdateAlbumRequest>,
) -> Result<Json<Album>, AlbumsError> {
    let album = service::update_album(&context.pool, &viewer, album_id, payload).await?;
    Ok(Json(album))
}

/// Delete an album. Its images are kept and detached.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}",
    tag = "Albums",
    params(
        ("album_id" = i64, Path, description = "The id of the album to delete.")
    ),
    responses(
        (status = 204, description = "Album deleted."),
        (status = 404, description = "Album not found within the viewer's edit scope."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_album(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Path(album_id): Path<i64>,
) -> Result<StatusCode, AlbumsError> {
    service::delete_album(&context.pool, &viewer, album_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
