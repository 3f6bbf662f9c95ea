use super::error::ImagesError;
use super::interfaces::{
    CreateImageRequest, ImageDetailResponse, ImageResponse, ImageScopeParams,
    PaginatedImagesResponse, UpdateImageRequest,
};
use super::service;
use crate::routes::auth::viewer::Viewer;
use crate::state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

/// List images, narrowed by tag, owner, and album.
#[utoipa::path(
    get,
    path = "/images",
    tag = "Images",
    params(ImageScopeParams),
    responses(
        (status = 200, description = "A page of images.", body = PaginatedImagesResponse),
        (status = 404, description = "A scope parameter did not resolve."),
        (status = 403, description = "The album scope is not visible to the viewer."),
    )
)]
pub async fn list_images(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Query(params): Query<ImageScopeParams>,
) -> Result<Json<PaginatedImagesResponse>, ImagesError> {
    let page = service::list_images(
        &context.pool,
        &context.settings.pagination,
        &viewer,
        params,
    )
    .await?;
    Ok(Json(page))
}

/// Image detail with previous/next neighbors within the same scope.
#[utoipa::path(
    get,
    path = "/images/{image_id}",
    tag = "Images",
    params(
        ("image_id" = i64, Path, description = "The id of the image."),
        ImageScopeParams,
    ),
    responses(
        (status = 200, description = "The image and its neighbors.", body = ImageDetailResponse),
        (status = 404, description = "Image or scope parameter not found."),
        (status = 403, description = "The image is not visible to the viewer."),
    )
)]
pub async fn get_image(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Path(image_id): Path<i64>,
    Query(params): Query<ImageScopeParams>,
) -> Result<Json<ImageDetailResponse>, ImagesError> {
    let detail = service::get_image(&context.pool, &viewer, image_id, &params).await?;
    Ok(Json(detail))
}

/// Create a new image record owned by the requesting user.
#[utoipa::path(
    post,
    path = "/images",
    tag = "Images",
    request_body = CreateImageRequest,
    responses(
        (status = 201, description = "Image created.", body = ImageResponse),
        (status = 401, description = "Authentication required."),
        (status = 403, description = "Missing the add-image capability."),
        (status = 404, description = "Album or place not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_image(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Json(payload): Json<CreateImageRequest>,
) -> Result<(StatusCode, Json<ImageResponse>), ImagesError> {
    let image =
        service::create_image(&context.pool, context.geo.as_ref(), &viewer, payload).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Update an image's fields or replace its tags.
#[utoipa::path(
    put,
    path = "/images/{image_id}",
    tag = "Images",
    params(
        ("image_id" = i64, Path, description = "The id of the image to update.")
    ),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Image updated.", body = ImageResponse),
        (status = 404, description = "Image not found within the viewer's edit scope."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_image(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Path(image_id): Path<i64>,
    Json(payload): Json<UpdateImageRequest>,
) -> Result<Json<ImageResponse>, ImagesError> {
    let image = service::update_image(&context.pool, &viewer, image_id, payload).await?;
    Ok(Json(image))
}

/// Delete an image record.
#[utoipa::path(
    delete,
    path = "/images/{image_id}",
    tag = "Images",
    params(
        ("image_id" = i64, Path, description = "The id of the image to delete.")
    ),
    responses(
        (status = 204, description = "Image deleted."),
        (status = 404, description = "Image not found within the viewer's edit scope."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_image(
    State(context): State<ApiContext>,
    viewer: Viewer,
    Path(image_id): Path<i64>,
) -> Result<StatusCode, ImagesError> {
    service::delete_image(&context.pool, &viewer, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
