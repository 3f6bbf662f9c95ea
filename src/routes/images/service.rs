use super::error::ImagesError;
use super::interfaces::{
    CreateImageRequest, ImageDetailResponse, ImageResponse, ImageScopeParams, ImageSummary,
    PaginatedImagesResponse, UpdateImageRequest,
};
use crate::database::stores::{AlbumStore, ImageScope, ImageStore, TagStore, UserStore};
use crate::database::tables::{Album, Capability, Image, User};
use crate::geo::GeoLookup;
use crate::routes::albums::service::can_view_album;
use crate::routes::auth::viewer::Viewer;
use crate::settings::PaginationSettings;
use sqlx::SqlitePool;
use tracing::instrument;

/// Outcome of narrowing a request's scope parameters down to ids. Keeps the
/// album around so the detail view does not have to fetch it again.
struct ResolvedScope {
    scope: ImageScope,
    album: Option<Album>,
}

/// Turns scope parameters into a filter, in a fixed order: tag, then owner,
/// then album. Each step either resolves or fails with not-found; the album
/// step additionally enforces visibility and fails with forbidden.
async fn resolve_scope(
    pool: &SqlitePool,
    viewer: &Viewer,
    params: &ImageScopeParams,
) -> Result<ResolvedScope, ImagesError> {
    let mut scope = ImageScope::default();

    if let Some(token) = params.tag.as_deref() {
        let tag = TagStore::find_by_name(pool, token)
            .await?
            .ok_or_else(|| ImagesError::NotFound(format!("no tag matching {token}")))?;
        scope.tag_id = Some(tag.id);
    }

    if let Some(name) = params.username.as_deref() {
        let user = UserStore::find_by_username(pool, name)
            .await?
            .ok_or_else(|| ImagesError::NotFound(format!("no user named {name}")))?;
        scope.owner_id = Some(user.id);
    }

    let mut album = None;
    if let Some(album_id) = params.album_id {
        let found = AlbumStore::find_by_id(pool, album_id)
            .await?
            .ok_or_else(|| ImagesError::NotFound(format!("album {album_id}")))?;
        if !can_view_album(viewer, &found) {
            return Err(ImagesError::Forbidden(format!("album {album_id} is private")));
        }
        scope.album_id = Some(found.id);
        album = Some(found);
    }

    Ok(ResolvedScope { scope, album })
}

/// Visibility of a single image: it inherits its album's rule; without an
/// album it is private to its owner and image moderators.
pub(crate) fn can_view_image(viewer: &Viewer, image: &Image, album: Option<&Album>) -> bool {
    match album {
        Some(album) => can_view_album(viewer, album),
        None => {
            viewer.is_owner(image.owner_id) || viewer.has_capability(Capability::ModerateImages)
        }
    }
}

#[instrument(skip(pool, pagination, viewer))]
pub async fn list_images(
    pool: &SqlitePool,
    pagination: &PaginationSettings,
    viewer: &Viewer,
    params: ImageScopeParams,
) -> Result<PaginatedImagesResponse, ImagesError> {
    let resolved = resolve_scope(pool, viewer, &params).await?;

    let per_page = pagination.images_per_page;
    let page = params.page.max(1);
    let items = ImageStore::list(pool, resolved.scope, per_page, (page - 1) * per_page).await?;
    let total_items = ImageStore::count(pool, resolved.scope).await?;

    Ok(PaginatedImagesResponse {
        items,
        page,
        per_page,
        total_items,
    })
}

/// Image detail plus previous/next within the same scope, walking by
/// ascending id. Missing neighbors mean the edge of the sequence.
#[instrument(skip(pool, viewer))]
pub async fn get_image(
    pool: &SqlitePool,
    viewer: &Viewer,
    image_id: i64,
    params: &ImageScopeParams,
) -> Result<ImageDetailResponse, ImagesError> {
    let resolved = resolve_scope(pool, viewer, params).await?;

    let image = ImageStore::find_in_scope(pool, resolved.scope, image_id)
        .await?
        .ok_or_else(|| ImagesError::NotFound(format!("image {image_id}")))?;

    let album = match image.album_id {
        Some(id) if resolved.album.as_ref().is_some_and(|a| a.id == id) => resolved.album,
        Some(id) => AlbumStore::find_by_id(pool, id).await?,
        None => None,
    };
    if !can_view_image(viewer, &image, album.as_ref()) {
        return Err(ImagesError::Forbidden(format!("image {image_id} is private")));
    }

    let scope = resolved.scope;
    let total = ImageStore::count(pool, scope).await?;
    let position = ImageStore::position(pool, scope, image.id).await?;
    let next = if total - 1 > position {
        ImageStore::next_after(pool, scope, image.id).await?
    } else {
        None
    };
    let previous = if position > 0 {
        ImageStore::previous_before(pool, scope, image.id).await?
    } else {
        None
    };

    let tags = TagStore::names_for_image(pool, image.id).await?;
    Ok(ImageDetailResponse {
        image: ImageResponse::new(image, tags),
        position,
        total,
        previous: previous.map(ImageSummary::from),
        next: next.map(ImageSummary::from),
    })
}

/// Filing an image under an album requires owning that album or moderating
/// albums; a stranger's album is off limits even to capability holders.
async fn require_album_write_access(
    pool: &SqlitePool,
    viewer: &Viewer,
    album_id: i64,
) -> Result<Album, ImagesError> {
    let album = AlbumStore::find_by_id(pool, album_id)
        .await?
        .ok_or_else(|| ImagesError::NotFound(format!("album {album_id}")))?;
    if !viewer.is_owner(album.owner_id) && !viewer.has_capability(Capability::ModerateAlbums) {
        return Err(ImagesError::Forbidden(format!(
            "album {album_id} belongs to another user"
        )));
    }
    Ok(album)
}

/// Creates an image record. The owner is always the requesting viewer;
/// whatever owner a caller may claim is ignored. When the image lands in an
/// album, the album's cached state is refreshed in the same transaction.
#[instrument(skip(pool, geo, viewer))]
pub async fn create_image(
    pool: &SqlitePool,
    geo: &dyn GeoLookup,
    viewer: &Viewer,
    payload: CreateImageRequest,
) -> Result<ImageResponse, ImagesError> {
    let CreateImageRequest {
        title,
        album_id,
        tags,
        place_id,
        place_text,
    } = payload;

    let user = viewer.require_capability(Capability::AddImage)?;

    let album = match album_id {
        Some(album_id) => Some(require_album_write_access(pool, viewer, album_id).await?),
        None => None,
    };

    let place_text = match (place_text, place_id) {
        (Some(text), _) => Some(text),
        (None, Some(place_id)) => Some(
            geo.place_name(place_id)
                .await?
                .ok_or_else(|| ImagesError::NotFound(format!("place {place_id}")))?,
        ),
        (None, None) => None,
    };

    let mut tx = pool.begin().await?;
    let image = ImageStore::create(
        &mut *tx,
        user.id,
        album.as_ref().map(|a| a.id),
        title,
        place_text,
    )
    .await?;
    for name in &tags {
        let tag = TagStore::upsert(&mut *tx, name).await?;
        TagStore::attach(&mut *tx, image.id, tag.id).await?;
    }
    if let Some(album) = &album {
        AlbumStore::refresh_aggregate(&mut *tx, album.id).await?;
    }
    tx.commit().await?;

    let tags = TagStore::names_for_image(pool, image.id).await?;
    Ok(ImageResponse::new(image, tags))
}

/// Resolves an image for edit or delete. Image moderators reach every image,
/// everyone else only their own; anything outside that scope reads as
/// absent.
async fn find_image_for_edit(
    pool: &SqlitePool,
    viewer: &Viewer,
    user: &User,
    image_id: i64,
) -> Result<Image, ImagesError> {
    let image = ImageStore::find_by_id(pool, image_id)
        .await?
        .ok_or_else(|| ImagesError::NotFound(format!("image {image_id}")))?;
    if image.owner_id != user.id && !viewer.has_capability(Capability::ModerateImages) {
        return Err(ImagesError::NotFound(format!("image {image_id}")));
    }
    Ok(image)
}

#[instrument(skip(pool, viewer))]
pub async fn update_image(
    pool: &SqlitePool,
    viewer: &Viewer,
    image_id: i64,
    payload: UpdateImageRequest,
) -> Result<ImageResponse, ImagesError> {
    let UpdateImageRequest {
        title,
        album_id,
        tags,
        place_text,
    } = payload;

    let user = viewer.require_capability(Capability::ChangeImage)?;
    let image = find_image_for_edit(pool, viewer, user, image_id).await?;

    if let Some(target_album) = album_id {
        if image.album_id != Some(target_album) {
            require_album_write_access(pool, viewer, target_album).await?;
        }
    }

    let mut tx = pool.begin().await?;
    let updated = ImageStore::update(&mut *tx, image_id, title, album_id, place_text).await?;
    if let Some(tags) = &tags {
        TagStore::clear_image_tags(&mut *tx, image_id).await?;
        for name in tags {
            let tag = TagStore::upsert(&mut *tx, name).await?;
            TagStore::attach(&mut *tx, image_id, tag.id).await?;
        }
    }
    tx.commit().await?;

    let tags = TagStore::names_for_image(pool, image_id).await?;
    Ok(ImageResponse::new(updated, tags))
}

#[instrument(skip(pool, viewer))]
pub async fn delete_image(
    pool: &SqlitePool,
    viewer: &Viewer,
    image_id: i64,
) -> Result<(), ImagesError> {
    let user = viewer.require_capability(Capability::DeleteImage)?;
    find_image_for_edit(pool, viewer, user, image_id).await?;
    ImageStore::delete(pool, image_id).await?;
    Ok(())
}
