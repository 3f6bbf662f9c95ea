use super::error::AlbumsError;
use super::interfaces::{
    CreateAlbumRequest, ListAlbumsParams, PaginatedAlbumsResponse, UpdateAlbumRequest,
};
use crate::database::stores::{AlbumStore, ImageStore, UserStore};
use crate::database::tables::{Album, Capability, User};
use crate::routes::auth::viewer::Viewer;
use crate::settings::PaginationSettings;
use sqlx::SqlitePool;
use tracing::instrument;

/// Whether the album itself may be seen by the viewer: public albums by
/// anyone, private albums by their owner and album moderators.
pub(crate) fn can_view_album(viewer: &Viewer, album: &Album) -> bool {
    album.is_public
        || viewer.is_owner(album.owner_id)
        || viewer.has_capability(Capability::ModerateAlbums)
}

/// Lists albums with image counts, optionally narrowed to one owner.
/// An unknown username is a not-found, not an empty page.
#[instrument(skip(pool, pagination))]
pub async fn list_albums(
    pool: &SqlitePool,
    pagination: &PaginationSettings,
    params: ListAlbumsParams,
) -> Result<PaginatedAlbumsResponse, AlbumsError> {
    let owner_id = match params.username.as_deref() {
        Some(name) => Some(
            UserStore::find_by_username(pool, name)
                .await?
                .ok_or_else(|| AlbumsError::NotFound(format!("no user named {name}")))?
                .id,
        ),
        None => None,
    };

    let per_page = pagination.albums_per_page;
    let page = params.page.max(1);
    let items =
        AlbumStore::list_with_count(pool, owner_id, per_page, (page - 1) * per_page).await?;
    let total_items = AlbumStore::count(pool, owner_id).await?;

    Ok(PaginatedAlbumsResponse {
        items,
        page,
        per_page,
        total_items,
    })
}

/// Creates an album. The owner is always the requesting viewer; callers
/// cannot create albums on behalf of someone else.
#[instrument(skip(pool, viewer))]
pub async fn create_album(
    pool: &SqlitePool,
    viewer: &Viewer,
    payload: CreateAlbumRequest,
) -> Result<Album, AlbumsError> {
    let user = viewer.require_capability(Capability::AddAlbum)?;
    Ok(AlbumStore::create(pool, user.id, &payload.name, payload.is_public).await?)
}

/// Resolves an album for edit or delete. Album moderators reach every album,
/// everyone else only their own; anything outside that scope reads as
/// absent, the same as an id that does not exist.
async fn find_album_for_edit(
    pool: &SqlitePool,
    viewer: &Viewer,
    user: &User,
    album_id: i64,
) -> Result<Album, AlbumsError> {
    let album = AlbumStore::find_by_id(pool, album_id)
        .await?
        .ok_or_else(|| AlbumsError::NotFound(format!("album {album_id}")))?;
    if album.owner_id != user.id && !viewer.has_capability(Capability::ModerateAlbums) {
        return Err(AlbumsError::NotFound(format!("album {album_id}")));
    }
    Ok(album)
}

#[instrument(skip(pool, viewer))]
pub async fn update_album(
    pool: &SqlitePool,
    viewer: &Viewer,
    album_id: i64,
    payload: UpdateAlbumRequest,
) -> Result<Album, AlbumsError> {
    let user = viewer.require_capability(Capability::ChangeAlbum)?;
    let album = find_album_for_edit(pool, viewer, user, album_id).await?;

    if let Some(head_id) = payload.head_id {
        let head = ImageStore::find_by_id(pool, head_id)
            .await?
            .ok_or_else(|| AlbumsError::NotFound(format!("image {head_id}")))?;
        if head.album_id != Some(album.id) {
            return Err(AlbumsError::BadRequest(format!(
                "image {head_id} is not part of album {album_id}"
            )));
        }
    }

    if payload.name.is_none() && payload.is_public.is_none() && payload.head_id.is_none() {
        // Nothing to change, hand back the current state.
        return Ok(album);
    }

    Ok(AlbumStore::update(
        pool,
        album_id,
        payload.name,
        payload.is_public,
        payload.head_id,
    )
    .await?)
}

/// Deletes an album. Its images survive with their album reference cleared.
#[instrument(skip(pool, viewer))]
pub async fn delete_album(
    pool: &SqlitePool,
    viewer: &Viewer,
    album_id: i64,
) -> Result<(), AlbumsError> {
    let user = viewer.require_capability(Capability::DeleteAlbum)?;
    find_album_for_edit(pool, viewer, user, album_id).await?;
    AlbumStore::delete(pool, album_id).await?;
    Ok(())
}
