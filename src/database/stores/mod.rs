mod album_store;
mod image_store;
mod place_store;
mod tag_store;
mod user_store;

pub use album_store::*;
pub use image_store::*;
pub use place_store::*;
pub use tag_store::*;
pub use user_store::*;
