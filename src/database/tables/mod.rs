mod album;
mod app_user;
mod image;
mod place;
mod tag;

pub use album::*;
pub use app_user::*;
pub use image::*;
pub use place::*;
pub use tag::*;
