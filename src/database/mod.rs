mod error;
pub mod pool;
pub mod stores;
pub mod tables;

pub use error::*;
