// src/infrastructure/mod.rs
//
// Side effects the journal needs but does not define: where photo files live.

pub mod photo_store;

pub use photo_store::{LocalPhotoStore, PhotoStore};
