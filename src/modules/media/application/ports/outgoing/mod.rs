pub mod blob_store;
pub mod media_repository;
