pub mod blob_store_fs;
pub mod blob_store_memory;
pub mod media_repository_memory;
pub mod media_repository_mongo;
