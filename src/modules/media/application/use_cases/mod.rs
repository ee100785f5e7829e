pub mod count_medias;
pub mod delete_media;
pub mod fetch_media;
pub mod list_medias;
pub mod register_media;
pub mod update_media;
