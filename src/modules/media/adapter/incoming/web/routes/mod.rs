pub mod count_medias;
pub mod delete_media;
pub mod get_media;
pub mod get_media_head;
pub mod list_medias;
pub mod list_medias_head;
pub mod register_media;
pub mod update_media;
