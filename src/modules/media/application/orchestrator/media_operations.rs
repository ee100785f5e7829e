use std::sync::Arc;

use crate::modules::media::application::ports::incoming::use_cases::{
    count_medias::CountMediasUseCase, delete_media::DeleteMediaUseCase,
    fetch_media::FetchMediaUseCase, list_medias::ListMediasUseCase,
    register_media::RegisterMediaUseCase, update_media::UpdateMediaUseCase,
};
use crate::modules::media::application::services::media_service::MediaService;
use crate::modules::media::application::use_cases::{
    count_medias::CountMedias, delete_media::DeleteMedia, fetch_media::FetchMedia,
    list_medias::ListMedias, register_media::RegisterMedia, update_media::UpdateMedia,
};

/// The media use cases, composed over the shared media store.
#[derive(Clone)]
pub struct MediaOperations {
    pub register: Arc<dyn RegisterMediaUseCase>,
    pub fetch: Arc<dyn FetchMediaUseCase>,
    pub update: Arc<dyn UpdateMediaUseCase>,
    pub delete: Arc<dyn DeleteMediaUseCase>,
    pub list: Arc<dyn ListMediasUseCase>,
    pub count: Arc<dyn CountMediasUseCase>,
}

impl MediaOperations {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self {
            register: Arc::new(RegisterMedia::new(store.clone())),
            fetch: Arc::new(FetchMedia::new(store.clone())),
            update: Arc::new(UpdateMedia::new(store.clone())),
            delete: Arc::new(DeleteMedia::new(store.clone())),
            list: Arc::new(ListMedias::new(store.clone())),
            count: Arc::new(CountMedias::new(store)),
        }
    }
}
