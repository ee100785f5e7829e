use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::media::application::domain::entities::MediaView;
use crate::modules::media::application::ports::incoming::use_cases::list_medias::ListMediasUseCase;
use crate::modules::media::application::services::media_service::{MediaService, DEFAULT_SORT};
use crate::shared::api::listing::ListQuery;
use crate::shared::error::ApiError;

pub struct ListMedias {
    store: Arc<MediaService>,
}

impl ListMedias {
    pub fn new(store: Arc<MediaService>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListMediasUseCase for ListMedias {
    async fn execute(
        &self,
        query: ListQuery,
        load_fields: bool,
    ) -> Result<Vec<MediaView>, ApiError> {
        let params = query.into_params(&DEFAULT_SORT)?;
        let medias = self.store.list_medias_raw(params).await?;
        let mut views = Vec::with_capacity(medias.len());
        for media in medias {
            views.push(self.store.media_view(media, load_fields).await?);
        }
        Ok(views)
    }
}
