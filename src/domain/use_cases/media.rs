use validator::Validate;

use crate::{
    entities::media::{
        DownloadCount, Media, MediaChanges, MediaColumns, MediaDetails, MediaFilter, MediaInsert,
        NewMediaRequest, UpdateMediaRequest,
    },
    errors::AppError,
    repositories::media::MediaRepository,
    use_cases::or_not_found,
    utils::valid_id::valid_id,
};

pub struct MediaHandler<R>
where
    R: MediaRepository,
{
    pub media_repo: R,
}

impl<R> MediaHandler<R>
where
    R: MediaRepository,
{
    pub fn new(media_repo: R) -> Self {
        MediaHandler { media_repo }
    }

    pub async fn list_media(&self, filter: &MediaFilter) -> Result<Vec<Media>, AppError> {
        self.media_repo
            .list_media(filter)
            .await?
            .into_iter()
            .map(Media::try_from)
            .collect()
    }

    pub async fn create_media(&self, request: NewMediaRequest) -> Result<Media, AppError> {
        request.validate()?;

        let insert = MediaInsert::from(request);
        let row = self.media_repo.create_media(&insert).await?;
        Media::try_from(row)
    }

    /// Returns a media item and counts the read as a view
    pub async fn get_media(&self, id: &str) -> Result<Media, AppError> {
        let valid_id = valid_id(id)?;
        let row = self.media_repo
            .increment_media_views(valid_id)
            .await
            .map_err(or_not_found("Media"))?;
        Media::try_from(row)
    }

    /// Counts a download. Videos are streamed, not downloaded, and have no counter.
    pub async fn record_download(&self, id: &str) -> Result<DownloadCount, AppError> {
        let valid_id = valid_id(id)?;
        let current = self.media_repo
            .get_media(valid_id)
            .await
            .map_err(or_not_found("Media"))?;

        if let MediaDetails::Video { .. } = Media::try_from(current)?.details {
            return Err(AppError::InvalidInput("Videos do not have a download counter".into()));
        }

        self.media_repo
            .increment_media_downloads(valid_id)
            .await
            .map_err(or_not_found("Media"))
    }

    pub async fn update_media(&self, id: &str, request: UpdateMediaRequest) -> Result<Media, AppError> {
        let valid_id = valid_id(id)?;
        request.validate()?;

        if request.is_empty() {
            return Err(AppError::InvalidInput("No fields to update".into()));
        }

        let columns = if request.details.is_empty() {
            None
        } else {
            let current = self.media_repo
                .get_media(valid_id)
                .await
                .map_err(or_not_found("Media"))?;
            let merged = Media::try_from(current)?.details.merged(&request.details);
            Some(MediaColumns::from(&merged))
        };

        let changes = MediaChanges { fields: request, columns };
        let row = self.media_repo
            .update_media(valid_id, &changes)
            .await
            .map_err(or_not_found("Media"))?;
        Media::try_from(row)
    }

    pub async fn delete_media(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_id(id)?;
        self.media_repo
            .delete_media(valid_id)
            .await
            .map_err(or_not_found("Media"))
    }
}
