use validator::Validate;

use crate::{
    entities::news::{LikeCount, NewNewsRequest, NewsArticle, NewsFilter, NewsInsert, UpdateNewsRequest},
    errors::AppError,
    repositories::news::NewsRepository,
    use_cases::or_not_found,
    utils::valid_id::valid_id,
};

pub struct NewsHandler<R>
where
    R: NewsRepository,
{
    pub news_repo: R,
}

impl<R> NewsHandler<R>
where
    R: NewsRepository,
{
    pub fn new(news_repo: R) -> Self {
        NewsHandler { news_repo }
    }

    pub async fn list_news(&self, filter: &NewsFilter) -> Result<Vec<NewsArticle>, AppError> {
        let rows = self.news_repo.list_news(filter).await?;
        Ok(rows.into_iter().map(NewsArticle::from).collect())
    }

    /// Creates an article; HTML content is sanitized before it is stored
    pub async fn create_news(&self, request: NewNewsRequest) -> Result<NewsArticle, AppError> {
        let insert = NewsInsert::try_from(request)?;
        let row = self.news_repo.create_news(&insert).await?;
        Ok(row.into())
    }

    /// Returns an article and counts the read as a view
    pub async fn get_news(&self, id: &str) -> Result<NewsArticle, AppError> {
        let valid_id = valid_id(id)?;
        let row = self.news_repo
            .increment_news_views(valid_id)
            .await
            .map_err(or_not_found("News article"))?;
        Ok(row.into())
    }

    pub async fn like_news(&self, id: &str) -> Result<LikeCount, AppError> {
        let valid_id = valid_id(id)?;
        self.news_repo
            .increment_news_likes(valid_id)
            .await
            .map_err(or_not_found("News article"))
    }

    pub async fn update_news(&self, id: &str, request: UpdateNewsRequest) -> Result<NewsArticle, AppError> {
        let valid_id = valid_id(id)?;
        request.validate()?;

        if request.is_empty() {
            return Err(AppError::InvalidInput("No fields to update".into()));
        }

        let row = self.news_repo
            .update_news(valid_id, &request.normalized())
            .await
            .map_err(or_not_found("News article"))?;
        Ok(row.into())
    }

    pub async fn delete_news(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_id(id)?;
        self.news_repo
            .delete_news(valid_id)
            .await
            .map_err(or_not_found("News article"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::news::NewsRow, repositories::news::MockNewsRepository};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn row(id: i32) -> NewsRow {
        let ts = Utc.with_ymd_and_hms(2025, 8, 20, 9, 0, 0).unwrap();
        NewsRow {
            id,
            title: "CLB đạt giải Nhất".into(),
            slug: "clb-dat-giai-nhat".into(),
            date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            time: None,
            image: None,
            excerpt: None,
            content: "<p>Tin vui</p>".into(),
            category: "achievement".into(),
            tags: Some("award, 2025".into()),
            author_name: None,
            author_role: None,
            author_image: None,
            views: 1,
            likes: 0,
            comments: 0,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[actix_rt::test]
    async fn list_maps_rows_to_articles() {
        let mut repo = MockNewsRepository::new();
        repo.expect_list_news().returning(|_| Ok(vec![row(1), row(2)]));

        let handler = NewsHandler::new(repo);
        let articles = handler.list_news(&NewsFilter::default()).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].tags, vec!["award".to_string(), "2025".to_string()]);
    }

    #[actix_rt::test]
    async fn update_sanitizes_content_before_writing() {
        let mut repo = MockNewsRepository::new();
        repo.expect_update_news()
            .withf(|id, update| {
                *id == 4 && update.content.as_deref() == Some("<p>safe</p>")
            })
            .times(1)
            .returning(|id, _| Ok(row(id)));

        let handler = NewsHandler::new(repo);
        let request = UpdateNewsRequest {
            content: Some("<p onclick=\"steal()\">safe</p>".into()),
            ..Default::default()
        };

        assert!(handler.update_news("4", request).await.is_ok());
    }

    #[actix_rt::test]
    async fn like_on_missing_article_is_not_found() {
        let mut repo = MockNewsRepository::new();
        repo.expect_increment_news_likes()
            .returning(|_| Err(AppError::NotFound("Record not found".into())));

        let handler = NewsHandler::new(repo);
        assert!(matches!(handler.like_news("8").await, Err(AppError::NotFound(_))));
    }
}
