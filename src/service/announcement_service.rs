use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::announcement_dto::{AnnouncementView, CreateAnnouncementRequest};
use crate::model::announcement::Announcement;
use crate::repository::announcement_repo::AnnouncementRepository;
use crate::util::error::ServiceError;

const NOT_FOUND: &str = "Announcement not found";

#[async_trait]
pub trait AnnouncementService: Send + Sync {
    async fn list(&self) -> Result<Vec<AnnouncementView>, ServiceError>;
    async fn create(&self, request: CreateAnnouncementRequest) -> Result<AnnouncementView, ServiceError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
}

pub struct AnnouncementServiceImpl {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
}

impl AnnouncementServiceImpl {
    pub fn new(announcement_repo: Arc<dyn AnnouncementRepository>) -> Self {
        Self { announcement_repo }
    }
}

#[async_trait]
impl AnnouncementService for AnnouncementServiceImpl {
    async fn list(&self) -> Result<Vec<AnnouncementView>, ServiceError> {
        let announcements = self.announcement_repo.list().await?;
        Ok(announcements.into_iter().map(AnnouncementView::from).collect())
    }

    #[instrument(skip(self, request), fields(audience = ?request.target_audience))]
    async fn create(&self, request: CreateAnnouncementRequest) -> Result<AnnouncementView, ServiceError> {
        let announcement = Announcement {
            id: None,
            title: request.title,
            content: request.content,
            target_audience: request.target_audience,
            status: request.status.unwrap_or_default(),
            created_at: None,
        };
        let inserted = self.announcement_repo.insert(announcement).await?;
        info!("Announcement published");
        Ok(AnnouncementView::from(inserted))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        if !self.announcement_repo.delete(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }
        Ok(())
    }
}
