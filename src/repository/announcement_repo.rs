use crate::model::announcement::Announcement;
use crate::repository::mongo::ANNOUNCEMENTS;
use crate::repository::repository_error::RepositoryResult;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use tracing::{info, instrument};

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> RepositoryResult<Vec<Announcement>>;
    async fn insert(&self, announcement: Announcement) -> RepositoryResult<Announcement>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool>;
}

pub struct MongoAnnouncementRepository {
    collection: mongodb::Collection<Announcement>,
}

impl MongoAnnouncementRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoAnnouncementRepository { collection: db.collection::<Announcement>(ANNOUNCEMENTS) }
    }
}

#[async_trait]
impl AnnouncementRepository for MongoAnnouncementRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Announcement>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(None, options).await?;
        let announcements: Vec<Announcement> = cursor.try_collect().await?;
        info!("Fetched {} announcements", announcements.len());
        Ok(announcements)
    }

    #[instrument(skip(self, announcement), fields(title = %announcement.title))]
    async fn insert(&self, mut announcement: Announcement) -> RepositoryResult<Announcement> {
        announcement.id = Some(ObjectId::new());
        announcement.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.collection.insert_one(announcement.clone(), None).await?;
        info!("Announcement created");
        Ok(announcement)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
