use crate::model::category::Category;
use crate::repository::mongo::CATEGORIES;
use crate::repository::repository_error::RepositoryResult;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{info, instrument};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<Category>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Category>>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<Category>>;
    async fn insert(&self, category: Category) -> RepositoryResult<Category>;
    async fn rename(&self, id: &ObjectId, name: String) -> RepositoryResult<Option<Category>>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool>;
}

pub struct MongoCategoryRepository {
    collection: mongodb::Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoCategoryRepository { collection: db.collection::<Category>(CATEGORIES) }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Category>> {
        let cursor = self.collection.find(None, None).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        info!("Fetched {} categories", categories.len());
        Ok(categories)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Category>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self.collection.find(doc! { "_id": { "$in": ids.to_vec() } }, None).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self), fields(name = %category.name))]
    async fn insert(&self, mut category: Category) -> RepositoryResult<Category> {
        category.id = Some(ObjectId::new());
        self.collection.insert_one(category.clone(), None).await?;
        info!("Category created");
        Ok(category)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn rename(&self, id: &ObjectId, name: String) -> RepositoryResult<Option<Category>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "name": name } }, options)
            .await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
