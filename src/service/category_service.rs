use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::dto::category_dto::{CategoryRequest, CategoryView};
use crate::model::category::Category;
use crate::repository::category_repo::CategoryRepository;
use crate::util::error::ServiceError;
use crate::util::extract::DeferredJson;

const NOT_FOUND: &str = "Category not found";

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn list(&self) -> Result<Vec<CategoryView>, ServiceError>;
    async fn get(&self, id: &ObjectId) -> Result<CategoryView, ServiceError>;
    async fn create(&self, name: String) -> Result<CategoryView, ServiceError>;
    /// A missing category is reported before the body is looked at.
    async fn update(
        &self,
        id: &ObjectId,
        request: DeferredJson<CategoryRequest>,
    ) -> Result<CategoryView, ServiceError>;
    /// Courses referencing the category are left untouched.
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
}

pub struct CategoryServiceImpl {
    pub category_repo: Arc<dyn CategoryRepository>,
}

impl CategoryServiceImpl {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn list(&self) -> Result<Vec<CategoryView>, ServiceError> {
        let categories = self.category_repo.list().await?;
        Ok(categories.into_iter().map(CategoryView::from).collect())
    }

    async fn get(&self, id: &ObjectId) -> Result<CategoryView, ServiceError> {
        self.category_repo
            .find_by_id(id)
            .await?
            .map(CategoryView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self))]
    async fn create(&self, name: String) -> Result<CategoryView, ServiceError> {
        let category = Category { id: None, name };
        let inserted = self.category_repo.insert(category).await?;
        info!("Category created");
        Ok(CategoryView::from(inserted))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update(
        &self,
        id: &ObjectId,
        request: DeferredJson<CategoryRequest>,
    ) -> Result<CategoryView, ServiceError> {
        if self.category_repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }
        let request = request.decode()?;
        self.category_repo
            .rename(id, request.name)
            .await?
            .map(CategoryView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        if !self.category_repo.delete(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }
        info!("Category deleted");
        Ok(())
    }
}
