use crate::model::user::{Role, User, UserPatch};
use crate::repository::mongo::USERS;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{error, info, instrument};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<User>>;
    /// All users, or only those holding `role`.
    async fn list(&self, role: Option<Role>) -> RepositoryResult<Vec<User>>;
    /// Returns `None` when no user has that id.
    async fn update(&self, id: &ObjectId, patch: UserPatch) -> RepositoryResult<Option<User>>;
    /// Returns whether a document was removed.
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoUserRepository { collection: db.collection::<User>(USERS) }
    }
}

fn patch_document(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.clone());
    }
    if let Some(email) = &patch.email {
        set.insert("email", email.clone());
    }
    if let Some(hash) = &patch.password_hash {
        set.insert("passwordHash", hash.clone());
    }
    if let Some(role) = patch.role {
        set.insert("role", role.as_str());
    }
    set
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        user.created_at = Some(chrono::Utc::now().to_rfc3339());
        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }, None).await?)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self.collection.find(doc! { "_id": { "$in": ids.to_vec() } }, None).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, role: Option<Role>) -> RepositoryResult<Vec<User>> {
        let filter = role.map(|r| doc! { "role": r.as_str() });
        let cursor = self.collection.find(filter, None).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        info!("Fetched {} users", users.len());
        Ok(users)
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: &ObjectId, patch: UserPatch) -> RepositoryResult<Option<User>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch_document(&patch) }, options)
            .await?;
        if updated.is_none() {
            error!("No user found to update for ID: {}", id);
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}
