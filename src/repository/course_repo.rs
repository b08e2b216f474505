use crate::model::course::{Course, CoursePatch};
use crate::repository::mongo::COURSES;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{error, info, instrument};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<Course>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Course>>;
    async fn list_by_instructor(&self, instructor: &ObjectId) -> RepositoryResult<Vec<Course>>;
    async fn count_by_instructor(&self, instructor: &ObjectId) -> RepositoryResult<u64>;
    async fn insert(&self, course: Course) -> RepositoryResult<Course>;
    async fn update(&self, id: &ObjectId, patch: CoursePatch) -> RepositoryResult<Option<Course>>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool>;
    /// Appends `student` only if the course exists and does not list them
    /// yet, in one store operation. `None` means nothing was appended.
    async fn enroll_student(&self, id: &ObjectId, student: &ObjectId) -> RepositoryResult<Option<Course>>;
}

pub struct MongoCourseRepository {
    collection: mongodb::Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoCourseRepository { collection: db.collection::<Course>(COURSES) }
    }

    fn return_after() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Course>> {
        let cursor = self.collection.find(None, None).await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        info!("Fetched {} courses", courses.len());
        Ok(courses)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Course>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    #[instrument(skip(self), fields(instructor = %instructor))]
    async fn list_by_instructor(&self, instructor: &ObjectId) -> RepositoryResult<Vec<Course>> {
        let cursor = self.collection.find(doc! { "instructor": instructor }, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_by_instructor(&self, instructor: &ObjectId) -> RepositoryResult<u64> {
        Ok(self.collection.count_documents(doc! { "instructor": instructor }, None).await?)
    }

    #[instrument(skip(self, course), fields(title = %course.title, instructor = %course.instructor))]
    async fn insert(&self, mut course: Course) -> RepositoryResult<Course> {
        course.id = Some(ObjectId::new());
        course.created_at = Some(chrono::Utc::now().to_rfc3339());
        match self.collection.insert_one(course.clone(), None).await {
            Ok(_) => {
                info!("Course created successfully");
                Ok(course)
            }
            Err(e) => {
                error!("Failed to create course: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: &ObjectId, patch: CoursePatch) -> RepositoryResult<Option<Course>> {
        let set = patch.to_set_document();
        if set.is_empty() {
            return self.find_by_id(id).await;
        }
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set }, Self::return_after())
            .await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self), fields(id = %id, student = %student))]
    async fn enroll_student(&self, id: &ObjectId, student: &ObjectId) -> RepositoryResult<Option<Course>> {
        let filter = doc! { "_id": id, "enrolledStudents": { "$ne": student } };
        let update = doc! { "$push": { "enrolledStudents": student } };
        let updated = self
            .collection
            .find_one_and_update(filter, update, Self::return_after())
            .await?;
        match &updated {
            Some(_) => info!("Student appended to course"),
            None => info!("Enrollment filter matched nothing"),
        }
        Ok(updated)
    }
}
