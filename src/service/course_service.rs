use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::dto::course_dto::{CourseView, CreateCourseRequest, Expansion, UpdateCourseRequest};
use crate::model::course::{Course, CoursePatch, DEFAULT_IMAGE};
use crate::repository::category_repo::CategoryRepository;
use crate::repository::course_repo::CourseRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::access::{require, Caller};
use crate::util::error::ServiceError;
use crate::util::extract::DeferredJson;

const NOT_FOUND: &str = "Course not found";
const ALREADY_ENROLLED: &str = "You are already enrolled in this course";

#[async_trait]
pub trait CourseService: Send + Sync {
    async fn list(&self) -> Result<Vec<CourseView>, ServiceError>;
    async fn get(&self, id: &ObjectId) -> Result<CourseView, ServiceError>;
    async fn create(&self, caller: &Caller, request: CreateCourseRequest) -> Result<CourseView, ServiceError>;
    /// Existence and ownership are settled before the body is decoded, so a
    /// stranger is refused whatever the payload holds.
    async fn update(
        &self,
        caller: &Caller,
        id: &ObjectId,
        request: DeferredJson<UpdateCourseRequest>,
    ) -> Result<CourseView, ServiceError>;
    async fn delete(&self, caller: &Caller, id: &ObjectId) -> Result<(), ServiceError>;
    async fn enroll(&self, caller: &Caller, id: &ObjectId) -> Result<CourseView, ServiceError>;
}

pub struct CourseServiceImpl {
    pub course_repo: Arc<dyn CourseRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub user_repo: Arc<dyn UserRepository>,
}

fn parse_category(raw: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(raw)
        .map_err(|e| ServiceError::InvalidInput(format!("Invalid category id '{}': {}", raw, e)))
}

impl CourseServiceImpl {
    pub fn new(
        course_repo: Arc<dyn CourseRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self { course_repo, category_repo, user_repo }
    }

    /// Batch-loads every category and user the courses point at.
    async fn expansion(&self, courses: &[Course], review_authors: bool) -> Result<Expansion, ServiceError> {
        let category_ids: Vec<ObjectId> = courses
            .iter()
            .map(|c| c.category)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let mut user_ids: HashSet<ObjectId> = courses.iter().map(|c| c.instructor).collect();
        if review_authors {
            user_ids.extend(courses.iter().flat_map(|c| c.reviews.iter().map(|r| r.user)));
        }
        let user_ids: Vec<ObjectId> = user_ids.into_iter().collect();

        let categories = self.category_repo.find_by_ids(&category_ids).await?;
        let users = self.user_repo.find_by_ids(&user_ids).await?;

        Ok(Expansion {
            categories: categories.into_iter().filter_map(|c| c.id.map(|id| (id, c))).collect(),
            users: users.into_iter().filter_map(|u| u.id.map(|id| (id, u))).collect(),
            review_authors,
        })
    }

    async fn find_owned(&self, caller: &Caller, id: &ObjectId, denied: &str) -> Result<Course, ServiceError> {
        let course = self
            .course_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        require(caller, &course.instructor, denied)?;
        Ok(course)
    }
}

#[async_trait]
impl CourseService for CourseServiceImpl {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<CourseView>, ServiceError> {
        let courses = self.course_repo.list().await?;
        let expansion = self.expansion(&courses, false).await?;
        info!("Listing {} courses", courses.len());
        Ok(courses.into_iter().map(|c| CourseView::expanded(c, &expansion)).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &ObjectId) -> Result<CourseView, ServiceError> {
        let course = self
            .course_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))?;
        let expansion = self.expansion(std::slice::from_ref(&course), true).await?;
        Ok(CourseView::expanded(course, &expansion))
    }

    #[instrument(skip(self, caller, request), fields(instructor = %caller.id))]
    async fn create(&self, caller: &Caller, request: CreateCourseRequest) -> Result<CourseView, ServiceError> {
        let course = Course {
            id: None,
            title: request.title,
            description: request.description,
            weeks: request.weeks,
            tuition: request.tuition,
            minimum_skill: request.minimum_skill,
            scholarship_available: request.scholarship_available.unwrap_or(false),
            is_free: request.is_free.unwrap_or(false),
            image: request.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            category: parse_category(&request.category)?,
            instructor: caller.id,
            enrolled_students: Vec::new(),
            reviews: Vec::new(),
            rating: 0.0,
            num_reviews: 0,
            created_at: None,
        };
        let inserted = self.course_repo.insert(course).await?;
        Ok(CourseView::from(inserted))
    }

    #[instrument(skip(self, caller, request), fields(id = %id, caller = %caller.id))]
    async fn update(
        &self,
        caller: &Caller,
        id: &ObjectId,
        request: DeferredJson<UpdateCourseRequest>,
    ) -> Result<CourseView, ServiceError> {
        self.find_owned(caller, id, "Not authorized to update this course").await?;
        let request = request.decode()?;
        let category = request.category.as_deref().map(parse_category).transpose()?;
        let patch = CoursePatch {
            title: request.title,
            description: request.description,
            weeks: request.weeks,
            tuition: request.tuition,
            minimum_skill: request.minimum_skill,
            scholarship_available: request.scholarship_available,
            is_free: request.is_free,
            image: request.image,
            category,
        };
        self.course_repo
            .update(id, patch)
            .await?
            .map(CourseView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self, caller), fields(id = %id, caller = %caller.id))]
    async fn delete(&self, caller: &Caller, id: &ObjectId) -> Result<(), ServiceError> {
        self.find_owned(caller, id, "Not authorized to delete this course").await?;
        if !self.course_repo.delete(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }
        info!("Course deleted");
        Ok(())
    }

    #[instrument(skip(self, caller), fields(id = %id, student = %caller.id))]
    async fn enroll(&self, caller: &Caller, id: &ObjectId) -> Result<CourseView, ServiceError> {
        if let Some(course) = self.course_repo.enroll_student(id, &caller.id).await? {
            info!("Student enrolled");
            return Ok(CourseView::from(course));
        }
        match self.course_repo.find_by_id(id).await? {
            None => Err(ServiceError::NotFound(NOT_FOUND.to_string())),
            Some(_) => {
                warn!("Duplicate enrollment rejected");
                Err(ServiceError::InvalidInput(ALREADY_ENROLLED.to_string()))
            }
        }
    }
}
