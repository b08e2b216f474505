use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::dto::course_dto::{CourseView, InstructorDetail};
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserView};
use crate::model::user::{Role, User};
use crate::repository::course_repo::CourseRepository;
use crate::repository::user_repo::UserRepository;
use crate::service::user_service::{new_account, patch_from};
use crate::util::access::{require, Caller};
use crate::util::error::ServiceError;
use crate::util::extract::DeferredJson;

const NOT_FOUND: &str = "Instructor not found";

#[async_trait]
pub trait InstructorService: Send + Sync {
    async fn list(&self) -> Result<Vec<UserView>, ServiceError>;
    async fn get(&self, id: &ObjectId) -> Result<InstructorDetail, ServiceError>;
    async fn create(&self, request: CreateUserRequest) -> Result<UserView, ServiceError>;
    async fn update(
        &self,
        caller: &Caller,
        id: &ObjectId,
        request: DeferredJson<UpdateUserRequest>,
    ) -> Result<UserView, ServiceError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
}

pub struct InstructorServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub course_repo: Arc<dyn CourseRepository>,
}

impl InstructorServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, course_repo: Arc<dyn CourseRepository>) -> Self {
        Self { user_repo, course_repo }
    }

    /// A user with that id whose role is instructor; anyone else is "not found".
    async fn find_instructor(&self, id: &ObjectId) -> Result<User, ServiceError> {
        match self.user_repo.find_by_id(id).await? {
            Some(user) if user.role == Role::Instructor => Ok(user),
            _ => Err(ServiceError::NotFound(NOT_FOUND.to_string())),
        }
    }
}

#[async_trait]
impl InstructorService for InstructorServiceImpl {
    async fn list(&self) -> Result<Vec<UserView>, ServiceError> {
        let instructors = self.user_repo.list(Some(Role::Instructor)).await?;
        Ok(instructors.into_iter().map(UserView::from).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: &ObjectId) -> Result<InstructorDetail, ServiceError> {
        let instructor = self.find_instructor(id).await?;
        let courses = self.course_repo.list_by_instructor(id).await?;
        Ok(InstructorDetail {
            instructor: UserView::from(instructor),
            courses: courses.into_iter().map(CourseView::from).collect(),
        })
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn create(&self, request: CreateUserRequest) -> Result<UserView, ServiceError> {
        if request.role.is_some_and(|r| r != Role::Instructor) {
            warn!("Requested role overridden to instructor");
        }
        let user = new_account(request.name, request.email, &request.password, Role::Instructor)?;
        let inserted = self.user_repo.insert(user).await?;
        info!("Instructor created");
        Ok(UserView::from(inserted))
    }

    #[instrument(skip(self, caller, request), fields(id = %id, caller = %caller.id))]
    async fn update(
        &self,
        caller: &Caller,
        id: &ObjectId,
        request: DeferredJson<UpdateUserRequest>,
    ) -> Result<UserView, ServiceError> {
        self.find_instructor(id).await?;
        require(caller, id, "Not authorized to update this instructor")?;
        let patch = patch_from(request.decode()?, false)?;
        self.user_repo
            .update(id, patch)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        self.find_instructor(id).await?;
        let owned = self.course_repo.count_by_instructor(id).await?;
        if owned > 0 {
            warn!("Instructor still owns {} courses", owned);
            return Err(ServiceError::InvalidInput(
                "Cannot delete instructor with existing courses".to_string(),
            ));
        }
        self.user_repo.delete(id).await?;
        info!("Instructor deleted");
        Ok(())
    }
}
