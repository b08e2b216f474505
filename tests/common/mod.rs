#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bson::oid::ObjectId;
use elearning_backend::app::app::{build_router, Repositories};
use elearning_backend::config::JwtConfig;
use elearning_backend::model::announcement::Announcement;
use elearning_backend::model::category::Category;
use elearning_backend::model::course::{Course, CoursePatch, MinimumSkill, DEFAULT_IMAGE};
use elearning_backend::model::user::{Role, User, UserPatch};
use elearning_backend::repository::announcement_repo::AnnouncementRepository;
use elearning_backend::repository::category_repo::CategoryRepository;
use elearning_backend::repository::course_repo::CourseRepository;
use elearning_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use elearning_backend::repository::user_repo::UserRepository;
use elearning_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use serde_json::Value;
use tower::ServiceExt; // for .oneshot()

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists(format!(
                "E11000 duplicate key error collection: users index: email_1 dup key: {{ email: \"{}\" }}",
                user.email
            )));
        }
        user.id = Some(ObjectId::new());
        user.created_at = Some(chrono::Utc::now().to_rfc3339());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == Some(*id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| u.id.is_some_and(|id| ids.contains(&id))).cloned().collect())
    }

    async fn list(&self, role: Option<Role>) -> RepositoryResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|u| role.map_or(true, |r| u.role == r)).cloned().collect())
    }

    async fn update(&self, id: &ObjectId, patch: UserPatch) -> RepositoryResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == Some(*id)).map(|user| {
            patch.apply(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != Some(*id));
        Ok(users.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: Mutex<Vec<Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.lock().unwrap().iter().find(|c| c.id == Some(*id)).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> RepositoryResult<Vec<Category>> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().filter(|c| c.id.is_some_and(|id| ids.contains(&id))).cloned().collect())
    }

    async fn insert(&self, mut category: Category) -> RepositoryResult<Category> {
        let mut categories = self.categories.lock().unwrap();
        if categories.iter().any(|c| c.name == category.name) {
            return Err(RepositoryError::already_exists("E11000 duplicate key error collection: categories"));
        }
        category.id = Some(ObjectId::new());
        categories.push(category.clone());
        Ok(category)
    }

    async fn rename(&self, id: &ObjectId, name: String) -> RepositoryResult<Option<Category>> {
        let mut categories = self.categories.lock().unwrap();
        Ok(categories.iter_mut().find(|c| c.id == Some(*id)).map(|c| {
            c.name = name;
            c.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != Some(*id));
        Ok(categories.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: Mutex<Vec<Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn list(&self) -> RepositoryResult<Vec<Course>> {
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Course>> {
        Ok(self.courses.lock().unwrap().iter().find(|c| c.id == Some(*id)).cloned())
    }

    async fn list_by_instructor(&self, instructor: &ObjectId) -> RepositoryResult<Vec<Course>> {
        let courses = self.courses.lock().unwrap();
        Ok(courses.iter().filter(|c| c.instructor == *instructor).cloned().collect())
    }

    async fn count_by_instructor(&self, instructor: &ObjectId) -> RepositoryResult<u64> {
        let courses = self.courses.lock().unwrap();
        Ok(courses.iter().filter(|c| c.instructor == *instructor).count() as u64)
    }

    async fn insert(&self, mut course: Course) -> RepositoryResult<Course> {
        course.id = Some(ObjectId::new());
        course.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.courses.lock().unwrap().push(course.clone());
        Ok(course)
    }

    async fn update(&self, id: &ObjectId, patch: CoursePatch) -> RepositoryResult<Option<Course>> {
        let mut courses = self.courses.lock().unwrap();
        Ok(courses.iter_mut().find(|c| c.id == Some(*id)).map(|course| {
            patch.apply(course);
            course.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != Some(*id));
        Ok(courses.len() < before)
    }

    async fn enroll_student(&self, id: &ObjectId, student: &ObjectId) -> RepositoryResult<Option<Course>> {
        let mut courses = self.courses.lock().unwrap();
        Ok(courses
            .iter_mut()
            .find(|c| c.id == Some(*id) && !c.is_enrolled(student))
            .map(|course| {
                course.enrolled_students.push(*student);
                course.clone()
            }))
    }
}

#[derive(Default)]
pub struct InMemoryAnnouncementRepository {
    announcements: Mutex<Vec<Announcement>>,
}

#[async_trait]
impl AnnouncementRepository for InMemoryAnnouncementRepository {
    async fn list(&self) -> RepositoryResult<Vec<Announcement>> {
        Ok(self.announcements.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn insert(&self, mut announcement: Announcement) -> RepositoryResult<Announcement> {
        announcement.id = Some(ObjectId::new());
        announcement.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.announcements.lock().unwrap().push(announcement.clone());
        Ok(announcement)
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<bool> {
        let mut announcements = self.announcements.lock().unwrap();
        let before = announcements.len();
        announcements.retain(|a| a.id != Some(*id));
        Ok(announcements.len() < before)
    }
}

pub struct TestApp {
    pub router: Router,
    pub repos: Repositories,
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let categories = Arc::new(InMemoryCategoryRepository::default());
        let courses = Arc::new(InMemoryCourseRepository::default());
        let repos = Repositories {
            users: users.clone(),
            categories: categories.clone(),
            courses: courses.clone(),
            announcements: Arc::new(InMemoryAnnouncementRepository::default()),
        };
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
        let router = build_router(&repos, jwt_utils.clone());
        TestApp { router, repos, users, categories, courses, jwt_utils }
    }

    /// Stores a user directly (no password hashing) and returns it with a bearer token.
    pub async fn user(&self, name: &str, role: Role) -> (User, String) {
        let user = self
            .users
            .insert(User {
                id: None,
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "not-a-real-hash".to_string(),
                role,
                created_at: None,
            })
            .await
            .unwrap();
        let token = self.token_for(&user);
        (user, token)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.jwt_utils
            .generate_token_pair(&user.id.unwrap().to_hex(), &user.email, user.role.as_str())
            .unwrap()
            .access_token
    }

    pub async fn category(&self, name: &str) -> Category {
        self.categories
            .insert(Category { id: None, name: name.to_string() })
            .await
            .unwrap()
    }

    pub async fn course(&self, title: &str, instructor: &User, category: &Category) -> Course {
        self.courses
            .insert(Course {
                id: None,
                title: title.to_string(),
                description: "A course".to_string(),
                weeks: 4,
                tuition: 100.0,
                minimum_skill: MinimumSkill::Beginner,
                scholarship_available: false,
                is_free: false,
                image: DEFAULT_IMAGE.to_string(),
                category: category.id.unwrap(),
                instructor: instructor.id.unwrap(),
                enrolled_students: Vec::new(),
                reviews: Vec::new(),
                rating: 0.0,
                num_reviews: 0,
                created_at: None,
            })
            .await
            .unwrap()
    }

    /// Sends one request and returns the status with the parsed JSON body
    /// (`Value::Null` for non-JSON bodies).
    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}
