use std::collections::HashMap;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::category_dto::CategoryView;
use crate::dto::user_dto::UserView;
use crate::dto::{trimmed, trimmed_opt};
use crate::model::category::Category;
use crate::model::course::{Course, MinimumSkill, Review};
use crate::model::user::User;

/// Course creation payload. There is no `instructor` field: the owner is
/// always the authenticated caller, and unknown keys are ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "Title cannot be more than 50 characters"))]
    pub title: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: String,
    pub weeks: i32,
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    pub scholarship_available: Option<bool>,
    pub is_free: Option<bool>,
    pub image: Option<String>,
    #[validate(length(equal = 24))]
    pub category: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 50, message = "Title cannot be more than 50 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: Option<String>,
    pub weeks: Option<i32>,
    pub tuition: Option<f64>,
    pub minimum_skill: Option<MinimumSkill>,
    pub scholarship_available: Option<bool>,
    pub is_free: Option<bool>,
    pub image: Option<String>,
    #[validate(length(equal = 24))]
    pub category: Option<String>,
}

/// A reference that is either left as an id or replaced by the referenced
/// document. An expanded reference to a deleted document renders as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Expanded(Option<T>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstructorSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user: Ref<AuthorSummary>,
    pub name: String,
    pub rating: f64,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    pub scholarship_available: bool,
    pub is_free: bool,
    pub image: String,
    pub category: Ref<CategoryView>,
    pub instructor: Ref<InstructorSummary>,
    pub enrolled_students: Vec<String>,
    pub reviews: Vec<ReviewView>,
    pub rating: f64,
    pub num_reviews: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Lookup tables used to expand course references after a batch fetch.
#[derive(Debug, Default)]
pub struct Expansion {
    pub categories: HashMap<ObjectId, Category>,
    pub users: HashMap<ObjectId, User>,
    pub review_authors: bool,
}

impl Expansion {
    fn category(&self, id: &ObjectId) -> Ref<CategoryView> {
        Ref::Expanded(self.categories.get(id).cloned().map(CategoryView::from))
    }

    fn instructor(&self, id: &ObjectId) -> Ref<InstructorSummary> {
        Ref::Expanded(self.users.get(id).map(|u| InstructorSummary {
            id: id.to_hex(),
            name: u.name.clone(),
            email: u.email.clone(),
        }))
    }

    fn review(&self, review: Review) -> ReviewView {
        let user = if self.review_authors {
            Ref::Expanded(self.users.get(&review.user).map(|u| AuthorSummary {
                id: review.user.to_hex(),
                name: u.name.clone(),
            }))
        } else {
            Ref::Id(review.user.to_hex())
        };
        ReviewView {
            id: review.id.map(|id| id.to_hex()),
            user,
            name: review.name,
            rating: review.rating,
            comment: review.comment,
        }
    }
}

impl CourseView {
    pub fn expanded(course: Course, expansion: &Expansion) -> Self {
        let category = expansion.category(&course.category);
        let instructor = expansion.instructor(&course.instructor);
        let reviews = course.reviews.into_iter().map(|r| expansion.review(r)).collect();
        CourseView {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: course.title,
            description: course.description,
            weeks: course.weeks,
            tuition: course.tuition,
            minimum_skill: course.minimum_skill,
            scholarship_available: course.scholarship_available,
            is_free: course.is_free,
            image: course.image,
            category,
            instructor,
            enrolled_students: course.enrolled_students.iter().map(|s| s.to_hex()).collect(),
            reviews,
            rating: course.rating,
            num_reviews: course.num_reviews,
            created_at: course.created_at,
        }
    }
}

impl From<Course> for CourseView {
    fn from(course: Course) -> Self {
        let reviews = course
            .reviews
            .into_iter()
            .map(|r| ReviewView {
                id: r.id.map(|id| id.to_hex()),
                user: Ref::Id(r.user.to_hex()),
                name: r.name,
                rating: r.rating,
                comment: r.comment,
            })
            .collect();
        CourseView {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: course.title,
            description: course.description,
            weeks: course.weeks,
            tuition: course.tuition,
            minimum_skill: course.minimum_skill,
            scholarship_available: course.scholarship_available,
            is_free: course.is_free,
            image: course.image,
            category: Ref::Id(course.category.to_hex()),
            instructor: Ref::Id(course.instructor.to_hex()),
            enrolled_students: course.enrolled_students.iter().map(|s| s.to_hex()).collect(),
            reviews,
            rating: course.rating,
            num_reviews: course.num_reviews,
            created_at: course.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorDetail {
    pub instructor: UserView,
    pub courses: Vec<CourseView>,
}
