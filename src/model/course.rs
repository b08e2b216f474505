use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE: &str = "no-photo.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

impl MinimumSkill {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinimumSkill::Beginner => "beginner",
            MinimumSkill::Intermediate => "intermediate",
            MinimumSkill::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: ObjectId,
    pub name: String,
    pub rating: f64,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default = "default_image")]
    pub image: String,
    pub category: ObjectId,
    pub instructor: ObjectId,
    #[serde(default)]
    pub enrolled_students: Vec<ObjectId>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// 0 means unrated. Stored as given; never derived from `reviews`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: i32,
    pub created_at: Option<String>,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl Course {
    /// Linear membership test against the stored order; first match wins.
    pub fn is_enrolled(&self, user_id: &ObjectId) -> bool {
        self.enrolled_students.iter().any(|s| s == user_id)
    }
}

/// Editable course fields. Ownership, enrollment, reviews, rating and
/// creation time are deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<i32>,
    pub tuition: Option<f64>,
    pub minimum_skill: Option<MinimumSkill>,
    pub scholarship_available: Option<bool>,
    pub is_free: Option<bool>,
    pub image: Option<String>,
    pub category: Option<ObjectId>,
}

impl CoursePatch {
    pub fn apply(self, course: &mut Course) {
        if let Some(v) = self.title {
            course.title = v;
        }
        if let Some(v) = self.description {
            course.description = v;
        }
        if let Some(v) = self.weeks {
            course.weeks = v;
        }
        if let Some(v) = self.tuition {
            course.tuition = v;
        }
        if let Some(v) = self.minimum_skill {
            course.minimum_skill = v;
        }
        if let Some(v) = self.scholarship_available {
            course.scholarship_available = v;
        }
        if let Some(v) = self.is_free {
            course.is_free = v;
        }
        if let Some(v) = self.image {
            course.image = v;
        }
        if let Some(v) = self.category {
            course.category = v;
        }
    }

    /// `$set` body for the store, using the stored field names.
    pub fn to_set_document(&self) -> bson::Document {
        let mut set = bson::Document::new();
        if let Some(v) = &self.title {
            set.insert("title", v.clone());
        }
        if let Some(v) = &self.description {
            set.insert("description", v.clone());
        }
        if let Some(v) = self.weeks {
            set.insert("weeks", v);
        }
        if let Some(v) = self.tuition {
            set.insert("tuition", v);
        }
        if let Some(v) = self.minimum_skill {
            set.insert("minimumSkill", v.as_str());
        }
        if let Some(v) = self.scholarship_available {
            set.insert("scholarshipAvailable", v);
        }
        if let Some(v) = self.is_free {
            set.insert("isFree", v);
        }
        if let Some(v) = &self.image {
            set.insert("image", v.clone());
        }
        if let Some(v) = self.category {
            set.insert("category", v);
        }
        set
    }
}
