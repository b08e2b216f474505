use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::trimmed;
use crate::model::announcement::{Announcement, AnnouncementStatus, Audience};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(alias = "target_audience")]
    pub target_audience: Audience,
    pub status: Option<AnnouncementStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub target_audience: Audience,
    pub status: AnnouncementStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl From<Announcement> for AnnouncementView {
    fn from(announcement: Announcement) -> Self {
        AnnouncementView {
            id: announcement.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: announcement.title,
            content: announcement.content,
            target_audience: announcement.target_audience,
            status: announcement.status,
            date: announcement.created_at,
        }
    }
}
