use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";

pub fn is_valid_status(status: &str) -> bool {
    matches!(status, STATUS_DRAFT | STATUS_PUBLISHED)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogAuthor {
    pub name: String,
    pub email: String,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub thumbnail: String,
    pub content: String,
    pub author: BlogAuthor,
    pub status: String, // "draft" or "published"
    pub createdAt: Option<bson::DateTime>,
    pub lastModifiedAt: Option<bson::DateTime>,
}
