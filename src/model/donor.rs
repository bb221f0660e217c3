use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Append-only contact snapshot taken when a donation request completes.
/// Deduplicated by email; an existing snapshot is never updated.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorSnapshot {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub createdAt: Option<bson::DateTime>,
}
