use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Placeholder avatar used when registration carries no photo.
pub const DEFAULT_PHOTO_URL: &str = "https://i.ibb.co/4pDNDk1/avatar.png";

pub const ROLE_DONOR: &str = "donor";
pub const ROLE_VOLUNTEER: &str = "volunteer";
pub const ROLE_ADMIN: &str = "admin";

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_BLOCKED: &str = "blocked";

#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub photoURL: String,
    pub district: String,
    pub upazila: String,
    pub bloodGroup: String,
    pub role: String,   // "donor", "volunteer" or "admin"
    pub status: String, // "active" or "blocked"
    pub createdAt: Option<bson::DateTime>,
    pub lastModifiedAt: Option<bson::DateTime>,
}

pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_DONOR | ROLE_VOLUNTEER | ROLE_ADMIN)
}

pub fn is_valid_status(status: &str) -> bool {
    matches!(status, STATUS_ACTIVE | STATUS_BLOCKED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_validation() {
        assert!(is_valid_role("donor"));
        assert!(is_valid_role("volunteer"));
        assert!(is_valid_role("admin"));
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
    }

    #[test]
    fn test_status_validation() {
        assert!(is_valid_status("active"));
        assert!(is_valid_status("blocked"));
        assert!(!is_valid_status("pending"));
    }
}
