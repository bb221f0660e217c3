use bson::{doc, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 2, max = 64))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub photoURL: Option<String>,
    pub district: String,
    pub upazila: String,
    pub bloodGroup: String,
}

/// Self-service profile update. Role and status are deliberately absent: those
/// only move through the admin update path.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 64))]
    pub name: Option<String>,
    pub photoURL: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub bloodGroup: Option<String>,
}

impl UpdateProfileRequest {
    pub fn to_patch(&self) -> Document {
        let mut patch = Document::new();
        if let Some(ref name) = self.name {
            patch.insert("name", name);
        }
        if let Some(ref photo_url) = self.photoURL {
            patch.insert("photoURL", photo_url);
        }
        if let Some(ref district) = self.district {
            patch.insert("district", district);
        }
        if let Some(ref upazila) = self.upazila {
            patch.insert("upazila", upazila);
        }
        if let Some(ref blood_group) = self.bloodGroup {
            patch.insert("bloodGroup", blood_group);
        }
        patch
    }
}

/// Admin-driven update. Same profile fields plus role/status, both validated
/// against the known value sets before any write happens.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 2, max = 64))]
    pub name: Option<String>,
    pub photoURL: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub bloodGroup: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl AdminUpdateUserRequest {
    pub fn to_patch(&self) -> Document {
        let mut patch = Document::new();
        if let Some(ref name) = self.name {
            patch.insert("name", name);
        }
        if let Some(ref photo_url) = self.photoURL {
            patch.insert("photoURL", photo_url);
        }
        if let Some(ref district) = self.district {
            patch.insert("district", district);
        }
        if let Some(ref upazila) = self.upazila {
            patch.insert("upazila", upazila);
        }
        if let Some(ref blood_group) = self.bloodGroup {
            patch.insert("bloodGroup", blood_group);
        }
        if let Some(ref role) = self.role {
            patch.insert("role", role);
        }
        if let Some(ref status) = self.status {
            patch.insert("status", status);
        }
        patch
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListUsersQuery {
    pub email: Option<String>,
    pub status: Option<String>,
}

impl ListUsersQuery {
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(ref email) = self.email {
            filter.insert("email", email);
        }
        if let Some(ref status) = self.status {
            filter.insert("status", status);
        }
        filter
    }
}

/// Response of the existing-user-aware registration endpoint.
#[allow(non_snake_case)]
#[derive(Debug, Serialize)]
pub struct RegisterUserResponse {
    pub isExistingUser: bool,
    pub insertedId: Option<String>,
}
