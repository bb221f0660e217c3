use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::dto::user_dto::{
    AdminUpdateUserRequest, ListUsersQuery, RegisterUserRequest, RegisterUserResponse,
    UpdateProfileRequest,
};
use crate::model::user::{
    is_valid_role, is_valid_status, User, DEFAULT_PHOTO_URL, ROLE_ADMIN, ROLE_DONOR,
    ROLE_VOLUNTEER, STATUS_ACTIVE,
};
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;

/// Booleans resolved per request from the stored role. Computed independently
/// of each other; the token never carries the role itself.
#[derive(Debug, Clone, Copy)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_donor: bool,
    pub is_volunteer: bool,
}

impl RoleFlags {
    pub fn from_role(role: &str) -> Self {
        RoleFlags {
            is_admin: role == ROLE_ADMIN,
            is_donor: role == ROLE_DONOR,
            is_volunteer: role == ROLE_VOLUNTEER,
        }
    }
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, ServiceError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<User, ServiceError>;
    async fn list(&self, query: ListUsersQuery) -> Result<Vec<User>, ServiceError>;
    async fn update_profile(&self, email: &str, request: UpdateProfileRequest) -> Result<u64, ServiceError>;
    async fn admin_update(&self, id: &str, request: AdminUpdateUserRequest) -> Result<u64, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, ServiceError> {
        info!("Registering new user");

        // Existing-user probe: a repeat registration is answered, not duplicated
        if let Some(_existing) = self.user_repo.find_by_email(&request.email).await? {
            warn!("User already exists, skipping insert");
            return Ok(RegisterUserResponse {
                isExistingUser: true,
                insertedId: None,
            });
        }

        // Role and status are always server-assigned at creation
        let user = User {
            id: None,
            name: request.name,
            email: request.email,
            photoURL: request.photoURL.unwrap_or_else(|| DEFAULT_PHOTO_URL.to_string()),
            district: request.district,
            upazila: request.upazila,
            bloodGroup: request.bloodGroup,
            role: ROLE_DONOR.to_string(),
            status: STATUS_ACTIVE.to_string(),
            createdAt: None,
            lastModifiedAt: None,
        };
        let inserted = self.user_repo.insert(user).await?;
        Ok(RegisterUserResponse {
            isExistingUser: false,
            insertedId: inserted.id.map(|id| id.to_hex()),
        })
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.user_repo.find_by_email(email).await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<User, ServiceError> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid user id".to_string()))?;
        self.user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    async fn list(&self, query: ListUsersQuery) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.list(query.to_filter()).await?)
    }

    #[instrument(skip(self, request), fields(email = %email))]
    async fn update_profile(&self, email: &str, request: UpdateProfileRequest) -> Result<u64, ServiceError> {
        let patch = request.to_patch();
        if patch.is_empty() {
            return Err(ServiceError::InvalidInput("No fields to update".to_string()));
        }
        Ok(self.user_repo.update_by_email(email, patch).await?)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn admin_update(&self, id: &str, request: AdminUpdateUserRequest) -> Result<u64, ServiceError> {
        if let Some(ref role) = request.role {
            if !is_valid_role(role) {
                return Err(ServiceError::InvalidInput(format!("Unknown role: {}", role)));
            }
        }
        if let Some(ref status) = request.status {
            if !is_valid_status(status) {
                return Err(ServiceError::InvalidInput(format!("Unknown status: {}", status)));
            }
        }
        let id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid user id".to_string()))?;
        let patch = request.to_patch();
        if patch.is_empty() {
            return Err(ServiceError::InvalidInput("No fields to update".to_string()));
        }
        Ok(self.user_repo.update_by_id(id, patch).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flags_admin() {
        let flags = RoleFlags::from_role("admin");
        assert!(flags.is_admin);
        assert!(!flags.is_donor);
        assert!(!flags.is_volunteer);
    }

    #[test]
    fn test_role_flags_donor() {
        let flags = RoleFlags::from_role("donor");
        assert!(flags.is_donor);
        assert!(!flags.is_admin);
    }

    #[test]
    fn test_role_flags_unknown_role() {
        let flags = RoleFlags::from_role("stranger");
        assert!(!flags.is_admin);
        assert!(!flags.is_donor);
        assert!(!flags.is_volunteer);
    }
}
