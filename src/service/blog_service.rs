use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::dto::blog_dto::{CreateBlogRequest, ListBlogsQuery, UpdateBlogRequest};
use crate::model::blog::{is_valid_status, Blog, BlogAuthor, STATUS_DRAFT};
use crate::repository::blog_repo::BlogRepository;
use crate::service::user_service::RoleFlags;
use crate::util::error::ServiceError;

#[async_trait]
pub trait BlogService: Send + Sync {
    async fn create(&self, author: BlogAuthor, request: CreateBlogRequest) -> Result<Blog, ServiceError>;
    async fn get(&self, id: &str) -> Result<Blog, ServiceError>;
    async fn list(&self, query: ListBlogsQuery) -> Result<Vec<Blog>, ServiceError>;
    async fn update(
        &self,
        id: &str,
        actor_email: &str,
        roles: RoleFlags,
        request: UpdateBlogRequest,
    ) -> Result<u64, ServiceError>;
    async fn delete(&self, id: &str, actor_email: &str, roles: RoleFlags) -> Result<u64, ServiceError>;
}

pub struct BlogServiceImpl {
    pub blog_repo: Arc<dyn BlogRepository>,
}

impl BlogServiceImpl {
    pub fn new(blog_repo: Arc<dyn BlogRepository>) -> Self {
        Self { blog_repo }
    }

    /// Donor-role actors may only touch their own posts. Admin and volunteer
    /// skip the authorship comparison entirely.
    async fn check_ownership(
        &self,
        id: &ObjectId,
        actor_email: &str,
        roles: RoleFlags,
    ) -> Result<(), ServiceError> {
        if !roles.is_donor {
            return Ok(());
        }
        let blog = self
            .blog_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Blog not found".to_string()))?;
        if blog.author.email != actor_email {
            warn!("Donor {} attempted to mutate a blog owned by {}", actor_email, blog.author.email);
            return Err(ServiceError::Forbidden(
                "You can only modify your own blog posts".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BlogService for BlogServiceImpl {
    #[instrument(skip(self, request), fields(author = %author.email))]
    async fn create(&self, author: BlogAuthor, request: CreateBlogRequest) -> Result<Blog, ServiceError> {
        let blog = Blog {
            id: None,
            title: request.title,
            thumbnail: request.thumbnail,
            content: request.content,
            author,
            status: STATUS_DRAFT.to_string(),
            createdAt: None,
            lastModifiedAt: None,
        };
        Ok(self.blog_repo.insert(blog).await?)
    }

    async fn get(&self, id: &str) -> Result<Blog, ServiceError> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid blog id".to_string()))?;
        self.blog_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Blog not found".to_string()))
    }

    async fn list(&self, query: ListBlogsQuery) -> Result<Vec<Blog>, ServiceError> {
        Ok(self.blog_repo.list(query.to_filter()).await?)
    }

    #[instrument(skip(self, request), fields(id = %id, actor = %actor_email))]
    async fn update(
        &self,
        id: &str,
        actor_email: &str,
        roles: RoleFlags,
        request: UpdateBlogRequest,
    ) -> Result<u64, ServiceError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid blog id".to_string()))?;
        if let Some(ref status) = request.status {
            if !is_valid_status(status) {
                return Err(ServiceError::InvalidInput(format!("Unknown status: {}", status)));
            }
        }
        self.check_ownership(&object_id, actor_email, roles).await?;
        let patch = request.to_patch();
        if patch.is_empty() {
            return Err(ServiceError::InvalidInput("No fields to update".to_string()));
        }
        Ok(self.blog_repo.update_by_id(object_id, patch).await?)
    }

    #[instrument(skip(self), fields(id = %id, actor = %actor_email))]
    async fn delete(&self, id: &str, actor_email: &str, roles: RoleFlags) -> Result<u64, ServiceError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid blog id".to_string()))?;
        self.check_ownership(&object_id, actor_email, roles).await?;
        Ok(self.blog_repo.delete_by_id(object_id).await?)
    }
}
