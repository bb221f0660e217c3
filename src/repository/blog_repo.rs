use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::Database;
use tracing::error;

use crate::model::blog::Blog;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, blog: Blog) -> RepositoryResult<Blog>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Blog>>;
    async fn list(&self, filter: Document) -> RepositoryResult<Vec<Blog>>;
    async fn update_by_id(&self, id: ObjectId, patch: Document) -> RepositoryResult<u64>;
    async fn delete_by_id(&self, id: ObjectId) -> RepositoryResult<u64>;
}

pub struct MongoBlogRepository {
    collection: mongodb::Collection<Blog>,
}

impl MongoBlogRepository {
    pub fn new(db: &Database) -> Self {
        MongoBlogRepository {
            collection: db.collection::<Blog>("blogs"),
        }
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    #[tracing::instrument(skip(self, blog), fields(author = %blog.author.email))]
    async fn insert(&self, mut blog: Blog) -> RepositoryResult<Blog> {
        blog.id = Some(ObjectId::new());
        let now = bson::DateTime::now();
        blog.createdAt = Some(now);
        blog.lastModifiedAt = Some(now);
        match self.collection.insert_one(blog.clone(), None).await {
            Ok(_) => Ok(blog),
            Err(e) => {
                error!("Failed to insert blog: {}", e);
                Err(RepositoryError::database(format!("Failed to insert blog: {}", e)))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Blog>> {
        let filter = doc! { "_id": id };
        let blog = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find blog: {}", e)))?;
        Ok(blog)
    }

    #[tracing::instrument(skip(self), fields(filter = ?filter))]
    async fn list(&self, filter: Document) -> RepositoryResult<Vec<Blog>> {
        let mut cursor = self
            .collection
            .find(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list blogs: {}", e)))?;
        let mut blogs = Vec::new();
        while let Some(blog) = cursor.next().await {
            match blog {
                Ok(b) => blogs.push(b),
                Err(e) => {
                    error!("Failed to deserialize blog: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize blog: {}",
                        e
                    )));
                }
            }
        }
        Ok(blogs)
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    async fn update_by_id(&self, id: ObjectId, mut patch: Document) -> RepositoryResult<u64> {
        patch.remove("_id");
        patch.insert("lastModifiedAt", bson::DateTime::now());
        let filter = doc! { "_id": id };
        let update = doc! { "$set": patch };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update blog: {}", e)))?;
        Ok(result.modified_count)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete_by_id(&self, id: ObjectId) -> RepositoryResult<u64> {
        let filter = doc! { "_id": id };
        let result = self
            .collection
            .delete_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to delete blog: {}", e)))?;
        Ok(result.deleted_count)
    }
}
