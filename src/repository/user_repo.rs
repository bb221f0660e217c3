use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::Database;
use tracing::{error, info};

use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn list(&self, filter: Document) -> RepositoryResult<Vec<User>>;
    async fn update_by_id(&self, id: ObjectId, patch: Document) -> RepositoryResult<u64>;
    async fn update_by_email(&self, email: &str, patch: Document) -> RepositoryResult<u64>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn count_created_between(
        &self,
        from: bson::DateTime,
        to: bson::DateTime,
    ) -> RepositoryResult<u64>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        MongoUserRepository {
            collection: db.collection::<User>("users"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = bson::DateTime::now();
        user.createdAt = Some(now);
        user.lastModifiedAt = Some(now);
        match self.collection.insert_one(user.clone(), None).await {
            Ok(_) => {
                info!("User inserted successfully");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::database(format!("Failed to insert user: {}", e)))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by id: {}", e)))?;
        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(filter = ?filter))]
    async fn list(&self, filter: Document) -> RepositoryResult<Vec<User>> {
        let mut cursor = self
            .collection
            .find(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        let mut users = Vec::new();
        while let Some(user) = cursor.next().await {
            match user {
                Ok(u) => users.push(u),
                Err(e) => {
                    error!("Failed to deserialize user: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize user: {}",
                        e
                    )));
                }
            }
        }
        Ok(users)
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
            .map_err(|e| RepositoryError::database(format!("Failed to update user: {}", e)))?;
        Ok(result.modified_count)
    }

    #[tracing::instrument(skip(self, patch), fields(email = %email))]
    async fn update_by_email(&self, email: &str, mut patch: Document) -> RepositoryResult<u64> {
        patch.remove("_id");
        patch.insert("lastModifiedAt", bson::DateTime::now());
        let filter = doc! { "email": email };
        let update = doc! { "$set": patch };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to update user: {}", e)))?;
        Ok(result.modified_count)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count users: {}", e)))
    }

    async fn count_created_between(
        &self,
        from: bson::DateTime,
        to: bson::DateTime,
    ) -> RepositoryResult<u64> {
        let filter = doc! { "createdAt": { "$gte": from, "$lt": to } };
        self.collection
            .count_documents(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to count users: {}", e)))
    }
}
