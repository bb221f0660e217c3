use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::options::{FindOptions, UpdateOptions};
use mongodb::Database;
use tracing::{error, info};

use crate::model::donation_request::DonationRequest;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Result of a merge-patch write. `upserted_id` is set when the filter matched
/// nothing and a new document was created instead.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<ObjectId>,
}

#[async_trait]
pub trait DonationRequestRepository: Send + Sync {
    async fn insert(&self, request: DonationRequest) -> RepositoryResult<DonationRequest>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<DonationRequest>>;
    async fn list(
        &self,
        filter: Document,
        sort: Document,
        limit: i64,
    ) -> RepositoryResult<Vec<DonationRequest>>;
    async fn update_by_id(&self, id: ObjectId, patch: Document) -> RepositoryResult<PatchOutcome>;
    async fn delete_by_id(&self, id: ObjectId) -> RepositoryResult<u64>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn count_created_between(
        &self,
        from: bson::DateTime,
        to: bson::DateTime,
    ) -> RepositoryResult<u64>;
}

pub struct MongoDonationRequestRepository {
    collection: mongodb::Collection<DonationRequest>,
}

impl MongoDonationRequestRepository {
    pub fn new(db: &Database) -> Self {
        MongoDonationRequestRepository {
            collection: db.collection::<DonationRequest>("donation_requests"),
        }
    }
}

#[async_trait]
impl DonationRequestRepository for MongoDonationRequestRepository {
    #[tracing::instrument(skip(self, request), fields(requester = %request.requesterEmail))]
    async fn insert(&self, mut request: DonationRequest) -> RepositoryResult<DonationRequest> {
        request.id = Some(ObjectId::new());
        let now = bson::DateTime::now();
        request.createdAt = Some(now);
        request.lastModifiedAt = Some(now);
        match self.collection.insert_one(request.clone(), None).await {
            Ok(_) => {
                info!("Donation request created");
                Ok(request)
            }
            Err(e) => {
                error!("Failed to create donation request: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create donation request: {}",
                    e
                )))
            }
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<DonationRequest>> {
        let filter = doc! { "_id": id };
        let request = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find donation request: {}", e))
        })?;
        Ok(request)
    }

    #[tracing::instrument(skip(self), fields(filter = ?filter, limit = limit))]
    async fn list(
        &self,
        filter: Document,
        sort: Document,
        limit: i64,
    ) -> RepositoryResult<Vec<DonationRequest>> {
        // limit 0 means "no limit", never "zero results"
        let options = FindOptions::builder()
            .sort(sort)
            .limit(if limit > 0 { Some(limit) } else { None })
            .build();
        let mut cursor = self.collection.find(filter, options).await.map_err(|e| {
            RepositoryError::database(format!("Failed to list donation requests: {}", e))
        })?;
        let mut requests = Vec::new();
        while let Some(request) = cursor.next().await {
            match request {
                Ok(r) => requests.push(r),
                Err(e) => {
                    error!("Failed to deserialize donation request: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize donation request: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} donation requests", requests.len());
        Ok(requests)
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    async fn update_by_id(&self, id: ObjectId, mut patch: Document) -> RepositoryResult<PatchOutcome> {
        patch.remove("_id");
        patch.insert("lastModifiedAt", bson::DateTime::now());
        let filter = doc! { "_id": id };
        let update = doc! { "$set": patch };
        // Upsert: a non-matching id creates a new document holding only the
        // patched fields.
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .collection
            .update_one(filter, update, options)
            .await
            .map_err(|e| {
                RepositoryError::database(format!("Failed to update donation request: {}", e))
            })?;
        Ok(PatchOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.and_then(|id| id.as_object_id()),
        })
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete_by_id(&self, id: ObjectId) -> RepositoryResult<u64> {
        let filter = doc! { "_id": id };
        let result = self.collection.delete_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to delete donation request: {}", e))
        })?;
        // deleted_count 0 signals a no-op delete; the caller decides what to
        // make of it.
        Ok(result.deleted_count)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        self.collection.count_documents(None, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to count donation requests: {}", e))
        })
    }

    async fn count_created_between(
        &self,
        from: bson::DateTime,
        to: bson::DateTime,
    ) -> RepositoryResult<u64> {
        let filter = doc! { "createdAt": { "$gte": from, "$lt": to } };
        self.collection.count_documents(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to count donation requests: {}", e))
        })
    }
}
