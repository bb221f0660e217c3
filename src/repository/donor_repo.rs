use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Database;
use tracing::{error, info};

use crate::model::donor::DonorSnapshot;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Insert the snapshot unless one already exists for the email. Returns
    /// true when a new snapshot was persisted.
    async fn save_if_absent(&self, snapshot: DonorSnapshot) -> RepositoryResult<bool>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<DonorSnapshot>>;
}

pub struct MongoDonorRepository {
    collection: mongodb::Collection<DonorSnapshot>,
}

impl MongoDonorRepository {
    pub fn new(db: &Database) -> Self {
        MongoDonorRepository {
            collection: db.collection::<DonorSnapshot>("donors"),
        }
    }
}

#[async_trait]
impl DonorRepository for MongoDonorRepository {
    #[tracing::instrument(skip(self, snapshot), fields(email = %snapshot.email))]
    async fn save_if_absent(&self, mut snapshot: DonorSnapshot) -> RepositoryResult<bool> {
        if self.find_by_email(&snapshot.email).await?.is_some() {
            info!("Donor snapshot already present, skipping insert");
            return Ok(false);
        }
        snapshot.id = Some(ObjectId::new());
        snapshot.createdAt = Some(bson::DateTime::now());
        match self.collection.insert_one(snapshot, None).await {
            Ok(_) => {
                info!("Donor snapshot saved");
                Ok(true)
            }
            Err(e) => {
                error!("Failed to save donor snapshot: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to save donor snapshot: {}",
                    e
                )))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<DonorSnapshot>> {
        let filter = doc! { "email": email };
        let snapshot = self.collection.find_one(filter, None).await.map_err(|e| {
            RepositoryError::database(format!("Failed to find donor snapshot: {}", e))
        })?;
        Ok(snapshot)
    }
}
