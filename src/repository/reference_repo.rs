use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Database;
use tracing::error;

use crate::model::reference::ReferenceSheet;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn load_sheet(&self, name: &str) -> RepositoryResult<Option<ReferenceSheet>>;
    async fn find_item(&self, name: &str, id: &str) -> RepositoryResult<Option<Document>>;
}

/// Read-only accessor over the district/upazila collections. Each collection
/// holds one document embedding the whole dataset.
pub struct MongoReferenceRepository {
    db: Database,
}

impl MongoReferenceRepository {
    pub fn new(db: &Database) -> Self {
        MongoReferenceRepository { db: db.clone() }
    }
}

#[async_trait]
impl ReferenceRepository for MongoReferenceRepository {
    async fn load_sheet(&self, name: &str) -> RepositoryResult<Option<ReferenceSheet>> {
        let collection = self.db.collection::<ReferenceSheet>(name);
        let filter = doc! { "name": name };
        collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to load reference sheet {}: {}", name, e);
            RepositoryError::database(format!("Failed to load reference sheet: {}", e))
        })
    }

    async fn find_item(&self, name: &str, id: &str) -> RepositoryResult<Option<Document>> {
        let sheet = self.load_sheet(name).await?;
        Ok(sheet.and_then(|s| s.find_item(id).cloned()))
    }
}
