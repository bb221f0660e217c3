use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::dto::donation_dto::{CreateDonationRequest, ListDonationRequestsQuery, UpdateDonationRequest};
use crate::model::donation_request::{is_valid_status, DonationRequest, STATUS_DONE, STATUS_PENDING};
use crate::model::donor::DonorSnapshot;
use crate::repository::donation_request_repo::DonationRequestRepository;
use crate::repository::donor_repo::DonorRepository;
use crate::util::error::ServiceError;

/// Patch response: echoes the targeted id so callers can tell an in-place
/// update from an upsert-created document.
#[allow(non_snake_case)]
#[derive(Debug, Serialize)]
pub struct UpdateDonationResponse {
    pub matchedCount: u64,
    pub modifiedCount: u64,
    pub upsertedId: Option<String>,
}

/// Delete response carries the count (0 or 1) and echoes the id, letting the
/// caller detect a no-op delete.
#[allow(non_snake_case)]
#[derive(Debug, Serialize)]
pub struct DeleteDonationResponse {
    pub deletedCount: u64,
    pub id: String,
}

#[async_trait]
pub trait DonationService: Send + Sync {
    async fn create(
        &self,
        requester_email: &str,
        request: CreateDonationRequest,
    ) -> Result<DonationRequest, ServiceError>;
    async fn get(&self, id: &str) -> Result<DonationRequest, ServiceError>;
    async fn list(&self, query: ListDonationRequestsQuery) -> Result<Vec<DonationRequest>, ServiceError>;
    async fn update(&self, id: &str, request: UpdateDonationRequest) -> Result<UpdateDonationResponse, ServiceError>;
    async fn delete(&self, id: &str) -> Result<DeleteDonationResponse, ServiceError>;
}

pub struct DonationServiceImpl {
    pub request_repo: Arc<dyn DonationRequestRepository>,
    pub donor_repo: Arc<dyn DonorRepository>,
}

impl DonationServiceImpl {
    pub fn new(
        request_repo: Arc<dyn DonationRequestRepository>,
        donor_repo: Arc<dyn DonorRepository>,
    ) -> Self {
        Self { request_repo, donor_repo }
    }
}

#[async_trait]
impl DonationService for DonationServiceImpl {
    #[instrument(skip(self, request), fields(requester = %requester_email))]
    async fn create(
        &self,
        requester_email: &str,
        request: CreateDonationRequest,
    ) -> Result<DonationRequest, ServiceError> {
        info!("Creating donation request");
        let donation_request = DonationRequest {
            id: None,
            requesterEmail: requester_email.to_string(),
            requesterName: request.requesterName,
            recipientName: request.recipientName,
            recipientDistrict: request.recipientDistrict,
            recipientUpazila: request.recipientUpazila,
            hospitalName: request.hospitalName,
            fullAddress: request.fullAddress,
            bloodGroup: request.bloodGroup,
            donationDate: request.donationDate,
            donationTime: request.donationTime,
            requestMessage: request.requestMessage,
            status: STATUS_PENDING.to_string(),
            donorInfo: None,
            createdAt: None,
            lastModifiedAt: None,
        };
        Ok(self.request_repo.insert(donation_request).await?)
    }

    async fn get(&self, id: &str) -> Result<DonationRequest, ServiceError> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid donation request id".to_string()))?;
        self.request_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Donation request not found".to_string()))
    }

    async fn list(&self, query: ListDonationRequestsQuery) -> Result<Vec<DonationRequest>, ServiceError> {
        let requests = self
            .request_repo
            .list(query.to_filter(), query.sort_doc(), query.limit())
            .await?;
        Ok(requests)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update(&self, id: &str, request: UpdateDonationRequest) -> Result<UpdateDonationResponse, ServiceError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid donation request id".to_string()))?;

        if let Some(ref status) = request.status {
            if !is_valid_status(status) {
                return Err(ServiceError::InvalidInput(format!("Unknown status: {}", status)));
            }
        }

        // The donor snapshot is written before the status transition: if the
        // snapshot insert fails, the request stays un-transitioned instead of
        // completing with the snapshot lost.
        if request.status.as_deref() == Some(STATUS_DONE) {
            if let Some(ref info) = request.donorInfo {
                self.donor_repo
                    .save_if_absent(DonorSnapshot {
                        id: None,
                        email: info.email.clone(),
                        name: info.name.clone(),
                        phone: None,
                        createdAt: None,
                    })
                    .await?;
            }
        }

        let patch = request.to_patch();
        if patch.is_empty() {
            return Err(ServiceError::InvalidInput("No fields to update".to_string()));
        }
        let outcome = self.request_repo.update_by_id(object_id, patch).await?;
        Ok(UpdateDonationResponse {
            matchedCount: outcome.matched_count,
            modifiedCount: outcome.modified_count,
            upsertedId: outcome.upserted_id.map(|id| id.to_hex()),
        })
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &str) -> Result<DeleteDonationResponse, ServiceError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ServiceError::InvalidInput("Invalid donation request id".to_string()))?;
        let deleted = self.request_repo.delete_by_id(object_id).await?;
        Ok(DeleteDonationResponse {
            deletedCount: deleted,
            id: id.to_string(),
        })
    }
}
