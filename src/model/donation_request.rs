use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_INPROGRESS: &str = "inprogress";
pub const STATUS_DONE: &str = "done";
pub const STATUS_CANCELED: &str = "canceled";

pub fn is_valid_status(status: &str) -> bool {
    matches!(
        status,
        STATUS_PENDING | STATUS_INPROGRESS | STATUS_DONE | STATUS_CANCELED
    )
}

/// Contact details of the donor who fulfilled a request, attached when the
/// request transitions to "done".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorInfo {
    pub name: String,
    pub email: String,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub requesterEmail: String,
    pub requesterName: String,
    pub recipientName: String,
    pub recipientDistrict: String,
    pub recipientUpazila: String,
    pub hospitalName: String,
    pub fullAddress: String,
    pub bloodGroup: String,
    pub donationDate: String,
    pub donationTime: String,
    pub requestMessage: String,
    pub status: String, // "pending", "inprogress", "done" or "canceled"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donorInfo: Option<DonorInfo>,
    pub createdAt: Option<bson::DateTime>,
    pub lastModifiedAt: Option<bson::DateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_validation() {
        assert!(is_valid_status("pending"));
        assert!(is_valid_status("inprogress"));
        assert!(is_valid_status("done"));
        assert!(is_valid_status("canceled"));
        assert!(!is_valid_status("cancelled"));
        assert!(!is_valid_status(""));
    }
}
