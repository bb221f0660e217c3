use bson::{doc, Document};
use serde::Deserialize;
use validator::Validate;

use crate::model::donation_request::DonorInfo;

#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDonationRequest {
    #[validate(length(min = 2, max = 64))]
    pub requesterName: String,
    #[validate(length(min = 2, max = 64))]
    pub recipientName: String,
    pub recipientDistrict: String,
    pub recipientUpazila: String,
    pub hospitalName: String,
    pub fullAddress: String,
    #[validate(length(min = 1, max = 3))]
    pub bloodGroup: String,
    pub donationDate: String,
    pub donationTime: String,
    pub requestMessage: String,
}

/// Merge-patch body for donation-request updates. Only present fields make it
/// into the `$set` document.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Default)]
pub struct UpdateDonationRequest {
    pub requesterName: Option<String>,
    pub recipientName: Option<String>,
    pub recipientDistrict: Option<String>,
    pub recipientUpazila: Option<String>,
    pub hospitalName: Option<String>,
    pub fullAddress: Option<String>,
    pub bloodGroup: Option<String>,
    pub donationDate: Option<String>,
    pub donationTime: Option<String>,
    pub requestMessage: Option<String>,
    pub status: Option<String>,
    pub donorInfo: Option<DonorInfo>,
}

impl UpdateDonationRequest {
    pub fn to_patch(&self) -> Document {
        let mut patch = Document::new();
        if let Some(ref v) = self.requesterName {
            patch.insert("requesterName", v);
        }
        if let Some(ref v) = self.recipientName {
            patch.insert("recipientName", v);
        }
        if let Some(ref v) = self.recipientDistrict {
            patch.insert("recipientDistrict", v);
        }
        if let Some(ref v) = self.recipientUpazila {
            patch.insert("recipientUpazila", v);
        }
        if let Some(ref v) = self.hospitalName {
            patch.insert("hospitalName", v);
        }
        if let Some(ref v) = self.fullAddress {
            patch.insert("fullAddress", v);
        }
        if let Some(ref v) = self.bloodGroup {
            patch.insert("bloodGroup", v);
        }
        if let Some(ref v) = self.donationDate {
            patch.insert("donationDate", v);
        }
        if let Some(ref v) = self.donationTime {
            patch.insert("donationTime", v);
        }
        if let Some(ref v) = self.requestMessage {
            patch.insert("requestMessage", v);
        }
        if let Some(ref v) = self.status {
            patch.insert("status", v);
        }
        if let Some(ref info) = self.donorInfo {
            patch.insert("donorInfo", doc! { "name": &info.name, "email": &info.email });
        }
        patch
    }
}

/// Recognized query parameters of the donation-request list endpoint.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize, Default)]
pub struct ListDonationRequestsQuery {
    /// Equality on requesterEmail
    pub email: Option<String>,
    /// Equality on status
    pub filter: Option<String>,
    /// Equality on bloodGroup; an empty string matches literal "" only
    pub bloodGroup: Option<String>,
    /// Case-insensitive substring match on recipientName
    pub search: Option<String>,
    /// Result cap; 0, absent or non-numeric means unlimited
    pub count: Option<String>,
    /// "ace" → ascending by createdAt, anything else → descending
    pub sort: Option<String>,
}

impl ListDonationRequestsQuery {
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(ref email) = self.email {
            filter.insert("requesterEmail", email);
        }
        if let Some(ref status) = self.filter {
            filter.insert("status", status);
        }
        if let Some(ref blood_group) = self.bloodGroup {
            filter.insert("bloodGroup", blood_group);
        }
        if let Some(ref search) = self.search {
            filter.insert("recipientName", doc! { "$regex": search, "$options": "i" });
        }
        filter
    }

    pub fn sort_doc(&self) -> Document {
        let direction = match self.sort.as_deref() {
            Some("ace") => 1,
            _ => -1,
        };
        doc! { "createdAt": direction }
    }

    pub fn limit(&self) -> i64 {
        self.count
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_builds_empty_filter() {
        let query = ListDonationRequestsQuery::default();
        assert!(query.to_filter().is_empty());
        assert_eq!(query.limit(), 0);
        assert_eq!(query.sort_doc(), doc! { "createdAt": -1 });
    }

    #[test]
    fn test_equality_clauses() {
        let query = ListDonationRequestsQuery {
            email: Some("requester@x.com".to_string()),
            filter: Some("pending".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.get_str("requesterEmail").unwrap(), "requester@x.com");
        assert_eq!(filter.get_str("status").unwrap(), "pending");
    }

    #[test]
    fn test_empty_blood_group_is_literal_match() {
        let query = ListDonationRequestsQuery {
            bloodGroup: Some("".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.get_str("bloodGroup").unwrap(), "");
    }

    #[test]
    fn test_absent_blood_group_adds_no_clause() {
        let query = ListDonationRequestsQuery::default();
        assert!(!query.to_filter().contains_key("bloodGroup"));
    }

    #[test]
    fn test_search_builds_case_insensitive_regex() {
        let query = ListDonationRequestsQuery {
            search: Some("rahim".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        let clause = filter.get_document("recipientName").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), "rahim");
        assert_eq!(clause.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_sort_ace_is_ascending() {
        let query = ListDonationRequestsQuery {
            sort: Some("ace".to_string()),
            ..Default::default()
        };
        assert_eq!(query.sort_doc(), doc! { "createdAt": 1 });
    }

    #[test]
    fn test_sort_dce_and_unknown_are_descending() {
        for sort in ["dce", "garbage"] {
            let query = ListDonationRequestsQuery {
                sort: Some(sort.to_string()),
                ..Default::default()
            };
            assert_eq!(query.sort_doc(), doc! { "createdAt": -1 });
        }
    }

    #[test]
    fn test_count_zero_and_garbage_mean_unlimited() {
        for count in ["0", "abc", "-3"] {
            let query = ListDonationRequestsQuery {
                count: Some(count.to_string()),
                ..Default::default()
            };
            assert_eq!(query.limit(), 0, "count={}", count);
        }
    }

    #[test]
    fn test_count_positive_caps_results() {
        let query = ListDonationRequestsQuery {
            count: Some("5".to_string()),
            ..Default::default()
        };
        assert_eq!(query.limit(), 5);
    }

    #[test]
    fn test_patch_includes_donor_info() {
        let patch = UpdateDonationRequest {
            status: Some("done".to_string()),
            donorInfo: Some(DonorInfo {
                name: "Karim".to_string(),
                email: "karim@x.com".to_string(),
            }),
            ..Default::default()
        }
        .to_patch();
        assert_eq!(patch.get_str("status").unwrap(), "done");
        let info = patch.get_document("donorInfo").unwrap();
        assert_eq!(info.get_str("email").unwrap(), "karim@x.com");
    }
}
