use async_trait::async_trait;
use chrono::{Months, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::dto::stats_dto::{GrowthStats, StatisticsResponse};
use crate::repository::donation_request_repo::DonationRequestRepository;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;

/// Placeholder until a funds ledger exists.
const TOTAL_FUNDS_PLACEHOLDER: f64 = 0.0;

/// Relative change between two equal-length trailing windows, rounded to one
/// decimal place. Exactly 0 when the previous window is empty.
pub fn growth_percent(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    let raw = (current as f64 - previous as f64) / previous as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

#[async_trait]
pub trait StatsService: Send + Sync {
    async fn statistics(&self) -> Result<StatisticsResponse, ServiceError>;
}

pub struct StatsServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub request_repo: Arc<dyn DonationRequestRepository>,
}

impl StatsServiceImpl {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        request_repo: Arc<dyn DonationRequestRepository>,
    ) -> Self {
        Self { user_repo, request_repo }
    }
}

#[async_trait]
impl StatsService for StatsServiceImpl {
    #[instrument(skip(self))]
    async fn statistics(&self) -> Result<StatisticsResponse, ServiceError> {
        let now = Utc::now();
        let one_month_ago = now
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| ServiceError::InternalError("Date arithmetic failed".to_string()))?;
        let two_months_ago = now
            .checked_sub_months(Months::new(2))
            .ok_or_else(|| ServiceError::InternalError("Date arithmetic failed".to_string()))?;

        let now = bson::DateTime::from_chrono(now);
        let one_month_ago = bson::DateTime::from_chrono(one_month_ago);
        let two_months_ago = bson::DateTime::from_chrono(two_months_ago);

        let total_users = self.user_repo.count().await?;
        let users_current = self.user_repo.count_created_between(one_month_ago, now).await?;
        let users_previous = self
            .user_repo
            .count_created_between(two_months_ago, one_month_ago)
            .await?;

        let total_requests = self.request_repo.count().await?;
        let requests_current = self
            .request_repo
            .count_created_between(one_month_ago, now)
            .await?;
        let requests_previous = self
            .request_repo
            .count_created_between(two_months_ago, one_month_ago)
            .await?;

        Ok(StatisticsResponse {
            totalUsers: total_users,
            totalDonationRequests: total_requests,
            totalFunds: TOTAL_FUNDS_PLACEHOLDER,
            userGrowth: GrowthStats {
                currentPeriod: users_current,
                previousPeriod: users_previous,
                growthPercent: growth_percent(users_current, users_previous),
            },
            donationRequestGrowth: GrowthStats {
                currentPeriod: requests_current,
                previousPeriod: requests_previous,
                growthPercent: growth_percent(requests_current, requests_previous),
            },
        })
    }
}
