use serde::Serialize;

/// Month-over-month counts for one tracked collection.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize)]
pub struct GrowthStats {
    pub currentPeriod: u64,
    pub previousPeriod: u64,
    pub growthPercent: f64,
}

#[allow(non_snake_case)]
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub totalUsers: u64,
    pub totalDonationRequests: u64,
    /// Static placeholder; there is no funds ledger integration.
    pub totalFunds: f64,
    pub userGrowth: GrowthStats,
    pub donationRequestGrowth: GrowthStats,
}
