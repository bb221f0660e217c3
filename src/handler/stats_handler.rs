use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::service::stats_service::{StatsService, StatsServiceImpl};
use crate::util::error::HandlerError;

// Admin statistics: totals and month-over-month growth
pub async fn statistics_handler(
    State(service): State<Arc<StatsServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.statistics().await?;
    Ok(Json(stats))
}
