//! DTOs for the warranty statistics endpoint.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::warranty::WarrantySummary;

/// Response for `GET /api/appliances/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: WarrantySummary,
    /// Date the statuses were evaluated on.
    pub as_of: NaiveDate,
}
