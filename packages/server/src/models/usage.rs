use serde::{Deserialize, Serialize};

use crate::store::UsageCount;

pub const DEFAULT_STATS_DAYS: u32 = 30;
pub const MAX_STATS_DAYS: u32 = 365;

/// Query parameters for usage statistics.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsageStatsQuery {
    /// Look-back window in days (1-365, default 30).
    pub days: Option<u32>,
}

/// Event counts per action over a look-back window.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UsageStats {
    pub days: u32,
    /// Sum of all counts.
    pub total: i64,
    pub actions: Vec<UsageCount>,
}
