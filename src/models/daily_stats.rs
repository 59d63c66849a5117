//! Per-day health stats (sleep and hydration).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One user's sleep and water for a calendar day.
///
/// Stored at: `daily_stats/{user_id}_{date}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyStats {
    pub user_id: String,
    pub date: NaiveDate,
    /// Glasses of water
    #[serde(default)]
    pub water_intake: u32,
    #[serde(default)]
    pub sleep_hours: f64,
}

impl DailyStats {
    /// Zeroed entry for a day with nothing logged.
    pub fn empty(user_id: &str, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.to_string(),
            date,
            water_intake: 0,
            sleep_hours: 0.0,
        }
    }

    pub fn document_id(&self) -> String {
        daily_stats_document_id(&self.user_id, self.date)
    }
}

pub fn daily_stats_document_id(user_id: &str, date: NaiveDate) -> String {
    format!("{}_{}", user_id, date.format("%Y-%m-%d"))
}
