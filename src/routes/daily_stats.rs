//! Daily sleep and hydration routes.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::models::{DailyStats, Session};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/daily-stats", get(list_daily_stats))
        .route(
            "/api/daily-stats/{date}",
            get(get_daily_stats).put(put_daily_stats),
        )
}

#[derive(Debug, Deserialize, Validate)]
pub struct DailyStatsRequest {
    /// Glasses of water
    #[serde(default)]
    #[validate(range(max = 100))]
    pub water_intake: u32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: f64,
}

async fn list_daily_stats(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<DailyStats>>> {
    let mut stats = state.db.list_daily_stats(&session.user_id).await?;
    stats.sort_by_key(|s| s.date);
    Ok(Json(stats))
}

/// The entry for `date`, or zeros if nothing was logged.
async fn get_daily_stats(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DailyStats>> {
    let stats = state
        .db
        .get_daily_stats(&session.user_id, date)
        .await?
        .unwrap_or_else(|| DailyStats::empty(&session.user_id, date));
    Ok(Json(stats))
}

async fn put_daily_stats(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(date): Path<NaiveDate>,
    Json(body): Json<DailyStatsRequest>,
) -> Result<Json<DailyStats>> {
    body.validate()?;

    let stats = DailyStats {
        user_id: session.user_id.clone(),
        date,
        water_intake: body.water_intake,
        sleep_hours: body.sleep_hours,
    };
    state.db.set_daily_stats(&stats).await?;

    tracing::debug!(user_id = %session.user_id, %date, "Daily stats saved");

    Ok(Json(stats))
}
