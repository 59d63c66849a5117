// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak, dashboard and weekly report routes.

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::WorkoutSource;
use crate::error::{AppError, Result};
use crate::models::{Session, StreakInfo, UserProfile, WorkoutLog};
use crate::routes::profile::load_user;
use crate::services::analytics::{self, DayPoint, Heatmap, NamedValue, WeeklyReport};
use crate::services::{calculate_bmi, Bmi, StreakEngine};
use crate::time_utils;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/streak", get(get_streak))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/report/weekly", get(get_weekly_report))
}

/// Stored snapshot only; never recomputes.
async fn get_streak(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<StreakInfo>> {
    let streak = StreakEngine::new(state.db.as_ref(), state.config.day_offset)
        .current(&session)
        .await?;
    Ok(Json(streak))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DashboardQuery {
    #[validate(range(min = 1970, max = 9999))]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub streak: StreakInfo,
    pub today_steps: u32,
    pub today_calories: u32,
    pub weekly: Vec<DayPoint>,
    pub type_distribution: Vec<NamedValue>,
    pub intensity_distribution: Vec<NamedValue>,
    pub top_calorie_types: Vec<NamedValue>,
    pub heatmap: Heatmap,
    pub available_years: Vec<i32>,
}

/// Dashboard data. The streak is recomputed on every load so a streak
/// that lapsed overnight shows as broken.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    query.validate()?;
    let today = time_utils::today(state.config.day_offset);

    let streak = StreakEngine::new(state.db.as_ref(), state.config.day_offset)
        .recalculate_full_as_of(&session, today)
        .await?;

    let workouts = state.db.list_workouts(&session.user_id).await?;
    let daily_stats = state.db.list_daily_stats(&session.user_id).await?;

    let year = query.year.unwrap_or_else(|| today.year());
    let heatmap = analytics::heatmap(&workouts, year)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid year {}", year)))?;
    let (today_steps, today_calories) = analytics::day_totals(&workouts, today);

    Ok(Json(DashboardResponse {
        streak,
        today_steps,
        today_calories,
        weekly: analytics::weekly_series(&workouts, &daily_stats, today),
        type_distribution: analytics::type_distribution(&workouts),
        intensity_distribution: analytics::intensity_distribution(&workouts),
        top_calorie_types: analytics::top_calorie_types(&workouts),
        heatmap,
        available_years: analytics::available_years(&workouts, today.year()),
    }))
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyReportResponse {
    #[serde(flatten)]
    pub report: WeeklyReport,
    pub streak: StreakInfo,
    pub profile: Option<UserProfile>,
    pub bmi: Option<Bmi>,
}

async fn get_weekly_report(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<WeeklyReportResponse>> {
    let today = time_utils::today(state.config.day_offset);

    let user = load_user(&state, &session).await?;
    let workouts: Vec<WorkoutLog> = state.db.list_workouts(&session.user_id).await?;
    let daily_stats = state.db.list_daily_stats(&session.user_id).await?;
    let streak = StreakEngine::new(state.db.as_ref(), state.config.day_offset)
        .current(&session)
        .await?;

    let bmi = user
        .profile
        .as_ref()
        .map(|p| calculate_bmi(p.height, p.weight));

    Ok(Json(WeeklyReportResponse {
        report: analytics::weekly_report(&workouts, &daily_stats, today),
        streak,
        profile: user.profile,
        bmi,
    }))
}
