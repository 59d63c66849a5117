// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log routes.
//!
//! Every successful save or delete re-derives the user's streak snapshot,
//! so the response always carries the up-to-date streak.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::WorkoutSource;
use crate::error::{AppError, Result};
use crate::models::{Feeling, Intensity, Session, StreakInfo, WorkoutLog, WorkoutType};
use crate::services::health::DEFAULT_WEIGHT_KG;
use crate::services::{estimate_calories, StreakEngine};
use crate::time_utils::parse_clock_time;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            put(update_workout).delete(delete_workout),
        )
        .route("/api/workouts/estimate-calories", post(estimate))
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutFilter {
    #[serde(rename = "type")]
    pub workout_type: Option<WorkoutType>,
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

impl WorkoutFilter {
    fn matches(&self, workout: &WorkoutLog) -> bool {
        if self.workout_type.is_some_and(|t| t != workout.workout_type) {
            return false;
        }
        if self.date.is_some_and(|d| d != workout.date) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                workout.workout_type.as_str().to_lowercase().contains(&term)
                    || workout
                        .notes
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&term))
            }
        }
    }
}

/// Apply `filter` and order newest first.
pub fn filter_workouts(mut workouts: Vec<WorkoutLog>, filter: &WorkoutFilter) -> Vec<WorkoutLog> {
    workouts.retain(|w| filter.matches(w));
    workouts.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    workouts
}

/// Create/replace body. Omitted calories are estimated.
#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutRequest {
    pub date: NaiveDate,
    #[validate(length(equal = 5))]
    pub time: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[validate(range(min = 1, max = 1440))]
    pub duration: u32,
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    #[validate(range(max = 200000))]
    pub steps: Option<u32>,
    #[validate(range(min = 20, max = 250))]
    pub avg_heart_rate: Option<u32>,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub feeling: Feeling,
    #[validate(range(min = 1, max = 10))]
    pub rpe: Option<u8>,
    #[validate(range(max = 20000))]
    pub calories_burned: Option<u32>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSaved {
    pub workout: WorkoutLog,
    pub streak: StreakInfo,
}

/// Profile weight, or the default when no profile exists.
async fn user_weight(state: &AppState, session: &Session) -> Result<f64> {
    Ok(state
        .db
        .get_user(&session.user_id)
        .await?
        .and_then(|u| u.profile)
        .map_or(DEFAULT_WEIGHT_KG, |p| p.weight))
}

async fn build_workout(
    state: &AppState,
    session: &Session,
    id: String,
    body: WorkoutRequest,
) -> Result<WorkoutLog> {
    body.validate()?;
    if parse_clock_time(&body.time).is_none() {
        return Err(AppError::BadRequest(format!(
            "Invalid time '{}': expected HH:MM",
            body.time
        )));
    }

    let calories_burned = match body.calories_burned {
        Some(kcal) => kcal,
        None => estimate_calories(
            body.workout_type,
            body.duration,
            body.intensity,
            user_weight(state, session).await?,
        ),
    };

    Ok(WorkoutLog {
        id,
        user_id: session.user_id.clone(),
        date: body.date,
        time: body.time,
        workout_type: body.workout_type,
        duration: body.duration,
        distance: body.distance,
        steps: body.steps,
        avg_heart_rate: body.avg_heart_rate,
        intensity: body.intensity,
        feeling: body.feeling,
        rpe: body.rpe,
        calories_burned,
        notes: body.notes.filter(|n| !n.trim().is_empty()),
    })
}

/// Fetch a workout the session user owns. Someone else's workout is
/// indistinguishable from a missing one.
async fn owned_workout(state: &AppState, session: &Session, id: &str) -> Result<WorkoutLog> {
    state
        .db
        .get_workout(id)
        .await?
        .filter(|w| w.user_id == session.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(filter): Query<WorkoutFilter>,
) -> Result<Json<Vec<WorkoutLog>>> {
    let workouts = state.db.list_workouts(&session.user_id).await?;
    Ok(Json(filter_workouts(workouts, &filter)))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<WorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutSaved>)> {
    let id = uuid::Uuid::new_v4().to_string();
    let workout = build_workout(&state, &session, id, body).await?;
    state.db.set_workout(&workout).await?;

    tracing::info!(
        user_id = %session.user_id,
        workout_id = %workout.id,
        date = %workout.date,
        "Workout logged"
    );

    let streak = StreakEngine::new(state.db.as_ref(), state.config.day_offset)
        .record_workout(&session, workout.date)
        .await?;

    Ok((StatusCode::CREATED, Json(WorkoutSaved { workout, streak })))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(body): Json<WorkoutRequest>,
) -> Result<Json<WorkoutSaved>> {
    owned_workout(&state, &session, &id).await?;

    let workout = build_workout(&state, &session, id, body).await?;
    state.db.set_workout(&workout).await?;

    tracing::info!(user_id = %session.user_id, workout_id = %workout.id, "Workout updated");

    let streak = StreakEngine::new(state.db.as_ref(), state.config.day_offset)
        .record_workout(&session, workout.date)
        .await?;

    Ok(Json(WorkoutSaved { workout, streak }))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    owned_workout(&state, &session, &id).await?;
    state.db.delete_workout(&id).await?;

    tracing::info!(user_id = %session.user_id, workout_id = %id, "Workout deleted");

    StreakEngine::new(state.db.as_ref(), state.config.day_offset)
        .recalculate_full(&session)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Validate)]
pub struct EstimateRequest {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[validate(range(min = 1, max = 1440))]
    pub duration: u32,
    #[serde(default)]
    pub intensity: Intensity,
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EstimateResponse {
    pub calories: u32,
}

async fn estimate(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>> {
    body.validate()?;

    let weight = match body.weight_kg {
        Some(w) => w,
        None => user_weight(&state, &session).await?,
    };

    Ok(Json(EstimateResponse {
        calories: estimate_calories(body.workout_type, body.duration, body.intensity, weight),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(id: &str, date: &str, time: &str, kind: WorkoutType, notes: Option<&str>) -> WorkoutLog {
        WorkoutLog {
            id: id.to_string(),
            user_id: "u1".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: time.to_string(),
            workout_type: kind,
            duration: 30,
            distance: None,
            steps: None,
            avg_heart_rate: None,
            intensity: Intensity::Medium,
            feeling: Feeling::Good,
            rpe: None,
            calories_burned: 200,
            notes: notes.map(str::to_string),
        }
    }

    fn sample() -> Vec<WorkoutLog> {
        vec![
            workout("a", "2024-03-01", "07:00", WorkoutType::Running, Some("Park loop")),
            workout("b", "2024-03-02", "18:30", WorkoutType::Yoga, None),
            workout("c", "2024-03-02", "06:15", WorkoutType::Running, Some("tempo")),
        ]
    }

    fn ids(workouts: &[WorkoutLog]) -> Vec<&str> {
        workouts.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let result = filter_workouts(sample(), &WorkoutFilter::default());
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_filter_by_type_and_date() {
        let filter = WorkoutFilter {
            workout_type: Some(WorkoutType::Running),
            date: NaiveDate::from_ymd_opt(2024, 3, 2),
            search: None,
        };
        assert_eq!(ids(&filter_workouts(sample(), &filter)), vec!["c"]);
    }

    #[test]
    fn test_search_notes_and_type_case_insensitive() {
        let by_notes = WorkoutFilter {
            search: Some("PARK".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_workouts(sample(), &by_notes)), vec!["a"]);

        let by_type = WorkoutFilter {
            search: Some("yog".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_workouts(sample(), &by_type)), vec!["b"]);
    }
}
