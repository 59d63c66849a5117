// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Body and goal profile routes.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::user::{ActivityLevel, Gender};
use crate::models::{Session, User, UserProfile};
use crate::services::{calculate_bmi, Bmi};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/profile",
            get(get_profile).put(put_profile).delete(delete_profile),
        )
        .route("/api/profile/bmi", get(get_bmi))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    pub gender: Gender,
    /// cm
    #[validate(range(min = 50.0, max = 300.0))]
    pub height: f64,
    /// kg
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight: f64,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal_steps: u32,
    #[serde(default)]
    pub goal_calories: u32,
    #[serde(default)]
    pub joined_date: Option<String>,
}

pub(crate) async fn load_user(state: &AppState, session: &Session) -> Result<User> {
    state
        .db
        .get_user(&session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id)))
}

fn profile_of(user: User) -> Result<UserProfile> {
    user.profile
        .ok_or_else(|| AppError::NotFound("Profile not set up".to_string()))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<UserProfile>> {
    let user = load_user(&state, &session).await?;
    Ok(Json(profile_of(user)?))
}

/// Replace the profile.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(body): Json<ProfileRequest>,
) -> Result<Json<UserProfile>> {
    body.validate()?;

    let mut user = load_user(&state, &session).await?;

    let profile = UserProfile {
        name: body.name.trim().to_string(),
        age: body.age,
        gender: body.gender,
        height: body.height,
        weight: body.weight,
        activity_level: body.activity_level,
        goal_steps: body.goal_steps,
        goal_calories: body.goal_calories,
        joined_date: body.joined_date.unwrap_or_else(|| user.joined_date.clone()),
    };
    user.profile = Some(profile.clone());
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %session.user_id, "Profile updated");

    Ok(Json(profile))
}

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<axum::http::StatusCode> {
    let mut user = load_user(&state, &session).await?;
    user.profile = None;
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %session.user_id, "Profile cleared");

    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn get_bmi(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<Bmi>> {
    let profile = profile_of(load_user(&state, &session).await?)?;
    Ok(Json(calculate_bmi(profile.height, profile.weight)))
}
