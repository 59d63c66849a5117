// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication and account routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::{Session, User, UserProfile};
use crate::services::password::{hash_password_async, verify_password_async};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

/// Public auth routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Account routes (require authentication).
pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/account", delete(delete_account))
}

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Public view of a user. Never includes the password hash.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub joined_date: String,
    pub profile: Option<UserProfile>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            joined_date: user.joined_date,
            profile: user.profile,
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Session cookie; `Secure` whenever the frontend is served over HTTPS.
fn session_cookie(frontend_url: &str, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(frontend_url.starts_with("https://"))
        .build()
}

/// Issue a token for `user` and attach it as the session cookie.
fn start_session(state: &AppState, jar: CookieJar, user: User) -> Result<(CookieJar, AuthResponse)> {
    let session = Session {
        user_id: user.id.clone(),
        email: user.email.clone(),
    };
    let token = create_jwt(&session, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(&state.config.frontend_url, token.clone()));

    Ok((
        jar,
        AuthResponse {
            token,
            user: user.into(),
        },
    ))
}

/// Create an account and sign in.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(mut body): Json<Credentials>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    body.email = normalize_email(&body.email);
    body.validate()?;

    if state.db.get_user_by_email(&body.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password_async(body.password).await?;
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: body.email,
        password_hash: Some(password_hash),
        joined_date: format_utc_rfc3339(chrono::Utc::now()),
        profile: None,
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    let (jar, response) = start_session(&state, jar, user)?;
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// Sign in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<Credentials>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let email = normalize_email(&body.email);

    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let verified = match user.password_hash.clone() {
        Some(stored) => verify_password_async(body.password, stored).await?,
        None => false,
    };
    if !verified {
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let (jar, response) = start_session(&state, jar, user)?;
    Ok((jar, Json(response)))
}

/// Clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (StatusCode, CookieJar) {
    let removal = session_cookie(&state.config.frontend_url, String::new());
    (StatusCode::NO_CONTENT, jar.remove(removal))
}

/// Get the signed-in user.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<UserResponse>> {
    let user = state
        .db
        .get_user(&session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id)))?;

    Ok(Json(user.into()))
}

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted: usize,
}

/// Delete the user's account and all of their data.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<DeleteAccountResponse>)> {
    tracing::info!(user_id = %session.user_id, "User-initiated account deletion");

    let deleted = state.db.delete_user_data(&session.user_id).await?;

    tracing::info!(user_id = %session.user_id, deleted, "Account deleted");

    let removal = session_cookie(&state.config.frontend_url, String::new());
    Ok((
        jar.remove(removal),
        Json(DeleteAccountResponse {
            success: true,
            deleted,
        }),
    ))
}
