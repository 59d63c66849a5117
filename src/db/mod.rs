//! Database layer.
//!
//! Handlers and services talk to storage through the traits below. The
//! streak engine only needs [`WorkoutSource`] and [`StreakStore`]; routes
//! use the wider [`Database`].

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{DailyStats, StreakInfo, User, WorkoutLog};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
    /// Keyed by `{user_id}_{date}`
    pub const DAILY_STATS: &str = "daily_stats";
    /// Streak snapshot (keyed by user_id)
    pub const STREAKS: &str = "streaks";
}

/// Read access to a user's workout history.
#[async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Every workout for the user, in no particular order.
    async fn list_workouts(&self, user_id: &str) -> Result<Vec<WorkoutLog>, AppError>;
}

/// The single persisted streak record per user.
#[async_trait]
pub trait StreakStore: Send + Sync {
    async fn get_streak(&self, user_id: &str) -> Result<Option<StreakInfo>, AppError>;

    /// Create the record if absent, otherwise replace it entirely.
    async fn upsert_streak(&self, user_id: &str, streak: &StreakInfo) -> Result<(), AppError>;
}

/// Everything the HTTP layer needs from storage.
#[async_trait]
pub trait Database: WorkoutSource + StreakStore {
    // ─── Users ───────────────────────────────────────────────────

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    // ─── Workouts ────────────────────────────────────────────────

    async fn get_workout(&self, workout_id: &str) -> Result<Option<WorkoutLog>, AppError>;

    async fn set_workout(&self, workout: &WorkoutLog) -> Result<(), AppError>;

    async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError>;

    // ─── Daily Stats ─────────────────────────────────────────────

    async fn list_daily_stats(&self, user_id: &str) -> Result<Vec<DailyStats>, AppError>;

    async fn get_daily_stats(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyStats>, AppError>;

    async fn set_daily_stats(&self, stats: &DailyStats) -> Result<(), AppError>;

    // ─── Account ─────────────────────────────────────────────────

    /// Delete the user and everything they own. Returns documents deleted.
    async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError>;
}
