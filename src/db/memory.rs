//! Process-local backend for local development and tests.
//!
//! Each collection is a `DashMap` keyed the same way as its Firestore
//! counterpart. Nothing survives a restart.

use crate::db::{Database, StreakStore, WorkoutSource};
use crate::error::AppError;
use crate::models::daily_stats::daily_stats_document_id;
use crate::models::{DailyStats, StreakInfo, User, WorkoutLog};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct MemoryDb {
    users: DashMap<String, User>,
    workouts: DashMap<String, WorkoutLog>,
    daily_stats: DashMap<String, DailyStats>,
    streaks: DashMap<String, StreakInfo>,
    reject_writes: AtomicBool,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a database error.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database("Writes rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WorkoutSource for MemoryDb {
    async fn list_workouts(&self, user_id: &str) -> Result<Vec<WorkoutLog>, AppError> {
        Ok(self
            .workouts
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[async_trait]
impl StreakStore for MemoryDb {
    async fn get_streak(&self, user_id: &str) -> Result<Option<StreakInfo>, AppError> {
        Ok(self.streaks.get(user_id).map(|s| s.value().clone()))
    }

    async fn upsert_streak(&self, user_id: &str, streak: &StreakInfo) -> Result<(), AppError> {
        self.check_writable()?;
        self.streaks.insert(user_id.to_string(), streak.clone());
        Ok(())
    }
}

#[async_trait]
impl Database for MemoryDb {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.get(user_id).map(|u| u.value().clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.check_writable()?;
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_workout(&self, workout_id: &str) -> Result<Option<WorkoutLog>, AppError> {
        Ok(self.workouts.get(workout_id).map(|w| w.value().clone()))
    }

    async fn set_workout(&self, workout: &WorkoutLog) -> Result<(), AppError> {
        self.check_writable()?;
        self.workouts.insert(workout.id.clone(), workout.clone());
        Ok(())
    }

    async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.check_writable()?;
        self.workouts.remove(workout_id);
        Ok(())
    }

    async fn list_daily_stats(&self, user_id: &str) -> Result<Vec<DailyStats>, AppError> {
        let mut stats: Vec<DailyStats> = self
            .daily_stats
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        stats.sort_by_key(|s| s.date);
        Ok(stats)
    }

    async fn get_daily_stats(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyStats>, AppError> {
        Ok(self
            .daily_stats
            .get(&daily_stats_document_id(user_id, date))
            .map(|s| s.value().clone()))
    }

    async fn set_daily_stats(&self, stats: &DailyStats) -> Result<(), AppError> {
        self.check_writable()?;
        self.daily_stats.insert(stats.document_id(), stats.clone());
        Ok(())
    }

    async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        self.check_writable()?;

        let mut deleted_count = 0usize;
        self.workouts.retain(|_, w| {
            let keep = w.user_id != user_id;
            deleted_count += usize::from(!keep);
            keep
        });
        self.daily_stats.retain(|_, s| {
            let keep = s.user_id != user_id;
            deleted_count += usize::from(!keep);
            keep
        });

        deleted_count += usize::from(self.streaks.remove(user_id).is_some());
        deleted_count += usize::from(self.users.remove(user_id).is_some());

        tracing::info!(user_id, deleted_count, "User data deletion complete");
        Ok(deleted_count)
    }
}
