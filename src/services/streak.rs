// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak and points recalculation.
//!
//! The stored snapshot is always rebuilt from the user's full workout
//! history:
//! 1. Fetch every workout for the session user
//! 2. Reduce to distinct calendar dates and compute the snapshot
//! 3. Upsert the snapshot in a single write
//!
//! Workout handlers call [`StreakEngine::record_workout`] after a save and
//! [`StreakEngine::recalculate_full`] after a delete. The dashboard calls
//! `recalculate_full` on every load.

use chrono::{FixedOffset, NaiveDate};

use crate::db::{StreakStore, WorkoutSource};
use crate::error::AppError;
use crate::models::{Session, StreakInfo};
use crate::time_utils;

/// Failures surfaced by the engine. The backend error is kept intact.
#[derive(Debug, thiserror::Error)]
pub enum StreakError {
    #[error("Failed to fetch streak inputs: {0}")]
    Fetch(#[source] AppError),

    #[error("Failed to persist streak: {0}")]
    Persist(#[source] AppError),
}

impl From<StreakError> for AppError {
    fn from(err: StreakError) -> Self {
        match err {
            StreakError::Fetch(inner) | StreakError::Persist(inner) => inner,
        }
    }
}

/// Computes and persists a user's streak snapshot.
pub struct StreakEngine<'a, S: ?Sized> {
    store: &'a S,
    day_offset: FixedOffset,
}

impl<'a, S> StreakEngine<'a, S>
where
    S: WorkoutSource + StreakStore + ?Sized,
{
    /// `day_offset` decides which calendar day counts as "today".
    pub fn new(store: &'a S, day_offset: FixedOffset) -> Self {
        Self { store, day_offset }
    }

    /// Rebuild the snapshot from scratch and persist it.
    pub async fn recalculate_full(&self, session: &Session) -> Result<StreakInfo, StreakError> {
        let today = time_utils::today(self.day_offset);
        self.recalculate_full_as_of(session, today).await
    }

    /// Same as [`recalculate_full`](Self::recalculate_full) with an explicit "today".
    pub async fn recalculate_full_as_of(
        &self,
        session: &Session,
        today: NaiveDate,
    ) -> Result<StreakInfo, StreakError> {
        let workouts = self
            .store
            .list_workouts(&session.user_id)
            .await
            .map_err(StreakError::Fetch)?;

        let streak = StreakInfo::from_dates(workouts.iter().map(|w| w.date), today);

        self.store
            .upsert_streak(&session.user_id, &streak)
            .await
            .map_err(StreakError::Persist)?;

        tracing::debug!(
            user_id = %session.user_id,
            workouts = workouts.len(),
            current_streak = streak.current_streak,
            longest_streak = streak.longest_streak,
            total_points = streak.total_points,
            "Streak recalculated"
        );

        Ok(streak)
    }

    /// Update the snapshot after a workout on `workout_date` was saved.
    ///
    /// Always a full recompute: an edit can move a workout off a day that
    /// had no other workouts, which an incremental update cannot see.
    pub async fn record_workout(
        &self,
        session: &Session,
        workout_date: NaiveDate,
    ) -> Result<StreakInfo, StreakError> {
        tracing::debug!(user_id = %session.user_id, %workout_date, "Recording workout for streak");
        self.recalculate_full(session).await
    }

    /// The stored snapshot, or the zero snapshot if none exists yet.
    pub async fn current(&self, session: &Session) -> Result<StreakInfo, StreakError> {
        Ok(self
            .store
            .get_streak(&session.user_id)
            .await
            .map_err(StreakError::Fetch)?
            .unwrap_or_default())
    }
}
