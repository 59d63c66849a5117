//! Workout streak and points snapshot.
//!
//! The snapshot is always derived from the full set of workout dates, so
//! it can be rebuilt at any time without drift.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::days_between;

/// Points awarded per distinct calendar day with at least one workout.
pub const POINTS_PER_DAY: u32 = 10;

/// Persisted streak record for one user.
///
/// Stored at: `streaks/{user_id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakInfo {
    /// Consecutive days ending today or yesterday
    #[serde(default)]
    pub current_streak: u32,
    /// Longest run ever observed
    #[serde(default)]
    pub longest_streak: u32,
    /// Most recent calendar day with a workout
    #[serde(default)]
    pub last_log_date: Option<NaiveDate>,
    /// 10 per distinct workout day
    #[serde(default)]
    pub total_points: u32,
}

/// Where a user stands, derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    NoHistory,
    Active(u32),
    Broken,
}

impl StreakInfo {
    /// Build a snapshot from workout dates as of `today`.
    ///
    /// Dates may repeat and arrive in any order. A run continues only when
    /// the next distinct date is exactly one day later. The current streak
    /// survives only if the last logged day is today or yesterday.
    pub fn from_dates<I>(dates: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let distinct: BTreeSet<NaiveDate> = dates.into_iter().collect();

        let Some(&last_log_date) = distinct.last() else {
            return Self::default();
        };

        let mut longest_streak = 0u32;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;

        for &date in &distinct {
            run = match prev {
                Some(p) if days_between(p, date) == 1 => run + 1,
                _ => 1,
            };
            longest_streak = longest_streak.max(run);
            prev = Some(date);
        }

        // `run` now holds the length of the run ending at `last_log_date`.
        let current_streak = if days_between(last_log_date, today) <= 1 {
            run
        } else {
            0
        };

        Self {
            current_streak,
            longest_streak,
            last_log_date: Some(last_log_date),
            total_points: POINTS_PER_DAY.saturating_mul(distinct.len() as u32),
        }
    }

    pub fn state(&self) -> StreakState {
        match (self.last_log_date, self.current_streak) {
            (None, _) => StreakState::NoHistory,
            (Some(_), 0) => StreakState::Broken,
            (Some(_), n) => StreakState::Active(n),
        }
    }
}
