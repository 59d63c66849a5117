// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod daily_stats;
pub mod session;
pub mod streak;
pub mod user;
pub mod workout;

pub use daily_stats::DailyStats;
pub use session::Session;
pub use streak::{StreakInfo, StreakState};
pub use user::{User, UserProfile};
pub use workout::{Feeling, Intensity, WorkoutLog, WorkoutType};
