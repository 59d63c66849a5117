// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analytics;
pub mod health;
pub mod password;
pub mod streak;

pub use health::{calculate_bmi, estimate_calories, Bmi, BmiCategory};
pub use streak::{StreakEngine, StreakError};
