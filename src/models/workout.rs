// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout log model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kind of workout. "Weightlifting" is accepted as an alias of `Strength`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutType {
    Running,
    Walking,
    Cycling,
    #[serde(alias = "Weightlifting")]
    Strength,
    Yoga,
    #[serde(rename = "HIIT")]
    Hiit,
    Swimming,
    Other,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Walking => "Walking",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::Strength => "Strength",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Swimming => "Swimming",
            WorkoutType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

/// How the user felt afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Feeling {
    Amazing,
    Good,
    #[default]
    Okay,
    Tired,
    Hurt,
}

/// Stored workout record in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutLog {
    /// Workout ID (also used as document ID)
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Calendar day the workout happened on
    pub date: NaiveDate,
    /// Wall-clock start time ("HH:MM")
    pub time: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Duration in minutes
    pub duration: u32,
    /// Distance in km
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub steps: Option<u32>,
    /// Average heart rate (bpm)
    #[serde(default)]
    pub avg_heart_rate: Option<u32>,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub feeling: Feeling,
    /// Rate of perceived exertion (1-10)
    #[serde(default)]
    pub rpe: Option<u8>,
    #[serde(default)]
    pub calories_burned: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl WorkoutLog {
    /// Sort key for "most recent first" listings.
    pub fn sort_key(&self) -> (NaiveDate, &str) {
        (self.date, self.time.as_str())
    }
}
