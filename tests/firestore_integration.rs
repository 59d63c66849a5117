// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Start one with `gcloud emulators firestore start` and export
//! FIRESTORE_EMULATOR_HOST before running.
//!
//! The emulator provides a clean state for each test run.

use chrono::{FixedOffset, NaiveDate};
use fit_track::db::{Database, StreakStore, WorkoutSource};
use fit_track::models::{
    DailyStats, Feeling, Intensity, Session, StreakInfo, User, WorkoutLog, WorkoutType,
};
use fit_track::services::StreakEngine;

mod common;
use common::test_db;

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Helper to create a basic test user
fn test_user(user_id: &str) -> User {
    User {
        id: user_id.to_string(),
        email: format!("{}@example.com", user_id),
        password_hash: Some("c2FsdA==$aGFzaA==".to_string()),
        joined_date: "2024-01-15T10:00:00Z".to_string(),
        profile: None,
    }
}

fn test_workout(user_id: &str, date: &str) -> WorkoutLog {
    WorkoutLog {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        date: d(date),
        time: "06:45".to_string(),
        workout_type: WorkoutType::Cycling,
        duration: 60,
        distance: Some(25.0),
        steps: None,
        avg_heart_rate: Some(140),
        intensity: Intensity::High,
        feeling: Feeling::Amazing,
        rpe: Some(8),
        calories_burned: 630,
        notes: Some("Hill repeats".to_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_create_and_lookup_by_email() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    assert!(db.get_user(&user_id).await.unwrap().is_none());

    let user = test_user(&user_id);
    db.upsert_user(&user).await.unwrap();

    let fetched = db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(fetched.email, user.email);
    assert_eq!(fetched.password_hash, user.password_hash);

    let by_email = db.get_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user_id);
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKOUT & STREAK TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_workouts_scoped_to_user() {
    require_emulator!();

    let db = test_db().await;
    let user_a = unique_user_id();
    let user_b = unique_user_id();

    let workout = test_workout(&user_a, "2024-05-01");
    db.set_workout(&workout).await.unwrap();
    db.set_workout(&test_workout(&user_b, "2024-05-02")).await.unwrap();

    let listed = db.list_workouts(&user_a).await.unwrap();
    assert_eq!(listed, vec![workout.clone()]);

    db.delete_workout(&workout.id).await.unwrap();
    assert!(db.get_workout(&workout.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_streak_recalculation_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        db.set_workout(&test_workout(&user_id, date)).await.unwrap();
    }

    let session = Session {
        user_id: user_id.clone(),
        email: format!("{}@example.com", user_id),
    };
    let engine = StreakEngine::new(&db, FixedOffset::east_opt(0).unwrap());
    let streak = engine
        .recalculate_full_as_of(&session, d("2024-01-03"))
        .await
        .unwrap();

    assert_eq!(
        streak,
        StreakInfo {
            current_streak: 3,
            longest_streak: 3,
            last_log_date: Some(d("2024-01-03")),
            total_points: 30,
        }
    );
    assert_eq!(db.get_streak(&user_id).await.unwrap(), Some(streak));
}

// ═══════════════════════════════════════════════════════════════════════════
// DAILY STATS & DELETION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_daily_stats_upsert() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let mut stats = DailyStats::empty(&user_id, d("2024-03-01"));
    stats.sleep_hours = 7.5;
    db.set_daily_stats(&stats).await.unwrap();

    stats.water_intake = 8;
    db.set_daily_stats(&stats).await.unwrap();

    let all = db.list_daily_stats(&user_id).await.unwrap();
    assert_eq!(all, vec![stats.clone()]);
    assert_eq!(
        db.get_daily_stats(&user_id, d("2024-03-01")).await.unwrap(),
        Some(stats)
    );
}

#[tokio::test]
async fn test_delete_user_data() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    db.upsert_user(&test_user(&user_id)).await.unwrap();
    db.set_workout(&test_workout(&user_id, "2024-06-01")).await.unwrap();
    db.set_workout(&test_workout(&user_id, "2024-06-02")).await.unwrap();
    db.set_daily_stats(&DailyStats::empty(&user_id, d("2024-06-01")))
        .await
        .unwrap();
    db.upsert_streak(&user_id, &StreakInfo::default()).await.unwrap();

    let deleted = db.delete_user_data(&user_id).await.unwrap();
    assert_eq!(deleted, 5);

    assert!(db.get_user(&user_id).await.unwrap().is_none());
    assert!(db.list_workouts(&user_id).await.unwrap().is_empty());
    assert!(db.list_daily_stats(&user_id).await.unwrap().is_empty());
    assert!(db.get_streak(&user_id).await.unwrap().is_none());
}
