//! Body metrics: BMI classification and calorie estimation.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Intensity, WorkoutType};

/// Weight used for calorie estimates when the user has no profile.
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum BmiCategory {
    Unknown,
    Underweight,
    #[serde(rename = "Normal weight")]
    Normal,
    Overweight,
    Obesity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Bmi {
    /// Rounded to one decimal
    pub value: f64,
    pub category: BmiCategory,
}

/// Body mass index from height (cm) and weight (kg).
///
/// Missing or non-positive inputs yield `{0, Unknown}`.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Bmi {
    if !(height_cm > 0.0 && weight_kg > 0.0) {
        return Bmi {
            value: 0.0,
            category: BmiCategory::Unknown,
        };
    }

    let height_m = height_cm / 100.0;
    let value = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;

    let category = if value < 18.5 {
        BmiCategory::Underweight
    } else if value < 24.9 {
        BmiCategory::Normal
    } else if value < 29.9 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    };

    Bmi { value, category }
}

/// Metabolic equivalent for a workout type at medium intensity.
fn met(workout_type: WorkoutType) -> f64 {
    match workout_type {
        WorkoutType::Walking => 3.5,
        WorkoutType::Running => 9.8,
        WorkoutType::Cycling => 7.5,
        WorkoutType::Strength => 5.0,
        WorkoutType::Yoga => 2.5,
        WorkoutType::Hiit => 8.0,
        WorkoutType::Swimming => 6.0,
        WorkoutType::Other => 4.0,
    }
}

/// Estimated kcal burned: MET x weight x hours, scaled by intensity.
pub fn estimate_calories(
    workout_type: WorkoutType,
    duration_mins: u32,
    intensity: Intensity,
    weight_kg: f64,
) -> u32 {
    let factor = match intensity {
        Intensity::Low => 0.8,
        Intensity::Medium => 1.0,
        Intensity::High => 1.2,
    };

    let calories = met(workout_type) * factor * weight_kg * (f64::from(duration_mins) / 60.0);
    calories.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_categories() {
        assert_eq!(calculate_bmi(180.0, 55.0).category, BmiCategory::Underweight);
        assert_eq!(calculate_bmi(180.0, 70.0).category, BmiCategory::Normal);
        assert_eq!(calculate_bmi(180.0, 90.0).category, BmiCategory::Overweight);
        assert_eq!(calculate_bmi(180.0, 110.0).category, BmiCategory::Obesity);
    }

    #[test]
    fn test_bmi_value_rounded() {
        let bmi = calculate_bmi(175.0, 70.0);
        assert_eq!(bmi.value, 22.9);
    }

    #[test]
    fn test_bmi_boundaries() {
        // 24.9 is already overweight, 29.9 already obese
        assert_eq!(calculate_bmi(100.0, 24.9).category, BmiCategory::Overweight);
        assert_eq!(calculate_bmi(100.0, 29.9).category, BmiCategory::Obesity);
        assert_eq!(calculate_bmi(100.0, 18.5).category, BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_missing_inputs() {
        let bmi = calculate_bmi(0.0, 70.0);
        assert_eq!(bmi.value, 0.0);
        assert_eq!(bmi.category, BmiCategory::Unknown);
        assert_eq!(calculate_bmi(170.0, 0.0).category, BmiCategory::Unknown);
    }

    #[test]
    fn test_bmi_category_serializes_display_name() {
        let json = serde_json::to_value(calculate_bmi(180.0, 70.0)).unwrap();
        assert_eq!(json["category"], "Normal weight");
    }

    #[test]
    fn test_estimate_calories() {
        // 9.8 * 70 * 0.5
        assert_eq!(
            estimate_calories(WorkoutType::Running, 30, Intensity::Medium, 70.0),
            343
        );
        // 3.5 * 0.8 * 80 * 1
        assert_eq!(
            estimate_calories(WorkoutType::Walking, 60, Intensity::Low, 80.0),
            224
        );
        // 8.0 * 1.2 * 70 * 0.75
        assert_eq!(
            estimate_calories(WorkoutType::Hiit, 45, Intensity::High, 70.0),
            504
        );
    }

    #[test]
    fn test_estimate_calories_zero_duration() {
        assert_eq!(
            estimate_calories(WorkoutType::Yoga, 0, Intensity::High, DEFAULT_WEIGHT_KG),
            0
        );
    }
}
