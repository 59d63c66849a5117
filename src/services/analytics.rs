//! Dashboard and weekly report aggregates.
//!
//! Everything here is a pure function of the user's workouts and daily
//! stats, evaluated as of a given calendar day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{DailyStats, Intensity, WorkoutLog};

/// Number of most recent workouts listed in the weekly report.
const RECENT_WORKOUTS: usize = 10;
/// Number of workout types in the "top calories" chart.
const TOP_CALORIE_TYPES: usize = 5;

/// A labelled count or total, for pie and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NamedValue {
    pub name: String,
    pub value: u32,
}

/// One day of the 7-day series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayPoint {
    pub date: NaiveDate,
    /// Short weekday name ("Mon")
    pub day: String,
    pub steps: u32,
    pub calories: u32,
    pub sleep: f64,
    pub water: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
    /// 0 = Sunday
    pub day_of_week: u32,
    /// Padding days from the neighbouring years are `false`
    pub in_selected_year: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonthLabel {
    /// Index of the first week column containing the 1st of the month
    pub index: usize,
    pub label: String,
}

/// Sunday-to-Saturday week columns covering a whole year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Heatmap {
    pub year: i32,
    pub weeks: Vec<Vec<HeatmapDay>>,
    pub month_labels: Vec<MonthLabel>,
}

/// Workouts per calendar day.
fn counts_by_date(workouts: &[WorkoutLog]) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();
    for w in workouts {
        *counts.entry(w.date).or_insert(0) += 1;
    }
    counts
}

/// Steps and calories logged on `date`.
pub fn day_totals(workouts: &[WorkoutLog], date: NaiveDate) -> (u32, u32) {
    workouts
        .iter()
        .filter(|w| w.date == date)
        .fold((0, 0), |(steps, calories), w| {
            (
                steps.saturating_add(w.steps.unwrap_or(0)),
                calories.saturating_add(w.calories_burned),
            )
        })
}

/// Sum that clamps at `u32::MAX`.
fn saturating_sum(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, u32::saturating_add)
}

/// The seven days ending at `today`, oldest first.
pub fn last_seven_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7).rev().map(|i| today - Duration::days(i)).collect()
}

pub fn weekly_series(
    workouts: &[WorkoutLog],
    daily_stats: &[DailyStats],
    today: NaiveDate,
) -> Vec<DayPoint> {
    last_seven_days(today)
        .into_iter()
        .map(|date| {
            let (steps, calories) = day_totals(workouts, date);
            let stats = daily_stats.iter().find(|s| s.date == date);
            DayPoint {
                date,
                day: date.format("%a").to_string(),
                steps,
                calories,
                sleep: stats.map_or(0.0, |s| s.sleep_hours),
                water: stats.map_or(0, |s| s.water_intake),
            }
        })
        .collect()
}

/// Workout count per type, most common first.
pub fn type_distribution(workouts: &[WorkoutLog]) -> Vec<NamedValue> {
    let mut counts: BTreeMap<&'static str, u32> = BTreeMap::new();
    for w in workouts {
        *counts.entry(w.workout_type.as_str()).or_insert(0) += 1;
    }
    sorted_desc(counts)
}

/// Workout count per intensity in Low/Medium/High order, zeros dropped.
pub fn intensity_distribution(workouts: &[WorkoutLog]) -> Vec<NamedValue> {
    [
        (Intensity::Low, "Low"),
        (Intensity::Medium, "Medium"),
        (Intensity::High, "High"),
    ]
    .into_iter()
    .map(|(intensity, name)| NamedValue {
        name: name.to_string(),
        value: workouts.iter().filter(|w| w.intensity == intensity).count() as u32,
    })
    .filter(|nv| nv.value > 0)
    .collect()
}

/// Total calories per workout type, top five.
pub fn top_calorie_types(workouts: &[WorkoutLog]) -> Vec<NamedValue> {
    let mut totals: BTreeMap<&'static str, u32> = BTreeMap::new();
    for w in workouts {
        let total = totals.entry(w.workout_type.as_str()).or_insert(0);
        *total = total.saturating_add(w.calories_burned);
    }
    let mut sorted = sorted_desc(totals);
    sorted.truncate(TOP_CALORIE_TYPES);
    sorted
}

fn sorted_desc(map: BTreeMap<&'static str, u32>) -> Vec<NamedValue> {
    let mut values: Vec<NamedValue> = map
        .into_iter()
        .map(|(name, value)| NamedValue {
            name: name.to_string(),
            value,
        })
        .collect();
    // Stable sort keeps names alphabetical within equal values
    values.sort_by(|a, b| b.value.cmp(&a.value));
    values
}

/// Years that have workouts, plus `current_year`, most recent first.
pub fn available_years(workouts: &[WorkoutLog], current_year: i32) -> Vec<i32> {
    let mut years: BTreeSet<i32> = workouts.iter().map(|w| w.date.year()).collect();
    years.insert(current_year);
    years.into_iter().rev().collect()
}

/// Activity heatmap for `year`, padded to whole Sunday-Saturday weeks.
pub fn heatmap(workouts: &[WorkoutLog], year: i32) -> Option<Heatmap> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let start = first.checked_sub_signed(Duration::days(i64::from(
        first.weekday().num_days_from_sunday(),
    )))?;
    let end = last.checked_add_signed(Duration::days(i64::from(
        6 - last.weekday().num_days_from_sunday(),
    )))?;

    let counts = counts_by_date(workouts);

    let mut weeks: Vec<Vec<HeatmapDay>> = Vec::new();
    let mut week = Vec::with_capacity(7);
    for date in start.iter_days().take_while(|d| *d <= end) {
        week.push(HeatmapDay {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
            day_of_week: date.weekday().num_days_from_sunday(),
            in_selected_year: date.year() == year,
        });
        if date.weekday() == Weekday::Sat {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        weeks.push(week);
    }

    let mut month_labels: Vec<MonthLabel> = Vec::new();
    for (index, week) in weeks.iter().enumerate() {
        let first_of_month = week
            .iter()
            .find(|d| d.in_selected_year && d.date.day() == 1);
        if let Some(first_of_month) = first_of_month {
            let label = first_of_month.date.format("%b").to_string();
            if month_labels.last().map_or(true, |m| m.label != label) {
                month_labels.push(MonthLabel { index, label });
            }
        }
    }

    Some(Heatmap {
        year,
        weeks,
        month_labels,
    })
}

/// Data behind the printable weekly report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyReport {
    pub workout_count: u32,
    pub total_calories: u32,
    /// Average over days with logged stats, one decimal
    pub avg_sleep: f64,
    pub avg_water: u32,
    pub daily_calories: Vec<NamedValue>,
    pub recent_workouts: Vec<WorkoutLog>,
}

/// Summarize the week ending at `today`.
///
/// The window starts seven days before `today`, inclusive.
pub fn weekly_report(
    workouts: &[WorkoutLog],
    daily_stats: &[DailyStats],
    today: NaiveDate,
) -> WeeklyReport {
    let window_start = today - Duration::days(7);

    let weekly: Vec<&WorkoutLog> = workouts.iter().filter(|w| w.date >= window_start).collect();
    let total_calories = saturating_sum(weekly.iter().map(|w| w.calories_burned));

    let weekly_stats: Vec<&DailyStats> = daily_stats
        .iter()
        .filter(|s| s.date >= window_start)
        .collect();
    let days_logged = weekly_stats.len().max(1) as f64;
    let total_sleep: f64 = weekly_stats.iter().map(|s| s.sleep_hours).sum();
    let total_water = saturating_sum(weekly_stats.iter().map(|s| s.water_intake));

    let daily_calories = last_seven_days(today)
        .into_iter()
        .map(|date| NamedValue {
            name: date.format("%a").to_string(),
            value: saturating_sum(
                weekly
                    .iter()
                    .filter(|w| w.date == date)
                    .map(|w| w.calories_burned),
            ),
        })
        .collect();

    let mut recent_workouts = workouts.to_vec();
    recent_workouts.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    recent_workouts.truncate(RECENT_WORKOUTS);

    WeeklyReport {
        workout_count: weekly.len() as u32,
        total_calories,
        avg_sleep: (total_sleep / days_logged * 10.0).round() / 10.0,
        avg_water: (f64::from(total_water) / days_logged).round() as u32,
        daily_calories,
        recent_workouts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feeling, WorkoutType};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn workout(
        id: &str,
        date: &str,
        kind: WorkoutType,
        intensity: Intensity,
        kcal: u32,
    ) -> WorkoutLog {
        WorkoutLog {
            id: id.to_string(),
            user_id: "u1".to_string(),
            date: d(date),
            time: "08:00".to_string(),
            workout_type: kind,
            duration: 30,
            distance: None,
            steps: Some(1000),
            avg_heart_rate: None,
            intensity,
            feeling: Feeling::Good,
            rpe: None,
            calories_burned: kcal,
            notes: None,
        }
    }

    fn stats(date: &str, water: u32, sleep: f64) -> DailyStats {
        DailyStats {
            user_id: "u1".to_string(),
            date: d(date),
            water_intake: water,
            sleep_hours: sleep,
        }
    }

    #[test]
    fn test_day_totals() {
        let workouts = vec![
            workout("1", "2024-01-15", WorkoutType::Running, Intensity::High, 300),
            workout("2", "2024-01-15", WorkoutType::Yoga, Intensity::Low, 100),
            workout("3", "2024-01-14", WorkoutType::Running, Intensity::High, 250),
        ];

        assert_eq!(day_totals(&workouts, d("2024-01-15")), (2000, 400));
        assert_eq!(day_totals(&workouts, d("2024-01-13")), (0, 0));
    }

    #[test]
    fn test_weekly_series_covers_seven_days() {
        let workouts = vec![workout("1", "2024-01-15", WorkoutType::Running, Intensity::High, 300)];
        let daily = vec![stats("2024-01-12", 5, 7.5)];

        let series = weekly_series(&workouts, &daily, d("2024-01-15"));

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, d("2024-01-09"));
        assert_eq!(series[6].date, d("2024-01-15"));
        assert_eq!(series[6].day, "Mon");
        assert_eq!(series[6].calories, 300);
        assert_eq!(series[3].water, 5);
        assert_eq!(series[3].sleep, 7.5);
    }

    #[test]
    fn test_distributions() {
        let workouts = vec![
            workout("1", "2024-01-15", WorkoutType::Running, Intensity::High, 300),
            workout("2", "2024-01-14", WorkoutType::Running, Intensity::High, 200),
            workout("3", "2024-01-13", WorkoutType::Yoga, Intensity::Low, 100),
        ];

        let types = type_distribution(&workouts);
        assert_eq!(types[0].name, "Running");
        assert_eq!(types[0].value, 2);

        let intensities = intensity_distribution(&workouts);
        assert_eq!(intensities.len(), 2, "Medium has no workouts and is dropped");
        assert_eq!(intensities[0].name, "Low");
        assert_eq!(intensities[1].value, 2);

        let top = top_calorie_types(&workouts);
        assert_eq!(top[0].name, "Running");
        assert_eq!(top[0].value, 500);
    }

    #[test]
    fn test_available_years() {
        let workouts = vec![
            workout("1", "2022-06-01", WorkoutType::Walking, Intensity::Low, 100),
            workout("2", "2024-01-14", WorkoutType::Walking, Intensity::Low, 100),
        ];
        assert_eq!(available_years(&workouts, 2025), vec![2025, 2024, 2022]);
    }

    #[test]
    fn test_heatmap_pads_to_whole_weeks() {
        let workouts = vec![
            workout("1", "2024-01-01", WorkoutType::Running, Intensity::High, 300),
            workout("2", "2024-01-01", WorkoutType::Yoga, Intensity::Low, 100),
        ];

        let map = heatmap(&workouts, 2024).unwrap();

        // 2024-01-01 is a Monday, so the grid starts on Sunday 2023-12-31
        let first_week = &map.weeks[0];
        assert_eq!(first_week[0].date, d("2023-12-31"));
        assert!(!first_week[0].in_selected_year);
        assert_eq!(first_week[1].count, 2);
        assert!(map.weeks.iter().all(|w| w.len() == 7));

        let last_day = map.weeks.last().unwrap().last().unwrap();
        assert_eq!(last_day.day_of_week, 6);

        assert_eq!(map.month_labels.len(), 12);
        assert_eq!(map.month_labels[0].label, "Jan");
        assert_eq!(map.month_labels[0].index, 0);
    }

    #[test]
    fn test_weekly_report() {
        let workouts = vec![
            workout("1", "2024-01-15", WorkoutType::Running, Intensity::High, 300),
            workout("2", "2024-01-10", WorkoutType::Cycling, Intensity::Medium, 200),
            workout("3", "2024-01-01", WorkoutType::Yoga, Intensity::Low, 100),
        ];
        let daily = vec![
            stats("2024-01-14", 6, 7.0),
            stats("2024-01-15", 8, 8.5),
            stats("2023-12-20", 1, 3.0),
        ];

        let report = weekly_report(&workouts, &daily, d("2024-01-15"));

        assert_eq!(report.workout_count, 2);
        assert_eq!(report.total_calories, 500);
        assert_eq!(report.avg_sleep, 7.8);
        assert_eq!(report.avg_water, 7);
        assert_eq!(report.daily_calories.len(), 7);
        assert_eq!(report.daily_calories[6].value, 300);
        assert_eq!(report.recent_workouts[0].id, "1");
        assert_eq!(report.recent_workouts.len(), 3);
    }

    #[test]
    fn test_weekly_report_without_stats() {
        let report = weekly_report(&[], &[], d("2024-01-15"));
        assert_eq!(report.avg_sleep, 0.0);
        assert_eq!(report.avg_water, 0);
        assert_eq!(report.workout_count, 0);
    }

    #[test]
    fn test_heatmap_at_calendar_limit() {
        assert!(heatmap(&[], NaiveDate::MAX.year()).is_none());
    }

    #[test]
    fn test_totals_saturate() {
        let workouts = vec![
            workout("1", "2024-06-03", WorkoutType::Running, Intensity::High, 3_000_000_000),
            workout("2", "2024-06-03", WorkoutType::Running, Intensity::High, 3_000_000_000),
        ];

        assert_eq!(day_totals(&workouts, d("2024-06-03")), (2000, u32::MAX));
        assert_eq!(top_calorie_types(&workouts)[0].value, u32::MAX);

        let report = weekly_report(&workouts, &[], d("2024-06-03"));
        assert_eq!(report.total_calories, u32::MAX);
        assert_eq!(report.daily_calories[6].value, u32::MAX);
    }
}
