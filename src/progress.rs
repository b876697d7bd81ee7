// src/progress.rs
//! Read-only statistics over the workout history.
use crate::models::{Exercise, MuscleGroup, TrainingPlan, WorkoutHistory, WorkoutSession};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::warn;

pub const UNKNOWN_PLAN: &str = "Unknown Plan";
pub const UNKNOWN_EXERCISE: &str = "Unknown Exercise";

/// Weekdays in output order, Sunday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub sessions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentSession<'a> {
    pub date: NaiveDate,
    pub session: &'a WorkoutSession,
}

/// The headline numbers of the progress view.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub total_workouts: usize,
    pub total_duration_minutes: f64,
    pub most_trained: MuscleGroup,
    pub most_trained_count: usize,
    pub last_workout_date: Option<NaiveDate>,
}

/// One line of the recent workouts list, with references already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentSessionView {
    pub date: NaiveDate,
    pub session_id: String,
    pub plan_title: String,
    pub duration_minutes: f64,
    pub exercise_count: usize,
    pub volume: f64,
}

fn sessions(history: &[WorkoutHistory]) -> impl Iterator<Item = &WorkoutSession> + '_ {
    history.iter().flat_map(|bucket| bucket.sessions.iter())
}

pub fn total_workouts(history: &[WorkoutHistory]) -> usize {
    history.iter().map(|bucket| bucket.sessions.len()).sum()
}

/// Sum of finished session durations, in fractional minutes.
pub fn total_duration_minutes(history: &[WorkoutHistory]) -> f64 {
    sessions(history)
        .filter_map(WorkoutSession::duration_minutes)
        .sum()
}

/// Counts, for every session, each exercise of the session's plan by muscle
/// group. Sessions whose plan is gone and plan rows whose exercise is gone are
/// skipped. The highest count wins; ties go to the group listed first in
/// [`MuscleGroup`]. With nothing counted the result is `(Chest, 0)`.
pub fn most_trained_muscle_group(
    history: &[WorkoutHistory],
    plans: &[TrainingPlan],
    exercises: &[Exercise],
) -> (MuscleGroup, usize) {
    let plans_by_id: HashMap<&str, &TrainingPlan> =
        plans.iter().map(|plan| (plan.id.as_str(), plan)).collect();
    let groups_by_exercise: HashMap<&str, MuscleGroup> = exercises
        .iter()
        .map(|exercise| (exercise.id.as_str(), exercise.muscle_group))
        .collect();

    let mut counts: HashMap<MuscleGroup, usize> = HashMap::new();
    for session in sessions(history) {
        let Some(plan) = plans_by_id.get(session.plan_id.as_str()) else {
            warn!(session = %session.id, plan = %session.plan_id, "Session references a missing plan");
            continue;
        };
        for planned in &plan.exercises {
            match groups_by_exercise.get(planned.exercise_id.as_str()) {
                Some(group) => *counts.entry(*group).or_default() += 1,
                None => warn!(plan = %plan.id, exercise = %planned.exercise_id, "Plan references a missing exercise"),
            }
        }
    }

    let mut best = (MuscleGroup::default(), 0);
    for group in MuscleGroup::iter() {
        let count = counts.get(&group).copied().unwrap_or(0);
        if count > best.1 {
            best = (group, count);
        }
    }
    best
}

/// Completed-set volume per history bucket, in bucket order (not sorted).
pub fn volume_by_date(history: &[WorkoutHistory]) -> Vec<VolumePoint> {
    history
        .iter()
        .map(|bucket| VolumePoint {
            date: bucket.date,
            volume: bucket.sessions.iter().map(WorkoutSession::volume).sum(),
        })
        .collect()
}

/// Session counts per weekday of the bucket date, Sunday first, always 7 entries.
pub fn frequency_by_weekday(history: &[WorkoutHistory]) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for bucket in history {
        let index = bucket.date.weekday().num_days_from_sunday() as usize;
        counts[index] += bucket.sessions.len();
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(weekday, sessions)| WeekdayCount {
            weekday: *weekday,
            sessions,
        })
        .collect()
}

/// The `n` sessions with the latest start times, newest first.
pub fn recent_sessions(history: &[WorkoutHistory], n: usize) -> Vec<RecentSession<'_>> {
    let mut all: Vec<RecentSession<'_>> = history
        .iter()
        .flat_map(|bucket| {
            bucket.sessions.iter().map(move |session| RecentSession {
                date: bucket.date,
                session,
            })
        })
        .collect();
    all.sort_by(|a, b| b.session.start_time.cmp(&a.session.start_time));
    all.truncate(n);
    all
}

pub fn summary(
    history: &[WorkoutHistory],
    plans: &[TrainingPlan],
    exercises: &[Exercise],
) -> ProgressSummary {
    let (most_trained, most_trained_count) = most_trained_muscle_group(history, plans, exercises);
    ProgressSummary {
        total_workouts: total_workouts(history),
        total_duration_minutes: total_duration_minutes(history),
        most_trained,
        most_trained_count,
        last_workout_date: recent_sessions(history, 1).first().map(|recent| recent.date),
    }
}

pub fn resolve_plan_title<'a>(plans: &'a [TrainingPlan], plan_id: &str) -> &'a str {
    plans
        .iter()
        .find(|plan| plan.id == plan_id)
        .map_or(UNKNOWN_PLAN, |plan| plan.title.as_str())
}

pub fn resolve_exercise_title<'a>(exercises: &'a [Exercise], exercise_id: &str) -> &'a str {
    exercises
        .iter()
        .find(|exercise| exercise.id == exercise_id)
        .map_or(UNKNOWN_EXERCISE, |exercise| exercise.title.as_str())
}

/// Recent sessions with their plan titles resolved, ready for display.
pub fn recent_session_views(
    history: &[WorkoutHistory],
    plans: &[TrainingPlan],
    n: usize,
) -> Vec<RecentSessionView> {
    recent_sessions(history, n)
        .into_iter()
        .map(|recent| RecentSessionView {
            date: recent.date,
            session_id: recent.session.id.clone(),
            plan_title: resolve_plan_title(plans, &recent.session.plan_id).to_string(),
            duration_minutes: recent.session.duration_minutes().unwrap_or(0.0),
            exercise_count: recent.session.exercises_data.len(),
            volume: recent.session.volume(),
        })
        .collect()
}

/// Formats minutes as "1h 5m", dropping the seconds.
pub fn format_duration(minutes: f64) -> String {
    let total = if minutes.is_finite() && minutes > 0.0 {
        minutes.floor() as u64
    } else {
        0
    };
    format!("{}h {}m", total / 60, total % 60)
}
