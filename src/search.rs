// src/search.rs
use crate::models::{Exercise, TrainingPlan};

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Exercises whose title, description, muscle group or type contains `term`,
/// ignoring case. An empty term matches everything.
pub fn filter_exercises<'a>(exercises: &'a [Exercise], term: &str) -> Vec<&'a Exercise> {
    let term = term.trim().to_lowercase();
    exercises
        .iter()
        .filter(|exercise| {
            contains_ignore_case(&exercise.title, &term)
                || contains_ignore_case(&exercise.description, &term)
                || contains_ignore_case(&exercise.muscle_group.to_string(), &term)
                || contains_ignore_case(&exercise.exercise_type.to_string(), &term)
        })
        .collect()
}

/// Plans whose title or description contains `term`, ignoring case.
pub fn filter_plans<'a>(plans: &'a [TrainingPlan], term: &str) -> Vec<&'a TrainingPlan> {
    let term = term.trim().to_lowercase();
    plans
        .iter()
        .filter(|plan| {
            contains_ignore_case(&plan.title, &term) || contains_ignore_case(&plan.description, &term)
        })
        .collect()
}
