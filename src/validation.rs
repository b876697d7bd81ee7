// src/validation.rs
use crate::models::{Exercise, NewExercise, NewPlan, PlanExercise, TrainingPlan};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Exercise title is required")]
    MissingExerciseTitle,
    #[error("Plan title is required")]
    MissingPlanTitle,
    #[error("At least one exercise is required")]
    EmptyPlan,
    #[error("Plan exercise #{position} needs at least one set")]
    ZeroSets { position: usize },
    #[error("Plan exercise #{position} needs at least one rep")]
    ZeroReps { position: usize },
}

fn check_title(title: &str, missing: ValidationError) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        Err(missing)
    } else {
        Ok(())
    }
}

fn check_plan_rows(exercises: &[PlanExercise]) -> Result<(), ValidationError> {
    if exercises.is_empty() {
        return Err(ValidationError::EmptyPlan);
    }
    for (index, row) in exercises.iter().enumerate() {
        let position = index + 1;
        if row.sets == 0 {
            return Err(ValidationError::ZeroSets { position });
        }
        if row.reps == 0 {
            return Err(ValidationError::ZeroReps { position });
        }
    }
    Ok(())
}

pub fn validate_new_exercise(exercise: &NewExercise) -> Result<(), ValidationError> {
    check_title(&exercise.title, ValidationError::MissingExerciseTitle)
}

pub fn validate_exercise(exercise: &Exercise) -> Result<(), ValidationError> {
    check_title(&exercise.title, ValidationError::MissingExerciseTitle)
}

pub fn validate_new_plan(plan: &NewPlan) -> Result<(), ValidationError> {
    check_title(&plan.title, ValidationError::MissingPlanTitle)?;
    check_plan_rows(&plan.exercises)
}

pub fn validate_plan(plan: &TrainingPlan) -> Result<(), ValidationError> {
    check_title(&plan.title, ValidationError::MissingPlanTitle)?;
    check_plan_rows(&plan.exercises)
}
