// src/session.rs
use crate::models::{
    ExerciseSet, NewWorkoutSession, PlanExercise, SessionExerciseData, TrainingPlan,
};
use chrono::{DateTime, Utc};

pub const MIN_RPE: u8 = 1;
pub const MAX_RPE: u8 = 10;

/// Materializes a fresh session for `plan`: one uncompleted set per planned set,
/// weight 0 and reps pre-filled with the plan's target.
///
/// The plan's exercise list is copied, so editing the plan afterwards never
/// touches the session.
pub fn build_session(plan: &TrainingPlan, start_time: DateTime<Utc>) -> NewWorkoutSession {
    let exercises_data = plan
        .exercises
        .iter()
        .map(|planned| SessionExerciseData {
            exercise_id: planned.exercise_id.clone(),
            sets: (0..planned.sets)
                .map(|_| ExerciseSet {
                    weight: 0.0,
                    reps: planned.reps,
                    rpe: None,
                    completed: false,
                })
                .collect(),
        })
        .collect();

    NewWorkoutSession {
        plan_id: plan.id.clone(),
        start_time,
        end_time: None,
        exercises_data,
    }
}

/// Parses a weight entry. Anything that is not a finite, non-negative number is 0.
pub fn coerce_weight(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Parses a reps entry. Decimal input is truncated; anything unparsable or
/// negative is 0.
pub fn coerce_reps(input: &str) -> u32 {
    let trimmed = input.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => value.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Parses an RPE entry, clamped to 1..=10. Empty or unparsable input clears it.
pub fn coerce_rpe(input: &str) -> Option<u8> {
    let value = input.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(value.round().clamp(f64::from(MIN_RPE), f64::from(MAX_RPE)) as u8)
}

/// An in-progress workout plus the pointer to the exercise being performed.
///
/// All set edits address `exercises_data[current_exercise_index]`. Out-of-range
/// set indices are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDraft {
    session: NewWorkoutSession,
    planned: Vec<PlanExercise>,
    plan_title: String,
    current_exercise_index: usize,
}

impl SessionDraft {
    pub fn start(plan: &TrainingPlan, start_time: DateTime<Utc>) -> Self {
        Self {
            session: build_session(plan, start_time),
            planned: plan.exercises.clone(),
            plan_title: plan.title.clone(),
            current_exercise_index: 0,
        }
    }

    pub fn session(&self) -> &NewWorkoutSession {
        &self.session
    }

    pub fn plan_title(&self) -> &str {
        &self.plan_title
    }

    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise_index
    }

    pub fn exercise_count(&self) -> usize {
        self.session.exercises_data.len()
    }

    pub fn is_first_exercise(&self) -> bool {
        self.current_exercise_index == 0
    }

    /// True on the last exercise, where the workout can be finished.
    pub fn is_last_exercise(&self) -> bool {
        self.current_exercise_index + 1 >= self.exercise_count()
    }

    /// Logged data for the exercise under the pointer, `None` for an empty plan.
    pub fn current(&self) -> Option<&SessionExerciseData> {
        self.session.exercises_data.get(self.current_exercise_index)
    }

    /// The plan row (target reps, rest time) for the exercise under the pointer.
    pub fn current_planned(&self) -> Option<&PlanExercise> {
        self.planned.get(self.current_exercise_index)
    }

    fn current_set_mut(&mut self, set_index: usize) -> Option<&mut ExerciseSet> {
        self.session
            .exercises_data
            .get_mut(self.current_exercise_index)
            .and_then(|data| data.sets.get_mut(set_index))
    }

    /// Sets the weight of one set from raw input; see [`coerce_weight`].
    pub fn set_weight(&mut self, set_index: usize, input: &str) {
        self.set_weight_value(set_index, coerce_weight(input));
    }

    /// Sets the weight (kg) of one set. Negative or non-finite values become 0.
    pub fn set_weight_value(&mut self, set_index: usize, weight: f64) {
        let weight = if weight.is_finite() && weight > 0.0 { weight } else { 0.0 };
        if let Some(set) = self.current_set_mut(set_index) {
            set.weight = weight;
        }
    }

    /// Sets the reps of one set from raw input; see [`coerce_reps`].
    pub fn set_reps(&mut self, set_index: usize, input: &str) {
        let reps = coerce_reps(input);
        if let Some(set) = self.current_set_mut(set_index) {
            set.reps = reps;
        }
    }

    pub fn set_rpe(&mut self, set_index: usize, input: &str) {
        let rpe = coerce_rpe(input);
        if let Some(set) = self.current_set_mut(set_index) {
            set.rpe = rpe;
        }
    }

    pub fn toggle_completed(&mut self, set_index: usize) {
        if let Some(set) = self.current_set_mut(set_index) {
            set.completed = !set.completed;
        }
    }

    /// Moves to the next exercise; stays put on the last one.
    pub fn advance(&mut self) {
        if self.current_exercise_index + 1 < self.exercise_count() {
            self.current_exercise_index += 1;
        }
    }

    /// Moves to the previous exercise; stays put on the first one.
    pub fn retreat(&mut self) {
        self.current_exercise_index = self.current_exercise_index.saturating_sub(1);
    }

    /// Stamps the end time and hands the session over for folding into history.
    pub fn finish(self, end_time: DateTime<Utc>) -> NewWorkoutSession {
        NewWorkoutSession {
            end_time: Some(end_time),
            ..self.session
        }
    }
}
