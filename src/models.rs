// src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// Muscle groups in their fixed enumeration order. The order matters: it is the
/// tie-break order used by the most-trained aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Default)]
pub enum MuscleGroup {
    #[default]
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
    #[serde(rename = "Full Body")]
    FullBody,
    Cardio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Default)]
pub enum ExerciseType {
    #[default]
    Strength,
    Cardio,
    Flexibility,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Core => "Core",
            MuscleGroup::FullBody => "Full Body",
            MuscleGroup::Cardio => "Cardio",
        };
        f.write_str(label)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExerciseType::Strength => "Strength",
            ExerciseType::Cardio => "Cardio",
            ExerciseType::Flexibility => "Flexibility",
            ExerciseType::Balance => "Balance",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        };
        f.write_str(label)
    }
}

// Parse from user input, ignoring case and spaces/dashes ("full body", "full-body", "FullBody")
impl TryFrom<&str> for MuscleGroup {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "chest" => Ok(MuscleGroup::Chest),
            "back" => Ok(MuscleGroup::Back),
            "shoulders" => Ok(MuscleGroup::Shoulders),
            "arms" => Ok(MuscleGroup::Arms),
            "legs" => Ok(MuscleGroup::Legs),
            "core" => Ok(MuscleGroup::Core),
            "fullbody" => Ok(MuscleGroup::FullBody),
            "cardio" => Ok(MuscleGroup::Cardio),
            _ => anyhow::bail!("Invalid muscle group: {}", value),
        }
    }
}

impl TryFrom<&str> for ExerciseType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "strength" => Ok(ExerciseType::Strength),
            "cardio" => Ok(ExerciseType::Cardio),
            "flexibility" => Ok(ExerciseType::Flexibility),
            "balance" => Ok(ExerciseType::Balance),
            _ => anyhow::bail!("Invalid exercise type: {}", value),
        }
    }
}

impl TryFrom<&str> for Difficulty {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            _ => anyhow::bail!("Invalid difficulty: {}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub description: String,
    pub muscle_group: MuscleGroup,
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An exercise as submitted for creation, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewExercise {
    pub title: String,
    pub description: String,
    pub muscle_group: MuscleGroup,
    pub exercise_type: ExerciseType,
    pub difficulty: Difficulty,
    pub image_url: Option<String>,
}

impl NewExercise {
    pub(crate) fn with_id(self, id: String) -> Exercise {
        Exercise {
            id,
            title: self.title,
            description: self.description,
            muscle_group: self.muscle_group,
            exercise_type: self.exercise_type,
            difficulty: self.difficulty,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    pub exercise_id: String,
    pub sets: u32,
    pub reps: u32,
    /// Rest between sets, in seconds.
    pub rest_time: u32,
}

impl PlanExercise {
    pub const DEFAULT_SETS: u32 = 3;
    pub const DEFAULT_REPS: u32 = 10;
    pub const DEFAULT_REST_SECS: u32 = 60;

    /// A new plan row for `exercise_id` with the default 3 x 10, 60s rest.
    pub fn with_defaults(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            sets: Self::DEFAULT_SETS,
            reps: Self::DEFAULT_REPS,
            rest_time: Self::DEFAULT_REST_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub exercises: Vec<PlanExercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPlan {
    pub title: String,
    pub description: String,
    pub exercises: Vec<PlanExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub weight: f64,
    pub reps: u32,
    /// Rate of perceived exertion, 1-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    pub completed: bool,
}

impl ExerciseSet {
    /// Volume contributed by this set: weight x reps when completed, 0 otherwise.
    pub fn volume(&self) -> f64 {
        if self.completed {
            self.weight * f64::from(self.reps)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExerciseData {
    pub exercise_id: String,
    pub sets: Vec<ExerciseSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub plan_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub exercises_data: Vec<SessionExerciseData>,
}

impl WorkoutSession {
    /// Calendar date (UTC) the session belongs to.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Elapsed minutes between start and end, `None` while in progress.
    pub fn duration_minutes(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds() as f64 / 60_000.0)
    }

    pub fn volume(&self) -> f64 {
        self.exercises_data
            .iter()
            .flat_map(|data| data.sets.iter())
            .map(ExerciseSet::volume)
            .sum()
    }
}

/// A session that has not been handed to the store yet, so it carries no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutSession {
    pub plan_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exercises_data: Vec<SessionExerciseData>,
}

impl NewWorkoutSession {
    pub(crate) fn with_id(self, id: String) -> WorkoutSession {
        WorkoutSession {
            id,
            plan_id: self.plan_id,
            start_time: self.start_time,
            end_time: self.end_time,
            exercises_data: self.exercises_data,
        }
    }
}

/// All sessions started on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutHistory {
    pub date: NaiveDate,
    #[serde(rename = "workoutSessions", alias = "sessions")]
    pub sessions: Vec<WorkoutSession>,
}
