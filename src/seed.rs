// src/seed.rs
use crate::models::{Difficulty, Exercise, ExerciseType, MuscleGroup, PlanExercise, TrainingPlan};
use chrono::{DateTime, TimeZone, Utc};

fn exercise(
    id: &str,
    title: &str,
    description: &str,
    muscle_group: MuscleGroup,
    exercise_type: ExerciseType,
    difficulty: Difficulty,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        muscle_group,
        exercise_type,
        difficulty,
        image_url: None,
    }
}

fn row(exercise_id: &str, sets: u32, reps: u32, rest_time: u32) -> PlanExercise {
    PlanExercise {
        exercise_id: exercise_id.to_string(),
        sets,
        reps,
        rest_time,
    }
}

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Exercises a fresh install starts with.
pub fn exercises() -> Vec<Exercise> {
    vec![
        exercise(
            "1",
            "Bench Press",
            "Lie on a flat bench and press the barbell up from chest level.",
            MuscleGroup::Chest,
            ExerciseType::Strength,
            Difficulty::Intermediate,
        ),
        exercise(
            "2",
            "Squat",
            "Barbell on the upper back, sit down between the heels and stand back up.",
            MuscleGroup::Legs,
            ExerciseType::Strength,
            Difficulty::Intermediate,
        ),
        exercise(
            "3",
            "Deadlift",
            "Lift the barbell from the floor to hip height with a neutral spine.",
            MuscleGroup::Back,
            ExerciseType::Strength,
            Difficulty::Advanced,
        ),
        exercise(
            "4",
            "Pull-Up",
            "Hang from a bar and pull until the chin clears it.",
            MuscleGroup::Back,
            ExerciseType::Strength,
            Difficulty::Intermediate,
        ),
        exercise(
            "5",
            "Push-Up",
            "From a plank position lower the chest to the floor and push back up.",
            MuscleGroup::Chest,
            ExerciseType::Strength,
            Difficulty::Beginner,
        ),
        exercise(
            "6",
            "Plank",
            "Hold a straight line from head to heels on forearms and toes. Reps are seconds.",
            MuscleGroup::Core,
            ExerciseType::Strength,
            Difficulty::Beginner,
        ),
        exercise(
            "7",
            "Overhead Press",
            "Press the barbell from the shoulders to lockout overhead.",
            MuscleGroup::Shoulders,
            ExerciseType::Strength,
            Difficulty::Intermediate,
        ),
        exercise(
            "8",
            "Jumping Jacks",
            "Jump feet apart while raising the arms, then return.",
            MuscleGroup::Cardio,
            ExerciseType::Cardio,
            Difficulty::Beginner,
        ),
    ]
}

/// Plans a fresh install starts with. They reference the seed exercises by id.
pub fn plans() -> Vec<TrainingPlan> {
    vec![
        TrainingPlan {
            id: "1".to_string(),
            title: "Full Body Workout".to_string(),
            description: "A comprehensive workout plan targeting all major muscle groups"
                .to_string(),
            exercises: vec![
                row("1", 3, 10, 90),  // Bench Press
                row("2", 3, 8, 120),  // Squat
                row("3", 3, 6, 120),  // Deadlift
                row("6", 3, 30, 60),  // Plank, seconds
            ],
            created_at: noon(2023, 1, 1),
            updated_at: noon(2023, 1, 1),
        },
        TrainingPlan {
            id: "2".to_string(),
            title: "Upper Body Focus".to_string(),
            description: "Targets chest, back, shoulders, and arms".to_string(),
            exercises: vec![
                row("1", 4, 8, 90),
                row("4", 3, 8, 90),
                row("5", 3, 15, 60),
                row("7", 3, 10, 90),
            ],
            created_at: noon(2023, 2, 1),
            updated_at: noon(2023, 2, 1),
        },
        TrainingPlan {
            id: "3".to_string(),
            title: "Lower Body Day".to_string(),
            description: "Focus on legs and core".to_string(),
            exercises: vec![row("2", 4, 10, 120), row("3", 3, 8, 120), row("6", 3, 45, 60)],
            created_at: noon(2023, 3, 1),
            updated_at: noon(2023, 3, 1),
        },
    ]
}
