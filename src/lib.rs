// src/lib.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

// --- Declare modules ---
mod config;
pub mod db;
pub mod history;
pub mod ids;
pub mod models;
pub mod progress;
pub mod search;
pub mod seed;
pub mod session;
pub mod store;
pub mod validation;

// --- Expose public types ---
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, Config, Error as ConfigError, StandardColor, Theme, Units,
    KG_TO_LB,
};
pub use db::{
    get_db_path as get_db_path_util, BlobStore, Error as DbError, MemoryBlobStore,
    SqliteBlobStore,
};
pub use ids::{Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidIds};
pub use models::{
    Difficulty, Exercise, ExerciseSet, ExerciseType, MuscleGroup, NewExercise, NewPlan,
    NewWorkoutSession, PlanExercise, SessionExerciseData, TrainingPlan, WorkoutHistory,
    WorkoutSession,
};
pub use progress::{ProgressSummary, RecentSessionView, VolumePoint, WeekdayCount};
pub use session::SessionDraft;
pub use store::{Store, StoreError};
pub use validation::ValidationError;

/// Fields to change on an existing exercise; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct EditExerciseParams {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    pub exercise_type: Option<ExerciseType>,
    pub difficulty: Option<Difficulty>,
    /// `Some(None)` clears the image.
    pub image_url: Option<Option<String>>,
}

/// Fields to change on an existing plan; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct EditPlanParams {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Vec<PlanExercise>>,
}

/// The boundary a front end talks to: validates submissions, then hands them to
/// the store. The store itself accepts any well-typed record.
pub struct AppService<B: BlobStore = SqliteBlobStore> {
    pub config: Config,
    pub store: Store<B>,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
}

impl AppService<SqliteBlobStore> {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config/db path determination, loading, or initialization fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        let db_path = db::get_db_path().context("Failed to determine database path")?;
        let backend = SqliteBlobStore::open(&db_path)
            .with_context(|| format!("Failed to open database at {db_path:?}"))?;
        let store = Store::open(backend).context("Failed to load stored data")?;

        Ok(Self {
            config,
            store,
            db_path,
            config_path,
        })
    }
}

impl<B: BlobStore> AppService<B> {
    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    pub fn set_units(&mut self, units: Units) -> Result<(), ConfigError> {
        self.config.units = units;
        self.save_config()
    }

    /// # Errors
    /// `ConfigError::InvalidRecentLimit` if `limit` is 0.
    pub fn set_recent_sessions_limit(&mut self, limit: usize) -> Result<(), ConfigError> {
        if limit == 0 {
            return Err(ConfigError::InvalidRecentLimit);
        }
        self.config.recent_sessions_limit = limit;
        self.save_config()
    }

    pub fn set_header_color(&mut self, color: &str) -> Result<(), ConfigError> {
        let parsed = parse_color(color)?;
        self.config.theme.header_color = format!("{parsed:?}");
        self.save_config()
    }

    // ---- Exercises ----

    pub fn exercises(&self) -> &[Exercise] {
        self.store.exercises()
    }

    pub fn search_exercises(&self, term: &str) -> Vec<&Exercise> {
        search::filter_exercises(self.store.exercises(), term)
    }

    /// Validates and stores a new exercise.
    /// # Errors
    /// `ValidationError` for a blank title, `StoreError` if persisting fails.
    pub fn create_exercise(&mut self, data: NewExercise) -> Result<Exercise> {
        validation::validate_new_exercise(&data)?;
        let exercise = self.store.add_exercise(data)?;
        Ok(exercise)
    }

    /// Full replace of an exercise. Returns `false` if the id is unknown.
    pub fn update_exercise(&mut self, exercise: Exercise) -> Result<bool> {
        validation::validate_exercise(&exercise)?;
        Ok(self.store.update_exercise(exercise)?)
    }

    /// Applies a partial edit on top of the stored exercise. Returns the updated
    /// record, or `None` if the id is unknown.
    pub fn edit_exercise(&mut self, params: EditExerciseParams) -> Result<Option<Exercise>> {
        let Some(existing) = self.store.exercise(&params.id).cloned() else {
            return Ok(None);
        };
        let updated = Exercise {
            id: existing.id,
            title: params.title.unwrap_or(existing.title),
            description: params.description.unwrap_or(existing.description),
            muscle_group: params.muscle_group.unwrap_or(existing.muscle_group),
            exercise_type: params.exercise_type.unwrap_or(existing.exercise_type),
            difficulty: params.difficulty.unwrap_or(existing.difficulty),
            image_url: params.image_url.unwrap_or(existing.image_url),
        };
        self.update_exercise(updated.clone())?;
        Ok(Some(updated))
    }

    pub fn delete_exercise(&mut self, id: &str) -> Result<bool> {
        Ok(self.store.delete_exercise(id)?)
    }

    // ---- Plans ----

    pub fn plans(&self) -> &[TrainingPlan] {
        self.store.plans()
    }

    pub fn search_plans(&self, term: &str) -> Vec<&TrainingPlan> {
        search::filter_plans(self.store.plans(), term)
    }

    /// Validates and stores a new plan.
    /// # Errors
    /// `ValidationError` for a blank title, no exercises or zero sets/reps.
    pub fn create_plan(&mut self, data: NewPlan) -> Result<TrainingPlan> {
        validation::validate_new_plan(&data)?;
        let plan = self.store.add_plan(data)?;
        Ok(plan)
    }

    pub fn update_plan(&mut self, plan: TrainingPlan) -> Result<bool> {
        validation::validate_plan(&plan)?;
        Ok(self.store.update_plan(plan)?)
    }

    /// Applies a partial edit on top of the stored plan. Returns the stored
    /// record after the update, or `None` if the id is unknown.
    pub fn edit_plan(&mut self, params: EditPlanParams) -> Result<Option<TrainingPlan>> {
        let Some(existing) = self.store.plan(&params.id).cloned() else {
            return Ok(None);
        };
        let updated = TrainingPlan {
            title: params.title.unwrap_or(existing.title),
            description: params.description.unwrap_or(existing.description),
            exercises: params.exercises.unwrap_or(existing.exercises),
            ..existing
        };
        let id = updated.id.clone();
        self.update_plan(updated)?;
        Ok(self.store.plan(&id).cloned())
    }

    pub fn delete_plan(&mut self, id: &str) -> Result<bool> {
        Ok(self.store.delete_plan(id)?)
    }

    // ---- Sessions ----

    /// Starts a guided session for the plan.
    /// # Errors
    /// `StoreError::PlanNotFound` if no plan has that id; no session is built.
    pub fn start_session(&self, plan_id: &str) -> Result<SessionDraft, StoreError> {
        self.store.start_session(plan_id)
    }

    /// Stamps the end time on the draft and files it into history.
    pub fn finish_session(&mut self, draft: SessionDraft) -> Result<WorkoutSession> {
        let finished = draft.finish(self.store.now());
        let session = self
            .store
            .add_workout_session(finished)
            .context("Failed to save workout session")?;
        Ok(session)
    }

    pub fn update_workout_session(&mut self, session: WorkoutSession) -> Result<bool> {
        Ok(self.store.update_workout_session(session)?)
    }

    // ---- Progress ----

    pub fn progress_summary(&self) -> ProgressSummary {
        progress::summary(
            self.store.history(),
            self.store.plans(),
            self.store.exercises(),
        )
    }

    /// Volume per day, sorted by date for charting.
    pub fn volume_by_date_sorted(&self) -> Vec<VolumePoint> {
        let mut points = progress::volume_by_date(self.store.history());
        points.sort_by_key(|point| point.date);
        points
    }

    pub fn frequency_by_weekday(&self) -> Vec<WeekdayCount> {
        progress::frequency_by_weekday(self.store.history())
    }

    /// The most recent sessions, as many as the config allows.
    pub fn recent_sessions(&self) -> Vec<RecentSessionView> {
        progress::recent_session_views(
            self.store.history(),
            self.store.plans(),
            self.config.recent_sessions_limit,
        )
    }

    /// Like [`Self::recent_sessions`], with `limit` overriding the configured count.
    /// # Errors
    /// `ConfigError::InvalidRecentLimit` if the limit is 0.
    pub fn recent_sessions_with_limit(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<RecentSessionView>, ConfigError> {
        let limit = limit.unwrap_or(self.config.recent_sessions_limit);
        if limit == 0 {
            return Err(ConfigError::InvalidRecentLimit);
        }
        Ok(progress::recent_session_views(
            self.store.history(),
            self.store.plans(),
            limit,
        ))
    }

    pub fn exercise_title(&self, exercise_id: &str) -> &str {
        progress::resolve_exercise_title(self.store.exercises(), exercise_id)
    }

    pub fn plan_title(&self, plan_id: &str) -> &str {
        progress::resolve_plan_title(self.store.plans(), plan_id)
    }
}
