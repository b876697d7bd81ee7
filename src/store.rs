// src/store.rs
use crate::db::{self, BlobStore};
use crate::history;
use crate::ids::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::models::{
    Exercise, NewExercise, NewPlan, NewWorkoutSession, TrainingPlan, WorkoutHistory,
    WorkoutSession,
};
use crate::seed;
use crate::session::SessionDraft;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const EXERCISES_KEY: &str = "fitlog-exercises";
pub const PLANS_KEY: &str = "fitlog-plans";
pub const HISTORY_KEY: &str = "fitlog-history";

/// How many ids are drawn before giving up on finding an unused one.
const MAX_ID_ATTEMPTS: usize = 1000;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to persist '{key}'")]
    Persist {
        key: &'static str,
        #[source]
        source: db::Error,
    },
    #[error("Failed to read '{key}'")]
    Load {
        key: &'static str,
        #[source]
        source: db::Error,
    },
    #[error("Stored data under '{key}' is not valid: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Training plan not found: {0}")]
    PlanNotFound(String),
    #[error("No unused id after {attempts} attempts")]
    IdsExhausted { attempts: usize },
}

/// Owner of the exercises, plans and history collections.
///
/// Every mutation writes the whole affected collection to the blob store before
/// the in-memory copy is replaced. A failed write leaves the store unchanged.
pub struct Store<B: BlobStore> {
    backend: B,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    exercises: Vec<Exercise>,
    plans: Vec<TrainingPlan>,
    history: Vec<WorkoutHistory>,
}

fn load_collection<B: BlobStore, T: DeserializeOwned>(
    backend: &B,
    key: &'static str,
) -> Result<Option<Vec<T>>, StoreError> {
    let Some(text) = backend
        .get(key)
        .map_err(|source| StoreError::Load { key, source })?
    else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Corrupt { key, source })
}

fn persist<B: BlobStore, T: Serialize>(
    backend: &mut B,
    key: &'static str,
    items: &[T],
) -> Result<(), StoreError> {
    let text =
        serde_json::to_string(items).map_err(|source| StoreError::Serialize { key, source })?;
    backend
        .set(key, &text)
        .map_err(|source| StoreError::Persist { key, source })
}

impl<B: BlobStore> Store<B> {
    /// Loads the store with random ids and the system clock.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        Self::load(backend, Box::new(UuidIds), Box::new(SystemClock))
    }

    /// Loads all three collections. Missing exercises and plans fall back to the
    /// seed data, missing history to an empty list. Blobs that exist but do not
    /// parse are an error; they are never replaced with seed data.
    pub fn load(
        backend: B,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let exercises = match load_collection(&backend, EXERCISES_KEY)? {
            Some(exercises) => exercises,
            None => {
                info!("No stored exercises, starting from seed data");
                seed::exercises()
            }
        };
        let plans = match load_collection(&backend, PLANS_KEY)? {
            Some(plans) => plans,
            None => {
                info!("No stored plans, starting from seed data");
                seed::plans()
            }
        };
        let history = load_collection(&backend, HISTORY_KEY)?.unwrap_or_default();

        Ok(Self {
            backend,
            ids,
            clock,
            exercises,
            plans,
            history,
        })
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn plans(&self) -> &[TrainingPlan] {
        &self.plans
    }

    pub fn history(&self) -> &[WorkoutHistory] {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.id == id)
    }

    pub fn plan(&self, id: &str) -> Option<&TrainingPlan> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    pub fn workout_session(&self, id: &str) -> Option<&WorkoutSession> {
        history::find_session(&self.history, id).map(|(_, session)| session)
    }

    /// Draws ids until one is not already taken according to `taken`.
    fn fresh_id(&mut self, taken: impl Fn(&Self, &str) -> bool) -> Result<String, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !taken(self, &id) {
                return Ok(id);
            }
            debug!(%id, "Generated id already in use, drawing another");
        }
        warn!(attempts = MAX_ID_ATTEMPTS, "Id generator keeps returning ids in use");
        Err(StoreError::IdsExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn commit_exercises(&mut self, exercises: Vec<Exercise>) -> Result<(), StoreError> {
        persist(&mut self.backend, EXERCISES_KEY, &exercises)?;
        self.exercises = exercises;
        Ok(())
    }

    fn commit_plans(&mut self, plans: Vec<TrainingPlan>) -> Result<(), StoreError> {
        persist(&mut self.backend, PLANS_KEY, &plans)?;
        self.plans = plans;
        Ok(())
    }

    fn commit_history(&mut self, history: Vec<WorkoutHistory>) -> Result<(), StoreError> {
        persist(&mut self.backend, HISTORY_KEY, &history)?;
        self.history = history;
        Ok(())
    }

    // ---- Exercises ----

    /// Adds an exercise under a fresh id and returns the stored record.
    pub fn add_exercise(&mut self, data: NewExercise) -> Result<Exercise, StoreError> {
        let id = self.fresh_id(|store, id| store.exercise(id).is_some())?;
        let exercise = data.with_id(id);
        let mut exercises = self.exercises.clone();
        exercises.push(exercise.clone());
        self.commit_exercises(exercises)?;
        debug!(id = %exercise.id, title = %exercise.title, "Added exercise");
        Ok(exercise)
    }

    /// Replaces the exercise with the same id. Returns `false` (and changes
    /// nothing) when no exercise has that id.
    pub fn update_exercise(&mut self, exercise: Exercise) -> Result<bool, StoreError> {
        let mut exercises = self.exercises.clone();
        let found = match exercises.iter_mut().find(|e| e.id == exercise.id) {
            Some(slot) => {
                *slot = exercise.clone();
                true
            }
            None => false,
        };
        self.commit_exercises(exercises)?;
        debug!(id = %exercise.id, found, "Updated exercise");
        Ok(found)
    }

    /// Removes the exercise. Plans and history that reference it are left alone.
    pub fn delete_exercise(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut exercises = self.exercises.clone();
        let before = exercises.len();
        exercises.retain(|exercise| exercise.id != id);
        let found = exercises.len() != before;
        self.commit_exercises(exercises)?;
        debug!(id, found, "Deleted exercise");
        Ok(found)
    }

    // ---- Plans ----

    /// Adds a plan under a fresh id with both timestamps set to now.
    pub fn add_plan(&mut self, data: NewPlan) -> Result<TrainingPlan, StoreError> {
        let id = self.fresh_id(|store, id| store.plan(id).is_some())?;
        let now = self.clock.now();
        let plan = TrainingPlan {
            id,
            title: data.title,
            description: data.description,
            exercises: data.exercises,
            created_at: now,
            updated_at: now,
        };
        let mut plans = self.plans.clone();
        plans.push(plan.clone());
        self.commit_plans(plans)?;
        debug!(id = %plan.id, title = %plan.title, "Added plan");
        Ok(plan)
    }

    /// Replaces the plan with the same id. `created_at` is kept from the stored
    /// record and `updated_at` is set to now, whatever the caller passed.
    pub fn update_plan(&mut self, plan: TrainingPlan) -> Result<bool, StoreError> {
        let now = self.clock.now();
        let mut plans = self.plans.clone();
        let found = match plans.iter_mut().find(|p| p.id == plan.id) {
            Some(slot) => {
                let created_at = slot.created_at;
                *slot = TrainingPlan {
                    created_at,
                    updated_at: now.max(created_at),
                    ..plan.clone()
                };
                true
            }
            None => false,
        };
        self.commit_plans(plans)?;
        debug!(id = %plan.id, found, "Updated plan");
        Ok(found)
    }

    /// Removes the plan. Sessions already run against it are kept.
    pub fn delete_plan(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut plans = self.plans.clone();
        let before = plans.len();
        plans.retain(|plan| plan.id != id);
        let found = plans.len() != before;
        self.commit_plans(plans)?;
        debug!(id, found, "Deleted plan");
        Ok(found)
    }

    // ---- Sessions ----

    /// Builds a draft session for the plan, starting now.
    pub fn start_session(&self, plan_id: &str) -> Result<SessionDraft, StoreError> {
        let plan = self
            .plan(plan_id)
            .ok_or_else(|| StoreError::PlanNotFound(plan_id.to_string()))?;
        Ok(SessionDraft::start(plan, self.clock.now()))
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Assigns an id to the finished session and files it under its start date.
    pub fn add_workout_session(
        &mut self,
        session: NewWorkoutSession,
    ) -> Result<WorkoutSession, StoreError> {
        let id = self.fresh_id(|store, id| store.workout_session(id).is_some())?;
        let session = session.with_id(id);
        let mut history = self.history.clone();
        history::fold(&mut history, session.clone());
        self.commit_history(history)?;
        debug!(id = %session.id, date = %session.date(), "Added workout session");
        Ok(session)
    }

    /// Replaces a stored session in place, wherever its bucket is.
    pub fn update_workout_session(&mut self, session: WorkoutSession) -> Result<bool, StoreError> {
        let id = session.id.clone();
        let mut history = self.history.clone();
        let found = history::replace_session(&mut history, session);
        self.commit_history(history)?;
        debug!(%id, found, "Updated workout session");
        Ok(found)
    }
}
