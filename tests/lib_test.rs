use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday};
use std::cell::Cell;
use std::rc::Rc;

use fitlog_lib::progress::{UNKNOWN_EXERCISE, UNKNOWN_PLAN};
use fitlog_lib::store::{EXERCISES_KEY, HISTORY_KEY, PLANS_KEY};
use fitlog_lib::{
    load_config_util, save_config_util, AppService, BlobStore, Config, DbError, EditExerciseParams,
    EditPlanParams, Exercise, IdGenerator, ManualClock, MemoryBlobStore, MuscleGroup, NewExercise,
    NewPlan, PlanExercise, SequentialIds, SqliteBlobStore, Store, StoreError, TrainingPlan,
    Units, ValidationError, WorkoutHistory,
};

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap() // a Monday
}

// Helper function to create a test service over an in-memory blob store
fn create_test_service() -> Result<(AppService<MemoryBlobStore>, ManualClock)> {
    let clock = ManualClock::new(start_time());
    let store = Store::load(
        MemoryBlobStore::new(),
        Box::new(SequentialIds::new("t")),
        Box::new(clock.clone()),
    )?;
    let service = AppService {
        config: Config::default(),
        store,
        db_path: ":memory:".into(),
        config_path: "test_config.toml".into(),
    };
    Ok((service, clock))
}

fn bench_press() -> NewExercise {
    NewExercise {
        title: "Incline Bench".to_string(),
        description: "Bench set to 30 degrees".to_string(),
        muscle_group: MuscleGroup::Chest,
        ..Default::default()
    }
}

/// Runs the seeded "Full Body Workout" with `weight` on every set and the first
/// `completed` sets of the first exercise ticked, then saves it.
fn log_full_body(
    service: &mut AppService<MemoryBlobStore>,
    weight: &str,
    completed: usize,
) -> Result<fitlog_lib::WorkoutSession> {
    let mut draft = service.start_session("1")?;
    for set in 0..3 {
        draft.set_weight(set, weight);
    }
    for set in 0..completed {
        draft.toggle_completed(set);
    }
    while !draft.is_last_exercise() {
        draft.advance();
    }
    service.finish_session(draft)
}

/// Hands out a fixed list of ids, so collisions can be forced.
struct ScriptedIds(Vec<&'static str>);

impl IdGenerator for ScriptedIds {
    fn next_id(&mut self) -> String {
        self.0.remove(0).to_string()
    }
}

/// A blob store whose writes can be switched off after loading.
struct FailingStore {
    inner: MemoryBlobStore,
    failing: Rc<Cell<bool>>,
}

impl BlobStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        if self.failing.get() {
            return Err(DbError::DataDir);
        }
        self.inner.set(key, value)
    }
}

#[test]
fn test_seed_data_on_first_run() -> Result<()> {
    let (service, _) = create_test_service()?;

    assert_eq!(service.exercises().len(), 8);
    assert_eq!(service.plans().len(), 3);
    assert!(service.store.history().is_empty());
    assert_eq!(service.exercise_title("1"), "Bench Press");
    assert_eq!(service.plan_title("1"), "Full Body Workout");
    Ok(())
}

#[test]
fn test_add_and_update_exercise() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    let created = service.create_exercise(bench_press())?;
    assert_eq!(created.id, "t-1");
    assert_eq!(service.exercises().len(), 9);

    let updated = Exercise {
        title: "Incline Bench Press".to_string(),
        ..created.clone()
    };
    assert!(service.update_exercise(updated.clone())?);
    assert_eq!(service.store.exercise("t-1"), Some(&updated));

    let missing = Exercise {
        id: "nope".to_string(),
        ..updated
    };
    assert!(!service.update_exercise(missing)?);
    assert_eq!(service.exercises().len(), 9);
    Ok(())
}

#[test]
fn test_edit_exercise_partial_fields() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    let edited = service
        .edit_exercise(EditExerciseParams {
            id: "2".to_string(),
            description: Some("High bar".to_string()),
            image_url: Some(Some("https://example.org/squat.png".to_string())),
            ..Default::default()
        })?
        .expect("seeded squat exists");
    assert_eq!(edited.title, "Squat");
    assert_eq!(edited.description, "High bar");
    assert_eq!(edited.muscle_group, MuscleGroup::Legs);

    let cleared = service
        .edit_exercise(EditExerciseParams {
            id: "2".to_string(),
            image_url: Some(None),
            ..Default::default()
        })?
        .expect("seeded squat exists");
    assert_eq!(cleared.image_url, None);

    let missing = service.edit_exercise(EditExerciseParams {
        id: "missing".to_string(),
        ..Default::default()
    })?;
    assert!(missing.is_none());
    Ok(())
}

#[test]
fn test_delete_exercise_leaves_references() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    assert!(service.delete_exercise("1")?);
    assert!(!service.delete_exercise("1")?);
    assert_eq!(service.exercise_title("1"), UNKNOWN_EXERCISE);
    // The plan still lists the row for the deleted exercise.
    let plan = service.store.plan("1").unwrap();
    assert_eq!(plan.exercises[0].exercise_id, "1");
    Ok(())
}

#[test]
fn test_generated_ids_skip_existing() -> Result<()> {
    let store = Store::load(
        MemoryBlobStore::new(),
        Box::new(ScriptedIds(vec!["1", "2", "9", "3", "10"])),
        Box::new(ManualClock::new(start_time())),
    );
    let mut store = store?;

    let exercise = store.add_exercise(bench_press())?;
    assert_eq!(exercise.id, "9");

    let plan = store.add_plan(NewPlan {
        title: "Push".to_string(),
        description: String::new(),
        exercises: vec![PlanExercise::with_defaults("9")],
    })?;
    assert_eq!(plan.id, "10");

    let ids: Vec<&str> = store.exercises().iter().map(|e| e.id.as_str()).collect();
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
    Ok(())
}

#[test]
fn test_plan_timestamps() -> Result<()> {
    let (mut service, clock) = create_test_service()?;

    let plan = service.create_plan(NewPlan {
        title: "Arms".to_string(),
        description: "Curls and dips".to_string(),
        exercises: vec![PlanExercise::with_defaults("4")],
    })?;
    assert_eq!(plan.created_at, start_time());
    assert_eq!(plan.updated_at, start_time());

    clock.advance(Duration::hours(2));
    let tampered = TrainingPlan {
        title: "Arms Day".to_string(),
        created_at: start_time() + Duration::days(30),
        updated_at: start_time() - Duration::days(30),
        ..plan.clone()
    };
    assert!(service.update_plan(tampered)?);

    let stored = service.store.plan(&plan.id).unwrap();
    assert_eq!(stored.title, "Arms Day");
    assert_eq!(stored.created_at, start_time());
    assert_eq!(stored.updated_at, start_time() + Duration::hours(2));
    assert!(stored.updated_at >= stored.created_at);
    Ok(())
}

#[test]
fn test_edit_plan_replaces_rows() -> Result<()> {
    let (mut service, clock) = create_test_service()?;
    clock.advance(Duration::minutes(5));

    let edited = service
        .edit_plan(EditPlanParams {
            id: "3".to_string(),
            exercises: Some(vec![PlanExercise {
                exercise_id: "2".to_string(),
                sets: 5,
                reps: 5,
                rest_time: 180,
            }]),
            ..Default::default()
        })?
        .expect("seeded plan exists");
    assert_eq!(edited.title, "Lower Body Day");
    assert_eq!(edited.exercises.len(), 1);
    assert_eq!(edited.updated_at, start_time() + Duration::minutes(5));

    assert!(service.delete_plan("3")?);
    assert!(service.edit_plan(EditPlanParams {
        id: "3".to_string(),
        ..Default::default()
    })?
    .is_none());
    Ok(())
}

#[test]
fn test_validation_rejects_bad_submissions() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    let err = service
        .create_exercise(NewExercise {
            title: "   ".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::MissingExerciseTitle)
    );

    let err = service
        .create_plan(NewPlan {
            title: "Empty".to_string(),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::EmptyPlan)
    );

    let err = service
        .create_plan(NewPlan {
            title: "Zero".to_string(),
            description: String::new(),
            exercises: vec![
                PlanExercise::with_defaults("1"),
                PlanExercise {
                    sets: 0,
                    ..PlanExercise::with_defaults("2")
                },
            ],
        })
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::ZeroSets { position: 2 })
    );

    assert_eq!(service.exercises().len(), 8);
    assert_eq!(service.plans().len(), 3);
    Ok(())
}

#[test]
fn test_search() -> Result<()> {
    let (service, _) = create_test_service()?;

    let titles: Vec<&str> = service
        .search_exercises("PRESS")
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Bench Press", "Overhead Press"]);

    let legs = service.search_exercises("legs");
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].title, "Squat");

    assert_eq!(service.search_exercises("").len(), 8);
    assert_eq!(service.search_plans("body").len(), 3);
    assert!(service.search_plans("swimming").is_empty());
    Ok(())
}

#[test]
fn test_session_built_from_seed_plan() -> Result<()> {
    let (service, _) = create_test_service()?;

    let draft = service.start_session("1")?;
    let session = draft.session();
    assert_eq!(session.plan_id, "1");
    assert_eq!(session.start_time, start_time());
    assert_eq!(session.end_time, None);
    assert_eq!(draft.plan_title(), "Full Body Workout");

    let reps: Vec<u32> = session
        .exercises_data
        .iter()
        .map(|data| {
            assert_eq!(data.sets.len(), 3);
            assert!(data.sets.iter().all(|set| set.weight == 0.0 && !set.completed));
            data.sets[0].reps
        })
        .collect();
    assert_eq!(reps, vec![10, 8, 6, 30]);
    Ok(())
}

#[test]
fn test_start_session_unknown_plan() -> Result<()> {
    let (service, _) = create_test_service()?;

    let err = service.start_session("missing").unwrap_err();
    assert!(matches!(err, StoreError::PlanNotFound(id) if id == "missing"));
    Ok(())
}

#[test]
fn test_session_pointer_clamps() -> Result<()> {
    let (service, _) = create_test_service()?;

    let mut draft = service.start_session("1")?;
    draft.retreat();
    assert_eq!(draft.current_exercise_index(), 0);
    assert!(draft.is_first_exercise());

    for _ in 0..10 {
        draft.advance();
    }
    assert_eq!(draft.current_exercise_index(), 3);
    assert!(draft.is_last_exercise());
    assert_eq!(draft.current_planned().map(|row| row.rest_time), Some(60));
    Ok(())
}

#[test]
fn test_draft_ignores_later_plan_edits() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    let draft = service.start_session("2")?;
    let before = draft.session().clone();

    service.edit_plan(EditPlanParams {
        id: "2".to_string(),
        title: Some("Renamed".to_string()),
        exercises: Some(vec![PlanExercise::with_defaults("8")]),
        ..Default::default()
    })?;

    assert_eq!(draft.session(), &before);
    assert_eq!(draft.plan_title(), "Upper Body Focus");
    Ok(())
}

#[test]
fn test_finish_session_volume_and_duration() -> Result<()> {
    let (mut service, clock) = create_test_service()?;

    let mut draft = service.start_session("1")?;
    draft.set_weight(0, "5");
    draft.set_reps(0, "10");
    draft.toggle_completed(0);
    draft.set_weight(1, "100"); // never completed
    draft.set_rpe(0, "12");
    while !draft.is_last_exercise() {
        draft.advance();
    }
    clock.advance(Duration::minutes(45));
    let saved = service.finish_session(draft)?;

    assert_eq!(saved.volume(), 50.0);
    assert_eq!(saved.exercises_data[0].sets[0].rpe, Some(10));
    assert_eq!(saved.duration_minutes(), Some(45.0));
    assert_eq!(service.store.workout_session(&saved.id), Some(&saved));

    let summary = service.progress_summary();
    assert_eq!(summary.total_workouts, 1);
    assert_eq!(summary.total_duration_minutes, 45.0);
    assert_eq!(summary.last_workout_date, Some(start_time().date_naive()));
    Ok(())
}

#[test]
fn test_history_buckets_by_date() -> Result<()> {
    let (mut service, clock) = create_test_service()?;

    let first = log_full_body(&mut service, "20", 1)?;
    clock.advance(Duration::hours(3));
    let second = log_full_body(&mut service, "20", 0)?;
    clock.advance(Duration::days(1));
    let third = log_full_body(&mut service, "20", 0)?;

    let history = service.store.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    let ids: Vec<&str> = history[0].sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    assert_eq!(history[1].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(history[1].sessions[0].id, third.id);
    Ok(())
}

#[test]
fn test_update_workout_session_in_place() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    let mut session = log_full_body(&mut service, "10", 0)?;
    session.exercises_data[0].sets[2].completed = true;
    session.exercises_data[0].sets[2].weight = 40.0;
    assert!(service.update_workout_session(session.clone())?);
    assert_eq!(service.store.workout_session(&session.id), Some(&session));
    assert_eq!(service.store.history()[0].sessions.len(), 1);

    let stranger = fitlog_lib::WorkoutSession {
        id: "unknown".to_string(),
        ..session
    };
    assert!(!service.update_workout_session(stranger)?);
    assert_eq!(fitlog_lib::progress::total_workouts(service.store.history()), 1);
    Ok(())
}

#[test]
fn test_progress_on_empty_history() -> Result<()> {
    let (service, _) = create_test_service()?;

    let summary = service.progress_summary();
    assert_eq!(summary.total_workouts, 0);
    assert_eq!(summary.most_trained, MuscleGroup::Chest);
    assert_eq!(summary.most_trained_count, 0);
    assert_eq!(summary.last_workout_date, None);
    assert!(service.volume_by_date_sorted().is_empty());
    assert!(service.recent_sessions().is_empty());

    let frequency = service.frequency_by_weekday();
    assert_eq!(frequency.len(), 7);
    assert_eq!(frequency[0].weekday, Weekday::Sun);
    assert!(frequency.iter().all(|day| day.sessions == 0));
    Ok(())
}

#[test]
fn test_most_trained_and_weekday_frequency() -> Result<()> {
    let (mut service, clock) = create_test_service()?;

    // Upper Body Focus twice: Chest x2, Back x1, Shoulders x1 per session.
    for _ in 0..2 {
        let draft = service.start_session("2")?;
        service.finish_session(draft)?;
        clock.advance(Duration::days(1));
    }

    let summary = service.progress_summary();
    assert_eq!(summary.most_trained, MuscleGroup::Chest);
    assert_eq!(summary.most_trained_count, 4);

    let frequency = service.frequency_by_weekday();
    let count = |day: Weekday| {
        frequency
            .iter()
            .find(|entry| entry.weekday == day)
            .map(|entry| entry.sessions)
    };
    assert_eq!(count(Weekday::Mon), Some(1));
    assert_eq!(count(Weekday::Tue), Some(1));
    assert_eq!(count(Weekday::Sun), Some(0));
    Ok(())
}

#[test]
fn test_recent_sessions_order_and_limit() -> Result<()> {
    let (mut service, clock) = create_test_service()?;
    service.config.recent_sessions_limit = 2;

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(log_full_body(&mut service, "10", 0)?.id);
        clock.advance(Duration::hours(30));
    }

    let recent = service.recent_sessions();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].session_id, ids[2]);
    assert_eq!(recent[1].session_id, ids[1]);
    assert_eq!(recent[0].plan_title, "Full Body Workout");
    assert_eq!(recent[0].exercise_count, 4);
    Ok(())
}

#[test]
fn test_deleted_plan_shows_as_unknown() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    log_full_body(&mut service, "10", 0)?;
    service.delete_plan("1")?;

    let recent = service.recent_sessions();
    assert_eq!(recent[0].plan_title, UNKNOWN_PLAN);
    let summary = service.progress_summary();
    assert_eq!(summary.total_workouts, 1);
    assert_eq!(summary.most_trained_count, 0);
    Ok(())
}

#[test]
fn test_volume_by_date_sorted() -> Result<()> {
    let (mut service, clock) = create_test_service()?;

    clock.set(start_time() + Duration::days(2));
    log_full_body(&mut service, "10", 3)?; // 3 x 10 reps x 10 kg
    clock.set(start_time());
    log_full_body(&mut service, "5", 1)?; // 1 x 10 reps x 5 kg

    let volume = service.volume_by_date_sorted();
    assert_eq!(volume.len(), 2);
    assert_eq!(volume[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    assert_eq!(volume[0].volume, 50.0);
    assert_eq!(volume[1].volume, 300.0);
    Ok(())
}

#[test]
fn test_persisted_blobs_match_memory() -> Result<()> {
    let (mut service, _) = create_test_service()?;

    service.create_exercise(bench_press())?;
    service.delete_plan("2")?;
    log_full_body(&mut service, "15", 2)?;

    let backend = service.store.backend();
    let exercises: Vec<Exercise> = serde_json::from_str(&backend.get(EXERCISES_KEY)?.unwrap())?;
    let plans: Vec<TrainingPlan> = serde_json::from_str(&backend.get(PLANS_KEY)?.unwrap())?;
    let history: Vec<WorkoutHistory> = serde_json::from_str(&backend.get(HISTORY_KEY)?.unwrap())?;
    assert_eq!(exercises, service.exercises());
    assert_eq!(plans, service.plans());
    assert_eq!(history, service.store.history());
    Ok(())
}

#[test]
fn test_history_blob_uses_camel_case() -> Result<()> {
    let (mut service, _) = create_test_service()?;
    log_full_body(&mut service, "15", 1)?;

    let raw = service.store.backend().get(HISTORY_KEY)?.unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    let bucket = &json[0];
    assert_eq!(bucket["date"], "2024-03-04");
    let session = &bucket["workoutSessions"][0];
    assert_eq!(session["planId"], "1");
    assert!(session["exercisesData"][0]["sets"][0]["completed"].as_bool().unwrap());
    Ok(())
}

#[test]
fn test_failed_write_leaves_state_unchanged() -> Result<()> {
    let failing = Rc::new(Cell::new(false));
    let backend = FailingStore {
        inner: MemoryBlobStore::new(),
        failing: failing.clone(),
    };
    let mut store = Store::load(
        backend,
        Box::new(SequentialIds::new("f")),
        Box::new(ManualClock::new(start_time())),
    )?;
    failing.set(true);

    let err = store.add_exercise(bench_press()).unwrap_err();
    assert!(matches!(err, StoreError::Persist { key, .. } if key == EXERCISES_KEY));
    assert_eq!(store.exercises().len(), 8);

    assert!(store.delete_plan("1").is_err());
    assert!(store.plan("1").is_some());

    let draft = store.start_session("1")?;
    let finished = draft.finish(start_time());
    assert!(store.add_workout_session(finished).is_err());
    assert!(store.history().is_empty());
    Ok(())
}

#[test]
fn test_corrupt_blob_is_an_error() {
    let backend = MemoryBlobStore::new().with_blob(PLANS_KEY, "{ not json");
    let result = Store::load(
        backend,
        Box::new(SequentialIds::default()),
        Box::new(ManualClock::new(start_time())),
    );
    assert!(matches!(result, Err(StoreError::Corrupt { key, .. }) if key == PLANS_KEY));
}

#[test]
fn test_stored_empty_list_is_not_reseeded() -> Result<()> {
    let backend = MemoryBlobStore::new().with_blob(EXERCISES_KEY, "[]");
    let store = Store::load(
        backend,
        Box::new(SequentialIds::default()),
        Box::new(ManualClock::new(start_time())),
    )?;
    assert!(store.exercises().is_empty());
    assert_eq!(store.plans().len(), 3);
    Ok(())
}

#[test]
fn test_sqlite_store_survives_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("fitlog.sqlite");
    let clock = ManualClock::new(start_time());

    let saved = {
        let backend = SqliteBlobStore::open(&db_path)?;
        let mut store = Store::load(
            backend,
            Box::new(SequentialIds::new("s")),
            Box::new(clock.clone()),
        )?;
        let mut draft = store.start_session("3")?;
        draft.set_weight(0, "80");
        draft.toggle_completed(0);
        clock.advance(Duration::minutes(30));
        let finished = draft.finish(store.now());
        store.add_workout_session(finished)?
    };

    let reopened = Store::open(SqliteBlobStore::open(&db_path)?)?;
    assert_eq!(reopened.workout_session(&saved.id), Some(&saved));
    assert_eq!(reopened.exercises().len(), 8);
    Ok(())
}

#[test]
fn test_config_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    let loaded = load_config_util(&path)?;
    assert_eq!(loaded, Config::default());
    assert!(path.exists());

    let mut config = Config::default();
    config.units = Units::Imperial;
    config.recent_sessions_limit = 10;
    config.theme.header_color = "DarkCyan".to_string();
    save_config_util(&path, &config)?;
    assert_eq!(load_config_util(&path)?, config);
    Ok(())
}

#[test]
fn test_service_config_setters() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (mut service, _) = create_test_service()?;
    service.config_path = dir.path().join("config.toml");

    service.set_units(Units::Imperial)?;
    service.set_header_color("darkcyan")?;
    assert!(service.set_header_color("plaid").is_err());
    assert!(service.set_recent_sessions_limit(0).is_err());
    service.set_recent_sessions_limit(3)?;

    let stored = load_config_util(&service.config_path)?;
    assert_eq!(stored.units, Units::Imperial);
    assert_eq!(stored.theme.header_color, "DarkCyan");
    assert_eq!(stored.recent_sessions_limit, 3);
    Ok(())
}

#[test]
fn test_imperial_weights_stored_in_kg() -> Result<()> {
    let (service, _) = create_test_service()?;
    let units = Units::Imperial;

    let mut draft = service.start_session("1")?;
    draft.set_weight_value(0, units.to_kg(fitlog_lib::session::coerce_weight("220.46226")));
    let stored = draft.session().exercises_data[0].sets[0].weight;
    assert!((stored - 100.0).abs() < 1e-6);
    assert!((units.from_kg(stored) - 220.462_26).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_sqlite_blob_store_overwrites_key() -> Result<()> {
    let mut backend = SqliteBlobStore::open_in_memory()?;

    assert_eq!(backend.get(PLANS_KEY)?, None);
    backend.set(PLANS_KEY, "[]")?;
    backend.set(PLANS_KEY, "[1]")?;
    assert_eq!(backend.get(PLANS_KEY)?, Some("[1]".to_string()));

    let rows: i64 = backend
        .connection()
        .query_row("SELECT COUNT(*) FROM blobs", [], |row| row.get(0))?;
    assert_eq!(rows, 1);
    Ok(())
}

#[test]
fn test_most_trained_tie_goes_to_earlier_group() -> Result<()> {
    let (mut service, clock) = create_test_service()?;

    // Lower Body Day: Legs, Back and Core once each.
    let draft = service.start_session("3")?;
    service.finish_session(draft)?;
    let summary = service.progress_summary();
    assert_eq!(
        (summary.most_trained, summary.most_trained_count),
        (MuscleGroup::Back, 1)
    );

    // Rows listed Core, Legs, Back; after two runs every group is at 3.
    let reversed = service.create_plan(NewPlan {
        title: "Reversed".to_string(),
        description: String::new(),
        exercises: vec![
            PlanExercise::with_defaults("6"),
            PlanExercise::with_defaults("2"),
            PlanExercise::with_defaults("3"),
        ],
    })?;
    for _ in 0..2 {
        clock.advance(Duration::hours(1));
        let draft = service.start_session(&reversed.id)?;
        service.finish_session(draft)?;
    }
    let summary = service.progress_summary();
    assert_eq!(
        (summary.most_trained, summary.most_trained_count),
        (MuscleGroup::Back, 3)
    );
    Ok(())
}

#[test]
fn test_recent_sessions_limit_override() -> Result<()> {
    let (mut service, clock) = create_test_service()?;
    for _ in 0..3 {
        log_full_body(&mut service, "10", 0)?;
        clock.advance(Duration::hours(1));
    }

    assert_eq!(service.recent_sessions_with_limit(None)?.len(), 3);
    assert_eq!(service.recent_sessions_with_limit(Some(1))?.len(), 1);
    assert!(matches!(
        service.recent_sessions_with_limit(Some(0)),
        Err(fitlog_lib::ConfigError::InvalidRecentLimit)
    ));
    Ok(())
}

#[test]
fn test_id_generator_that_never_yields_a_free_id() -> Result<()> {
    struct StuckIds;
    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> String {
            "1".to_string()
        }
    }

    let mut store = Store::load(
        MemoryBlobStore::new(),
        Box::new(StuckIds),
        Box::new(ManualClock::new(start_time())),
    )?;
    let err = store.add_exercise(bench_press()).unwrap_err();
    assert!(matches!(err, StoreError::IdsExhausted { .. }));
    assert_eq!(store.exercises().len(), 8);
    assert!(store.backend().get(EXERCISES_KEY)?.is_none());
    Ok(())
}
