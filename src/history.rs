// src/history.rs
//! Grouping of finished sessions into per-day history buckets.
use crate::models::{WorkoutHistory, WorkoutSession};
use chrono::NaiveDate;

/// Appends `session` to the bucket for its start date, creating the bucket at the
/// end of `history` if that date has none yet. Buckets are never reordered.
pub fn fold(history: &mut Vec<WorkoutHistory>, session: WorkoutSession) {
    let date = session.date();
    match history.iter_mut().find(|bucket| bucket.date == date) {
        Some(bucket) => bucket.sessions.push(session),
        None => history.push(WorkoutHistory {
            date,
            sessions: vec![session],
        }),
    }
}

/// Replaces the session with the same id wherever it is stored. The session stays
/// in its original bucket even if its start time now falls on another date.
/// Returns `false` when no bucket holds that id.
pub fn replace_session(history: &mut [WorkoutHistory], session: WorkoutSession) -> bool {
    let slot = history
        .iter_mut()
        .flat_map(|bucket| bucket.sessions.iter_mut())
        .find(|existing| existing.id == session.id);
    match slot {
        Some(existing) => {
            *existing = session;
            true
        }
        None => false,
    }
}

/// Finds a stored session and the date of the bucket holding it.
pub fn find_session<'a>(
    history: &'a [WorkoutHistory],
    session_id: &str,
) -> Option<(NaiveDate, &'a WorkoutSession)> {
    history.iter().find_map(|bucket| {
        bucket
            .sessions
            .iter()
            .find(|session| session.id == session_id)
            .map(|session| (bucket.date, session))
    })
}
