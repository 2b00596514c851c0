//! Admin dashboard: the subject list.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use crate::net::ApiError;
use crate::net::types::{NewSubject, Subject};

pub const NEW_SUBJECT_NAME: &str = "New Subject";
pub const SUBJECT_IN_USE_MESSAGE: &str = "This subject cannot be deleted because it is being used by an assignment.";

#[must_use]
pub fn new_subject() -> NewSubject {
    NewSubject { name: Some(NEW_SUBJECT_NAME.to_owned()) }
}

/// Case-insensitive by name; unnamed subjects first, ties by id.
pub fn sort_subjects(subjects: &mut [Subject]) {
    subjects.sort_by_cached_key(|s| (s.name.as_deref().map(str::to_lowercase), s.subject_id));
}

/// The body for `PUT /subjects/{id}`: a blank name is sent as `null`.
#[must_use]
pub fn normalized_for_save(subject: &Subject) -> Subject {
    Subject {
        subject_id: subject.subject_id,
        name: subject.name.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(str::to_owned),
    }
}

/// Apply a keystroke to the local list. Returns `false` if `subject_id` is absent.
pub fn rename_subject(subjects: &mut [Subject], subject_id: i64, name: &str) -> bool {
    match subjects.iter_mut().find(|s| s.subject_id == subject_id) {
        Some(subject) => {
            subject.name = Some(name.to_owned());
            true
        }
        None => false,
    }
}

pub fn remove_subject(subjects: &mut Vec<Subject>, subject_id: i64) -> bool {
    let before = subjects.len();
    subjects.retain(|s| s.subject_id != subject_id);
    subjects.len() != before
}

/// What the UI should do after a delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Server refused with 500: an assignment still references the subject.
    InUse,
    /// Anything else; logged, list unchanged.
    Failed(String),
}

impl DeleteOutcome {
    #[must_use]
    pub fn from_result(result: &Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) if err.status() == Some(500) => DeleteOutcome::InUse,
            Err(err) => DeleteOutcome::Failed(err.user_message()),
        }
    }
}
