//! Teacher dashboard: student profile editing and the assignment editor.

#[cfg(test)]
#[path = "teacher_test.rs"]
mod teacher_test;

use std::ops::RangeInclusive;

use chrono::{NaiveTime, TimeZone, Utc};

use crate::net::types::{Assignment, AssignmentStatus, StudentProfile, Subject};
use crate::util::dates::{format_date, parse_date_input};

pub const GRADE_LEVELS: RangeInclusive<u8> = 1..=12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    GradeLevel,
}

impl ProfileField {
    fn read(self, profile: &StudentProfile) -> String {
        match self {
            ProfileField::FirstName => profile.first_name.clone(),
            ProfileField::LastName => profile.last_name.clone(),
            ProfileField::GradeLevel => profile.grade_level.map(|g| g.to_string()).unwrap_or_default(),
        }
    }
}

/// Tracks the profile as edited and as last saved so a blur only triggers a
/// `PUT` when the field really changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEditor {
    current: StudentProfile,
    saved: StudentProfile,
}

impl ProfileEditor {
    #[must_use]
    pub fn new(loaded: StudentProfile) -> Self {
        Self { current: loaded.clone(), saved: loaded }
    }

    #[must_use]
    pub fn current(&self) -> &StudentProfile {
        &self.current
    }

    #[must_use]
    pub fn value(&self, field: ProfileField) -> String {
        field.read(&self.current)
    }

    /// Apply an input event. Grades outside 1-12 or non-numeric are ignored.
    pub fn set(&mut self, field: ProfileField, value: &str) {
        match field {
            ProfileField::FirstName => value.clone_into(&mut self.current.first_name),
            ProfileField::LastName => value.clone_into(&mut self.current.last_name),
            ProfileField::GradeLevel => {
                if let Ok(grade) = value.trim().parse::<u8>() {
                    if GRADE_LEVELS.contains(&grade) {
                        self.current.grade_level = Some(grade);
                    }
                }
            }
        }
    }

    /// On blur: the profile to send if `field` differs from the saved copy.
    #[must_use]
    pub fn pending_save(&self, field: ProfileField) -> Option<StudentProfile> {
        (field.read(&self.current) != field.read(&self.saved)).then(|| self.current.clone())
    }

    /// The server accepted `profile`.
    pub fn mark_saved(&mut self, profile: StudentProfile) {
        self.saved = profile;
    }
}

/// Swap in the saved copy of an assignment by id. Returns `false` if absent.
pub fn replace_assignment(assignments: &mut [Assignment], updated: Assignment) -> bool {
    match assignments.iter_mut().find(|a| a.assignment_id == updated.assignment_id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

// =============================================================================
// EDIT MODAL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("due date must be YYYY-MM-DD, got {0:?}")]
    InvalidDueDate(String),
    #[error("unknown subject {0}")]
    UnknownSubject(i64),
}

/// Form state of the edit-assignment modal. Dates are kept as the input's
/// `YYYY-MM-DD` text until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub assignment_id: i64,
    pub subject_id: Option<i64>,
    pub description: String,
    pub status: AssignmentStatus,
    pub due_date: String,
    pub link: String,
}

impl AssignmentDraft {
    #[must_use]
    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            assignment_id: assignment.assignment_id,
            subject_id: assignment.effective_subject_id(),
            description: assignment.description.clone(),
            status: assignment.status,
            due_date: format_date(&assignment.due_date),
            link: assignment.link.clone().unwrap_or_default(),
        }
    }

    /// Merge the draft into `original`, producing the body for `PUT /assignments/{id}`.
    /// The due date is midnight UTC of the chosen day; an empty link clears it.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] for an unparsable date or a subject id not in `subjects`.
    pub fn apply(&self, original: &Assignment, subjects: &[Subject]) -> Result<Assignment, DraftError> {
        let day = parse_date_input(&self.due_date).ok_or_else(|| DraftError::InvalidDueDate(self.due_date.clone()))?;

        let subject = match self.subject_id {
            Some(id) => Some(
                subjects
                    .iter()
                    .find(|s| s.subject_id == id)
                    .cloned()
                    .ok_or(DraftError::UnknownSubject(id))?,
            ),
            None => original.subject.clone(),
        };

        let link = self.link.trim();
        Ok(Assignment {
            assignment_id: original.assignment_id,
            due_date: Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
            subject_id: subject.as_ref().map(|s| s.subject_id),
            subject,
            description: self.description.clone(),
            status: self.status,
            link: (!link.is_empty()).then(|| link.to_owned()),
        })
    }
}
