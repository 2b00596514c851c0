//! Student dashboard: the assignment checklist.

#[cfg(test)]
#[path = "student_test.rs"]
mod student_test;

use crate::net::ApiResult;
use crate::net::types::{Assignment, AssignmentStatus, StudentProfile};

/// The completion checkbox is ticked once work is handed in.
#[must_use]
pub fn is_checked(status: AssignmentStatus) -> bool {
    matches!(status, AssignmentStatus::Review | AssignmentStatus::Accepted)
}

/// Accepted work is final; its row is greyed out and the checkbox disabled.
#[must_use]
pub fn is_locked(status: AssignmentStatus) -> bool {
    status == AssignmentStatus::Accepted
}

/// Status to request when the student clicks the checkbox, or `None` for a
/// locked row.
#[must_use]
pub fn toggled_status(status: AssignmentStatus) -> Option<AssignmentStatus> {
    match status {
        AssignmentStatus::Incomplete => Some(AssignmentStatus::Review),
        AssignmentStatus::Review => Some(AssignmentStatus::Incomplete),
        AssignmentStatus::Accepted => None,
    }
}

/// Ascending by due date; ties keep their server order.
pub fn sort_by_due_date(assignments: &mut [Assignment]) {
    assignments.sort_by_key(|a| a.due_date);
}

/// Record a confirmed status change. Returns `false` if no row has `assignment_id`.
pub fn apply_status(assignments: &mut [Assignment], assignment_id: i64, status: AssignmentStatus) -> bool {
    match assignments.iter_mut().find(|a| a.assignment_id == assignment_id) {
        Some(assignment) => {
            assignment.status = status;
            true
        }
        None => false,
    }
}

/// Fold the outcome of a status request into the list. Only a confirmed
/// change is applied; a failed request leaves the row as it was. Returns
/// whether a row changed.
pub fn settle_toggle(
    assignments: &mut [Assignment],
    assignment_id: i64,
    requested: AssignmentStatus,
    result: &ApiResult<()>,
) -> bool {
    result.is_ok() && apply_status(assignments, assignment_id, requested)
}

/// Checkbox state of the row with `assignment_id`, read from the list.
#[must_use]
pub fn row_checked(assignments: &[Assignment], assignment_id: i64) -> bool {
    assignments
        .iter()
        .find(|a| a.assignment_id == assignment_id)
        .is_some_and(|a| is_checked(a.status))
}

#[must_use]
pub fn grade_label(profile: &StudentProfile) -> String {
    match profile.grade_level {
        Some(grade) => format!("Grade: {grade}"),
        None => "Grade:".to_owned(),
    }
}
