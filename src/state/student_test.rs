use super::*;
use chrono::{TimeZone, Utc};

fn assignment(id: i64, day: u32, status: AssignmentStatus) -> Assignment {
    Assignment {
        assignment_id: id,
        due_date: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
        subject: None,
        subject_id: None,
        description: format!("assignment {id}"),
        status,
        link: None,
    }
}

#[test]
fn checkbox_reflects_handed_in_work() {
    assert!(!is_checked(AssignmentStatus::Incomplete));
    assert!(is_checked(AssignmentStatus::Review));
    assert!(is_checked(AssignmentStatus::Accepted));
}

#[test]
fn only_accepted_is_locked() {
    assert!(is_locked(AssignmentStatus::Accepted));
    assert!(!is_locked(AssignmentStatus::Review));
    assert!(!is_locked(AssignmentStatus::Incomplete));
}

#[test]
fn toggle_flips_review_and_incomplete() {
    assert_eq!(toggled_status(AssignmentStatus::Incomplete), Some(AssignmentStatus::Review));
    assert_eq!(toggled_status(AssignmentStatus::Review), Some(AssignmentStatus::Incomplete));
    assert_eq!(toggled_status(AssignmentStatus::Accepted), None);
}

#[test]
fn sort_orders_by_due_date_and_is_stable() {
    let mut list = vec![
        assignment(3, 20, AssignmentStatus::Incomplete),
        assignment(1, 5, AssignmentStatus::Incomplete),
        assignment(4, 20, AssignmentStatus::Review),
        assignment(2, 9, AssignmentStatus::Accepted),
    ];
    sort_by_due_date(&mut list);
    let ids: Vec<i64> = list.iter().map(|a| a.assignment_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn apply_status_updates_matching_row_only() {
    let mut list = vec![assignment(1, 5, AssignmentStatus::Incomplete), assignment(2, 6, AssignmentStatus::Incomplete)];
    assert!(apply_status(&mut list, 2, AssignmentStatus::Review));
    assert_eq!(list[0].status, AssignmentStatus::Incomplete);
    assert_eq!(list[1].status, AssignmentStatus::Review);
    assert!(!apply_status(&mut list, 99, AssignmentStatus::Review));
}

#[test]
fn grade_label_handles_missing_grade() {
    let mut profile = StudentProfile::default();
    assert_eq!(grade_label(&profile), "Grade:");
    profile.grade_level = Some(4);
    assert_eq!(grade_label(&profile), "Grade: 4");
}

#[test]
fn failed_toggle_keeps_row_unchecked() {
    let mut list = vec![assignment(1, 5, AssignmentStatus::Incomplete)];
    let requested = toggled_status(AssignmentStatus::Incomplete).unwrap();
    let failed = Err(crate::net::ApiError::Status { status: 500, message: String::new() });

    assert!(!settle_toggle(&mut list, 1, requested, &failed));
    assert_eq!(list[0].status, AssignmentStatus::Incomplete);
    assert!(!row_checked(&list, 1));
}

#[test]
fn confirmed_toggle_checks_row() {
    let mut list = vec![assignment(1, 5, AssignmentStatus::Incomplete)];
    assert!(settle_toggle(&mut list, 1, AssignmentStatus::Review, &Ok(())));
    assert!(row_checked(&list, 1));

    assert!(settle_toggle(&mut list, 1, AssignmentStatus::Incomplete, &Ok(())));
    assert!(!row_checked(&list, 1));
    assert!(!row_checked(&list, 42));
}
