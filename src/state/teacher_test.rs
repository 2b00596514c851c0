use super::*;

fn profile() -> StudentProfile {
    StudentProfile { first_name: "Ada".into(), last_name: "King".into(), grade_level: Some(7) }
}

fn subject(id: i64, name: &str) -> Subject {
    Subject { subject_id: id, name: Some(name.into()) }
}

fn assignment() -> Assignment {
    Assignment {
        assignment_id: 12,
        due_date: Utc.with_ymd_and_hms(2024, 3, 13, 0, 0, 0).unwrap(),
        subject: Some(subject(2, "Math")),
        subject_id: None,
        description: "Fractions".into(),
        status: AssignmentStatus::Incomplete,
        link: None,
    }
}

// =============================================================
// ProfileEditor
// =============================================================

#[test]
fn unchanged_field_does_not_save() {
    let editor = ProfileEditor::new(profile());
    assert_eq!(editor.pending_save(ProfileField::FirstName), None);
}

#[test]
fn changed_field_saves_whole_profile() {
    let mut editor = ProfileEditor::new(profile());
    editor.set(ProfileField::LastName, "Lovelace");
    let body = editor.pending_save(ProfileField::LastName).unwrap();
    assert_eq!(body.last_name, "Lovelace");
    assert_eq!(body.first_name, "Ada");
    // Other fields are compared independently.
    assert_eq!(editor.pending_save(ProfileField::FirstName), None);
}

#[test]
fn mark_saved_resets_the_diff() {
    let mut editor = ProfileEditor::new(profile());
    editor.set(ProfileField::GradeLevel, "8");
    let body = editor.pending_save(ProfileField::GradeLevel).unwrap();
    editor.mark_saved(body);
    assert_eq!(editor.pending_save(ProfileField::GradeLevel), None);
    assert_eq!(editor.value(ProfileField::GradeLevel), "8");
}

#[test]
fn edit_back_to_saved_value_is_not_a_change() {
    let mut editor = ProfileEditor::new(profile());
    editor.set(ProfileField::FirstName, "Ann");
    editor.set(ProfileField::FirstName, "Ada");
    assert_eq!(editor.pending_save(ProfileField::FirstName), None);
}

#[test]
fn grade_outside_range_is_ignored() {
    let mut editor = ProfileEditor::new(profile());
    editor.set(ProfileField::GradeLevel, "13");
    editor.set(ProfileField::GradeLevel, "0");
    editor.set(ProfileField::GradeLevel, "abc");
    assert_eq!(editor.current().grade_level, Some(7));
}

// =============================================================
// replace_assignment
// =============================================================

#[test]
fn replace_assignment_swaps_by_id() {
    let mut list = vec![assignment()];
    let mut updated = assignment();
    updated.description = "Decimals".into();
    assert!(replace_assignment(&mut list, updated));
    assert_eq!(list[0].description, "Decimals");

    let mut stranger = assignment();
    stranger.assignment_id = 99;
    assert!(!replace_assignment(&mut list, stranger));
}

// =============================================================
// AssignmentDraft
// =============================================================

#[test]
fn draft_prefills_from_assignment() {
    let draft = AssignmentDraft::from_assignment(&assignment());
    assert_eq!(draft.subject_id, Some(2));
    assert_eq!(draft.due_date, "2024-03-13");
    assert_eq!(draft.link, "");
}

#[test]
fn draft_apply_updates_fields() {
    let subjects = [subject(2, "Math"), subject(3, "Reading")];
    let mut draft = AssignmentDraft::from_assignment(&assignment());
    draft.subject_id = Some(3);
    draft.due_date = "2024-03-20".into();
    draft.status = AssignmentStatus::Accepted;
    draft.link = " https://example.com/book ".into();

    let saved = draft.apply(&assignment(), &subjects).unwrap();
    assert_eq!(saved.subject_name(), "Reading");
    assert_eq!(saved.subject_id, Some(3));
    assert_eq!(saved.due_date, Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap());
    assert_eq!(saved.status, AssignmentStatus::Accepted);
    assert_eq!(saved.link.as_deref(), Some("https://example.com/book"));
}

#[test]
fn draft_apply_rejects_bad_date_and_subject() {
    let subjects = [subject(2, "Math")];
    let mut draft = AssignmentDraft::from_assignment(&assignment());
    draft.due_date = String::new();
    assert_eq!(draft.apply(&assignment(), &subjects), Err(DraftError::InvalidDueDate(String::new())));

    let mut draft = AssignmentDraft::from_assignment(&assignment());
    draft.subject_id = Some(42);
    assert_eq!(draft.apply(&assignment(), &subjects), Err(DraftError::UnknownSubject(42)));
}
