use super::*;
use homeschool::DurableStorage;
use homeschool::storage::{ROLE_KEY, TOKEN_KEY, USER_ID_KEY};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("homeschool").chain(args.iter().copied())).unwrap()
}

#[test]
fn explicit_session_file_wins() {
    let path = session_path(Some("/tmp/s.json".into()), Some("/home/u/.config".into())).unwrap();
    assert_eq!(path, PathBuf::from("/tmp/s.json"));
}

#[test]
fn session_file_defaults_under_config_dir() {
    let path = session_path(None, Some("/home/u/.config".into())).unwrap();
    assert_eq!(path, PathBuf::from("/home/u/.config/homeschool/session.json"));
    assert!(matches!(session_path(None, None), Err(CliError::NoSessionDir)));
}

#[test]
fn parses_assignment_filters_and_statuses() {
    let cli = parse(&["assignments", "list", "--filter", "week"]);
    assert!(matches!(
        cli.command,
        Command::Assignments(AssignmentsCommand { command: AssignmentsSubcommand::List { filter: Some(DateFilter::ThisWeek) } })
    ));

    let cli = parse(&["assignments", "status", "7", "review"]);
    assert!(matches!(
        cli.command,
        Command::Assignments(AssignmentsCommand {
            command: AssignmentsSubcommand::Status { assignment_id: 7, status: AssignmentStatus::Review }
        })
    ));
    assert!(Cli::try_parse_from(["homeschool", "assignments", "status", "7", "done"]).is_err());
}

#[test]
fn session_commands_are_ungated() {
    assert_eq!(route_for(&parse(&["status"]).command), None);
    assert_eq!(route_for(&parse(&["logout"]).command), None);
    assert_eq!(route_for(&parse(&["login", "-u", "a", "-p", "b"]).command), None);
}

#[test]
fn commands_map_to_their_views() {
    assert_eq!(route_for(&parse(&["register", "-u", "a", "-p", "b"]).command), Some(AppRoute::Register));
    assert_eq!(route_for(&parse(&["subjects", "list"]).command), Some(AppRoute::Admin));
    assert_eq!(route_for(&parse(&["assignments", "list"]).command), Some(AppRoute::Teacher));
    assert_eq!(route_for(&parse(&["assignments", "status", "1", "accepted"]).command), Some(AppRoute::Student));
    assert_eq!(route_for(&parse(&["student", "show"]).command), Some(AppRoute::Student));
    assert_eq!(route_for(&parse(&["student", "update", "--grade-level", "4"]).command), Some(AppRoute::Teacher));
}

#[test]
fn anonymous_user_is_told_to_log_in() {
    let err = authorize(&RouteGuard::default(), &Session::default(), AppRoute::Teacher).unwrap_err();
    assert!(matches!(err, CliError::NotLoggedIn));
}

#[test]
fn student_cannot_use_admin_commands() {
    let session = Session::authenticated("t", Role::Student, 3);
    let err = authorize(&RouteGuard::default(), &session, AppRoute::Admin).unwrap_err();
    assert!(matches!(err, CliError::Forbidden(AppRoute::Admin)));
    assert!(authorize(&RouteGuard::default(), &session, AppRoute::Student).is_ok());
}

#[test]
fn admin_can_use_teacher_commands() {
    let session = Session::authenticated("t", Role::Admin, 1);
    assert!(authorize(&RouteGuard::default(), &session, AppRoute::Teacher).is_ok());
}

#[test]
fn student_reads_own_record() {
    assert_eq!(default_student_id(&Session::authenticated("t", Role::Student, 12), 1), 12);
    assert_eq!(default_student_id(&Session::authenticated("t", Role::Teacher, 5), 1), 1);
    assert_eq!(default_student_id(&Session::default(), 1), 1);
}

#[test]
fn describes_sessions() {
    assert_eq!(describe_session(&Session::default()), "not logged in");
    let text = describe_session(&Session::authenticated("t", Role::Teacher, 5));
    assert!(text.contains("user 5"));
    assert!(text.ends_with("/teacher"));
}

#[test]
fn due_date_is_midnight_utc() {
    let due = due_date_from_input("2024-05-01").unwrap();
    assert_eq!(due.to_rfc3339(), "2024-05-01T00:00:00+00:00");
    assert!(matches!(due_date_from_input("May 1"), Err(CliError::InvalidDate(_))));
}

#[test]
fn profile_update_keeps_unset_fields() {
    let current = StudentProfile { first_name: "Ada".into(), last_name: "Lovelace".into(), grade_level: Some(3) };
    let merged = merged_profile(current, None, Some("Byron".into()), None);
    assert_eq!(merged.first_name, "Ada");
    assert_eq!(merged.last_name, "Byron");
    assert_eq!(merged.grade_level, Some(3));
}

#[test]
fn session_file_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let storage = FileStorage::new(&path);
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(ROLE_KEY, "TEACHER").unwrap();
    storage.set(USER_ID_KEY, "5").unwrap();

    let api = ApiClient::new(&ClientConfig::default()).unwrap();
    let store = SessionStore::new(api, FileStorage::new(&path));
    let session = store.snapshot();
    assert!(session.is_logged_in());
    assert_eq!(session.role(), Some(Role::Teacher));
    assert!(store.api().has_bearer());

    store.logout();
    assert_eq!(FileStorage::new(&path).get(TOKEN_KEY), None);
}

#[test]
fn grade_level_is_limited_to_school_grades() {
    let cli = parse(&["student", "update", "--grade-level", "12"]);
    assert!(matches!(
        cli.command,
        Command::Student(StudentCommand { command: StudentSubcommand::Update { grade_level: Some(12), .. } })
    ));
    assert!(Cli::try_parse_from(["homeschool", "student", "update", "--grade-level", "13"]).is_err());
    assert!(Cli::try_parse_from(["homeschool", "student", "update", "--grade-level", "0"]).is_err());
    assert_eq!(parse_grade_level("x"), Err("grade level must be 1-12".to_owned()));
}

#[test]
fn stale_token_in_session_file_is_reported_until_logout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let storage = FileStorage::new(&path);
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(ROLE_KEY, "JANITOR").unwrap();

    let api = ApiClient::new(&ClientConfig::default()).unwrap();
    let store = SessionStore::new(api, FileStorage::new(&path));
    assert!(!store.snapshot().is_logged_in());
    assert!(matches!(ensure_persisted(&store), Err(CliError::NotPersisted)));

    store.logout();
    assert!(ensure_persisted(&store).is_ok());
}

#[test]
fn corrupt_session_file_is_cleared_by_logout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{\"token\":").unwrap();

    let api = ApiClient::new(&ClientConfig::default()).unwrap();
    let store = SessionStore::new(api, FileStorage::new(&path));
    store.logout();
    assert!(ensure_persisted(&store).is_ok());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
}
