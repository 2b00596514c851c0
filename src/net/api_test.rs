use super::*;
use chrono::{TimeZone, Utc};

fn config(base: &str) -> ClientConfig {
    ClientConfig { api_base_url: base.to_owned(), ..ClientConfig::default() }
}

#[test]
fn resource_paths_format_ids() {
    assert_eq!(subject_path(3), "/subjects/3");
    assert_eq!(student_path(1), "/students/1");
    assert_eq!(assignment_path(42), "/assignments/42");
    assert_eq!(assignment_status_path(42), "/assignments/42/status");
}

#[test]
fn range_query_uses_rfc3339_bounds() {
    let range = DateRange {
        start: Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 3, 17, 23, 59, 59).unwrap(),
    };
    let [(start_key, start), (end_key, end)] = range_query(&range);
    assert_eq!(start_key, "startDate");
    assert_eq!(start, "2024-03-11T00:00:00+00:00");
    assert_eq!(end_key, "endDate");
    assert_eq!(end, "2024-03-17T23:59:59+00:00");
}

#[test]
fn bearer_value_prefixes_scheme() {
    assert_eq!(bearer_value("abc"), "Bearer abc");
}

#[test]
fn new_trims_trailing_slash() {
    let client = ApiClient::new(&config("http://localhost:8080/")).unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
    assert_eq!(client.url("/subjects"), "http://localhost:8080/subjects");
}

#[test]
fn new_rejects_relative_base() {
    let err = ApiClient::new(&config("localhost:8080")).unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl(_)));
}

#[test]
fn bearer_is_shared_between_clones() {
    let client = ApiClient::new(&config("http://localhost:8080")).unwrap();
    let clone = client.clone();
    assert!(!clone.has_bearer());

    client.set_bearer(Some("abc".to_owned()));
    assert!(clone.has_bearer());

    clone.set_bearer(None);
    assert!(!client.has_bearer());
}

#[test]
fn debug_does_not_print_token() {
    let client = ApiClient::new(&config("http://localhost:8080")).unwrap();
    client.set_bearer(Some("secret-token".to_owned()));
    let shown = format!("{client:?}");
    assert!(!shown.contains("secret-token"));
    assert!(shown.contains("authorized: true"));
}
