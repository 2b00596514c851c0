use super::*;

#[test]
fn both_fields_required() {
    assert_eq!(validate_credentials("", "pw"), Err(MISSING_CREDENTIALS_MESSAGE));
    assert_eq!(validate_credentials("  ", "pw"), Err(MISSING_CREDENTIALS_MESSAGE));
    assert_eq!(validate_credentials("ada", ""), Err(MISSING_CREDENTIALS_MESSAGE));
    assert_eq!(validate_credentials("ada", "pw"), Ok(()));
}
