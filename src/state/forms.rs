//! Login and registration form checks.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please enter both username and password.";

/// Both fields must be non-blank before anything is sent.
///
/// # Errors
///
/// Returns [`MISSING_CREDENTIALS_MESSAGE`] when either field is blank.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() || password.is_empty() {
        Err(MISSING_CREDENTIALS_MESSAGE)
    } else {
        Ok(())
    }
}
