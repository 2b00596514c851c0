//! Client configuration loaded from environment variables.
//!
//! - `HOMESCHOOL_API_URL`: backend base URL (default `http://localhost:8080`)
//! - `HOMESCHOOL_REQUEST_TIMEOUT_SECS`: whole-request timeout, native only (30)
//! - `HOMESCHOOL_CONNECT_TIMEOUT_SECS`: connect timeout, native only (10)
//! - `HOMESCHOOL_STUDENT_ID`: student edited on the teacher dashboard (1)
//! - `HOMESCHOOL_SCHOOL_NAME`: heading on the student and admin dashboards

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const API_URL_VAR: &str = "HOMESCHOOL_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "HOMESCHOOL_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "HOMESCHOOL_CONNECT_TIMEOUT_SECS";
pub const STUDENT_ID_VAR: &str = "HOMESCHOOL_STUDENT_ID";
pub const SCHOOL_NAME_VAR: &str = "HOMESCHOOL_SCHOOL_NAME";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STUDENT_ID: i64 = 1;
const DEFAULT_SCHOOL_NAME: &str = "Hatfield Home School";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be an absolute http(s) URL, got {value:?}")]
    InvalidUrl { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub student_id: i64,
    pub school_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            student_id: DEFAULT_STUDENT_ID,
            school_name: DEFAULT_SCHOOL_NAME.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or the API URL
    /// is not absolute.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base_url = match get(API_URL_VAR) {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_API_URL.to_owned(),
        };

        Ok(Self {
            api_base_url,
            request_timeout_secs: parse_or(REQUEST_TIMEOUT_VAR, get(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_or(CONNECT_TIMEOUT_VAR, get(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_SECS)?,
            student_id: parse_or(STUDENT_ID_VAR, get(STUDENT_ID_VAR), DEFAULT_STUDENT_ID)?,
            school_name: get(SCHOOL_NAME_VAR).unwrap_or_else(|| DEFAULT_SCHOOL_NAME.to_owned()),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidUrl { key: API_URL_VAR, value: raw.to_owned() })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
