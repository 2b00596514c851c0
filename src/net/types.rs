//! JSON bodies exchanged with the homeschool backend. Field names are camelCase
//! on the wire.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::role::Role;
use crate::util::dates;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    pub token: String,
    pub role: Role,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(alias = "id")]
    pub subject_id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl Subject {
    /// Name for display; unnamed subjects render as an empty cell.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "grade_level")]
    pub grade_level: Option<u8>,
}

impl StudentProfile {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Grade arrives as a number or, from older form posts, a numeric string.
fn grade_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u8),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    #[default]
    Incomplete,
    Review,
    Accepted,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 3] =
        [AssignmentStatus::Incomplete, AssignmentStatus::Review, AssignmentStatus::Accepted];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Incomplete => "Incomplete",
            AssignmentStatus::Review => "Review",
            AssignmentStatus::Accepted => "Accepted",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| format!("unknown assignment status: {raw}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assignment_id: i64,
    #[serde(with = "dates::flexible")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: AssignmentStatus,
    #[serde(default)]
    pub link: Option<String>,
}

impl Assignment {
    #[must_use]
    pub fn subject_name(&self) -> &str {
        self.subject.as_ref().map_or("", Subject::display_name)
    }

    /// The subject id an edit form should preselect.
    #[must_use]
    pub fn effective_subject_id(&self) -> Option<i64> {
        self.subject_id.or_else(|| self.subject.as_ref().map(|s| s.subject_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    #[serde(with = "dates::flexible")]
    pub due_date: DateTime<Utc>,
    pub subject_id: i64,
    pub description: String,
    #[serde(default)]
    pub status: AssignmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
