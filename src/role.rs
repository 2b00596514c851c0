//! Coarse permission classes and small sets of them.
//!
//! Roles travel on the wire as `ROLE_STUDENT`, `ROLE_TEACHER`, `ROLE_ADMIN`.
//! Parsing also accepts the bare names in any case so a backend that drops the
//! prefix still works.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const ROLE_PREFIX: &str = "ROLE_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

/// Error for a role string that names none of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Canonical wire form, e.g. `ROLE_TEACHER`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "ROLE_STUDENT",
            Role::Teacher => "ROLE_TEACHER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Human-readable name for headers and CLI output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "Admin",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Student => 0b001,
            Role::Teacher => 0b010,
            Role::Admin => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let upper = raw.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);
        match bare {
            "STUDENT" => Ok(Role::Student),
            "TEACHER" => Ok(Role::Teacher),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownRole(raw.to_owned())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

// =============================================================================
// ROLE SET
// =============================================================================

/// A set of roles, e.g. the roles a view accepts or the views a role reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);
    pub const EVERY: RoleSet = RoleSet::of(&Role::ALL);

    /// Build a set from a list of roles. Usable in `const` route tables.
    #[must_use]
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: RoleSet) -> RoleSet {
        RoleSet(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersects(self, other: RoleSet) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::EMPTY, |set, role| set.union(RoleSet(role.bit())))
    }
}
