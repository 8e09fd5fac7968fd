//! Role Model

use serde::{Deserialize, Serialize};

/// Authenticated role, derived from the backend's `is_admin` flag.
///
/// Kept as a two-variant enum rather than a boolean so role checks are
/// exhaustive matches and adding a role is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Maps the backend's `is_admin` boolean onto a role.
    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin { Role::Admin } else { Role::Employee }
    }

    pub fn is_admin(self) -> bool {
        match self {
            Role::Admin => true,
            Role::Employee => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender choices as stored by the backend (`Male` / `Female`, blank allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Parses the backend's string representation. Blank means unset.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serde adapter for the backend's blank-string convention: an unset gender
/// travels on the wire as `""`, not `null`.
pub(crate) mod gender_blank {
    use super::Gender;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Gender>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(g) => ser.serialize_str(g.as_str()),
            None => ser.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Gender>, D::Error> {
        let raw: Option<String> = Option::deserialize(de)?;
        Ok(raw.as_deref().and_then(Gender::parse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_is_admin() {
        assert_eq!(Role::from_is_admin(true), Role::Admin);
        assert_eq!(Role::from_is_admin(false), Role::Employee);
        assert!(Role::Admin.is_admin());
        assert!(!Role::Employee.is_admin());
    }

    #[test]
    fn gender_blank_is_unset() {
        assert_eq!(Gender::parse(""), None);
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse("other"), None);
    }
}
