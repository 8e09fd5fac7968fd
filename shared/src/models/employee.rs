//! Employee Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::{Gender, Role, gender_blank};

/// Employee record as serialized by the backend.
///
/// An immutable snapshot: the client never derives fields from it beyond
/// display fallbacks. Optional text fields follow the backend's blank-string
/// convention (empty string rather than null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Storage path of the photo, if one was uploaded.
    #[serde(default)]
    pub profile_photo: Option<String>,
    /// Resolved URL for the photo, if one was uploaded.
    #[serde(default)]
    pub profile_photo_url: Option<String>,
    #[serde(default, with = "gender_blank")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub mobile_number: String,
    pub is_active_permission: bool,
    pub is_admin: bool,
    pub date_joined: DateTime<Utc>,
}

impl EmployeeRecord {
    /// Role derived from the `is_admin` flag.
    pub fn role(&self) -> Role {
        Role::from_is_admin(self.is_admin)
    }

    /// Name to display, falling back to the username when the name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> EmployeeRecord {
        EmployeeRecord {
            id: 1,
            username: "bob".into(),
            email: "bob@example.com".into(),
            name: name.into(),
            address: String::new(),
            profile_photo: None,
            profile_photo_url: None,
            gender: None,
            mobile_number: String::new(),
            is_active_permission: true,
            is_admin: false,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(record("Bob Smith").display_name(), "Bob Smith");
        assert_eq!(record("").display_name(), "bob");
        assert_eq!(record("   ").display_name(), "bob");
    }

    #[test]
    fn deserializes_backend_payload() {
        let json = serde_json::json!({
            "id": 7,
            "username": "jane",
            "email": "jane@example.com",
            "name": "Jane",
            "address": "",
            "profile_photo": null,
            "profile_photo_url": null,
            "gender": "",
            "mobile_number": "",
            "is_active_permission": false,
            "is_admin": false,
            "date_joined": "2024-03-01T09:30:00Z"
        });
        let record: EmployeeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.gender, None);
        assert_eq!(record.role(), Role::Employee);
        assert!(!record.is_active_permission);
    }
}
