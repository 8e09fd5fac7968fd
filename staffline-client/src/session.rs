//! Session state
//!
//! The client's belief about the currently authenticated user. Held as one
//! immutable value owned by the controller and replaced atomically on
//! bootstrap, login, and logout; views borrow it, they never mutate it.

use shared::models::{EmployeeRecord, Role};

/// Current session: anonymous, or signed in with a role derived from the
/// user's `is_admin` flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    SignedIn { user: EmployeeRecord, role: Role },
}

impl Session {
    /// Builds a signed-in session from a backend user snapshot.
    pub fn signed_in(user: EmployeeRecord) -> Self {
        let role = user.role();
        Session::SignedIn { user, role }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn { .. })
    }

    pub fn user(&self) -> Option<&EmployeeRecord> {
        match self {
            Session::SignedIn { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Session::SignedIn { role, .. } => Some(*role),
            Session::Anonymous => None,
        }
    }

    /// True only for a signed-in admin session.
    pub fn is_admin(&self) -> bool {
        match self.role() {
            Some(Role::Admin) => true,
            Some(Role::Employee) | None => false,
        }
    }
}
