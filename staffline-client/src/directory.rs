//! Admin employee directory and permission synchronization
//!
//! Holds the fetched employee list in backend order and runs the per-row
//! permission toggle state machine:
//!
//! ```text
//! Idle -> Pending -> Idle
//! ```
//!
//! A toggle is a no-op while its row is already `Pending`, so at most one
//! update per employee is ever in flight. The flag is only applied locally
//! after the backend acknowledges it; on failure the row is left untouched.
//! The pending set is advisory (it drives control disabling), not a lock:
//! toggles on different rows, or a refresh overlapping a toggle, may race
//! and the last response to arrive wins.

use std::collections::HashSet;

use shared::models::EmployeeRecord;

use crate::api::BackendApi;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::transport::Transport;

/// State of one directory row's toggle machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Pending,
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Backend acknowledged; the local flag now carries the new value.
    Applied { is_active_permission: bool },
    /// Rejected without issuing a request: the row was already pending, or
    /// the id is not in the local list.
    Rejected,
}

/// Admin view state: the employee list plus the set of ids with an
/// in-flight permission update.
#[derive(Debug, Default)]
pub struct EmployeeDirectory {
    rows: Vec<EmployeeRecord>,
    pending: HashSet<i64>,
}

impl EmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in backend response order.
    pub fn rows(&self) -> &[EmployeeRecord] {
        &self.rows
    }

    pub fn row(&self, employee_id: i64) -> Option<&EmployeeRecord> {
        self.rows.iter().find(|row| row.id == employee_id)
    }

    pub fn row_state(&self, employee_id: i64) -> RowState {
        if self.pending.contains(&employee_id) {
            RowState::Pending
        } else {
            RowState::Idle
        }
    }

    /// Ids currently marked pending.
    pub fn pending_ids(&self) -> &HashSet<i64> {
        &self.pending
    }

    /// Fetch the employee list, replacing the rows wholesale.
    ///
    /// Requires an admin session: a non-admin session short-circuits with
    /// [`ClientError::AdminRequired`] and issues no network call. The
    /// pending set survives a refresh so in-flight toggles keep their guard.
    pub async fn refresh<T: Transport>(
        &mut self,
        session: &Session,
        api: &BackendApi<T>,
    ) -> ClientResult<()> {
        if !session.is_admin() {
            return Err(ClientError::AdminRequired);
        }
        self.rows = api.employees().await?;
        Ok(())
    }

    /// `Idle -> Pending` transition: marks the row pending and yields the
    /// flipped flag to send. Returns `None` without side effects when the
    /// row is already pending or unknown.
    pub fn begin_toggle(&mut self, employee_id: i64) -> Option<bool> {
        if self.pending.contains(&employee_id) {
            return None;
        }
        let desired = !self.row(employee_id)?.is_active_permission;
        self.pending.insert(employee_id);
        Some(desired)
    }

    /// `Pending -> Idle` transition: removes the id from the pending set
    /// (exactly once per toggle, on settlement) and, when the backend
    /// acknowledged, replaces the row's flag in place. List order is never
    /// changed.
    pub fn settle_toggle(&mut self, employee_id: i64, acknowledged: Option<bool>) {
        self.pending.remove(&employee_id);
        if let Some(flag) = acknowledged {
            if let Some(row) = self.rows.iter_mut().find(|row| row.id == employee_id) {
                row.is_active_permission = flag;
            }
        }
    }

    /// Flip one employee's active-permission flag, synchronizing with the
    /// backend before touching local state.
    pub async fn toggle<T: Transport>(
        &mut self,
        api: &BackendApi<T>,
        employee_id: i64,
    ) -> ClientResult<ToggleOutcome> {
        let Some(desired) = self.begin_toggle(employee_id) else {
            return Ok(ToggleOutcome::Rejected);
        };

        match api.update_permissions(employee_id, desired).await {
            Ok(_) => {
                self.settle_toggle(employee_id, Some(desired));
                Ok(ToggleOutcome::Applied {
                    is_active_permission: desired,
                })
            }
            Err(err) => {
                tracing::warn!(employee_id, error = %err, "permission update failed");
                self.settle_toggle(employee_id, None);
                Err(err)
            }
        }
    }
}

/// Display string for a failed list fetch, cause mapped per failure class.
pub fn load_failure_message(err: &ClientError) -> String {
    format!("Failed to load employees. {}", err.fetch_failure_cause())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: i64, username: &str, active: bool) -> EmployeeRecord {
        EmployeeRecord {
            id,
            username: username.into(),
            email: format!("{username}@example.com"),
            name: String::new(),
            address: String::new(),
            profile_photo: None,
            profile_photo_url: None,
            gender: None,
            mobile_number: String::new(),
            is_active_permission: active,
            is_admin: false,
            date_joined: Utc::now(),
        }
    }

    fn directory_with(rows: Vec<EmployeeRecord>) -> EmployeeDirectory {
        EmployeeDirectory {
            rows,
            pending: HashSet::new(),
        }
    }

    #[test]
    fn begin_toggle_marks_pending_and_flips() {
        let mut dir = directory_with(vec![record(1, "bob", false)]);
        assert_eq!(dir.row_state(1), RowState::Idle);
        assert_eq!(dir.begin_toggle(1), Some(true));
        assert_eq!(dir.row_state(1), RowState::Pending);
        // Local flag untouched until settlement.
        assert!(!dir.row(1).unwrap().is_active_permission);
    }

    #[test]
    fn duplicate_toggle_while_pending_is_rejected() {
        let mut dir = directory_with(vec![record(1, "bob", false)]);
        assert_eq!(dir.begin_toggle(1), Some(true));
        assert_eq!(dir.begin_toggle(1), None);
        // Still exactly one pending entry.
        assert_eq!(dir.pending_ids().len(), 1);
    }

    #[test]
    fn settle_applies_acknowledged_flag_once() {
        let mut dir = directory_with(vec![record(1, "bob", false), record(2, "amy", true)]);
        dir.begin_toggle(1);
        dir.settle_toggle(1, Some(true));
        assert!(dir.row(1).unwrap().is_active_permission);
        assert_eq!(dir.row_state(1), RowState::Idle);
        assert!(!dir.pending_ids().contains(&1));
        // Order unchanged.
        assert_eq!(dir.rows()[0].id, 1);
        assert_eq!(dir.rows()[1].id, 2);
    }

    #[test]
    fn settle_without_ack_leaves_flag_unchanged() {
        let mut dir = directory_with(vec![record(1, "bob", false)]);
        dir.begin_toggle(1);
        dir.settle_toggle(1, None);
        assert!(!dir.row(1).unwrap().is_active_permission);
        assert_eq!(dir.row_state(1), RowState::Idle);
    }

    #[test]
    fn unknown_row_is_rejected() {
        let mut dir = directory_with(vec![record(1, "bob", false)]);
        assert_eq!(dir.begin_toggle(99), None);
        assert!(dir.pending_ids().is_empty());
    }

    #[test]
    fn round_trip_restores_original_state() {
        let mut dir = directory_with(vec![record(1, "bob", false)]);
        let first = dir.begin_toggle(1).unwrap();
        dir.settle_toggle(1, Some(first));
        let second = dir.begin_toggle(1).unwrap();
        dir.settle_toggle(1, Some(second));
        assert!(!dir.row(1).unwrap().is_active_permission);
    }
}
