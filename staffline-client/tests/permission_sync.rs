//! Employee directory and permission-toggle synchronization.

use std::sync::Arc;

use staffline_client::{
    ClientError, EmployeeDirectory, OneshotTransport, RowState, StafflineClient, ToggleOutcome,
    directory::load_failure_message,
};
use staffline_mock_backend::{BackendState, router};

fn client_for(state: Arc<BackendState>) -> StafflineClient<OneshotTransport> {
    StafflineClient::new(OneshotTransport::new(router(state)))
}

async fn admin_client(state: Arc<BackendState>) -> StafflineClient<OneshotTransport> {
    state.seed_admin("admin", "admin123");
    let mut client = client_for(state);
    client.login_admin("admin", "admin123").await.unwrap();
    client
}

#[tokio::test]
async fn refresh_lists_employees_in_backend_order() {
    let state = BackendState::new();
    state.seed_employee("bob", "bob12345", false);
    state.seed_employee("amy", "amy12345", true);
    let client = admin_client(state).await;

    let mut dir = EmployeeDirectory::new();
    dir.refresh(client.session(), client.api()).await.unwrap();

    let usernames: Vec<&str> = dir.rows().iter().map(|r| r.username.as_str()).collect();
    assert_eq!(usernames, vec!["bob", "amy"]);
    // The admin account itself is never listed.
    assert!(dir.rows().iter().all(|r| !r.is_admin));
}

#[tokio::test]
async fn toggle_round_trip_synchronizes_both_sides() {
    let state = BackendState::new();
    let bob = state.seed_employee("bob", "bob12345", false);
    let client = admin_client(state.clone()).await;

    let mut dir = EmployeeDirectory::new();
    dir.refresh(client.session(), client.api()).await.unwrap();
    assert!(!dir.row(bob.id).unwrap().is_active_permission);

    let outcome = dir.toggle(client.api(), bob.id).await.unwrap();
    assert_eq!(
        outcome,
        ToggleOutcome::Applied {
            is_active_permission: true
        }
    );
    assert!(dir.row(bob.id).unwrap().is_active_permission);
    assert_eq!(state.permission_flag(bob.id), Some(true));
    // The toggle settled; no pending entries left behind.
    assert!(dir.pending_ids().is_empty());
    assert_eq!(dir.row_state(bob.id), RowState::Idle);

    // Flipping back is symmetric.
    let outcome = dir.toggle(client.api(), bob.id).await.unwrap();
    assert_eq!(
        outcome,
        ToggleOutcome::Applied {
            is_active_permission: false
        }
    );
    assert_eq!(state.permission_flag(bob.id), Some(false));
}

#[tokio::test]
async fn toggle_of_unknown_employee_is_rejected_locally() {
    let state = BackendState::new();
    state.seed_employee("bob", "bob12345", false);
    let client = admin_client(state.clone()).await;

    let mut dir = EmployeeDirectory::new();
    dir.refresh(client.session(), client.api()).await.unwrap();

    let before = state.request_count();
    let outcome = dir.toggle(client.api(), 999).await.unwrap();
    assert_eq!(outcome, ToggleOutcome::Rejected);
    assert_eq!(state.request_count(), before);
}

#[tokio::test]
async fn failed_toggle_leaves_the_row_unchanged() {
    let state = BackendState::new();
    let bob = state.seed_employee("bob", "bob12345", false);
    let client = admin_client(state.clone()).await;

    let mut dir = EmployeeDirectory::new();
    dir.refresh(client.session(), client.api()).await.unwrap();

    // Employee vanishes server-side between refresh and toggle.
    state.update_record(bob.id, |record| record.is_admin = true);
    let err = dir.toggle(client.api(), bob.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert!(!dir.row(bob.id).unwrap().is_active_permission);
    assert_eq!(dir.row_state(bob.id), RowState::Idle);
}

#[tokio::test]
async fn non_admin_refresh_is_guarded_without_a_network_call() {
    let state = BackendState::new();
    state.seed_employee("bob", "bob12345", true);
    let mut client = client_for(state.clone());
    client.login_employee("bob", "bob12345").await.unwrap();

    let before = state.request_count();
    let mut dir = EmployeeDirectory::new();
    let err = dir
        .refresh(client.session(), client.api())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AdminRequired));
    assert_eq!(state.request_count(), before);
    assert_eq!(
        load_failure_message(&err),
        "Failed to load employees. Access denied. Admin privileges required."
    );
}

#[tokio::test]
async fn anonymous_refresh_is_guarded_too() {
    let state = BackendState::new();
    let client = client_for(state.clone());

    let mut dir = EmployeeDirectory::new();
    let err = dir
        .refresh(client.session(), client.api())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::AdminRequired));
    assert_eq!(state.request_count(), 0);
}

#[tokio::test]
async fn refresh_keeps_pending_guard_alive() {
    let state = BackendState::new();
    let bob = state.seed_employee("bob", "bob12345", false);
    let client = admin_client(state).await;

    let mut dir = EmployeeDirectory::new();
    dir.refresh(client.session(), client.api()).await.unwrap();
    assert_eq!(dir.begin_toggle(bob.id), Some(true));

    // A refresh landing mid-toggle must not drop the in-flight guard.
    dir.refresh(client.session(), client.api()).await.unwrap();
    assert_eq!(dir.row_state(bob.id), RowState::Pending);
    assert_eq!(dir.begin_toggle(bob.id), None);

    dir.settle_toggle(bob.id, Some(true));
    assert_eq!(dir.row_state(bob.id), RowState::Idle);
}
