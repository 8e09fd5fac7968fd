//! Session lifecycle against the in-process mock backend.

use std::sync::Arc;

use staffline_client::{OneshotTransport, Role, Session, StafflineClient};
use staffline_mock_backend::{BackendState, router};

fn client_for(state: Arc<BackendState>) -> StafflineClient<OneshotTransport> {
    StafflineClient::new(OneshotTransport::new(router(state)))
}

#[tokio::test]
async fn bootstrap_without_session_is_anonymous() {
    let state = BackendState::new();
    let mut client = client_for(state);

    let session = client.bootstrap().await;
    assert!(matches!(session, Session::Anonymous));
    assert!(!client.session().is_signed_in());
}

#[tokio::test]
async fn admin_login_establishes_an_admin_session() {
    let state = BackendState::new();
    state.seed_admin("admin", "admin123");
    let mut client = client_for(state);

    let user = client.login_admin("admin", "admin123").await.unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(client.session().role(), Some(Role::Admin));

    // The cookie session survives a fresh bootstrap.
    let session = client.bootstrap().await;
    assert!(session.is_admin());
}

#[tokio::test]
async fn employee_login_establishes_an_employee_session() {
    let state = BackendState::new();
    state.seed_employee("bob", "bob12345", true);
    let mut client = client_for(state);

    client.login_employee("bob", "bob12345").await.unwrap();
    assert_eq!(client.session().role(), Some(Role::Employee));
    assert!(!client.session().is_admin());
}

#[tokio::test]
async fn failed_login_leaves_the_session_untouched() {
    let state = BackendState::new();
    state.seed_admin("admin", "admin123");
    let mut client = client_for(state);

    let err = client.login_admin("admin", "wrong").await.unwrap_err();
    assert_eq!(err.login_failure_message(), "Login failed");
    assert!(matches!(client.session(), Session::Anonymous));
}

#[tokio::test]
async fn employee_on_admin_endpoint_is_turned_away() {
    let state = BackendState::new();
    state.seed_employee("bob", "bob12345", true);
    let mut client = client_for(state);

    let err = client.login_admin("bob", "bob12345").await.unwrap_err();
    assert_eq!(err.login_failure_message(), "Not an admin user");
    assert!(matches!(client.session(), Session::Anonymous));
}

#[tokio::test]
async fn logout_clears_session_on_both_sides() {
    let state = BackendState::new();
    state.seed_admin("admin", "admin123");
    let mut client = client_for(state);

    client.login_admin("admin", "admin123").await.unwrap();
    client.logout().await;
    assert!(matches!(client.session(), Session::Anonymous));

    // The backend session is gone too, not only the local snapshot.
    let session = client.bootstrap().await;
    assert!(matches!(session, Session::Anonymous));
}

#[tokio::test]
async fn logout_is_fail_open_without_a_session() {
    let state = BackendState::new();
    let mut client = client_for(state);

    // Nothing to terminate; logout must still resolve to anonymous.
    client.logout().await;
    assert!(matches!(client.session(), Session::Anonymous));
}

#[tokio::test]
async fn profile_update_refreshes_the_session_snapshot() {
    let state = BackendState::new();
    state.seed_employee("bob", "bob12345", true);
    let mut client = client_for(state);

    client.login_employee("bob", "bob12345").await.unwrap();
    let update = staffline_client::ProfileUpdate::default().name("Robert Plant");
    let user = client.update_profile(&update).await.unwrap();
    assert_eq!(user.name, "Robert Plant");
    assert_eq!(
        client.session().user().map(|u| u.name.as_str()),
        Some("Robert Plant")
    );
}

#[tokio::test]
async fn debug_status_reports_authentication_state() {
    let state = BackendState::new();
    state.seed_admin("admin", "admin123");
    let mut client = client_for(state);

    let status = client.debug_status().await.unwrap();
    assert!(!status.user_authenticated);

    client.login_admin("admin", "admin123").await.unwrap();
    let status = client.debug_status().await.unwrap();
    assert!(status.user_authenticated);
    assert!(status.is_admin);
}
