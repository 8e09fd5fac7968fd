//! Mock backend API
//!
//! Implements the employee-management REST contract the way the real
//! backend answers it: cookie sessions, a `csrftoken` cookie echoed back on
//! the `X-CSRFToken` header for non-exempt unsafe methods, field-keyed
//! validation errors, and single-key `{"error": ...}` authorization errors.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use shared::client::{LoginRequest, PermissionUpdate, ProfileUpdate};
use shared::models::Gender;
use tower_http::trace::TraceLayer;

use crate::state::{Account, BackendState, NewAccount};

const SESSION_COOKIE: &str = "sessionid";
const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "x-csrftoken";

/// Builds the mock router. All endpoints live under `/api`, matching the
/// real backend's URL layout.
pub fn router(state: Arc<BackendState>) -> Router {
    let api = Router::new()
        .route("/admin/login/", post(admin_login))
        .route("/user/login/", post(user_login))
        .route("/logout/", post(logout))
        .route("/current-user/", get(current_user))
        .route("/debug-user/", get(debug_user))
        .route("/register-employee/", post(register_employee))
        .route("/employees/", get(list_employees))
        .route("/employees/{id}/permissions/", put(update_permissions))
        .route("/update-profile/", put(update_profile));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn count_requests(
    State(state): State<Arc<BackendState>>,
    request: Request,
    next: Next,
) -> Response {
    state.note_request();
    next.run(request).await
}

// ===== Helpers =====

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

fn session_account(state: &BackendState, headers: &HeaderMap) -> Option<Account> {
    let sid = cookie_value(headers, SESSION_COOKIE)?;
    state.session_account(&sid)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn unauthenticated() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "detail": "Authentication credentials were not provided." })),
    )
        .into_response()
}

/// CSRF enforcement for the non-exempt unsafe endpoints: the token cookie
/// must be present and echoed back on the header.
fn csrf_check(headers: &HeaderMap) -> Result<(), Response> {
    let cookie = cookie_value(headers, CSRF_COOKIE);
    let header = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    match (cookie, header) {
        (Some(cookie), Some(header)) if cookie == header => Ok(()),
        _ => Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "detail": "CSRF Failed: CSRF token missing or incorrect." })),
        )
            .into_response()),
    }
}

fn require_admin(state: &BackendState, headers: &HeaderMap, denial: &str) -> Result<Account, Response> {
    match session_account(state, headers) {
        Some(account) if account.record.is_admin => Ok(account),
        _ => Err(error_response(StatusCode::FORBIDDEN, denial)),
    }
}

/// Serializes a login success: session + fresh CSRF cookies and the user
/// envelope.
fn login_success(state: &BackendState, account: &Account, message: &str) -> Response {
    let sid = state.open_session(account.record.id);
    let csrf = uuid::Uuid::new_v4().simple().to_string();

    let mut response = Json(json!({
        "message": message,
        "user": account.record,
    }))
    .into_response();
    let headers = response.headers_mut();
    if let Ok(value) = format!("{SESSION_COOKIE}={sid}; Path=/; HttpOnly").parse() {
        headers.append(SET_COOKIE, value);
    }
    if let Ok(value) = format!("{CSRF_COOKIE}={csrf}; Path=/").parse() {
        headers.append(SET_COOKIE, value);
    }
    response
}

fn authenticate(state: &BackendState, req: &LoginRequest) -> Result<Account, Response> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "non_field_errors": ["Both username and password required"] })),
        )
            .into_response());
    }
    match state.find_by_username(&req.username) {
        Some(account) if account.password == req.password => Ok(account),
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "non_field_errors": ["Invalid credentials"] })),
        )
            .into_response()),
    }
}

// ===== Auth handlers =====

async fn admin_login(
    State(state): State<Arc<BackendState>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let account = match authenticate(&state, &req) {
        Ok(account) => account,
        Err(response) => return response,
    };
    if !account.record.is_admin {
        return error_response(StatusCode::FORBIDDEN, "Not an admin user");
    }
    tracing::info!(username = %account.record.username, "admin login");
    login_success(&state, &account, "Admin login successful")
}

async fn user_login(
    State(state): State<Arc<BackendState>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let account = match authenticate(&state, &req) {
        Ok(account) => account,
        Err(response) => return response,
    };
    if account.record.is_admin {
        return error_response(StatusCode::FORBIDDEN, "Admin users should use admin login");
    }
    tracing::info!(username = %account.record.username, "user login");
    login_success(&state, &account, "User login successful")
}

async fn logout(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Some(sid) = cookie_value(&headers, SESSION_COOKIE) {
        state.close_session(&sid);
    }
    let mut response = Json(json!({ "message": "Logged out successfully" })).into_response();
    if let Ok(value) = format!("{SESSION_COOKIE}=; Path=/; Max-Age=0").parse() {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

async fn current_user(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    match session_account(&state, &headers) {
        Some(account) => Json(account.record).into_response(),
        None => unauthenticated(),
    }
}

async fn debug_user(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    let sid = cookie_value(&headers, SESSION_COOKIE);
    let account = session_account(&state, &headers);
    match account {
        Some(account) => Json(json!({
            "user_authenticated": true,
            "user_id": account.record.id,
            "username": account.record.username,
            "is_admin": account.record.is_admin,
            "is_active": true,
            "session_key": sid,
        }))
        .into_response(),
        None => Json(json!({
            "user_authenticated": false,
            "user_id": null,
            "username": "Anonymous",
            "is_admin": false,
            "is_active": false,
            "session_key": sid,
        }))
        .into_response(),
    }
}

// ===== Employee handlers =====

#[derive(Debug, Default)]
struct RegistrationFields {
    username: String,
    email: String,
    password: String,
    name: String,
    address: String,
    gender: Option<Gender>,
    mobile_number: String,
    photo: Option<String>,
    is_active_permission: bool,
}

async fn collect_registration(multipart: &mut Multipart) -> Result<RegistrationFields, Response> {
    let mut fields = RegistrationFields {
        is_active_permission: true,
        ..RegistrationFields::default()
    };
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid multipart payload: {err}"),
                ));
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        if name == "profile_photo" {
            let file_name = field.file_name().unwrap_or("photo").to_string();
            // Body consumed to mirror the real upload path; content discarded.
            if field.bytes().await.is_err() {
                return Err(error_response(StatusCode::BAD_REQUEST, "Invalid file upload"));
            }
            fields.photo = Some(format!("profiles/{file_name}"));
            continue;
        }
        let value = match field.text().await {
            Ok(value) => value,
            Err(err) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid multipart payload: {err}"),
                ));
            }
        };
        match name.as_str() {
            "username" => fields.username = value,
            "email" => fields.email = value,
            "password" => fields.password = value,
            "name" => fields.name = value,
            "address" => fields.address = value,
            "gender" => fields.gender = Gender::parse(&value),
            "mobile_number" => fields.mobile_number = value,
            "is_active_permission" => {
                fields.is_active_permission =
                    matches!(value.to_ascii_lowercase().as_str(), "true" | "1")
            }
            _ => {}
        }
    }
    Ok(fields)
}

fn validate_registration(state: &BackendState, fields: &RegistrationFields) -> Map<String, Value> {
    let mut errors = Map::new();
    let required = [
        ("username", &fields.username),
        ("email", &fields.email),
        ("password", &fields.password),
    ];
    for (field, value) in required {
        if value.is_empty() {
            errors.insert(field.to_string(), json!(["This field is required."]));
        }
    }
    if !fields.password.is_empty() && fields.password.len() < 6 {
        errors.insert(
            "password".to_string(),
            json!(["Ensure this field has at least 6 characters."]),
        );
    }
    if !fields.username.is_empty() && state.username_taken(&fields.username) {
        errors.insert("username".to_string(), json!(["Username already exists"]));
    }
    if !fields.email.is_empty() && state.email_taken(&fields.email) {
        errors.insert("email".to_string(), json!(["Email already exists"]));
    }
    errors
}

async fn register_employee(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) =
        require_admin(&state, &headers, "Only admin can register employees").map(|_| ())
    {
        return response;
    }
    if let Err(response) = csrf_check(&headers) {
        return response;
    }

    let fields = match collect_registration(&mut multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };

    let errors = validate_registration(&state, &fields);
    if !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(Value::Object(errors))).into_response();
    }

    // Registered employees are never admin, whatever the payload says.
    let record = state.insert(NewAccount {
        username: fields.username,
        email: fields.email,
        password: fields.password,
        name: fields.name,
        address: fields.address,
        gender: fields.gender,
        mobile_number: fields.mobile_number,
        profile_photo: fields.photo,
        is_active_permission: fields.is_active_permission,
        is_admin: false,
    });
    tracing::info!(username = %record.username, id = record.id, "employee registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Employee registered successfully",
            "user": record,
        })),
    )
        .into_response()
}

async fn list_employees(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(response) =
        require_admin(&state, &headers, "Only admin can view employees").map(|_| ())
    {
        return response;
    }
    Json(state.employees()).into_response()
}

async fn update_permissions(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(update): Json<PermissionUpdate>,
) -> Response {
    if let Err(response) =
        require_admin(&state, &headers, "Only admin can update permissions").map(|_| ())
    {
        return response;
    }
    if let Err(response) = csrf_check(&headers) {
        return response;
    }

    let target = state.find_by_id(id).filter(|a| !a.record.is_admin);
    if target.is_none() {
        return error_response(StatusCode::NOT_FOUND, "Employee not found");
    }

    let record = state.update_record(id, |record| {
        record.is_active_permission = update.is_active_permission;
    });
    match record {
        Some(record) => {
            tracing::info!(id, flag = update.is_active_permission, "permissions updated");
            Json(json!({
                "message": "Permissions updated successfully",
                "user": record,
            }))
            .into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Employee not found"),
    }
}

async fn update_profile(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    let account = match session_account(&state, &headers) {
        Some(account) => account,
        None => return unauthenticated(),
    };
    if let Err(response) = csrf_check(&headers) {
        return response;
    }

    let record = state.update_record(account.record.id, |record| {
        if let Some(name) = update.name.clone() {
            record.name = name;
        }
        if let Some(address) = update.address.clone() {
            record.address = address;
        }
        if let Some(email) = update.email.clone() {
            record.email = email;
        }
    });
    match record {
        Some(record) => Json(json!({
            "message": "Profile updated successfully",
            "user": record,
        }))
        .into_response(),
        None => unauthenticated(),
    }
}
