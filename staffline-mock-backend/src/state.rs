//! In-memory backend state
//!
//! Accounts and cookie sessions behind the router state. Everything lives
//! in process; this crate exists to stand in for the real backend in tests
//! and demos, not to persist anything.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use shared::models::{EmployeeRecord, Gender};

/// One stored account: the serializable record plus its plain password.
/// Seeded passwords are compared verbatim; hashing is the real backend's
/// concern.
#[derive(Debug, Clone)]
pub struct Account {
    pub record: EmployeeRecord,
    pub password: String,
}

/// Fields accepted when creating an account.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub address: String,
    pub gender: Option<Gender>,
    pub mobile_number: String,
    pub profile_photo: Option<String>,
    pub is_active_permission: bool,
    pub is_admin: bool,
}

/// Shared mock-backend state.
#[derive(Debug, Default)]
pub struct BackendState {
    accounts: RwLock<Vec<Account>>,
    /// sessionid cookie value -> account id.
    sessions: RwLock<HashMap<String, i64>>,
    next_id: AtomicI64,
    requests: AtomicUsize,
}

impl BackendState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        })
    }

    /// Seed an admin account; convenience for tests.
    pub fn seed_admin(&self, username: &str, password: &str) -> EmployeeRecord {
        self.insert(NewAccount {
            username: username.to_string(),
            email: format!("{username}@staffline.test"),
            password: password.to_string(),
            is_active_permission: true,
            is_admin: true,
            ..NewAccount::default()
        })
    }

    /// Seed a regular employee account; convenience for tests.
    pub fn seed_employee(&self, username: &str, password: &str, active: bool) -> EmployeeRecord {
        self.insert(NewAccount {
            username: username.to_string(),
            email: format!("{username}@staffline.test"),
            password: password.to_string(),
            is_active_permission: active,
            is_admin: false,
            ..NewAccount::default()
        })
    }

    /// Insert an account, assigning the next id.
    pub fn insert(&self, new: NewAccount) -> EmployeeRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let profile_photo_url = new
            .profile_photo
            .as_ref()
            .map(|path| format!("http://testserver/media/{path}"));
        let record = EmployeeRecord {
            id,
            username: new.username,
            email: new.email,
            name: new.name,
            address: new.address,
            profile_photo: new.profile_photo,
            profile_photo_url,
            gender: new.gender,
            mobile_number: new.mobile_number,
            is_active_permission: new.is_active_permission,
            is_admin: new.is_admin,
            date_joined: Utc::now(),
        };
        let account = Account {
            record: record.clone(),
            password: new.password,
        };
        self.accounts.write().expect("state lock poisoned").push(account);
        record
    }

    pub fn find_by_username(&self, username: &str) -> Option<Account> {
        self.accounts
            .read()
            .expect("state lock poisoned")
            .iter()
            .find(|a| a.record.username == username)
            .cloned()
    }

    pub fn find_by_id(&self, id: i64) -> Option<Account> {
        self.accounts
            .read()
            .expect("state lock poisoned")
            .iter()
            .find(|a| a.record.id == id)
            .cloned()
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.find_by_username(username).is_some()
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.accounts
            .read()
            .expect("state lock poisoned")
            .iter()
            .any(|a| a.record.email == email)
    }

    /// Non-admin accounts in insertion order.
    pub fn employees(&self) -> Vec<EmployeeRecord> {
        self.accounts
            .read()
            .expect("state lock poisoned")
            .iter()
            .filter(|a| !a.record.is_admin)
            .map(|a| a.record.clone())
            .collect()
    }

    /// Mutate one stored record in place; returns the updated copy.
    pub fn update_record<F>(&self, id: i64, apply: F) -> Option<EmployeeRecord>
    where
        F: FnOnce(&mut EmployeeRecord),
    {
        let mut accounts = self.accounts.write().expect("state lock poisoned");
        let account = accounts.iter_mut().find(|a| a.record.id == id)?;
        apply(&mut account.record);
        Some(account.record.clone())
    }

    /// Current active-permission flag for an account; test observability.
    pub fn permission_flag(&self, id: i64) -> Option<bool> {
        self.find_by_id(id).map(|a| a.record.is_active_permission)
    }

    // ===== Sessions =====

    pub fn open_session(&self, account_id: i64) -> String {
        let sid = uuid::Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .expect("state lock poisoned")
            .insert(sid.clone(), account_id);
        sid
    }

    pub fn close_session(&self, sid: &str) {
        self.sessions.write().expect("state lock poisoned").remove(sid);
    }

    pub fn session_account(&self, sid: &str) -> Option<Account> {
        let id = *self.sessions.read().expect("state lock poisoned").get(sid)?;
        self.find_by_id(id)
    }

    // ===== Request accounting =====

    /// Counts every request that reached the router; lets tests prove a
    /// guarded operation issued no network call.
    pub fn note_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}
