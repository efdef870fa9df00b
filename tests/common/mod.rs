#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use ad_lockout_backend::directory::{filter, Directory, DirectoryEntry, DirectorySession};
use ad_lockout_backend::error::{Error, Result};
use ad_lockout_backend::middleware::auth::Claims;
use ad_lockout_backend::routes::build_router;
use ad_lockout_backend::AppState;
use async_trait::async_trait;
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};

pub const BASE_DN: &str = "OU=Users,DC=corp,DC=example";
pub const JWT_SECRET: &str = "test_secret_key";

/// 2024-03-15T09:30:00Z
pub const LOCKED_AT: i64 = 133_549_686_000_000_000;

#[derive(Debug, Clone)]
pub struct FakeAccount {
    pub dn: String,
    pub name: String,
    pub sam_account_name: String,
    pub lockout_time: i64,
}

impl FakeAccount {
    pub fn new(name: &str, sam_account_name: &str, lockout_time: i64) -> Self {
        Self {
            dn: format!("CN={},{}", name, BASE_DN),
            name: name.to_string(),
            sam_account_name: sam_account_name.to_string(),
            lockout_time,
        }
    }

    fn to_entry(&self, attrs: &[String]) -> DirectoryEntry {
        let mut entry = DirectoryEntry::new(self.dn.clone());
        for attr in attrs {
            let value = match attr.as_str() {
                filter::ATTR_NAME => self.name.clone(),
                filter::ATTR_SAM_ACCOUNT_NAME => self.sam_account_name.clone(),
                filter::ATTR_LOCKOUT_TIME => self.lockout_time.to_string(),
                filter::ATTR_DISTINGUISHED_NAME => self.dn.clone(),
                _ => continue,
            };
            entry = entry.with_attr(attr.clone(), value);
        }
        entry
    }
}

#[derive(Debug, Default)]
struct FakeState {
    accounts: Vec<FakeAccount>,
    connects: usize,
    modifies: usize,
    fail_bind: bool,
    reject_modify: bool,
}

/// In-memory stand-in for an AD domain controller.
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDirectory {
    pub fn with_accounts(accounts: Vec<FakeAccount>) -> Self {
        let directory = Self::default();
        directory.lock().accounts = accounts;
        directory
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake directory poisoned")
    }

    pub fn connects(&self) -> usize {
        self.lock().connects
    }

    pub fn modifies(&self) -> usize {
        self.lock().modifies
    }

    pub fn fail_bind(&self) {
        self.lock().fail_bind = true;
    }

    pub fn reject_modify(&self) {
        self.lock().reject_modify = true;
    }

    pub fn lockout_time(&self, sam_account_name: &str) -> Option<i64> {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.sam_account_name == sam_account_name)
            .map(|a| a.lockout_time)
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn connect(&self) -> Result<Box<dyn DirectorySession>> {
        let mut state = self.lock();
        state.connects += 1;
        if state.fail_bind {
            return Err(Error::Ldap(ldap3::LdapError::LdapResult {
                result: ldap3::LdapResult {
                    rc: 49,
                    matched: String::new(),
                    text: "invalid credentials".to_string(),
                    refs: Vec::new(),
                    ctrls: Vec::new(),
                },
            }));
        }
        Ok(Box::new(FakeSession {
            state: self.state.clone(),
        }))
    }
}

struct FakeSession {
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl DirectorySession for FakeSession {
    async fn search(
        &mut self,
        base: &str,
        search_filter: &str,
        attrs: Vec<String>,
    ) -> Result<Vec<DirectoryEntry>> {
        let state = self.state.lock().expect("fake directory poisoned");
        if base != BASE_DN {
            return Ok(Vec::new());
        }

        let sam_prefix = "(&(objectCategory=person)(objectClass=user)(sAMAccountName=";
        let matches: Vec<&FakeAccount> = if search_filter == filter::all_users() {
            state.accounts.iter().collect()
        } else if search_filter == filter::locked_out_users() {
            state.accounts.iter().filter(|a| a.lockout_time >= 1).collect()
        } else if let Some(value) = search_filter
            .strip_prefix(sam_prefix)
            .and_then(|rest| rest.strip_suffix("))"))
        {
            state
                .accounts
                .iter()
                .filter(|a| a.sam_account_name.eq_ignore_ascii_case(value))
                .collect()
        } else {
            Vec::new()
        };

        Ok(matches.into_iter().map(|a| a.to_entry(&attrs)).collect())
    }

    async fn modify_replace(&mut self, dn: &str, attr: &str, value: &str) -> Result<bool> {
        let mut state = self.state.lock().expect("fake directory poisoned");
        state.modifies += 1;
        if state.reject_modify || attr != filter::ATTR_LOCKOUT_TIME {
            return Ok(false);
        }
        let Ok(ticks) = value.parse::<i64>() else {
            return Ok(false);
        };
        match state.accounts.iter_mut().find(|a| a.dn == dn) {
            Some(account) => {
                account.lockout_time = ticks;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn unbind(&mut self) -> Result<()> {
        Ok(())
    }
}

pub fn setup_app(directory: &FakeDirectory) -> Router {
    let state = AppState::with_directory(Arc::new(directory.clone()), BASE_DN, JWT_SECRET);
    build_router(state, 100)
}

pub fn token(role: &str) -> String {
    let claims = Claims {
        sub: "admin@corp.example".to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}

pub fn sample_accounts() -> Vec<FakeAccount> {
    vec![
        FakeAccount::new("Jane Doe", "jdoe", LOCKED_AT),
        FakeAccount::new("John Smith", "jsmith", 0),
    ]
}
