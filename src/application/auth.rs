//! Admin directory and bearer-token gate.
//!
//! Passwords are bcrypt-hashed; a successful login issues an opaque token
//! with a fixed expiry. The HTTP layer only ever asks "does this token
//! authenticate" — principal details never leave this module.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::errors::DomainError;

const SESSION_HOURS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone)]
struct AdminAccount {
    name: String,
    password_hash: String,
    role: AdminRole,
}

#[derive(Debug, Clone)]
struct Session {
    email: String,
    expires_at: DateTime<Utc>,
}

pub struct AuthService {
    accounts: RwLock<HashMap<String, AdminAccount>>,
    sessions: RwLock<HashMap<String, Session>>,
    access_code: String,
}

impl AuthService {
    pub fn new(access_code: impl Into<String>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            access_code: access_code.into(),
        }
    }

    fn hash_password(password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|err| DomainError::internal(format!("password hashing failed: {err}")))
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// Seeds a superadmin from configuration at startup. Does nothing when
    /// the email is already registered.
    pub async fn bootstrap_super_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Ok(());
        }
        accounts.insert(
            email.to_string(),
            AdminAccount {
                name: "bootstrap".to_string(),
                password_hash: Self::hash_password(password)?,
                role: AdminRole::SuperAdmin,
            },
        );
        info!(email, "seeded bootstrap superadmin");
        Ok(())
    }

    pub async fn signup_super_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation("All fields are required"));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(DomainError::conflict("Super Admin already exists"));
        }
        accounts.insert(
            email.to_string(),
            AdminAccount {
                name: name.to_string(),
                password_hash: Self::hash_password(password)?,
                role: AdminRole::SuperAdmin,
            },
        );
        Ok(())
    }

    /// Creates an admin account. Requires the configured access code and a
    /// known superadmin identity.
    pub async fn create_admin(
        &self,
        super_admin_email: &str,
        name: &str,
        email: &str,
        password: &str,
        code: &str,
    ) -> Result<(), DomainError> {
        if code != self.access_code {
            return Err(DomainError::unauthorized("Invalid access code"));
        }

        let mut accounts = self.accounts.write().await;
        if !accounts
            .get(super_admin_email)
            .is_some_and(|account| account.role == AdminRole::SuperAdmin)
        {
            return Err(DomainError::forbidden("Unauthorized access"));
        }
        if accounts.contains_key(email) {
            return Err(DomainError::conflict("Admin already exists"));
        }
        accounts.insert(
            email.to_string(),
            AdminAccount {
                name: name.to_string(),
                password_hash: Self::hash_password(password)?,
                role: AdminRole::Admin,
            },
        );
        info!(email, "admin account created");
        Ok(())
    }

    pub async fn delete_admin(
        &self,
        super_admin_email: &str,
        admin_email: &str,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if !accounts
            .get(super_admin_email)
            .is_some_and(|account| account.role == AdminRole::SuperAdmin)
        {
            return Err(DomainError::forbidden("Unauthorized access"));
        }
        match accounts.get(admin_email) {
            Some(account) if account.role == AdminRole::Admin => {
                accounts.remove(admin_email);
                Ok(())
            }
            _ => Err(DomainError::not_found("Admin not found")),
        }
    }

    /// Verifies credentials and issues an opaque bearer token valid for
    /// twelve hours.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(email)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        if !Self::verify_password(password, &account.password_hash) {
            return Err(DomainError::unauthorized("Invalid password"));
        }

        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(
            token.clone(),
            Session {
                email: email.to_string(),
                expires_at: Utc::now() + Duration::hours(SESSION_HOURS),
            },
        );
        info!(email, name = %account.name, "login succeeded");
        Ok(token)
    }

    /// The capability check the HTTP gate calls: authenticated or rejected,
    /// nothing else.
    pub async fn authenticate(&self, token: &str) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Ok(()),
            Some(_) => {
                sessions.remove(token);
                Err(DomainError::forbidden("Invalid or expired token"))
            }
            None => Err(DomainError::forbidden("Invalid or expired token")),
        }
    }

    /// Email behind a live session, used only for audit logging.
    pub async fn session_email(&self, token: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(token)
            .map(|session| session.email.clone())
    }
}
