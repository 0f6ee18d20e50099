//! Authentication Service
//!
//! Register/login/logout over the user repository and the session store.
//! A successful login persists a claims record that the watcher then guards.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;

use super::validation::{validate_email, validate_password};
use super::watcher::{SessionWatcher, WatchHandle};
use super::{now_ms, SessionEvent, SessionStore};
use crate::domain::{DomainError, DomainResult, Session, TokenClaims, User};
use crate::repository::{Repository, UserRepository};

/// Hex blake3 digest of a password for storage and comparison
pub fn hash_password(password: &str) -> String {
    blake3::hash(password.as_bytes()).to_hex().to_string()
}

pub struct AuthService {
    users: Arc<UserRepository>,
    store: Arc<dyn SessionStore>,
    events: UnboundedSender<SessionEvent>,
}

impl AuthService {
    pub fn new(
        users: Arc<UserRepository>,
        store: Arc<dyn SessionStore>,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self { users, store, events }
    }

    /// Create an account and log it in
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<Session> {
        validate_email(email)?;
        validate_password(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "an account with email {} already exists",
                email
            )));
        }

        let user = User::new(0, email.to_string(), hash_password(password));
        let created = self.users.create(&user).await?;
        info!("registered user {} ({})", created.id, created.email);

        self.login(email, password).await
    }

    /// Check credentials and start a session
    ///
    /// The same error is returned for an unknown email and a wrong password,
    /// so callers cannot probe which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Session> {
        let user = self.users.find_by_email(email).await?;
        let user = match user {
            Some(u) if u.password_hash == hash_password(password) => u,
            _ => {
                return Err(DomainError::InvalidInput(
                    "invalid email or password".to_string(),
                ))
            }
        };

        let claims = TokenClaims::new(user.id, user.email.clone(), now_ms());
        self.store.set(&claims.to_record()?).await?;
        info!("user {} logged in", user.id);
        Ok(Session::new(claims))
    }

    /// End the session explicitly. The caller must also cancel any watch
    /// handle it holds.
    pub async fn logout(&self) -> DomainResult<()> {
        self.store.clear().await
    }

    /// The session behind the persisted record, if it is still valid.
    ///
    /// An expired or unreadable record ends the session on the spot (clear +
    /// expired event) rather than waiting for the next watcher tick.
    pub async fn current_session(&self) -> DomainResult<Option<Session>> {
        let Some(raw) = self.store.get().await? else {
            return Ok(None);
        };

        match TokenClaims::from_record(&raw) {
            Some(claims) if !claims.is_expired(now_ms()) => Ok(Some(Session::new(claims))),
            Some(_) => {
                self.end_expired().await?;
                Ok(None)
            }
            None => {
                warn!("malformed session record, ending session");
                self.end_expired().await?;
                Ok(None)
            }
        }
    }

    /// Start the background expiry watch for the current session
    pub fn watch(&self, tick: Duration) -> WatchHandle {
        SessionWatcher::start(self.store.clone(), self.events.clone(), tick)
    }

    async fn end_expired(&self) -> DomainResult<()> {
        self.store.clear().await?;
        info!("session expired");
        let _ = self.events.send(SessionEvent::Expired);
        Ok(())
    }
}
