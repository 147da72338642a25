//! Auth gateway
//!
//! Validates credentials against the account store, owns the session
//! lifecycle, and is the single authority consulted when gating CRUD routes.
//! The account repository and session store are injected at construction.

use crate::auth::password::verify_password;
use crate::auth::session::{Session, SessionStore};
use crate::core::error::{AdminError, Result};
use crate::db::repository::AccountRepository;
use std::sync::Arc;

pub struct AuthGateway {
    accounts: Arc<AccountRepository>,
    sessions: SessionStore,
}

impl AuthGateway {
    pub fn new(accounts: Arc<AccountRepository>, sessions: SessionStore) -> Self {
        Self { accounts, sessions }
    }

    /// Validate credentials and open a session.
    ///
    /// Every credential failure maps to the same `InvalidCredentials` error
    /// so callers cannot probe which usernames exist.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or(AdminError::InvalidCredentials)?;

        let valid = verify_password(password, &account.password_hash)?;
        if !valid {
            tracing::warn!(username = %username, "Login attempt with invalid password");
            return Err(AdminError::InvalidCredentials);
        }

        let session = self.sessions.create(account.id, &account.username).await;
        tracing::info!(user_id = account.id, username = %account.username, "Login successful");

        Ok(session)
    }

    /// Destroy a session. Idempotent: ending an absent session still
    /// reports success.
    pub async fn end_session(&self, token: &str) {
        self.sessions.destroy(token).await;
    }

    /// Return the current session state for a token, without side effects
    /// beyond dropping an expired entry.
    pub async fn check_session(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::db::manager::DatabaseManager;

    async fn test_gateway() -> AuthGateway {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        let accounts = Arc::new(AccountRepository::new(db));
        accounts
            .create("admin", &hash_password("admin123").unwrap())
            .await
            .unwrap();
        AuthGateway::new(accounts, SessionStore::new(3600))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let gateway = test_gateway().await;

        let session = gateway.authenticate("admin", "admin123").await.unwrap();
        assert_eq!(session.username, "admin");

        let checked = gateway.check_session(&session.token).await.unwrap();
        assert_eq!(checked.user_id, session.user_id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let gateway = test_gateway().await;

        let wrong_pass = gateway.authenticate("admin", "nope").await.unwrap_err();
        let unknown_user = gateway.authenticate("ghost", "nope").await.unwrap_err();

        assert_eq!(wrong_pass.public_message(), unknown_user.public_message());
        assert!(matches!(wrong_pass, AdminError::InvalidCredentials));
        assert!(matches!(unknown_user, AdminError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let gateway = test_gateway().await;
        assert!(gateway.authenticate("Admin", "admin123").await.is_err());
    }

    #[tokio::test]
    async fn test_end_session_is_idempotent() {
        let gateway = test_gateway().await;
        let session = gateway.authenticate("admin", "admin123").await.unwrap();

        gateway.end_session(&session.token).await;
        assert!(gateway.check_session(&session.token).await.is_none());
        gateway.end_session(&session.token).await;
    }
}
