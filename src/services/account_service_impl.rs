//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::{FieldErrors, RegisterForm};
use crate::models::{User, UserKey};
use crate::services::account_service::{AccountError, AccountService, UserProfile};

const USERNAME_TAKEN: &str = "A user with that username already exists.";

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn register(&self, form: &RegisterForm) -> Result<User, AccountError> {
        let mut errors = form.validate().err().unwrap_or_default();
        let username = form.username.trim();

        if !errors.has("username") && self.store.get_user_by_username(username).await?.is_some() {
            errors.add("username", USERNAME_TAKEN);
        }

        if !errors.is_empty() {
            return Err(AccountError::Invalid(errors));
        }

        // A concurrent sign-up can still win the race; the unique index decides.
        let user = self
            .store
            .create_user(username, &form.password1, &self.security)
            .await?
            .ok_or_else(|| AccountError::Invalid(FieldErrors::single("username", USERNAME_TAKEN)))?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::InvalidCredentials);
        }

        self.store
            .verify_user_password(username.trim(), password)
            .await?
            .ok_or(AccountError::InvalidCredentials)
    }

    async fn session_user(&self, id: i32) -> Result<Option<User>, AccountError> {
        Ok(self.store.get_user(id).await?)
    }

    async fn profile(&self, key: &UserKey) -> Result<UserProfile, AccountError> {
        let user = match key {
            UserKey::Id(id) => self.store.get_user(*id).await?,
            UserKey::Username(name) => self.store.get_user_by_username(name).await?,
        }
        .ok_or_else(|| AccountError::NotFound(key.clone()))?;

        let leagues = self.store.list_leagues_for_member(user.id).await?;
        let managed_leagues = self.store.list_leagues_managed_by(user.id).await?;

        Ok(UserProfile {
            user,
            leagues,
            managed_leagues,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.store.list_users().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{fast_security, temp_store};

    fn form(username: &str, password: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            password1: password.to_string(),
            password2: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let service = SeaOrmAccountService::new(temp_store().await, fast_security());

        let alice = service.register(&form("alice", "password123")).await.unwrap();
        assert_eq!(alice.username, "alice");

        let logged_in = service.authenticate("alice", "password123").await.unwrap();
        assert_eq!(logged_in.id, alice.id);

        assert!(matches!(
            service.authenticate("alice", "wrong-password").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("nobody", "password123").await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let service = SeaOrmAccountService::new(temp_store().await, fast_security());

        service.register(&form("alice", "password123")).await.unwrap();
        let Err(AccountError::Invalid(errors)) =
            service.register(&form("alice", "another-pass")).await
        else {
            panic!("duplicate username should be rejected");
        };
        assert_eq!(errors.get("username"), [USERNAME_TAKEN]);

        assert_eq!(service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_by_id_and_username() {
        let service = SeaOrmAccountService::new(temp_store().await, fast_security());
        let bob = service.register(&form("bob", "password123")).await.unwrap();

        let by_id = service.profile(&UserKey::Id(bob.id)).await.unwrap();
        let by_name = service
            .profile(&UserKey::Username("bob".to_string()))
            .await
            .unwrap();
        assert_eq!(by_id.user, by_name.user);
        assert!(by_id.leagues.is_empty());

        assert!(matches!(
            service.profile(&UserKey::Id(999)).await,
            Err(AccountError::NotFound(UserKey::Id(999)))
        ));
        assert!(service.session_user(999).await.unwrap().is_none());
    }
}
