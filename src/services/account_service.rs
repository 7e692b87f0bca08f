//! Domain service for accounts: registration, credentials and profiles.

use thiserror::Error;

use crate::domain::{FieldErrors, RegisterForm};
use crate::models::{League, User, UserKey};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User {0} not found")]
    NotFound(UserKey),

    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A user together with the leagues shown on their profile.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub leagues: Vec<League>,
    pub managed_leagues: Vec<League>,
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Creates a user from a sign-up form.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Invalid`] with field errors when the form is
    /// rejected, including when the username is taken.
    async fn register(&self, form: &RegisterForm) -> Result<User, AccountError>;

    /// Checks a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown user or a wrong password.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AccountError>;

    /// Resolves the user id stored in a session. A deleted user yields `None`.
    async fn session_user(&self, id: i32) -> Result<Option<User>, AccountError>;

    async fn profile(&self, key: &UserKey) -> Result<UserProfile, AccountError>;

    async fn list_users(&self) -> Result<Vec<User>, AccountError>;
}
