use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::fmt;

use super::pages;
use crate::services::{AccountError, LeagueError};

/// Failures that end a request with an error page.
#[derive(Debug)]
pub enum PageError {
    NotFound(String),

    Internal(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for PageError {}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our end.".to_string(),
                )
            }
        };

        let markup = pages::error_page(status, &message);
        (status, Html(markup.into_string())).into_response()
    }
}

impl PageError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<tower_sessions::session::Error> for PageError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("Session error: {err}"))
    }
}

impl From<AccountError> for PageError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(key) => Self::not_found("User", key),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Only the lookup failures map directly; refusals are turned into
/// redirects by the league handlers before reaching this.
impl From<LeagueError> for PageError {
    fn from(err: LeagueError) -> Self {
        match err {
            LeagueError::NotFound(id) => Self::not_found("League", id),
            LeagueError::RequestNotFound(id) => Self::not_found("Join request", id),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// `Path` that rejects malformed or out-of-range segments with the HTML
/// not-found page.
pub struct PagePath<T>(pub T);

impl<T, S> FromRequestParts<S> for PagePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(uri = %parts.uri, "Unmatched path parameters: {}", rejection.body_text());
                Err(PageError::NotFound(format!("Page {} not found", parts.uri.path())))
            }
        }
    }
}
