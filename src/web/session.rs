//! Session-backed login state and flash messages.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{PageError, pages, paths};
use crate::models::User;
use crate::state::AppState;

const USER_KEY: &str = "user_id";
const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash flash-success",
            Self::Info => "flash flash-info",
            Self::Warning => "flash flash-warning",
            Self::Error => "flash flash-error",
        }
    }
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub text: String,
}

/// Per-request page context: the session and whoever is logged in.
pub struct Page {
    session: Session,
    pub viewer: Option<User>,
}

impl FromRequestParts<Arc<AppState>> for Page {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| PageError::internal(msg))?;

        // Already resolved by `require_login`.
        if let Some(user) = parts.extensions.get::<User>() {
            return Ok(Self {
                session,
                viewer: Some(user.clone()),
            });
        }

        let viewer = match session.get::<i32>(USER_KEY).await? {
            Some(id) => state.accounts.session_user(id).await?,
            None => None,
        };

        if let Some(user) = &viewer {
            tracing::Span::current().record("user_id", user.id);
        }

        Ok(Self { session, viewer })
    }
}

impl Page {
    /// Wraps `body` in the site layout, consuming pending flash messages.
    pub async fn render(&self, title: &str, body: Markup) -> Result<Html<String>, PageError> {
        let flashes = self
            .session
            .remove::<Vec<Flash>>(FLASH_KEY)
            .await?
            .unwrap_or_default();

        let markup = pages::layout(title, self.viewer.as_ref(), &flashes, body);
        Ok(Html(markup.into_string()))
    }

    pub async fn flash(&self, level: FlashLevel, text: impl Into<String>) -> Result<(), PageError> {
        let mut pending = self
            .session
            .get::<Vec<Flash>>(FLASH_KEY)
            .await?
            .unwrap_or_default();
        pending.push(Flash {
            level,
            text: text.into(),
        });
        self.session.insert(FLASH_KEY, pending).await?;
        Ok(())
    }

    /// Flashes `text` and redirects to `to`.
    pub async fn redirect_with(
        &self,
        to: &str,
        level: FlashLevel,
        text: impl Into<String>,
    ) -> Result<Response, PageError> {
        self.flash(level, text).await?;
        Ok(Redirect::to(to).into_response())
    }

    pub async fn log_in(&mut self, user: &User) -> Result<(), PageError> {
        self.session.cycle_id().await?;
        self.session.insert(USER_KEY, user.id).await?;
        tracing::Span::current().record("user_id", user.id);
        self.viewer = Some(user.clone());
        Ok(())
    }

    pub async fn log_out(&mut self) -> Result<(), PageError> {
        self.session.flush().await?;
        self.viewer = None;
        Ok(())
    }
}

/// Only local absolute paths are followed after login.
#[must_use]
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => paths::LEAGUES,
    }
}

/// Sends anonymous visitors to the login page, remembering where they were going.
pub async fn require_login(
    page: Page,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(user) = page.viewer else {
        let target = request
            .uri()
            .path_and_query()
            .map_or_else(|| request.uri().path().to_string(), ToString::to_string);
        return Redirect::to(&paths::login_with_next(&target)).into_response();
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}
