use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::session::{FlashLevel, Page, safe_next};
use super::{PageError, pages, paths};
use crate::domain::{FieldErrors, LoginForm, RegisterForm, forms::NON_FIELD};
use crate::models::UserKey;
use crate::services::AccountError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// GET /
pub async fn index(page: Page) -> Result<Html<String>, PageError> {
    let body = pages::index(page.viewer.as_ref());
    page.render("Home", body).await
}

/// GET /users/new
pub async fn register_form(page: Page) -> Result<Html<String>, PageError> {
    page.render(
        "Sign up",
        pages::users::register(&RegisterForm::default(), &FieldErrors::default()),
    )
    .await
}

/// POST /users/new
pub async fn register(
    State(state): State<Arc<AppState>>,
    mut page: Page,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    match state.accounts.register(&form).await {
        Ok(user) => {
            page.log_in(&user).await?;
            page.redirect_with(
                &paths::user(user.id),
                FlashLevel::Success,
                format!("Welcome to Drafter, {}!", user.username),
            )
            .await
        }
        Err(AccountError::Invalid(errors)) => {
            let body = pages::users::register(&form, &errors);
            Ok(page.render("Sign up", body).await?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(
    page: Page,
    Query(query): Query<NextQuery>,
) -> Result<Html<String>, PageError> {
    let form = LoginForm {
        next: query.next,
        ..LoginForm::default()
    };
    page.render("Log in", pages::users::login(&form, &FieldErrors::default()))
        .await
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    mut page: Page,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    match state.accounts.authenticate(&form.username, &form.password).await {
        Ok(user) => {
            page.log_in(&user).await?;
            tracing::info!(user_id = user.id, "User logged in");
            Ok(Redirect::to(safe_next(form.next.as_deref())).into_response())
        }
        Err(AccountError::InvalidCredentials) => {
            let errors = FieldErrors::single(NON_FIELD, "Invalid username or password.");
            let body = pages::users::login(&form, &errors);
            Ok(page.render("Log in", body).await?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
pub async fn logout(mut page: Page) -> Result<Redirect, PageError> {
    page.log_out().await?;
    Ok(Redirect::to(paths::INDEX))
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    page: Page,
) -> Result<Html<String>, PageError> {
    let users = state.accounts.list_users().await?;
    page.render("Users", pages::users::list(&users)).await
}

/// GET /users/{id_or_username}
pub async fn show_user(
    State(state): State<Arc<AppState>>,
    page: Page,
    Path(segment): Path<String>,
) -> Result<Html<String>, PageError> {
    let profile = state.accounts.profile(&UserKey::parse(&segment)).await?;
    let body = pages::users::profile(&profile, page.viewer.as_ref());
    page.render(&profile.user.username, body).await
}
