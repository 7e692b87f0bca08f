use axum::{
    Extension, Form,
    extract::State,
    response::{Redirect, Response},
};
use std::sync::Arc;

use super::leagues::refuse;
use super::paths::{self, LeagueTab};
use super::session::{FlashLevel, Page};
use super::{PageError, PagePath};
use crate::domain::JoinForm;
use crate::models::User;
use crate::services::{JoinOutcome, LeagueError, RequestDecision, RequestResolution};
use crate::state::AppState;

/// GET /leagues/{id}/join
pub async fn join_redirect(PagePath(id): PagePath<i32>) -> Redirect {
    Redirect::to(&paths::league(id))
}

/// POST /leagues/{id}/join
pub async fn join(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    page: Page,
    PagePath(id): PagePath<i32>,
    Form(form): Form<JoinForm>,
) -> Result<Response, PageError> {
    match state.leagues.join(id, &user, &form).await {
        Ok(JoinOutcome::Joined(team)) => {
            page.redirect_with(
                &paths::league(id),
                FlashLevel::Success,
                format!("You're in! {} has joined the league.", team.name),
            )
            .await
        }
        Ok(JoinOutcome::Requested(_)) => {
            page.redirect_with(
                &paths::league(id),
                FlashLevel::Info,
                "Request sent. The commissioner will review it.",
            )
            .await
        }
        Err(e) => refuse(&page, id, e).await,
    }
}

/// POST /leagues/{id}/requests/{request_id}/accept
pub async fn accept_request(
    state: State<Arc<AppState>>,
    page: Page,
    PagePath((id, request_id)): PagePath<(i32, i32)>,
) -> Result<Response, PageError> {
    resolve(state, page, id, request_id, RequestDecision::Accept).await
}

/// POST /leagues/{id}/requests/{request_id}/reject
pub async fn reject_request(
    state: State<Arc<AppState>>,
    page: Page,
    PagePath((id, request_id)): PagePath<(i32, i32)>,
) -> Result<Response, PageError> {
    resolve(state, page, id, request_id, RequestDecision::Reject).await
}

async fn resolve(
    State(state): State<Arc<AppState>>,
    page: Page,
    id: i32,
    request_id: i32,
    decision: RequestDecision,
) -> Result<Response, PageError> {
    let requests_page = paths::league_tab(id, LeagueTab::Requests);

    let (level, text) = match state
        .leagues
        .resolve_request(id, request_id, page.viewer.as_ref(), decision)
        .await
    {
        Ok(RequestResolution::Accepted(request)) => (
            FlashLevel::Success,
            format!("{} has joined the league.", request.requester_name),
        ),
        Ok(RequestResolution::AlreadyMember(request)) => (
            FlashLevel::Info,
            format!("{} is already a member.", request.requester_name),
        ),
        Ok(RequestResolution::Rejected(request)) => (
            FlashLevel::Info,
            format!("Request from {} rejected.", request.requester_name),
        ),
        Err(LeagueError::Full) => (
            FlashLevel::Warning,
            "This league is full. Make room before accepting more requests.".to_string(),
        ),
        Err(e) => return refuse(&page, id, e).await,
    };

    page.redirect_with(&requests_page, level, text).await
}
