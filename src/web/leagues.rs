use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::paths::{self, LeagueTab};
use super::session::{FlashLevel, Page};
use super::{PageError, PagePath, pages};
use crate::domain::{FieldErrors, LeagueForm};
use crate::models::User;
use crate::services::{LeagueError, Role};
use crate::state::AppState;

/// Turns a refused league operation into a redirect to the league with a notice.
/// Lookup failures and internal errors become error pages.
pub(super) async fn refuse(
    page: &Page,
    league_id: i32,
    err: LeagueError,
) -> Result<Response, PageError> {
    let text = match err {
        LeagueError::Forbidden(Role::Commissioner) => {
            "Only the commissioner can do that.".to_string()
        }
        LeagueError::Forbidden(Role::Member) => {
            "Only members of this league can enter the draft room.".to_string()
        }
        LeagueError::Full => "This league is full.".to_string(),
        LeagueError::AlreadyMember => "You are already a member of this league.".to_string(),
        LeagueError::AlreadyRequested => "Your request to join is already pending.".to_string(),
        LeagueError::Invalid(errors) => errors.messages().collect::<Vec<_>>().join(" "),
        other => return Err(other.into()),
    };

    page.redirect_with(&paths::league(league_id), FlashLevel::Warning, text)
        .await
}

/// GET /leagues
pub async fn list_leagues(
    State(state): State<Arc<AppState>>,
    page: Page,
) -> Result<Html<String>, PageError> {
    let directory = state.leagues.directory(page.viewer.as_ref()).await?;
    page.render("Leagues", pages::leagues::list(&directory)).await
}

/// GET /leagues/new
pub async fn new_league_form(page: Page) -> Result<Html<String>, PageError> {
    let body = pages::leagues::create(&LeagueForm::blank(), &FieldErrors::default());
    page.render("Start a league", body).await
}

/// POST /leagues/new
pub async fn create_league(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    page: Page,
    Form(form): Form<LeagueForm>,
) -> Result<Response, PageError> {
    match state.leagues.create_league(&user, &form).await {
        Ok(league) => {
            page.redirect_with(
                &paths::league(league.id),
                FlashLevel::Success,
                format!("{} is ready. Invite some friends!", league.name),
            )
            .await
        }
        Err(LeagueError::Invalid(errors)) => {
            let body = pages::leagues::create(&form, &errors);
            Ok(page.render("Start a league", body).await?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /leagues/{id}
pub async fn league_home(PagePath(id): PagePath<i32>) -> Redirect {
    Redirect::to(&paths::league_tab(id, LeagueTab::Standings))
}

/// GET /leagues/{id}/standings
pub async fn standings(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Html<String>, PageError> {
    let (league, teams) = state.leagues.league_with_teams(id).await?;
    let body = pages::leagues::standings(&league, &teams, page.viewer.as_ref());
    page.render(&league.name, body).await
}

/// GET /leagues/{id}/rosters
pub async fn rosters(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Html<String>, PageError> {
    let (league, teams) = state.leagues.league_with_teams(id).await?;
    let body = pages::leagues::rosters(&league, &teams, page.viewer.as_ref());
    page.render(&format!("{} rosters", league.name), body).await
}

/// GET /leagues/{id}/scoring
pub async fn scoring(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Html<String>, PageError> {
    let league = state.leagues.get_league(id).await?;
    let body = pages::leagues::scoring(&league, page.viewer.as_ref());
    page.render(&format!("{} scoring", league.name), body).await
}

/// GET /leagues/{id}/playoffs
pub async fn playoffs(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Html<String>, PageError> {
    let league = state.leagues.get_league(id).await?;
    let body = pages::leagues::playoffs(&league, page.viewer.as_ref());
    page.render(&format!("{} playoffs", league.name), body).await
}

/// GET /leagues/{id}/schedule
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Html<String>, PageError> {
    let league = state.leagues.get_league(id).await?;
    let body = pages::leagues::schedule(&league, page.viewer.as_ref());
    page.render(&format!("{} schedule", league.name), body).await
}

/// GET /leagues/{id}/draft
pub async fn draft(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Response, PageError> {
    match state.leagues.draft_room(id, page.viewer.as_ref()).await {
        Ok(league) => {
            let body = pages::leagues::draft(&league, page.viewer.as_ref());
            Ok(page
                .render(&format!("{} draft", league.name), body)
                .await?
                .into_response())
        }
        Err(e) => refuse(&page, id, e).await,
    }
}

/// GET /leagues/{id}/settings
pub async fn settings_form(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Response, PageError> {
    match state.leagues.settings(id, page.viewer.as_ref()).await {
        Ok(league) => {
            let form = LeagueForm::from_league(&league);
            let body = pages::leagues::settings(
                &league,
                &form,
                &FieldErrors::default(),
                page.viewer.as_ref(),
            );
            Ok(page
                .render(&format!("{} settings", league.name), body)
                .await?
                .into_response())
        }
        Err(e) => refuse(&page, id, e).await,
    }
}

/// POST /leagues/{id}/settings
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
    Form(form): Form<LeagueForm>,
) -> Result<Response, PageError> {
    let viewer = page.viewer.as_ref();

    let (league, errors) = match state.leagues.update_settings(id, viewer, &form).await {
        Ok(league) => {
            page.flash(FlashLevel::Success, "Settings saved.").await?;
            (league, FieldErrors::default())
        }
        Err(LeagueError::Invalid(errors)) => (state.leagues.settings(id, viewer).await?, errors),
        Err(e) => return refuse(&page, id, e).await,
    };

    let shown = if errors.is_empty() {
        LeagueForm::from_league(&league)
    } else {
        form
    };
    let body = pages::leagues::settings(&league, &shown, &errors, viewer);
    Ok(page
        .render(&format!("{} settings", league.name), body)
        .await?
        .into_response())
}

/// GET /leagues/{id}/requests
pub async fn requests(
    State(state): State<Arc<AppState>>,
    page: Page,
    PagePath(id): PagePath<i32>,
) -> Result<Response, PageError> {
    match state.leagues.join_requests(id, page.viewer.as_ref()).await {
        Ok((league, requests)) => {
            let body = pages::leagues::requests(&league, &requests, page.viewer.as_ref());
            Ok(page
                .render(&format!("{} join requests", league.name), body)
                .await?
                .into_response())
        }
        Err(e) => refuse(&page, id, e).await,
    }
}
