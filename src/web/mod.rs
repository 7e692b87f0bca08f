use axum::{
    Router,
    http::Uri,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::state::AppState;

mod assets;
mod error;
mod leagues;
mod membership;
mod observability;
pub mod pages;
pub mod paths;
pub mod session;
mod users;

pub use error::{PageError, PagePath};
pub use observability::logging_middleware;

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config.server;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_expiry_minutes,
        )));

    let members_only = Router::new()
        .route(
            "/leagues/new",
            get(leagues::new_league_form).post(leagues::create_league),
        )
        .route(
            "/leagues/{id}/join",
            get(membership::join_redirect).post(membership::join),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_login,
        ));

    Router::new()
        .route("/", get(users::index))
        .route("/login", get(users::login_form).post(users::login))
        .route("/logout", post(users::logout))
        .route("/users", get(users::list_users))
        .route("/users/new", get(users::register_form).post(users::register))
        .route("/users/{key}", get(users::show_user))
        .route("/leagues", get(leagues::list_leagues))
        .merge(members_only)
        .route("/leagues/{id}", get(leagues::league_home))
        .route("/leagues/{id}/standings", get(leagues::standings))
        .route("/leagues/{id}/rosters", get(leagues::rosters))
        .route("/leagues/{id}/scoring", get(leagues::scoring))
        .route("/leagues/{id}/playoffs", get(leagues::playoffs))
        .route("/leagues/{id}/schedule", get(leagues::schedule))
        .route("/leagues/{id}/draft", get(leagues::draft))
        .route(
            "/leagues/{id}/settings",
            get(leagues::settings_form).post(leagues::save_settings),
        )
        .route("/leagues/{id}/requests", get(leagues::requests))
        .route(
            "/leagues/{id}/requests/{request_id}/accept",
            post(membership::accept_request),
        )
        .route(
            "/leagues/{id}/requests/{request_id}/reject",
            post(membership::reject_request),
        )
        .route("/static/{*path}", get(assets::serve_asset))
        .route("/metrics", get(observability::get_metrics))
        .fallback(not_found)
        .layer(session_layer)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    PageError::not_found("Page", uri.path())
}
