#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use drafter::config::{Config, SecurityConfig};
use drafter::state::AppState;
use http_body_util::BodyExt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tower::ServiceExt;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

pub async fn spawn_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!("drafter-it-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 256,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };

    let state = drafter::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    let router = drafter::web::router(state.clone());

    TestApp { router, state }
}

/// The `id=...` pair from a `set-cookie` header, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

impl TestApp {
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::from(form.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// Follows redirects until a page renders and returns it.
    pub async fn follow(&self, response: &Response<Body>, cookie: &str) -> String {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let mut page = self.get(&location(response), Some(cookie)).await;
        while page.status() == StatusCode::SEE_OTHER {
            page = self.get(&location(&page), Some(cookie)).await;
        }
        assert_eq!(page.status(), StatusCode::OK);
        body_text(page).await
    }

    /// Posts the same form once per cookie, all at the same time.
    pub async fn post_form_concurrently(
        &self,
        path: &str,
        form: &str,
        cookies: &[String],
    ) -> Vec<StatusCode> {
        let mut requests = JoinSet::new();
        for cookie in cookies {
            let request = Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, cookie.as_str())
                .body(Body::from(form.to_string()))
                .unwrap();
            let router = self.router.clone();
            requests.spawn(async move { router.oneshot(request).await.unwrap().status() });
        }
        requests.join_all().await
    }

    /// Signs up `username` and returns its session cookie.
    pub async fn register(&self, username: &str) -> String {
        let form = format!("username={username}&password1={PASSWORD}&password2={PASSWORD}");
        let response = self.post_form("/users/new", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "sign-up failed");
        session_cookie(&response).expect("sign-up should start a session")
    }

    pub async fn user_id(&self, username: &str) -> i32 {
        self.state
            .store
            .get_user_by_username(username)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    /// Creates a league as the cookie's user and returns its id.
    pub async fn create_league(&self, cookie: &str, name: &str, size: i32, public: bool) -> i32 {
        let mut form = format!("name={}&size={size}", urlencoding::encode(name));
        if public {
            form.push_str("&public=on");
        }

        let response = self.post_form("/leagues/new", &form, Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "league creation failed");

        location(&response)
            .trim_start_matches("/leagues/")
            .parse()
            .expect("redirect should point at the new league")
    }

    pub async fn team_count(&self, league_id: i32) -> u64 {
        self.state.store.count_teams(league_id).await.unwrap()
    }

    pub async fn is_member(&self, league_id: i32, username: &str) -> bool {
        let user_id = self.user_id(username).await;
        self.state.store.is_member(league_id, user_id).await.unwrap()
    }
}
