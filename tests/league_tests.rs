mod common;

use axum::http::{StatusCode, header};
use common::{body_text, location, spawn_app};

#[tokio::test]
async fn test_new_league_requires_login() {
    let app = spawn_app().await;

    let response = app.get("/leagues/new", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fleagues%2Fnew");

    let response = app.post_form("/leagues/new", "name=Alpha&size=4", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?next="));
    assert!(app.state.store.list_leagues().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_league_gives_commissioner_the_only_team() {
    let app = spawn_app().await;
    let cookie = app.register("alice").await;

    let league_id = app.create_league(&cookie, "Alpha", 1, false).await;

    let league = app.state.store.get_league(league_id).await.unwrap().unwrap();
    assert_eq!(league.commish_id, app.user_id("alice").await);
    assert!(!league.public);
    assert_eq!(app.team_count(league_id).await, 1);
    assert!(app.is_member(league_id, "alice").await);
}

#[tokio::test]
async fn test_create_league_rerenders_invalid_form() {
    let app = spawn_app().await;
    let cookie = app.register("alice").await;

    let response = app
        .post_form("/leagues/new", "name=&size=abc", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("This field is required."));
    assert!(body.contains("Enter a whole number."));
    assert!(app.state.store.list_leagues().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_league_default_view_redirects_to_standings() {
    let app = spawn_app().await;

    let response = app.get("/leagues/42", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/leagues/42/standings");
}

#[tokio::test]
async fn test_league_detail_pages() {
    let app = spawn_app().await;
    let cookie = app.register("alice").await;
    let league_id = app.create_league(&cookie, "Alpha", 4, true).await;

    for tab in ["standings", "rosters", "scoring", "playoffs", "schedule"] {
        let response = app.get(&format!("/leagues/{league_id}/{tab}"), None).await;
        assert_eq!(response.status(), StatusCode::OK, "{tab}");
        assert!(body_text(response).await.contains("Alpha"), "{tab}");

        let missing = app.get(&format!("/leagues/999/{tab}"), None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND, "{tab}");
    }

    let standings = body_text(app.get(&format!("/leagues/{league_id}/standings"), None).await).await;
    assert!(standings.contains("/users/"));
    assert!(standings.contains("1 of 4 teams"));

    let scoring = body_text(app.get(&format!("/leagues/{league_id}/scoring"), None).await).await;
    assert!(scoring.contains("Scoring rules have not been customised"));
    assert!(!scoring.contains("Head-to-head"));
}

#[tokio::test]
async fn test_malformed_league_ids_are_not_found() {
    let app = spawn_app().await;
    let cookie = app.register("alice").await;

    for path in [
        "/leagues/abc",
        "/leagues/abc/standings",
        "/leagues/99999999999/rosters",
        "/leagues/-/settings",
        "/leagues/1/requests/x/accept",
    ] {
        let response = if path.ends_with("accept") {
            app.post_form(path, "", Some(&cookie)).await
        } else {
            app.get(path, Some(&cookie)).await
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        assert!(body_text(response).await.contains("404"), "{path}");
    }
}

#[tokio::test]
async fn test_settings_and_requests_are_commissioner_only() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let league_id = app.create_league(&alice, "Alpha", 4, false).await;
    let home = format!("/leagues/{league_id}");

    for tab in ["settings", "requests"] {
        let path = format!("/leagues/{league_id}/{tab}");

        let response = app.get(&path, Some(&alice)).await;
        assert_eq!(response.status(), StatusCode::OK, "{tab}");

        let response = app.get(&path, Some(&bob)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{tab}");
        assert_eq!(location(&response), home);
        let notice = app.follow(&response, &bob).await;
        assert!(notice.contains("Only the commissioner can do that."));

        let response = app.get(&path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{tab}");
        assert_eq!(location(&response), home);
    }

    let missing = app.get("/leagues/999/settings", Some(&alice)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_form_is_prefilled_and_saves() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let league_id = app.create_league(&alice, "Alpha", 4, true).await;
    let path = format!("/leagues/{league_id}/settings");

    let form = body_text(app.get(&path, Some(&alice)).await).await;
    assert!(form.contains(r#"value="Alpha""#));
    assert!(form.contains(r#"value="4""#));
    assert!(form.contains("checked"));

    let response = app
        .post_form(&path, "name=Alpha+Prime&size=8", Some(&alice))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Settings saved."));

    let league = app.state.store.get_league(league_id).await.unwrap().unwrap();
    assert_eq!(league.name, "Alpha Prime");
    assert_eq!(league.size, 8);
    assert!(!league.public);

    let response = app.post_form(&path, "name=Hijacked&size=2", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let league = app.state.store.get_league(league_id).await.unwrap().unwrap();
    assert_eq!(league.name, "Alpha Prime");
}

#[tokio::test]
async fn test_settings_rejects_invalid_size() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let league_id = app.create_league(&alice, "Alpha", 4, true).await;
    let path = format!("/leagues/{league_id}/settings");

    let response = app
        .post_form(&path, "name=Alpha&size=0&public=on", Some(&alice))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("League size must be between 1 and 32."));
    assert!(!body.contains("Settings saved."));

    let league = app.state.store.get_league(league_id).await.unwrap().unwrap();
    assert_eq!(league.size, 4);
}

#[tokio::test]
async fn test_draft_room_is_for_members() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let league_id = app.create_league(&alice, "Alpha", 4, true).await;
    let path = format!("/leagues/{league_id}/draft");

    assert_eq!(app.get(&path, Some(&alice)).await.status(), StatusCode::OK);

    let response = app.get(&path, Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/leagues/{league_id}"));

    let response = app.get(&path, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    app.post_form(&format!("/leagues/{league_id}/join"), "", Some(&bob))
        .await;
    assert_eq!(app.get(&path, Some(&bob)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_league_listing_sections() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    app.create_league(&alice, "Alpha", 4, true).await;

    let anonymous = body_text(app.get("/leagues", None).await).await;
    assert!(anonymous.contains("Alpha"));
    assert!(!anonymous.contains("My leagues"));
    assert!(!anonymous.contains("Leagues I manage"));

    assert!(anonymous.contains("<th>Size</th>"));

    let signed_in = body_text(app.get("/leagues", Some(&alice)).await).await;
    assert!(signed_in.contains("My leagues"));
    assert!(signed_in.contains("Leagues I manage"));
}

#[tokio::test]
async fn test_static_assets_and_unknown_pages() {
    let app = spawn_app().await;

    let response = app.get("/static/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );

    assert_eq!(
        app.get("/static/missing.js", None).await.status(),
        StatusCode::NOT_FOUND
    );

    let response = app.get("/no/such/page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}
