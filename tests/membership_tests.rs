mod common;

use axum::http::StatusCode;
use common::{location, spawn_app};

#[tokio::test]
async fn test_join_full_private_league_is_refused() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let alpha = app.create_league(&alice, "Alpha", 1, false).await;

    let response = app
        .post_form(&format!("/leagues/{alpha}/join"), "", Some(&bob))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/leagues/{alpha}"));

    assert_eq!(app.team_count(alpha).await, 1);
    assert!(!app.is_member(alpha, "bob").await);
    assert!(app.state.store.list_join_requests(alpha).await.unwrap().is_empty());

    let standings = app.follow(&response, &bob).await;
    assert!(standings.contains("This league is full."));
}

#[tokio::test]
async fn test_join_public_league_adds_one_team() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let carol = app.register("carol").await;
    let beta = app.create_league(&alice, "Beta", 10, true).await;
    let join = format!("/leagues/{beta}/join");

    app.post_form(&join, "", Some(&bob)).await;
    assert_eq!(app.team_count(beta).await, 2);

    let response = app.post_form(&join, "", Some(&carol)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/leagues/{beta}"));
    assert_eq!(app.team_count(beta).await, 3);
    assert!(app.is_member(beta, "carol").await);

    let teams = app.state.store.list_teams(beta).await.unwrap();
    let carol_id = app.user_id("carol").await;
    assert_eq!(teams.iter().filter(|t| t.manager_id == carol_id).count(), 1);
}

#[tokio::test]
async fn test_member_joining_again_creates_no_team() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let beta = app.create_league(&alice, "Beta", 10, true).await;
    let join = format!("/leagues/{beta}/join");

    app.post_form(&join, "", Some(&bob)).await;
    let response = app.post_form(&join, "", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.team_count(beta).await, 2);

    let standings = app.follow(&response, &bob).await;
    assert!(standings.contains("You are already a member of this league."));

    // The commissioner already owns the founding team.
    app.post_form(&join, "", Some(&alice)).await;
    assert_eq!(app.team_count(beta).await, 2);
}

#[tokio::test]
async fn test_join_private_league_files_a_single_request() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let gamma = app.create_league(&alice, "Gamma", 4, false).await;
    let join = format!("/leagues/{gamma}/join");

    let response = app
        .post_form(&join, "message=Let+me+in%2C+please", Some(&bob))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.team_count(gamma).await, 1);

    let requests = app.state.store.list_join_requests(gamma).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].requester_name, "bob");
    assert_eq!(requests[0].body, "Let me in, please");

    let response = app.post_form(&join, "", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.state.store.list_join_requests(gamma).await.unwrap().len(), 1);
    assert_eq!(app.team_count(gamma).await, 1);

    let standings = app.follow(&response, &bob).await;
    assert!(standings.contains("Your request to join is already pending."));

    let listing = app.get(&format!("/leagues/{gamma}/requests"), Some(&alice)).await;
    assert_eq!(listing.status(), StatusCode::OK);
    let listing = common::body_text(listing).await;
    assert!(listing.contains("bob"));
    assert!(listing.contains("Let me in, please"));
}

#[tokio::test]
async fn test_join_request_message_too_long_is_reported() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let gamma = app.create_league(&alice, "Gamma", 4, false).await;

    let form = format!("message={}", "x".repeat(501));
    let response = app
        .post_form(&format!("/leagues/{gamma}/join"), &form, Some(&bob))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.state.store.list_join_requests(gamma).await.unwrap().is_empty());

    let standings = app.follow(&response, &bob).await;
    assert!(standings.contains("at most 500 characters"));
}

#[tokio::test]
async fn test_join_requires_login_and_existing_league() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let beta = app.create_league(&alice, "Beta", 10, true).await;

    let response = app
        .post_form(&format!("/leagues/{beta}/join"), "", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/login?next=%2Fleagues%2F{beta}%2Fjoin")
    );
    assert_eq!(app.team_count(beta).await, 1);

    let bob = app.register("bob").await;
    let response = app.get(&format!("/leagues/{beta}/join"), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/leagues/{beta}"));
    assert_eq!(app.team_count(beta).await, 1);

    let response = app.post_form("/leagues/999/join", "", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_commissioner_accepts_and_rejects_requests() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let carol = app.register("carol").await;
    let gamma = app.create_league(&alice, "Gamma", 4, false).await;
    let join = format!("/leagues/{gamma}/join");

    app.post_form(&join, "", Some(&bob)).await;
    app.post_form(&join, "", Some(&carol)).await;
    let requests = app.state.store.list_join_requests(gamma).await.unwrap();
    let (bob_request, carol_request) = (requests[0].id, requests[1].id);

    // Only the commissioner decides.
    let response = app
        .post_form(
            &format!("/leagues/{gamma}/requests/{bob_request}/accept"),
            "",
            Some(&bob),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/leagues/{gamma}"));
    assert!(!app.is_member(gamma, "bob").await);

    let response = app
        .post_form(
            &format!("/leagues/{gamma}/requests/{bob_request}/accept"),
            "",
            Some(&alice),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/leagues/{gamma}/requests"));
    assert!(app.is_member(gamma, "bob").await);
    assert_eq!(app.team_count(gamma).await, 2);

    let response = app
        .post_form(
            &format!("/leagues/{gamma}/requests/{carol_request}/reject"),
            "",
            Some(&alice),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(!app.is_member(gamma, "carol").await);
    assert_eq!(app.team_count(gamma).await, 2);
    assert!(app.state.store.list_join_requests(gamma).await.unwrap().is_empty());

    let response = app
        .post_form(
            &format!("/leagues/{gamma}/requests/{carol_request}/accept"),
            "",
            Some(&alice),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_fill_league_without_errors() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let beta = app.create_league(&alice, "Beta", 2, true).await;

    let mut cookies = Vec::new();
    for i in 0..8 {
        cookies.push(app.register(&format!("user{i}")).await);
    }

    let statuses = app
        .post_form_concurrently(&format!("/leagues/{beta}/join"), "", &cookies)
        .await;
    assert!(
        statuses.iter().all(|s| *s == StatusCode::SEE_OTHER),
        "{statuses:?}"
    );
    assert_eq!(app.team_count(beta).await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_concurrent_submits_count_once() {
    let app = spawn_app().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let beta = app.create_league(&alice, "Beta", 10, true).await;
    let gamma = app.create_league(&alice, "Gamma", 10, false).await;
    let cookies = vec![bob; 6];

    let statuses = app
        .post_form_concurrently(&format!("/leagues/{beta}/join"), "", &cookies)
        .await;
    assert!(
        statuses.iter().all(|s| *s == StatusCode::SEE_OTHER),
        "{statuses:?}"
    );
    assert_eq!(app.team_count(beta).await, 2);

    let statuses = app
        .post_form_concurrently(&format!("/leagues/{gamma}/join"), "message=hi", &cookies)
        .await;
    assert!(
        statuses.iter().all(|s| *s == StatusCode::SEE_OTHER),
        "{statuses:?}"
    );
    assert_eq!(app.state.store.list_join_requests(gamma).await.unwrap().len(), 1);
    assert_eq!(app.team_count(gamma).await, 1);
}
