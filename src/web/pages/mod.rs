//! HTML templates rendered with maud.

use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use super::paths;
use super::session::Flash;
use crate::domain::{FieldErrors, forms::NON_FIELD};
use crate::models::User;

pub mod leagues;
pub mod users;

pub fn layout(title: &str, viewer: Option<&User>, flashes: &[Flash], body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Drafter" }
                link rel="stylesheet" href=(paths::STYLESHEET);
            }
            body {
                header class="site-header" {
                    a class="brand" href=(paths::INDEX) { "Drafter" }
                    nav {
                        a href=(paths::LEAGUES) { "Leagues" }
                        a href=(paths::USERS) { "Users" }
                        @if let Some(user) = viewer {
                            a href=(paths::user(user.id)) { (user.username) }
                            form class="inline" method="post" action=(paths::LOGOUT) {
                                button type="submit" class="link" { "Log out" }
                            }
                        } @else {
                            a href=(paths::LOGIN) { "Log in" }
                            a href=(paths::REGISTER) { "Sign up" }
                        }
                    }
                }
                main class="container" {
                    @for flash in flashes {
                        div class=(flash.level.css_class()) role="status" { (flash.text) }
                    }
                    (body)
                }
            }
        }
    }
}

/// Standalone page for 404/500 responses.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = status.canonical_reason().unwrap_or("Error");
    let body = html! {
        h1 { (status.as_u16()) " " (heading) }
        p { (message) }
        p { a href=(paths::INDEX) { "Back to the front page" } }
    };
    layout(heading, None, &[], body)
}

/// Errors attached to a single input.
pub fn field_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @for message in errors.get(field) {
            p class="field-error" { (message) }
        }
    }
}

pub fn form_errors(errors: &FieldErrors) -> Markup {
    html! {
        @if errors.has(NON_FIELD) {
            div class="flash flash-error" {
                @for message in errors.get(NON_FIELD) {
                    p { (message) }
                }
            }
        }
    }
}

/// Renders a stored RFC 3339 timestamp as a calendar date.
pub fn format_date(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map_or_else(|_| timestamp.to_string(), |dt| dt.format("%b %-d, %Y").to_string())
}

pub fn index(viewer: Option<&User>) -> Markup {
    html! {
        section class="hero" {
            @if let Some(user) = viewer {
                h1 { "Welcome back, " (user.username) "!" }
                p {
                    a class="button" href=(paths::LEAGUES) { "Your leagues" }
                    " "
                    a class="button secondary" href=(paths::NEW_LEAGUE) { "Start a league" }
                }
            } @else {
                h1 { "Fantasy leagues with friends" }
                p { "Create a league, invite your friends and run the draft." }
                p {
                    a class="button" href=(paths::REGISTER) { "Sign up" }
                    " "
                    a class="button secondary" href=(paths::LOGIN) { "Log in" }
                }
            }
        }
        section {
            h2 { "Browse" }
            ul {
                li { a href=(paths::LEAGUES) { "All leagues" } }
                li { a href=(paths::USERS) { "All players" } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::session::FlashLevel;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T10:00:00+00:00"), "Mar 5, 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_layout_escapes_and_shows_flashes() {
        let flashes = [Flash {
            level: FlashLevel::Warning,
            text: "League is <full>".to_string(),
        }];
        let html = layout("Test", None, &flashes, html! { p { "body" } }).into_string();
        assert!(html.contains("League is &lt;full&gt;"));
        assert!(html.contains("flash-warning"));
        assert!(html.contains("Log in"));
    }
}
