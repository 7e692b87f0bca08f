use maud::{Markup, html};

use super::{field_errors, form_errors, format_date};
use crate::domain::{FieldErrors, LoginForm, RegisterForm};
use crate::models::{League, User};
use crate::services::UserProfile;
use crate::web::paths;

/// Sign-up form. Passwords are never echoed back.
pub fn register(form: &RegisterForm, errors: &FieldErrors) -> Markup {
    html! {
        h1 { "Sign up" }
        (form_errors(errors))
        form method="post" action=(paths::REGISTER) class="stacked" {
            label for="id_username" { "Username" }
            input id="id_username" type="text" name="username" value=(form.username)
                maxlength="150" autofocus required;
            (field_errors(errors, "username"))
            p class="help" { "Letters, digits and @/./+/-/_ only." }

            label for="id_password1" { "Password" }
            input id="id_password1" type="password" name="password1" required;
            (field_errors(errors, "password1"))

            label for="id_password2" { "Password confirmation" }
            input id="id_password2" type="password" name="password2" required;
            (field_errors(errors, "password2"))

            button type="submit" { "Create account" }
        }
        p { "Already have an account? " a href=(paths::LOGIN) { "Log in" } }
    }
}

pub fn login(form: &LoginForm, errors: &FieldErrors) -> Markup {
    html! {
        h1 { "Log in" }
        (form_errors(errors))
        form method="post" action=(paths::LOGIN) class="stacked" {
            @if let Some(next) = &form.next {
                input type="hidden" name="next" value=(next);
            }
            label for="id_username" { "Username" }
            input id="id_username" type="text" name="username" value=(form.username) autofocus required;

            label for="id_password" { "Password" }
            input id="id_password" type="password" name="password" required;

            button type="submit" { "Log in" }
        }
        p { "New here? " a href=(paths::REGISTER) { "Create an account" } }
    }
}

pub fn list(users: &[User]) -> Markup {
    html! {
        h1 { "Users" }
        @if users.is_empty() {
            p class="empty" { "Nobody has signed up yet." }
        } @else {
            table {
                thead { tr { th { "Username" } th { "Joined" } } }
                tbody {
                    @for user in users {
                        tr {
                            td { a href=(paths::user(user.id)) { (user.username) } }
                            td { (format_date(&user.created_at)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn profile(profile: &UserProfile, viewer: Option<&User>) -> Markup {
    let own = viewer.is_some_and(|v| v.id == profile.user.id);
    html! {
        h1 { (profile.user.username) }
        p class="muted" { "Member since " (format_date(&profile.user.created_at)) }

        h2 { "Leagues" }
        (league_links(&profile.leagues, "Not in any leagues yet."))

        h2 { "Commissioner of" }
        (league_links(&profile.managed_leagues, "Not running any leagues."))

        @if own {
            p { a class="button" href=(paths::NEW_LEAGUE) { "Start a league" } }
        }
    }
}

fn league_links(leagues: &[League], empty: &str) -> Markup {
    html! {
        @if leagues.is_empty() {
            p class="empty" { (empty) }
        } @else {
            ul {
                @for league in leagues {
                    li { a href=(paths::league(league.id)) { (league.name) } }
                }
            }
        }
    }
}
