use maud::{Markup, html};

use super::{field_errors, form_errors, format_date};
use crate::domain::{FieldErrors, LeagueForm};
use crate::models::{JoinRequest, League, Team, User};
use crate::services::LeagueDirectory;
use crate::web::paths::{self, LeagueTab};

pub fn list(directory: &LeagueDirectory) -> Markup {
    html! {
        div class="page-heading" {
            h1 { "Leagues" }
            a class="button" href=(paths::NEW_LEAGUE) { "Start a league" }
        }

        @if let Some(mine) = &directory.mine {
            h2 { "My leagues" }
            (league_table(mine, "You haven't joined any leagues yet."))
        }
        @if let Some(managed) = &directory.managed {
            h2 { "Leagues I manage" }
            (league_table(managed, "You aren't running any leagues."))
        }

        h2 { "All leagues" }
        (league_table(&directory.all, "No leagues yet. Start the first one!"))
    }
}

fn league_table(leagues: &[League], empty: &str) -> Markup {
    html! {
        @if leagues.is_empty() {
            p class="empty" { (empty) }
        } @else {
            table {
                thead { tr { th { "Name" } th { "Size" } th { "Access" } th { "Created" } } }
                tbody {
                    @for league in leagues {
                        tr {
                            td { a href=(paths::league(league.id)) { (league.name) } }
                            td { (league.size) }
                            td { (access_label(league)) }
                            td { (format_date(&league.created_at)) }
                        }
                    }
                }
            }
        }
    }
}

const fn access_label(league: &League) -> &'static str {
    if league.public { "Public" } else { "Private" }
}

/// Form shared by league creation and the settings page.
pub fn form(action: &str, submit: &str, form: &LeagueForm, errors: &FieldErrors) -> Markup {
    html! {
        (form_errors(errors))
        form method="post" action=(action) class="stacked" {
            label for="id_name" { "Name" }
            input id="id_name" type="text" name="name" value=(form.name) maxlength="100" required;
            (field_errors(errors, "name"))

            label for="id_size" { "Number of teams" }
            input id="id_size" type="number" name="size" value=(form.size) min="1" required;
            (field_errors(errors, "size"))

            label class="checkbox" {
                input type="checkbox" name="public" value="on" checked[form.is_public()];
                " Anyone can join without approval"
            }

            button type="submit" { (submit) }
        }
    }
}

pub fn create(league_form: &LeagueForm, errors: &FieldErrors) -> Markup {
    html! {
        h1 { "Start a league" }
        (form(paths::NEW_LEAGUE, "Create league", league_form, errors))
    }
}

/// League title plus the tab bar. Commissioner-only tabs are hidden from others.
fn header(league: &League, active: LeagueTab, viewer: Option<&User>) -> Markup {
    let commish = viewer.is_some_and(|v| league.is_commish(v.id));
    html! {
        div class="league-header" {
            h1 { (league.name) }
            p class="muted" {
                (access_label(league)) " league · up to " (league.size) " teams"
            }
            nav class="tabs" {
                @for tab in LeagueTab::PUBLIC {
                    (tab_link(league.id, tab, active))
                }
                @if commish {
                    (tab_link(league.id, LeagueTab::Settings, active))
                    (tab_link(league.id, LeagueTab::Requests, active))
                }
            }
        }
    }
}

fn tab_link(league_id: i32, tab: LeagueTab, active: LeagueTab) -> Markup {
    html! {
        a class=[(tab == active).then_some("active")] href=(paths::league_tab(league_id, tab)) {
            (tab.title())
        }
    }
}

/// Join controls for visitors who don't have a team yet.
fn join_panel(league: &League, teams: &[Team], viewer: Option<&User>) -> Markup {
    let Some(user) = viewer else {
        return html! {
            p class="join" {
                a href=(paths::login_with_next(&paths::league_tab(league.id, LeagueTab::Standings))) {
                    "Log in"
                }
                " to join this league."
            }
        };
    };

    if teams.iter().any(|t| t.manager_id == user.id) {
        return html! {};
    }

    let full = league.is_full_with(u64::try_from(teams.len()).unwrap_or(u64::MAX));
    html! {
        div class="join" {
            @if full {
                p class="muted" { "This league is full." }
            } @else if league.public {
                form method="post" action=(paths::join(league.id)) {
                    button type="submit" { "Join league" }
                }
            } @else {
                form method="post" action=(paths::join(league.id)) class="stacked" {
                    label for="id_message" { "Message to the commissioner (optional)" }
                    textarea id="id_message" name="message" maxlength="500" rows="3" {}
                    button type="submit" { "Request to join" }
                }
            }
        }
    }
}

pub fn standings(league: &League, teams: &[Team], viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Standings, viewer))
        table {
            thead { tr { th { "#" } th { "Team" } th { "Manager" } th { "W" } th { "L" } th { "T" } } }
            tbody {
                @for (rank, team) in teams.iter().enumerate() {
                    tr {
                        td { (rank + 1) }
                        td { (team.name) }
                        td { a href=(paths::user(team.manager_id)) { (team.manager_name) } }
                        td { "0" } td { "0" } td { "0" }
                    }
                }
            }
        }
        p class="muted" { (teams.len()) " of " (league.size) " teams" }
        (join_panel(league, teams, viewer))
    }
}

pub fn rosters(league: &League, teams: &[Team], viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Rosters, viewer))
        div class="rosters" {
            @for team in teams {
                section class="card" {
                    h3 { (team.name) }
                    p class="muted" { "Managed by " (team.manager_name) }
                    p class="empty" { "No players drafted yet." }
                }
            }
        }
    }
}

pub fn scoring(league: &League, viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Scoring, viewer))
        p class="empty" { "Scoring rules have not been customised for this league." }
    }
}

pub fn playoffs(league: &League, viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Playoffs, viewer))
        p class="empty" { "The playoff bracket is drawn when the regular season ends." }
    }
}

pub fn schedule(league: &League, viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Schedule, viewer))
        p class="empty" { "The schedule is generated after the draft." }
    }
}

pub fn draft(league: &League, viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Draft, viewer))
        h2 { "Draft room" }
        p class="empty" { "The draft has not started yet." }
    }
}

pub fn settings(
    league: &League,
    league_form: &LeagueForm,
    errors: &FieldErrors,
    viewer: Option<&User>,
) -> Markup {
    html! {
        (header(league, LeagueTab::Settings, viewer))
        h2 { "League settings" }
        (form(&paths::league_tab(league.id, LeagueTab::Settings), "Save settings", league_form, errors))
    }
}

pub fn requests(league: &League, requests: &[JoinRequest], viewer: Option<&User>) -> Markup {
    html! {
        (header(league, LeagueTab::Requests, viewer))
        h2 { "Join requests" }
        @if requests.is_empty() {
            p class="empty" { "No pending requests." }
        } @else {
            ul class="requests" {
                @for request in requests {
                    li class="card" {
                        p {
                            a href=(paths::user(request.requester_id)) { (request.requester_name) }
                            span class="muted" { " · " (format_date(&request.created_at)) }
                        }
                        @if !request.body.is_empty() {
                            blockquote { (request.body) }
                        }
                        form class="inline" method="post" action=(paths::resolve_request(league.id, request.id, "accept")) {
                            button type="submit" { "Accept" }
                        }
                        form class="inline" method="post" action=(paths::resolve_request(league.id, request.id, "reject")) {
                            button type="submit" class="secondary" { "Reject" }
                        }
                    }
                }
            }
        }
    }
}
