//! URL builders shared by handlers and templates.

pub const INDEX: &str = "/";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const USERS: &str = "/users";
pub const REGISTER: &str = "/users/new";
pub const LEAGUES: &str = "/leagues";
pub const NEW_LEAGUE: &str = "/leagues/new";
pub const STYLESHEET: &str = "/static/style.css";

/// The pages every league has, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueTab {
    Standings,
    Rosters,
    Scoring,
    Playoffs,
    Schedule,
    Draft,
    Settings,
    Requests,
}

impl LeagueTab {
    pub const PUBLIC: [Self; 6] = [
        Self::Standings,
        Self::Rosters,
        Self::Scoring,
        Self::Playoffs,
        Self::Schedule,
        Self::Draft,
    ];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Standings => "standings",
            Self::Rosters => "rosters",
            Self::Scoring => "scoring",
            Self::Playoffs => "playoffs",
            Self::Schedule => "schedule",
            Self::Draft => "draft",
            Self::Settings => "settings",
            Self::Requests => "requests",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Standings => "Standings",
            Self::Rosters => "Rosters",
            Self::Scoring => "Scoring",
            Self::Playoffs => "Playoffs",
            Self::Schedule => "Schedule",
            Self::Draft => "Draft",
            Self::Settings => "Settings",
            Self::Requests => "Requests",
        }
    }
}

#[must_use]
pub fn user(id: i32) -> String {
    format!("/users/{id}")
}

/// The league's default view.
#[must_use]
pub fn league(id: i32) -> String {
    format!("/leagues/{id}")
}

#[must_use]
pub fn league_tab(id: i32, tab: LeagueTab) -> String {
    format!("/leagues/{id}/{}", tab.slug())
}

#[must_use]
pub fn join(id: i32) -> String {
    format!("/leagues/{id}/join")
}

#[must_use]
pub fn resolve_request(league_id: i32, request_id: i32, action: &str) -> String {
    format!("/leagues/{league_id}/requests/{request_id}/{action}")
}

#[must_use]
pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={}", urlencoding::encode(next))
}
