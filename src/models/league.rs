use serde::Serialize;

use crate::entities::{fantasy_teams, leagues, messages, users};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct League {
    pub id: i32,
    pub name: String,
    pub size: i32,
    pub public: bool,
    pub commish_id: i32,
    pub created_at: String,
}

impl League {
    #[must_use]
    pub const fn is_commish(&self, user_id: i32) -> bool {
        self.commish_id == user_id
    }

    /// Whether a league holding `team_count` teams has reached its capacity.
    #[must_use]
    pub fn is_full_with(&self, team_count: u64) -> bool {
        u64::try_from(self.size).map_or(true, |size| team_count >= size)
    }
}

impl From<leagues::Model> for League {
    fn from(model: leagues::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            size: model.size,
            public: model.public,
            commish_id: model.commish_id,
            created_at: model.created_at,
        }
    }
}

/// Validated league settings, used both for creation and for edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeague {
    pub name: String,
    pub size: i32,
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub league_id: i32,
    pub manager_id: i32,
    pub manager_name: String,
}

impl Team {
    pub(crate) fn from_parts(team: fantasy_teams::Model, manager: Option<users::Model>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            league_id: team.league_id,
            manager_id: team.manager_id,
            manager_name: manager.map(|m| m.username).unwrap_or_default(),
        }
    }

    /// Name given to a team when its manager enters a league.
    #[must_use]
    pub fn default_name(manager_name: &str) -> String {
        format!("{manager_name}'s Team")
    }
}

/// A pending request to join a private league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinRequest {
    pub id: i32,
    pub league_id: i32,
    pub requester_id: i32,
    pub requester_name: String,
    pub body: String,
    pub created_at: String,
}

impl JoinRequest {
    pub(crate) fn from_parts(message: messages::Model, requester: Option<users::Model>) -> Self {
        Self {
            id: message.id,
            league_id: message.target_league_id,
            requester_id: message.requester_id,
            requester_name: requester.map(|r| r.username).unwrap_or_default(),
            body: message.body,
            created_at: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league(size: i32) -> League {
        League {
            id: 1,
            name: "Alpha".to_string(),
            size,
            public: false,
            commish_id: 7,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_is_full_with() {
        assert!(!league(10).is_full_with(2));
        assert!(league(1).is_full_with(1));
        assert!(league(1).is_full_with(3));
        assert!(league(-1).is_full_with(0));
    }

    #[test]
    fn test_is_commish() {
        assert!(league(1).is_commish(7));
        assert!(!league(1).is_commish(8));
    }
}
