//! Domain service for leagues, their teams and membership.
//!
//! Every operation reports failure as a [`LeagueError`]; callers decide how
//! a refusal is presented.

use thiserror::Error;

use crate::domain::{FieldErrors, JoinForm, LeagueForm};
use crate::models::{JoinRequest, League, Team, User};

/// Who may perform a gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Team managers of the league, or its commissioner.
    Member,
    Commissioner,
}

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("League {0} not found")]
    NotFound(i32),

    #[error("Join request {0} not found")]
    RequestNotFound(i32),

    #[error("Only the league {0:?} may do this")]
    Forbidden(Role),

    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    #[error("League is full")]
    Full,

    #[error("Already a member of this league")]
    AlreadyMember,

    #[error("A join request is already pending")]
    AlreadyRequested,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for LeagueError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for LeagueError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Public league: the caller now has a team.
    Joined(Team),
    /// Private league: the commissioner has to approve.
    Requested(JoinRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Accept,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestResolution {
    Accepted(JoinRequest),
    Rejected(JoinRequest),
    /// Accepted, but the requester had joined in the meantime.
    AlreadyMember(JoinRequest),
}

/// Everything the league index shows.
#[derive(Debug, Clone, Default)]
pub struct LeagueDirectory {
    pub all: Vec<League>,
    /// `None` for anonymous visitors.
    pub mine: Option<Vec<League>>,
    pub managed: Option<Vec<League>>,
}

#[async_trait::async_trait]
pub trait LeagueService: Send + Sync {
    /// Creates a league with `commish` as commissioner and first team owner.
    async fn create_league(&self, commish: &User, form: &LeagueForm)
    -> Result<League, LeagueError>;

    async fn get_league(&self, id: i32) -> Result<League, LeagueError>;

    async fn league_with_teams(&self, id: i32) -> Result<(League, Vec<Team>), LeagueError>;

    /// The draft room is open to members and the commissioner.
    async fn draft_room(&self, id: i32, viewer: Option<&User>) -> Result<League, LeagueError>;

    /// Loads the league for its settings page (commissioner only).
    async fn settings(&self, id: i32, viewer: Option<&User>) -> Result<League, LeagueError>;

    async fn update_settings(
        &self,
        id: i32,
        viewer: Option<&User>,
        form: &LeagueForm,
    ) -> Result<League, LeagueError>;

    async fn join_requests(
        &self,
        id: i32,
        viewer: Option<&User>,
    ) -> Result<(League, Vec<JoinRequest>), LeagueError>;

    /// Joins a public league or files a request to join a private one.
    ///
    /// # Errors
    ///
    /// [`LeagueError::Full`] when the league has no room, and
    /// [`LeagueError::AlreadyMember`] when the caller already has a team.
    async fn join(&self, id: i32, user: &User, form: &JoinForm)
    -> Result<JoinOutcome, LeagueError>;

    async fn resolve_request(
        &self,
        id: i32,
        request_id: i32,
        viewer: Option<&User>,
        decision: RequestDecision,
    ) -> Result<RequestResolution, LeagueError>;

    async fn directory(&self, viewer: Option<&User>) -> Result<LeagueDirectory, LeagueError>;
}
