//! `SeaORM` implementation of the `LeagueService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::LeagueConfig;
use crate::db::{Store, TeamInsert};
use crate::domain::{FieldErrors, JoinForm, LeagueForm};
use crate::models::{JoinRequest, League, Team, User};
use crate::services::league_service::{
    JoinOutcome, LeagueDirectory, LeagueError, LeagueService, RequestDecision, RequestResolution,
    Role,
};

pub struct SeaOrmLeagueService {
    store: Store,
    limits: LeagueConfig,
}

impl SeaOrmLeagueService {
    #[must_use]
    pub const fn new(store: Store, limits: LeagueConfig) -> Self {
        Self { store, limits }
    }

    async fn commish_league(&self, id: i32, viewer: Option<&User>) -> Result<League, LeagueError> {
        let league = self.get_league(id).await?;
        match viewer {
            Some(user) if league.is_commish(user.id) => Ok(league),
            _ => Err(LeagueError::Forbidden(Role::Commissioner)),
        }
    }
}

#[async_trait]
impl LeagueService for SeaOrmLeagueService {
    async fn create_league(
        &self,
        commish: &User,
        form: &LeagueForm,
    ) -> Result<League, LeagueError> {
        let new_league = form.validate(&self.limits).map_err(LeagueError::Invalid)?;
        let (league, team) = self
            .store
            .create_league_with_team(&new_league, commish)
            .await?;

        info!(
            league_id = league.id,
            team_id = team.id,
            commish = %commish.username,
            "League created"
        );
        Ok(league)
    }

    async fn get_league(&self, id: i32) -> Result<League, LeagueError> {
        self.store
            .get_league(id)
            .await?
            .ok_or(LeagueError::NotFound(id))
    }

    async fn league_with_teams(&self, id: i32) -> Result<(League, Vec<Team>), LeagueError> {
        let league = self.get_league(id).await?;
        let teams = self.store.list_teams(id).await?;
        Ok((league, teams))
    }

    async fn draft_room(&self, id: i32, viewer: Option<&User>) -> Result<League, LeagueError> {
        let league = self.get_league(id).await?;
        let Some(user) = viewer else {
            return Err(LeagueError::Forbidden(Role::Member));
        };

        if league.is_commish(user.id) || self.store.is_member(id, user.id).await? {
            Ok(league)
        } else {
            Err(LeagueError::Forbidden(Role::Member))
        }
    }

    async fn settings(&self, id: i32, viewer: Option<&User>) -> Result<League, LeagueError> {
        self.commish_league(id, viewer).await
    }

    async fn update_settings(
        &self,
        id: i32,
        viewer: Option<&User>,
        form: &LeagueForm,
    ) -> Result<League, LeagueError> {
        self.commish_league(id, viewer).await?;

        let settings = form.validate(&self.limits).map_err(LeagueError::Invalid)?;
        let team_count = self.store.count_teams(id).await?;
        if u64::try_from(settings.size).unwrap_or(0) < team_count {
            return Err(LeagueError::Invalid(FieldErrors::single(
                "size",
                format!("Size cannot be smaller than the current number of teams ({team_count})."),
            )));
        }

        let league = self
            .store
            .update_league(id, &settings)
            .await?
            .ok_or(LeagueError::NotFound(id))?;

        info!(league_id = id, size = league.size, public = league.public, "League settings saved");
        Ok(league)
    }

    async fn join_requests(
        &self,
        id: i32,
        viewer: Option<&User>,
    ) -> Result<(League, Vec<JoinRequest>), LeagueError> {
        let league = self.commish_league(id, viewer).await?;
        let requests = self.store.list_join_requests(id).await?;
        Ok((league, requests))
    }

    async fn join(
        &self,
        id: i32,
        user: &User,
        form: &JoinForm,
    ) -> Result<JoinOutcome, LeagueError> {
        let league = self.get_league(id).await?;

        if self.store.is_member(id, user.id).await? {
            return Err(LeagueError::AlreadyMember);
        }

        if league.is_full_with(self.store.count_teams(id).await?) {
            info!(league_id = id, user_id = user.id, "Join refused, league is full");
            return Err(LeagueError::Full);
        }

        if league.public {
            return match self.store.add_team_if_room(&league, user).await? {
                TeamInsert::Added(team) => {
                    info!(league_id = id, user_id = user.id, team_id = team.id, "Joined league");
                    Ok(JoinOutcome::Joined(team))
                }
                TeamInsert::Full => Err(LeagueError::Full),
                TeamInsert::AlreadyMember => Err(LeagueError::AlreadyMember),
            };
        }

        let note = form.validate().map_err(LeagueError::Invalid)?;
        let Some(request) = self.store.create_join_request(id, user, &note).await? else {
            return Err(LeagueError::AlreadyRequested);
        };
        info!(league_id = id, user_id = user.id, request_id = request.id, "Join requested");
        Ok(JoinOutcome::Requested(request))
    }

    async fn resolve_request(
        &self,
        id: i32,
        request_id: i32,
        viewer: Option<&User>,
        decision: RequestDecision,
    ) -> Result<RequestResolution, LeagueError> {
        let league = self.commish_league(id, viewer).await?;

        let request = self
            .store
            .get_join_request(request_id)
            .await?
            .filter(|r| r.league_id == id)
            .ok_or(LeagueError::RequestNotFound(request_id))?;

        let resolution = match decision {
            RequestDecision::Reject => {
                self.store.delete_join_request(request_id).await?;
                RequestResolution::Rejected(request)
            }
            RequestDecision::Accept => match self.store.accept_join_request(&league, &request).await? {
                TeamInsert::Added(_) => RequestResolution::Accepted(request),
                TeamInsert::AlreadyMember => RequestResolution::AlreadyMember(request),
                TeamInsert::Full => return Err(LeagueError::Full),
            },
        };

        info!(league_id = id, request_id, ?decision, "Join request resolved");
        Ok(resolution)
    }

    async fn directory(&self, viewer: Option<&User>) -> Result<LeagueDirectory, LeagueError> {
        let all = self.store.list_leagues().await?;

        let Some(user) = viewer else {
            return Ok(LeagueDirectory {
                all,
                mine: None,
                managed: None,
            });
        };

        Ok(LeagueDirectory {
            all,
            mine: Some(self.store.list_leagues_for_member(user.id).await?),
            managed: Some(self.store.list_leagues_managed_by(user.id).await?),
        })
    }
}
