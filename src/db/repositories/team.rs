use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::entities::{fantasy_teams, prelude::*};
use crate::models::{League, Team};

/// Result of trying to put a manager's team into a league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamInsert {
    Added(Team),
    Full,
    AlreadyMember,
}

pub struct TeamRepository {
    conn: DatabaseConnection,
}

impl TeamRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Teams of a league with their managers, in the order they joined.
    pub async fn list_for_league(&self, league_id: i32) -> Result<Vec<Team>> {
        let rows = FantasyTeams::find()
            .filter(fantasy_teams::Column::LeagueId.eq(league_id))
            .find_also_related(Users)
            .order_by_asc(fantasy_teams::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list league teams")?;

        Ok(rows
            .into_iter()
            .map(|(team, manager)| Team::from_parts(team, manager))
            .collect())
    }

    pub async fn count_for_league(&self, league_id: i32) -> Result<u64> {
        count_teams(&self.conn, league_id).await
    }

    pub async fn is_member(&self, league_id: i32, user_id: i32) -> Result<bool> {
        is_member(&self.conn, league_id, user_id).await
    }

    /// Add the manager's team unless the league is full or they already have one.
    /// The capacity check and the insert share one transaction.
    pub async fn add_if_room(
        &self,
        league: &League,
        manager_id: i32,
        manager_name: &str,
    ) -> Result<TeamInsert> {
        let txn = self.conn.begin().await?;
        let outcome = insert_if_room(&txn, league, manager_id, manager_name).await?;

        if matches!(outcome, TeamInsert::Added(_)) {
            txn.commit().await?;
        } else {
            txn.rollback().await?;
        }

        Ok(outcome)
    }
}

pub(crate) async fn count_teams<C: ConnectionTrait>(conn: &C, league_id: i32) -> Result<u64> {
    FantasyTeams::find()
        .filter(fantasy_teams::Column::LeagueId.eq(league_id))
        .count(conn)
        .await
        .context("Failed to count league teams")
}

pub(crate) async fn is_member<C: ConnectionTrait>(
    conn: &C,
    league_id: i32,
    user_id: i32,
) -> Result<bool> {
    let count = FantasyTeams::find()
        .filter(fantasy_teams::Column::LeagueId.eq(league_id))
        .filter(fantasy_teams::Column::ManagerId.eq(user_id))
        .count(conn)
        .await
        .context("Failed to check league membership")?;

    Ok(count > 0)
}

/// Insert a team named after its manager.
pub(crate) async fn insert_team<C: ConnectionTrait>(
    conn: &C,
    league_id: i32,
    manager_id: i32,
    manager_name: &str,
) -> Result<Team, DbErr> {
    let model = fantasy_teams::ActiveModel {
        name: Set(Team::default_name(manager_name)),
        manager_id: Set(manager_id),
        league_id: Set(league_id),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(Team {
        id: model.id,
        name: model.name,
        league_id: model.league_id,
        manager_id: model.manager_id,
        manager_name: manager_name.to_string(),
    })
}

pub(crate) async fn insert_if_room<C: ConnectionTrait>(
    conn: &C,
    league: &League,
    manager_id: i32,
    manager_name: &str,
) -> Result<TeamInsert> {
    if is_member(conn, league.id, manager_id).await? {
        return Ok(TeamInsert::AlreadyMember);
    }

    if league.is_full_with(count_teams(conn, league.id).await?) {
        return Ok(TeamInsert::Full);
    }

    match insert_team(conn, league.id, manager_id, manager_name).await {
        Ok(team) => Ok(TeamInsert::Added(team)),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Ok(TeamInsert::AlreadyMember)
        }
        Err(e) => Err(e).context("Failed to insert team"),
    }
}
