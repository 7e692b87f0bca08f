use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait, sea_query::JoinType,
};

use super::team::insert_team;
use crate::entities::{fantasy_teams, leagues, prelude::*};
use crate::models::{League, NewLeague, Team, User};

pub struct LeagueRepository {
    conn: DatabaseConnection,
}

impl LeagueRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a league and its commissioner's team as one unit of work.
    pub async fn create_with_founding_team(
        &self,
        new_league: &NewLeague,
        commish: &User,
    ) -> Result<(League, Team)> {
        let txn = self.conn.begin().await?;

        let league = leagues::ActiveModel {
            name: Set(new_league.name.clone()),
            size: Set(new_league.size),
            public: Set(new_league.public),
            commish_id: Set(commish.id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert league")?;

        let team = insert_team(&txn, league.id, commish.id, &commish.username)
            .await
            .context("Failed to insert founding team")?;

        txn.commit().await?;
        Ok((League::from(league), team))
    }

    pub async fn get(&self, id: i32) -> Result<Option<League>> {
        let league = Leagues::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query league by ID")?;

        Ok(league.map(League::from))
    }

    pub async fn list_all(&self) -> Result<Vec<League>> {
        let rows = Leagues::find()
            .order_by_asc(leagues::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list leagues")?;

        Ok(rows.into_iter().map(League::from).collect())
    }

    /// Leagues in which the user manages a team.
    pub async fn list_for_member(&self, user_id: i32) -> Result<Vec<League>> {
        let rows = Leagues::find()
            .join(JoinType::InnerJoin, leagues::Relation::FantasyTeams.def())
            .filter(fantasy_teams::Column::ManagerId.eq(user_id))
            .order_by_asc(leagues::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list leagues for member")?;

        Ok(rows.into_iter().map(League::from).collect())
    }

    pub async fn list_managed_by(&self, user_id: i32) -> Result<Vec<League>> {
        let rows = Leagues::find()
            .filter(leagues::Column::CommishId.eq(user_id))
            .order_by_asc(leagues::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list managed leagues")?;

        Ok(rows.into_iter().map(League::from).collect())
    }

    pub async fn update(&self, id: i32, settings: &NewLeague) -> Result<Option<League>> {
        let Some(model) = Leagues::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query league for update")?
        else {
            return Ok(None);
        };

        let mut active: leagues::ActiveModel = model.into();
        active.name = Set(settings.name.clone());
        active.size = Set(settings.size);
        active.public = Set(settings.public);
        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update league")?;

        Ok(Some(League::from(updated)))
    }
}
