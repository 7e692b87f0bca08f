use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::team::{TeamInsert, insert_if_room};
use crate::entities::{messages, prelude::*};
use crate::models::{JoinRequest, League, User};

pub struct MessageRepository {
    conn: DatabaseConnection,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns `None` when the requester already has a request pending.
    pub async fn create_join_request(
        &self,
        league_id: i32,
        requester: &User,
        body: &str,
    ) -> Result<Option<JoinRequest>> {
        let txn = self.conn.begin().await?;

        if has_pending(&txn, league_id, requester.id).await? {
            txn.rollback().await?;
            return Ok(None);
        }

        let model = messages::ActiveModel {
            request: Set(true),
            target_league_id: Set(league_id),
            requester_id: Set(requester.id),
            body: Set(body.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert join request")?;

        txn.commit().await?;

        Ok(Some(JoinRequest {
            id: model.id,
            league_id: model.target_league_id,
            requester_id: model.requester_id,
            requester_name: requester.username.clone(),
            body: model.body,
            created_at: model.created_at,
        }))
    }

    /// Pending join requests for a league, oldest first.
    pub async fn list_pending(&self, league_id: i32) -> Result<Vec<JoinRequest>> {
        let rows = Messages::find()
            .filter(messages::Column::Request.eq(true))
            .filter(messages::Column::TargetLeagueId.eq(league_id))
            .find_also_related(Users)
            .order_by_asc(messages::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list join requests")?;

        Ok(rows
            .into_iter()
            .map(|(message, requester)| JoinRequest::from_parts(message, requester))
            .collect())
    }

    pub async fn get_pending(&self, id: i32) -> Result<Option<JoinRequest>> {
        let row = Messages::find_by_id(id)
            .filter(messages::Column::Request.eq(true))
            .find_also_related(Users)
            .one(&self.conn)
            .await
            .context("Failed to query join request")?;

        Ok(row.map(|(message, requester)| JoinRequest::from_parts(message, requester)))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        Messages::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete join request")?;
        Ok(())
    }

    /// Turn a join request into a team.
    ///
    /// The request is consumed when the team is created or when the requester
    /// already has one; a full league leaves it pending.
    pub async fn accept(&self, league: &League, request: &JoinRequest) -> Result<TeamInsert> {
        let txn = self.conn.begin().await?;

        let outcome = insert_if_room(
            &txn,
            league,
            request.requester_id,
            &request.requester_name,
        )
        .await?;

        if matches!(outcome, TeamInsert::Full) {
            txn.rollback().await?;
            return Ok(outcome);
        }

        Messages::delete_by_id(request.id)
            .exec(&txn)
            .await
            .context("Failed to consume join request")?;

        txn.commit().await?;
        Ok(outcome)
    }
}

async fn has_pending<C: ConnectionTrait>(conn: &C, league_id: i32, requester_id: i32) -> Result<bool> {
    let count = Messages::find()
        .filter(messages::Column::Request.eq(true))
        .filter(messages::Column::TargetLeagueId.eq(league_id))
        .filter(messages::Column::RequesterId.eq(requester_id))
        .count(conn)
        .await
        .context("Failed to check pending join requests")?;

    Ok(count > 0)
}
