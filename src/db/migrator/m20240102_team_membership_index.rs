use crate::entities::{fantasy_teams, messages, prelude::*};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TEAM_INDEX: &str = "idx_fantasy_teams_manager_league";
const REQUEST_INDEX: &str = "idx_messages_target_league";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One team per manager per league.
        manager
            .create_index(
                Index::create()
                    .name(TEAM_INDEX)
                    .table(FantasyTeams)
                    .col(fantasy_teams::Column::ManagerId)
                    .col(fantasy_teams::Column::LeagueId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(REQUEST_INDEX)
                    .table(Messages)
                    .col(messages::Column::TargetLeagueId)
                    .col(messages::Column::Request)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(REQUEST_INDEX).table(Messages).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name(TEAM_INDEX).table(FantasyTeams).to_owned())
            .await?;

        Ok(())
    }
}
