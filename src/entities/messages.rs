use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Marks the message as a pending request to join `target_league_id`.
    pub request: bool,

    pub target_league_id: i32,

    pub requester_id: i32,

    pub body: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::leagues::Entity",
        from = "Column::TargetLeagueId",
        to = "super::leagues::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TargetLeague,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RequesterId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Requester,
}

impl Related<super::leagues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetLeague.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requester.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
