use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id password hash
    pub password_hash: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fantasy_teams::Entity")]
    FantasyTeams,
}

impl Related<super::fantasy_teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FantasyTeams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
