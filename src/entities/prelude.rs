pub use super::fantasy_teams::Entity as FantasyTeams;
pub use super::leagues::Entity as Leagues;
pub use super::messages::Entity as Messages;
pub use super::users::Entity as Users;
