pub mod prelude;

pub mod fantasy_teams;
pub mod leagues;
pub mod messages;
pub mod users;
