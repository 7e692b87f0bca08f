pub mod league;
pub mod user;

pub use league::{JoinRequest, League, NewLeague, Team};
pub use user::{User, UserKey};
