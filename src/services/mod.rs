pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService, UserProfile};
pub use account_service_impl::SeaOrmAccountService;

pub mod league_service;
pub mod league_service_impl;
pub use league_service::{
    JoinOutcome, LeagueDirectory, LeagueError, LeagueService, RequestDecision, RequestResolution,
    Role,
};
pub use league_service_impl::SeaOrmLeagueService;
