use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{JoinRequest, League, NewLeague, Team, User};

pub mod migrator;
pub mod repositories;

pub use repositories::team::TeamInsert;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    /// Held for every write. SQLite allows one writer, and a deferred
    /// transaction that reads before writing fails with `SQLITE_BUSY`
    /// instead of waiting when another writer got there first.
    writes: Arc<Mutex<()>>,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            let path = Path::new(path_str.split('?').next().unwrap_or(path_str));
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !path.exists() {
                std::fs::File::create(path)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            writes: Arc::new(Mutex::new(())),
        })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn league_repo(&self) -> repositories::league::LeagueRepository {
        repositories::league::LeagueRepository::new(self.conn.clone())
    }

    fn team_repo(&self) -> repositories::team::TeamRepository {
        repositories::team::TeamRepository::new(self.conn.clone())
    }

    fn message_repo(&self) -> repositories::message::MessageRepository {
        repositories::message::MessageRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<User>> {
        let password_hash = repositories::user::hash_password_blocking(password, security).await?;
        let _write = self.writes.lock().await;
        self.user_repo().create(username, password_hash).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    // ========== Leagues ==========

    pub async fn create_league_with_team(
        &self,
        new_league: &NewLeague,
        commish: &User,
    ) -> Result<(League, Team)> {
        let _write = self.writes.lock().await;
        self.league_repo()
            .create_with_founding_team(new_league, commish)
            .await
    }

    pub async fn get_league(&self, id: i32) -> Result<Option<League>> {
        self.league_repo().get(id).await
    }

    pub async fn list_leagues(&self) -> Result<Vec<League>> {
        self.league_repo().list_all().await
    }

    pub async fn list_leagues_for_member(&self, user_id: i32) -> Result<Vec<League>> {
        self.league_repo().list_for_member(user_id).await
    }

    pub async fn list_leagues_managed_by(&self, user_id: i32) -> Result<Vec<League>> {
        self.league_repo().list_managed_by(user_id).await
    }

    pub async fn update_league(&self, id: i32, settings: &NewLeague) -> Result<Option<League>> {
        let _write = self.writes.lock().await;
        self.league_repo().update(id, settings).await
    }

    // ========== Teams ==========

    pub async fn list_teams(&self, league_id: i32) -> Result<Vec<Team>> {
        self.team_repo().list_for_league(league_id).await
    }

    pub async fn count_teams(&self, league_id: i32) -> Result<u64> {
        self.team_repo().count_for_league(league_id).await
    }

    pub async fn is_member(&self, league_id: i32, user_id: i32) -> Result<bool> {
        self.team_repo().is_member(league_id, user_id).await
    }

    pub async fn add_team_if_room(&self, league: &League, manager: &User) -> Result<TeamInsert> {
        let _write = self.writes.lock().await;
        self.team_repo()
            .add_if_room(league, manager.id, &manager.username)
            .await
    }

    // ========== Join requests ==========

    /// File a join request unless the requester already has one pending.
    pub async fn create_join_request(
        &self,
        league_id: i32,
        requester: &User,
        body: &str,
    ) -> Result<Option<JoinRequest>> {
        let _write = self.writes.lock().await;
        self.message_repo()
            .create_join_request(league_id, requester, body)
            .await
    }

    pub async fn list_join_requests(&self, league_id: i32) -> Result<Vec<JoinRequest>> {
        self.message_repo().list_pending(league_id).await
    }

    pub async fn get_join_request(&self, id: i32) -> Result<Option<JoinRequest>> {
        self.message_repo().get_pending(id).await
    }

    pub async fn delete_join_request(&self, id: i32) -> Result<()> {
        let _write = self.writes.lock().await;
        self.message_repo().delete(id).await
    }

    pub async fn accept_join_request(
        &self,
        league: &League,
        request: &JoinRequest,
    ) -> Result<TeamInsert> {
        let _write = self.writes.lock().await;
        self.message_repo().accept(league, request).await
    }
}
