use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AccountService, LeagueService, SeaOrmAccountService, SeaOrmLeagueService};

/// Everything a request handler can reach.
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub accounts: Arc<dyn AccountService>,

    pub leagues: Arc<dyn LeagueService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Opens the database, applies migrations and wires the services.
    pub async fn new(
        config: Config,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store, prometheus_handle))
    }

    #[must_use]
    pub fn with_store(
        config: Config,
        store: Store,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        let accounts = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            config.security.clone(),
        ));
        let leagues = Arc::new(SeaOrmLeagueService::new(
            store.clone(),
            config.leagues.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            accounts,
            leagues,
            prometheus_handle,
        }
    }
}

pub async fn create_app_state(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState::new(config, prometheus_handle).await?))
}
