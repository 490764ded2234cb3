use std::{fmt, sync::Arc};

use ranker_core::{
    application::{AccountService, AppUnitOfWork, CatalogService, VotingService},
    database::context::DatabaseContext,
};

use crate::infra::config::Config;

/// Shared handler state. Cloned per request; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseContext,
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogService>,
    pub voting: Arc<VotingService>,
    pub accounts: Arc<AccountService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("backend", &self.database.backend_name())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(database: DatabaseContext, config: Config) -> Self {
        let unit_of_work = database.unit_of_work();
        let accounts = AccountService::new(Arc::clone(&unit_of_work))
            .with_session_ttl(config.session_ttl());

        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&unit_of_work))),
            voting: Arc::new(VotingService::new(unit_of_work)),
            accounts: Arc::new(accounts),
            config: Arc::new(config),
            database,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn unit_of_work(&self) -> Arc<AppUnitOfWork> {
        self.database.unit_of_work()
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn voting(&self) -> &VotingService {
        &self.voting
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }
}
