use std::sync::Arc;

use adapter::repository::account::AccountRepositoryImpl;
use adapter::repository::event::EventRepositoryImpl;
use adapter::{database::ConnectionPool, repository::health::HealthCheckRepositoryImpl};
use kernel::repository::account::AccountRepository;
use kernel::repository::event::EventRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::session::SessionRepository;
use shared::config::{AppConfig, AuthConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    account_repository: Arc<dyn AccountRepository>,
    event_repository: Arc<dyn EventRepository>,
    session_repository: Arc<dyn SessionRepository>,
    app_config: Arc<AppConfig>,
}

impl AppRegistry {
    // セッションの保存先は起動側で用意して渡す（本番は Redis）
    pub fn new(
        pool: ConnectionPool,
        session_repository: Arc<dyn SessionRepository>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let account_repository = Arc::new(AccountRepositoryImpl::new(
            pool.clone(),
            app_config.auth.password_hash_cost,
        ));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            account_repository,
            event_repository,
            session_repository,
            app_config: Arc::new(app_config),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn account_repository(&self) -> Arc<dyn AccountRepository> {
        self.account_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn session_repository(&self) -> Arc<dyn SessionRepository> {
        self.session_repository.clone()
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.app_config.auth
    }
}
