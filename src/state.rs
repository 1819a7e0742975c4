use std::sync::Arc;

use rollcall_config::{CorsConfig, RegistrationPolicy, ServerConfig, StoreBackend};
use rollcall_db::{init_db_pool, run_migrations};
use tracing::info;

use crate::modules::common_students::CommonStudentsService;
use crate::modules::notifications::NotificationService;
use crate::modules::registration::RegistrationService;
use crate::modules::suspension::SuspensionService;
use crate::store::{DirectoryStore, MemoryDirectoryStore, PgDirectoryStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn DirectoryStore>,
    pub registration_policy: RegistrationPolicy,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        registration_policy: RegistrationPolicy,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store,
            registration_policy,
            cors_config,
        }
    }

    /// State over a fresh process-local store.
    pub fn in_memory(registration_policy: RegistrationPolicy) -> Self {
        Self::new(
            Arc::new(MemoryDirectoryStore::new()),
            registration_policy,
            CorsConfig::default(),
        )
    }

    pub fn registration_service(&self) -> RegistrationService {
        RegistrationService::new(self.store.clone(), self.registration_policy)
    }

    pub fn common_students_service(&self) -> CommonStudentsService {
        CommonStudentsService::new(self.store.clone())
    }

    pub fn suspension_service(&self) -> SuspensionService {
        SuspensionService::new(self.store.clone())
    }

    pub fn notification_service(&self) -> NotificationService {
        NotificationService::new(self.store.clone())
    }
}

/// Builds the state from the environment.
///
/// # Panics
///
/// Panics when the Postgres backend is selected and the database cannot be
/// reached or migrated.
pub async fn init_app_state(server_config: &ServerConfig) -> AppState {
    let store: Arc<dyn DirectoryStore> = match server_config.store_backend {
        StoreBackend::Postgres => {
            let pool = init_db_pool().await;
            run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            Arc::new(PgDirectoryStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("Using in-memory directory store; data is lost on shutdown");
            Arc::new(MemoryDirectoryStore::new())
        }
    };

    AppState::new(store, RegistrationPolicy::from_env(), CorsConfig::from_env())
}
