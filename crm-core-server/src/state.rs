use std::sync::Arc;

use crm_core_postgres::service::{FileStore, LocalFileStore};
use crm_core_postgres::CrmServices;
use sqlx::PgPool;

use crate::auth::{StaticTokenVerifier, TokenVerifier};
use crate::config::ServerConfig;

/// Shared by every handler; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub services: CrmServices,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &ServerConfig) -> Self {
        let verifier = StaticTokenVerifier::new(config.api_tokens.clone());
        if verifier.is_empty() {
            tracing::warn!("CRM_API_TOKENS is empty, every /api request will be rejected");
        }
        let file_store: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(config.upload_dir.clone()));
        Self::with_parts(pool, file_store, Arc::new(verifier), config)
    }

    pub fn with_parts(
        pool: PgPool,
        file_store: Arc<dyn FileStore>,
        verifier: Arc<dyn TokenVerifier>,
        config: &ServerConfig,
    ) -> Self {
        Self {
            services: CrmServices::new(pool.clone(), file_store, config.service_config()),
            pool,
            verifier,
        }
    }
}
