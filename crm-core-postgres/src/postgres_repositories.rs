use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::audit::{AuditRepoFactory, AuditRepositories};
use crate::repository::customer::{CustomerRepoFactory, CustomerRepositories};
use crate::repository::status::{StatusRepoFactory, StatusRepositories};
use crate::unit_of_work::{Executor, UnitOfWork, UnitOfWorkSession};

/// Entry point for building repositories. Each [`RepositorySession`] wraps
/// one transaction that all of its repositories share.
#[derive(Clone)]
pub struct PostgresRepositories {
    pool: PgPool,
    customer_factory: Arc<CustomerRepoFactory>,
    status_factory: Arc<StatusRepoFactory>,
    audit_factory: Arc<AuditRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            customer_factory: CustomerRepoFactory::new(),
            status_factory: StatusRepoFactory::new(),
            audit_factory: AuditRepoFactory::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and build every repository on it
    pub async fn begin(&self) -> Result<RepositorySession, sqlx::Error> {
        let uow = UnitOfWork::begin(&self.pool).await?;
        Ok(RepositorySession {
            customer: self.customer_factory.build_all_repos(&uow),
            status: self.status_factory.build_all_repos(&uow),
            audit: self.audit_factory.build_all_repos(&uow),
            uow,
        })
    }
}

/// Repositories bound to one open transaction. Dropping the session without
/// committing rolls the transaction back.
pub struct RepositorySession {
    uow: UnitOfWork,
    pub customer: CustomerRepositories,
    pub status: StatusRepositories,
    pub audit: AuditRepositories,
}

impl RepositorySession {
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.uow.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.uow.rollback().await
    }
}

impl UnitOfWorkSession for RepositorySession {
    fn executor(&self) -> &Executor {
        self.uow.executor()
    }
}
