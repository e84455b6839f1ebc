use std::sync::Arc;

use super::HistoryCustomerRepositoryImpl;
use crate::unit_of_work::UnitOfWorkSession;

/// Factory for the audit module repositories
#[derive(Default)]
pub struct AuditRepoFactory;

impl AuditRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }

    pub fn build_history_customer_repo(
        &self,
        session: &impl UnitOfWorkSession,
    ) -> Arc<HistoryCustomerRepositoryImpl> {
        Arc::new(HistoryCustomerRepositoryImpl::new(session.executor().clone()))
    }

    pub fn build_all_repos(&self, session: &impl UnitOfWorkSession) -> AuditRepositories {
        AuditRepositories {
            history_customer_repository: self.build_history_customer_repo(session),
        }
    }
}

/// Container for all audit module repositories
pub struct AuditRepositories {
    pub history_customer_repository: Arc<HistoryCustomerRepositoryImpl>,
}
