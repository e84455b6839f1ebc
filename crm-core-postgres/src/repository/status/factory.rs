use std::sync::Arc;

use super::{DocumentRepositoryImpl, StatusReasonRepositoryImpl};
use crate::unit_of_work::UnitOfWorkSession;

#[derive(Default)]
pub struct StatusRepoFactory;

impl StatusRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }

    pub fn build_all_repos(&self, session: &impl UnitOfWorkSession) -> StatusRepositories {
        let executor = session.executor();
        StatusRepositories {
            status_reason_repository: Arc::new(StatusReasonRepositoryImpl::new(executor.clone())),
            document_repository: Arc::new(DocumentRepositoryImpl::new(executor.clone())),
        }
    }
}

pub struct StatusRepositories {
    pub status_reason_repository: Arc<StatusReasonRepositoryImpl>,
    pub document_repository: Arc<DocumentRepositoryImpl>,
}
