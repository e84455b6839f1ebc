use std::sync::Arc;

use super::{
    AddressRepositoryImpl, ContactRepositoryImpl, CustomerRepositoryImpl, GroupRepositoryImpl,
    OtherRepositoryImpl, SosmedRepositoryImpl, StructureRepositoryImpl,
};
use crate::unit_of_work::UnitOfWorkSession;

/// Builds the customer aggregate repositories on a unit of work
#[derive(Default)]
pub struct CustomerRepoFactory;

impl CustomerRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }

    /// Build all customer repositories sharing the session's transaction
    pub fn build_all_repos(&self, session: &impl UnitOfWorkSession) -> CustomerRepositories {
        let executor = session.executor();
        CustomerRepositories {
            customer_repository: Arc::new(CustomerRepositoryImpl::new(executor.clone())),
            address_repository: Arc::new(AddressRepositoryImpl::new(executor.clone())),
            contact_repository: Arc::new(ContactRepositoryImpl::new(executor.clone())),
            sosmed_repository: Arc::new(SosmedRepositoryImpl::new(executor.clone())),
            other_repository: Arc::new(OtherRepositoryImpl::new(executor.clone())),
            structure_repository: Arc::new(StructureRepositoryImpl::new(executor.clone())),
            group_repository: Arc::new(GroupRepositoryImpl::new(executor.clone())),
        }
    }
}

/// Container for all customer aggregate repositories
pub struct CustomerRepositories {
    pub customer_repository: Arc<CustomerRepositoryImpl>,
    pub address_repository: Arc<AddressRepositoryImpl>,
    pub contact_repository: Arc<ContactRepositoryImpl>,
    pub sosmed_repository: Arc<SosmedRepositoryImpl>,
    pub other_repository: Arc<OtherRepositoryImpl>,
    pub structure_repository: Arc<StructureRepositoryImpl>,
    pub group_repository: Arc<GroupRepositoryImpl>,
}
