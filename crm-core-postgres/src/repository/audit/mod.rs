pub mod factory;
pub mod history_customer_repository;

pub use factory::{AuditRepoFactory, AuditRepositories};
pub use history_customer_repository::HistoryCustomerRepositoryImpl;
