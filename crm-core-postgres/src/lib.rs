pub mod postgres_repositories;
pub mod repository;
pub mod service;
pub mod unit_of_work;
pub mod utils;

pub use postgres_repositories::PostgresRepositories;
pub use service::{CrmServices, ServiceConfig};
pub use unit_of_work::{Executor, UnitOfWork, UnitOfWorkSession};

#[cfg(test)]
pub mod test_helper;
