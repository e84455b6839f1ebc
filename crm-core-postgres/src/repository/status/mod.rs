pub mod document_repository;
pub mod factory;
pub mod status_reason_repository;

pub use document_repository::DocumentRepositoryImpl;
pub use factory::{StatusRepoFactory, StatusRepositories};
pub use status_reason_repository::StatusReasonRepositoryImpl;
