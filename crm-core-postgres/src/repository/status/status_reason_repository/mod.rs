pub mod create;
pub mod find_active_by_customer_id;
pub mod repo_impl;

pub use repo_impl::StatusReasonRepositoryImpl;
