pub mod create_batch;
pub mod find_by_customer_id;
pub mod repo_impl;

pub use repo_impl::SosmedRepositoryImpl;
