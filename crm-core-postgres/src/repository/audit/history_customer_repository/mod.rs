pub mod create;
pub mod load_history;
pub mod repo_impl;

pub use repo_impl::HistoryCustomerRepositoryImpl;
