pub mod create_batch;
pub mod find_by_customer_id;
pub mod load;
pub mod load_batch;
pub mod load_history;
pub mod pagination;
pub mod update_batch;

// Re-exports
pub use create_batch::*;
pub use find_by_customer_id::*;
pub use load::*;
pub use load_batch::*;
pub use load_history::*;
pub use pagination::*;
pub use update_batch::*;
