pub mod audit;
pub mod customer;
pub mod identifiable;
pub mod status;

// Re-exports
pub use audit::*;
pub use customer::*;
pub use identifiable::*;
pub use status::*;
