pub mod address;
pub mod contact;
pub mod customer;
pub mod customer_aggregate;
pub mod customer_status;
pub mod group;
pub mod other;
pub mod sosmed;
pub mod structure;

pub use address::*;
pub use contact::*;
pub use customer::*;
pub use customer_aggregate::*;
pub use customer_status::*;
pub use group::*;
pub use other::*;
pub use sosmed::*;
pub use structure::*;
