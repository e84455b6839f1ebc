pub mod customer_request;
pub mod status_request;
pub mod update_request;

pub use customer_request::*;
pub use status_request::*;
pub use update_request::*;
