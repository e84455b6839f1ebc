pub mod history_customer;

pub use history_customer::*;
