pub mod audit;
pub mod customer;
pub mod db_init;
pub mod status;
