pub mod address_repository;
pub mod contact_repository;
pub mod customer_repository;
pub mod factory;
pub mod group_repository;
pub mod other_repository;
pub mod sosmed_repository;
pub mod structure_repository;

#[cfg(test)]
pub mod test_utils;

pub use address_repository::AddressRepositoryImpl;
pub use contact_repository::ContactRepositoryImpl;
pub use customer_repository::CustomerRepositoryImpl;
pub use factory::{CustomerRepoFactory, CustomerRepositories};
pub use group_repository::GroupRepositoryImpl;
pub use other_repository::OtherRepositoryImpl;
pub use sosmed_repository::SosmedRepositoryImpl;
pub use structure_repository::StructureRepositoryImpl;
