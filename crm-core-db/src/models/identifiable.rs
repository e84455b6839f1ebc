use uuid::Uuid;

/// Trait for entities that can be uniquely identified by a UUID
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Uuid;
}

/// Trait for entities owned by exactly one customer
pub trait CustomerOwned: Identifiable {
    /// Returns the id of the owning customer
    fn get_customer_id(&self) -> Uuid;
}
