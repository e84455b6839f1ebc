use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::CustomerOwned;

/// Repository trait for loading every dependent row owned by a customer
///
/// Rows come back in a stable order: declaration order for structures,
/// creation order (time-ordered id) for everything else.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The dependent entity type
#[async_trait]
pub trait FindByCustomerId<DB: Database, T: CustomerOwned>: Send + Sync {
    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
