use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::CustomerOwned;
use crate::repository::pagination::{Page, PageRequest};

/// Repository trait for loading the append-only history of a customer
///
/// Records are ordered by creation time ascending, ties broken by the
/// time-ordered id, so the order is strictly increasing.
///
/// # Example
/// ```ignore
/// use crm_core_db::repository::pagination::PageRequest;
///
/// let page = repo.load_history_page(customer_id, PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadHistory<DB: Database, T: CustomerOwned>: Send + Sync {
    /// Every history record of the customer
    async fn load_history(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;

    /// One page of the history of the customer
    ///
    /// # Arguments
    /// * `customer_id` - The customer whose history should be loaded
    /// * `page` - The pagination parameters (limit and offset)
    async fn load_history_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
