use crm_core_db::models::customer::CustomerModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CustomerRepositoryImpl;
use crate::utils::TryFromRow;

impl CustomerRepositoryImpl {
    /// Loads a customer and holds a row lock on it until the surrounding
    /// transaction ends. Concurrent writers of the same customer queue up
    /// behind the lock instead of overwriting each other.
    ///
    /// Soft-deleted customers are returned as `None`.
    pub async fn lock_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomerModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM customer WHERE id = $1 AND deleted_at IS NULL FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.as_ref().map(CustomerModel::try_from_row).transpose()
    }
}
