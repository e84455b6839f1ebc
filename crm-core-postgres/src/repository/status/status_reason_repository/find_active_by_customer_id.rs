use crm_core_db::models::status::StatusReasonModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StatusReasonRepositoryImpl;
use crate::utils::TryFromRow;

impl StatusReasonRepositoryImpl {
    /// Active reasons, oldest first
    pub async fn find_active_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<StatusReasonModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                "SELECT * FROM status_reason WHERE customer_id = $1 AND is_active ORDER BY created_at, id",
            )
            .bind(customer_id)
            .fetch_all(&mut **transaction)
            .await?
        };

        rows.iter().map(StatusReasonModel::try_from_row).collect()
    }
}
