use crm_core_db::models::status::StatusReasonModel;
use std::error::Error;

use super::repo_impl::StatusReasonRepositoryImpl;

impl StatusReasonRepositoryImpl {
    pub async fn create(
        &self,
        reason: &StatusReasonModel,
    ) -> Result<StatusReasonModel, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        sqlx::query(
            r#"
            INSERT INTO status_reason (id, customer_id, reason, status, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reason.id)
        .bind(reason.customer_id)
        .bind(&reason.reason)
        .bind(reason.status)
        .bind(reason.is_active)
        .bind(reason.created_at)
        .bind(reason.updated_at)
        .execute(&mut **transaction)
        .await?;

        Ok(reason.clone())
    }
}
