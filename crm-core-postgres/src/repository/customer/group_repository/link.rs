use chrono::{DateTime, Utc};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::GroupRepositoryImpl;

impl GroupRepositoryImpl {
    /// Links a customer to an existing group. Linking twice is a no-op.
    ///
    /// Returns `true` when a new link row was written.
    pub async fn link_customer(
        &self,
        customer_id: Uuid,
        group_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let result = sqlx::query(
            r#"
            INSERT INTO customer_group (customer_id, group_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (customer_id, group_id) DO NOTHING
            "#,
        )
        .bind(customer_id)
        .bind(group_id)
        .bind(created_at)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
