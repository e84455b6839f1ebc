use crm_core_db::models::audit::HistoryCustomerModel;

use super::repo_impl::HistoryCustomerRepositoryImpl;

impl HistoryCustomerRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &HistoryCustomerRepositoryImpl,
        record: &HistoryCustomerModel,
    ) -> Result<HistoryCustomerModel, Box<dyn std::error::Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            INSERT INTO history_customer (id, customer_id, user_id, status, notes, snapshot, hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.customer_id)
        .bind(record.user_id)
        .bind(&record.status)
        .bind(&record.notes)
        .bind(&record.snapshot)
        .bind(record.hash)
        .bind(record.created_at);

        let mut tx = repo.executor.tx.lock().await;
        if let Some(transaction) = tx.as_mut() {
            query.execute(&mut **transaction).await?;
        } else {
            return Err("Transaction has been consumed".into());
        }

        Ok(record.clone())
    }
}
