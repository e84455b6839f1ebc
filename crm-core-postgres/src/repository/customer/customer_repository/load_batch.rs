use async_trait::async_trait;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CustomerRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl LoadBatch<Postgres, CustomerModel> for CustomerRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CustomerModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

impl CustomerRepositoryImpl {
    /// Loads customers including soft-deleted ones; callers decide what a
    /// `deleted_at` marker means for them.
    pub(super) async fn load_batch_impl(
        repo: &CustomerRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CustomerModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM customer WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded: HashMap<Uuid, CustomerModel> = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = CustomerModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.remove(id)).collect())
    }
}
