use async_trait::async_trait;
use crm_core_db::models::customer::OtherModel;
use crm_core_db::repository::find_by_customer_id::FindByCustomerId;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::OtherRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl FindByCustomerId<Postgres, OtherModel> for OtherRepositoryImpl {
    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<OtherModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM other_attribute WHERE customer_id = $1 ORDER BY id")
                .bind(customer_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(OtherModel::try_from_row).collect()
    }
}
