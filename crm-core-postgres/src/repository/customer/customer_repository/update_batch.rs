use async_trait::async_trait;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::update_batch::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CustomerRepositoryImpl;

#[async_trait]
impl UpdateBatch<Postgres, CustomerModel> for CustomerRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}

impl CustomerRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &CustomerRepositoryImpl,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE customer SET
                    name = $2, brand_name = $3, code = $4, account_manager_id = $5,
                    logo = $6, logo_small = $7, status = $8, category = $9,
                    rating = $10, average_cost = $11, updated_at = $12, deleted_at = $13
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.brand_name)
            .bind(item.code.as_ref().map(|s| s.as_str()))
            .bind(&item.account_manager_id)
            .bind(&item.logo)
            .bind(&item.logo_small)
            .bind(item.status)
            .bind(&item.category)
            .bind(item.rating)
            .bind(item.average_cost)
            .bind(item.updated_at)
            .bind(item.deleted_at)
            .execute(&mut **transaction)
            .await?;

            if result.rows_affected() != 1 {
                return Err(format!("Customer {} does not exist", item.id).into());
            }
        }

        Ok(items)
    }
}
