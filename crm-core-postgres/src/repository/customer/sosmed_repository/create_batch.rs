use async_trait::async_trait;
use crm_core_db::models::customer::SosmedModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::SosmedRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, SosmedModel> for SosmedRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<SosmedModel>,
    ) -> Result<Vec<SosmedModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO sosmed (id, customer_id, name, platform, handle, is_active, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(item.id)
            .bind(item.customer_id)
            .bind(&item.name)
            .bind(item.platform.as_str())
            .bind(&item.handle)
            .bind(item.is_active)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
