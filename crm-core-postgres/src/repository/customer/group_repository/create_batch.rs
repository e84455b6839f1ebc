use async_trait::async_trait;
use crm_core_db::models::customer::GroupModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::GroupRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, GroupModel> for GroupRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<GroupModel>,
    ) -> Result<Vec<GroupModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO customer_group_def (id, name_group, value, is_active, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id)
            .bind(&item.name_group)
            .bind(&item.value)
            .bind(item.is_active)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
