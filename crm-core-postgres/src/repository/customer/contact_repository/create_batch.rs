use async_trait::async_trait;
use crm_core_db::models::customer::ContactModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ContactRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ContactModel>,
    ) -> Result<Vec<ContactModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO contact (
                    id, customer_id, name, birthdate, job_position, email, phone, mobile,
                    is_main, is_active, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(item.id)
            .bind(item.customer_id)
            .bind(&item.name)
            .bind(item.birthdate)
            .bind(&item.job_position)
            .bind(&item.email)
            .bind(&item.phone)
            .bind(&item.mobile)
            .bind(item.is_main)
            .bind(item.is_active)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}
