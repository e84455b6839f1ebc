use async_trait::async_trait;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CustomerRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, CustomerModel> for CustomerRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

impl CustomerRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CustomerRepositoryImpl,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO customer (
                    id, name, brand_name, code, account_manager_id, logo, logo_small,
                    status, category, rating, average_cost, created_at, updated_at, deleted_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
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
            .bind(item.created_at)
            .bind(item.updated_at)
            .bind(item.deleted_at)
            .execute(&mut **transaction)
            .await?;
        }

        tracing::debug!(count = items.len(), "inserted customers");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::new_test_customer;
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_create_and_load_customer() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let customer_repo = &ctx.customer_repos().customer_repository;

        let customer = new_test_customer("Acme");
        let saved = customer_repo.create_batch(vec![customer.clone()]).await?;
        assert_eq!(saved.len(), 1);

        let loaded = customer_repo.load(customer.id).await?.expect("customer should exist");
        assert_eq!(loaded.name, "Acme");
        assert_eq!(loaded.status, customer.status);
        assert_eq!(loaded.code, customer.code);
        assert!(loaded.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_duplicate_code_is_unique_violation() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let customer_repo = &ctx.customer_repos().customer_repository;

        let first = new_test_customer("First");
        let mut second = new_test_customer("Second");
        second.code = first.code.clone();

        customer_repo.create_batch(vec![first]).await?;
        let err = customer_repo.create_batch(vec![second]).await.unwrap_err();
        assert!(crate::utils::is_unique_violation(err.as_ref()));

        Ok(())
    }
}
