use async_trait::async_trait;
use crm_core_db::models::customer::StructureModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::StructureRepositoryImpl;

#[async_trait]
impl CreateBatch<Postgres, StructureModel> for StructureRepositoryImpl {
    /// Nodes are inserted in the given order. A node's parent must appear
    /// earlier in `items` or already exist, otherwise the parent foreign key
    /// rejects the insert.
    async fn create_batch(
        &self,
        items: Vec<StructureModel>,
    ) -> Result<Vec<StructureModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO structure (
                    id, customer_id, parent_id, name, level, address, position,
                    is_active, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(item.id)
            .bind(item.customer_id)
            .bind(item.parent_id)
            .bind(&item.name)
            .bind(item.level)
            .bind(&item.address)
            .bind(item.position)
            .bind(item.is_active)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut **transaction)
            .await?;
        }

        tracing::debug!(count = items.len(), "inserted structure nodes");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::{new_test_customer, new_test_structure};
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_parent_from_other_customer_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.customer_repos();

        let owner = new_test_customer("Owner");
        let other = new_test_customer("Other");
        repos
            .customer_repository
            .create_batch(vec![owner.clone(), other.clone()])
            .await?;

        let root = new_test_structure(owner.id, "Board", None, 0);
        repos.structure_repository.create_batch(vec![root.clone()]).await?;

        let stray = new_test_structure(other.id, "Stray", Some(root.id), 0);
        assert!(repos.structure_repository.create_batch(vec![stray]).await.is_err());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_unknown_parent_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.customer_repos();

        let owner = new_test_customer("Owner");
        repos.customer_repository.create_batch(vec![owner.clone()]).await?;

        let orphan = new_test_structure(owner.id, "Orphan", Some(Uuid::new_v4()), 0);
        assert!(repos.structure_repository.create_batch(vec![orphan]).await.is_err());

        Ok(())
    }
}
