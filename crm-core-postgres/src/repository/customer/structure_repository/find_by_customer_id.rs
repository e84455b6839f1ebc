use async_trait::async_trait;
use crm_core_db::models::customer::StructureModel;
use crm_core_db::repository::find_by_customer_id::FindByCustomerId;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StructureRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl FindByCustomerId<Postgres, StructureModel> for StructureRepositoryImpl {
    /// Nodes in declaration order
    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<StructureModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM structure WHERE customer_id = $1 ORDER BY position, id")
                .bind(customer_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(StructureModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::{new_test_customer, new_test_structure};
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::find_by_customer_id::FindByCustomerId;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_structures_come_back_in_declaration_order() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.customer_repos();

        let customer = new_test_customer("Acme");
        repos.customer_repository.create_batch(vec![customer.clone()]).await?;

        let board = new_test_structure(customer.id, "Board", None, 0);
        let tech = new_test_structure(customer.id, "Tech", Some(board.id), 1);
        let dev = new_test_structure(customer.id, "Dev", Some(tech.id), 2);
        repos
            .structure_repository
            .create_batch(vec![board.clone(), tech.clone(), dev.clone()])
            .await?;

        let found = repos.structure_repository.find_by_customer_id(customer.id).await?;
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Board", "Tech", "Dev"]);
        assert_eq!(found[1].parent_id, Some(board.id));
        assert_eq!(found[2].parent_id, Some(tech.id));

        Ok(())
    }
}
