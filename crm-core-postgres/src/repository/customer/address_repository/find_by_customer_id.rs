use async_trait::async_trait;
use crm_core_db::models::customer::AddressModel;
use crm_core_db::repository::find_by_customer_id::FindByCustomerId;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::AddressRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl FindByCustomerId<Postgres, AddressModel> for AddressRepositoryImpl {
    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<AddressModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM address WHERE customer_id = $1 ORDER BY id")
                .bind(customer_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(AddressModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::{new_test_address, new_test_customer};
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::find_by_customer_id::FindByCustomerId;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_find_addresses_by_customer() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.customer_repos();

        let customer = new_test_customer("Acme");
        repos.customer_repository.create_batch(vec![customer.clone()]).await?;

        let head_office = new_test_address(customer.id, "Head Office", true);
        let branch = new_test_address(customer.id, "Branch", false);
        repos
            .address_repository
            .create_batch(vec![head_office.clone(), branch.clone()])
            .await?;

        let found = repos.address_repository.find_by_customer_id(customer.id).await?;
        assert_eq!(found, vec![head_office, branch]);

        Ok(())
    }
}
