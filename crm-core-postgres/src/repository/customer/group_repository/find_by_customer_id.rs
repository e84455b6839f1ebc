use std::error::Error;
use uuid::Uuid;

use crm_core_db::models::customer::GroupModel;

use super::repo_impl::GroupRepositoryImpl;
use crate::utils::TryFromRow;

impl GroupRepositoryImpl {
    /// Groups linked to the customer, in link order.
    pub async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<GroupModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT g.*
                FROM customer_group_def g
                JOIN customer_group cg ON cg.group_id = g.id
                WHERE cg.customer_id = $1
                ORDER BY cg.created_at, g.id
                "#,
            )
            .bind(customer_id)
            .fetch_all(&mut **transaction)
            .await?
        };

        rows.iter().map(GroupModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::{new_test_customer, new_test_group};
    use crate::test_helper::setup_test_context;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load::Load;
    use crm_core_db::utils::now_micros;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_link_and_find_groups() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.customer_repos();

        let customer = new_test_customer("Acme");
        repos.customer_repository.create_batch(vec![customer.clone()]).await?;
        let industry = new_test_group("Industry", "Technology");
        repos.group_repository.create_batch(vec![industry.clone()]).await?;

        assert!(repos.group_repository.load(Uuid::new_v4()).await?.is_none());
        assert!(repos.group_repository.load(industry.id).await?.is_some());

        assert!(repos.group_repository.link_customer(customer.id, industry.id, now_micros()).await?);
        assert!(!repos.group_repository.link_customer(customer.id, industry.id, now_micros()).await?);

        let linked = repos.group_repository.find_by_customer_id(customer.id).await?;
        assert_eq!(linked, vec![industry]);

        Ok(())
    }
}
