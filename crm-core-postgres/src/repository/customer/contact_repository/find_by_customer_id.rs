use async_trait::async_trait;
use crm_core_db::models::customer::ContactModel;
use crm_core_db::repository::find_by_customer_id::FindByCustomerId;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ContactRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl FindByCustomerId<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<ContactModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM contact WHERE customer_id = $1 ORDER BY id")
                .bind(customer_id)
                .fetch_all(&mut **transaction)
                .await?
        };

        rows.iter().map(ContactModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::{new_test_contact, new_test_customer};
    use crate::test_helper::setup_test_context;
    use chrono::NaiveDate;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::find_by_customer_id::FindByCustomerId;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_contact_birthdate_round_trip() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.customer_repos();

        let customer = new_test_customer("Acme");
        repos.customer_repository.create_batch(vec![customer.clone()]).await?;

        let mut contact = new_test_contact(customer.id, "Budi Santoso");
        contact.birthdate = NaiveDate::from_ymd_opt(1985, 3, 15);
        repos.contact_repository.create_batch(vec![contact.clone()]).await?;

        let found = repos.contact_repository.find_by_customer_id(customer.id).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].birthdate, NaiveDate::from_ymd_opt(1985, 3, 15));

        Ok(())
    }
}
