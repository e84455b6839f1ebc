use async_trait::async_trait;
use crm_core_db::models::audit::HistoryCustomerModel;
use crm_core_db::repository::load_history::LoadHistory;
use crm_core_db::repository::pagination::{Page, PageRequest};
use sqlx::{Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::HistoryCustomerRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl LoadHistory<Postgres, HistoryCustomerModel> for HistoryCustomerRepositoryImpl {
    async fn load_history(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<HistoryCustomerModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                "SELECT * FROM history_customer WHERE customer_id = $1 ORDER BY created_at ASC, id ASC",
            )
            .bind(customer_id)
            .fetch_all(&mut **transaction)
            .await?
        };

        rows.iter().map(HistoryCustomerModel::try_from_row).collect()
    }

    async fn load_history_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<HistoryCustomerModel>, Box<dyn Error + Send + Sync>> {
        let limit = i64::try_from(page.limit)?;
        let offset = i64::try_from(page.offset)?;

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM history_customer WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(&mut **transaction)
            .await?
            .try_get("total")?;

        let rows = sqlx::query(
            r#"
            SELECT * FROM history_customer
            WHERE customer_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut **transaction)
        .await?;

        let items = rows
            .iter()
            .map(HistoryCustomerModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::test_utils::new_test_customer;
    use crate::test_helper::setup_test_context;
    use chrono::Duration;
    use crm_core_db::models::audit::HistoryCustomerModel;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load_history::LoadHistory;
    use crm_core_db::repository::pagination::PageRequest;
    use crm_core_db::utils::{allocate_id, now_micros};
    use uuid::Uuid;

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_history_is_ordered_and_paged() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let customer = new_test_customer("Acme");
        ctx.customer_repos()
            .customer_repository
            .create_batch(vec![customer.clone()])
            .await?;

        let history_repo = &ctx.audit_repos().history_customer_repository;
        let user_id = Uuid::new_v4();
        let base = now_micros();
        // Inserted newest first; the repository must still return oldest first.
        for (offset, label) in [(2, "Status Changed"), (1, "Updated"), (0, "Created")] {
            let record = HistoryCustomerModel::for_customer(
                allocate_id(),
                &customer,
                user_id,
                label,
                None,
                base + Duration::seconds(offset),
            )?;
            history_repo.create(&record).await?;
        }

        let history = history_repo.load_history(customer.id).await?;
        let labels: Vec<_> = history.iter().map(|h| h.status.as_str()).collect();
        assert_eq!(labels, vec!["Created", "Updated", "Status Changed"]);
        assert!(history.iter().all(|h| h.verify_hash()));

        let page = history_repo
            .load_history_page(customer.id, PageRequest::new(2, 2))
            .await?;
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].status, "Status Changed");
        assert!(!page.has_more());

        Ok(())
    }
}
