use crm_core_db::models::audit::HistoryCustomerModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::unit_of_work::Executor;
use crate::utils::TryFromRow;

/// Append-only store for customer history. Records are never updated or deleted.
pub struct HistoryCustomerRepositoryImpl {
    pub(crate) executor: Executor,
}

impl HistoryCustomerRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    pub async fn create(
        &self,
        record: &HistoryCustomerModel,
    ) -> Result<HistoryCustomerModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, record).await
    }
}

impl TryFromRow<PgRow> for HistoryCustomerModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(HistoryCustomerModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            user_id: row.try_get("user_id")?,
            status: row.try_get("status")?,
            notes: row.try_get("notes")?,
            snapshot: row.try_get("snapshot")?,
            hash: row.try_get("hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
