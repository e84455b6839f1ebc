use crm_core_db::models::status::StatusReasonModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct StatusReasonRepositoryImpl {
    pub(crate) executor: Executor,
}

impl StatusReasonRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for StatusReasonModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(StatusReasonModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            reason: row.try_get("reason")?,
            status: row.try_get("status")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
