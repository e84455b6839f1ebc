use crm_core_db::models::customer::OtherModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::unit_of_work::Executor;
use crate::utils::{get_heapless_string, TryFromRow};

/// Free-form attributes, stored in `other_attribute`.
pub struct OtherRepositoryImpl {
    pub(crate) executor: Executor,
}

impl OtherRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for OtherModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(OtherModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            key: get_heapless_string(row, "key")?,
            value: row.try_get("value")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
