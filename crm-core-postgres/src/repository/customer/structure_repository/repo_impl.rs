use crm_core_db::models::customer::StructureModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct StructureRepositoryImpl {
    pub(crate) executor: Executor,
}

impl StructureRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for StructureModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(StructureModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            parent_id: row.try_get("parent_id")?,
            name: row.try_get("name")?,
            level: row.try_get("level")?,
            address: row.try_get("address")?,
            position: row.try_get("position")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
