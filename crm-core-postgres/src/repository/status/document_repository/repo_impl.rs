use crm_core_db::models::status::DocumentModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::unit_of_work::Executor;
use crate::utils::{get_heapless_string, TryFromRow};

pub struct DocumentRepositoryImpl {
    pub(crate) executor: Executor,
}

impl DocumentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for DocumentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DocumentModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            user_id: row.try_get("user_id")?,
            notes: row.try_get("notes")?,
            doc_type: get_heapless_string(row, "doc_type")?,
            url_file: row.try_get("url_file")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
