use crm_core_db::models::customer::ContactModel;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

use crate::unit_of_work::Executor;
use crate::utils::TryFromRow;

pub struct ContactRepositoryImpl {
    pub(crate) executor: Executor,
}

impl ContactRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ContactModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ContactModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            name: row.try_get("name")?,
            birthdate: row.try_get("birthdate")?,
            job_position: row.try_get("job_position")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            mobile: row.try_get("mobile")?,
            is_main: row.try_get("is_main")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
