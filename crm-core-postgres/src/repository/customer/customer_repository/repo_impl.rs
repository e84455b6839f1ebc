use async_trait::async_trait;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::{load::Load, load_batch::LoadBatch};
use sqlx::{postgres::PgRow, Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::unit_of_work::Executor;
use crate::utils::{get_optional_heapless_string, TryFromRow};

pub struct CustomerRepositoryImpl {
    pub(crate) executor: Executor,
}

impl CustomerRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, CustomerModel> for CustomerRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<CustomerModel>, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        Ok(results.into_iter().next().flatten())
    }
}

impl TryFromRow<PgRow> for CustomerModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CustomerModel {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            brand_name: row.try_get("brand_name")?,
            code: get_optional_heapless_string(row, "code")?,
            account_manager_id: row.try_get("account_manager_id")?,
            logo: row.try_get("logo")?,
            logo_small: row.try_get("logo_small")?,
            status: row.try_get("status")?,
            category: row.try_get("category")?,
            rating: row.try_get("rating")?,
            average_cost: row.try_get("average_cost")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }
}
