use async_trait::async_trait;
use crm_core_db::models::customer::GroupModel;
use crm_core_db::repository::{load::Load, load_batch::LoadBatch};
use sqlx::{postgres::PgRow, Postgres, Row};
use std::error::Error;
use uuid::Uuid;

use crate::unit_of_work::Executor;
use crate::utils::TryFromRow;

/// Groups live in `customer_group_def`; `customer_group` links them to customers.
pub struct GroupRepositoryImpl {
    pub(crate) executor: Executor,
}

impl GroupRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl Load<Postgres, GroupModel> for GroupRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<GroupModel>, Box<dyn Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        Ok(results.into_iter().next().flatten())
    }
}

impl TryFromRow<PgRow> for GroupModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(GroupModel {
            id: row.try_get("id")?,
            name_group: row.try_get("name_group")?,
            value: row.try_get("value")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
