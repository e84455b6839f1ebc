use async_trait::async_trait;
use crm_core_db::models::customer::GroupModel;
use crm_core_db::repository::load_batch::LoadBatch;
use sqlx::Postgres;
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::GroupRepositoryImpl;
use crate::utils::TryFromRow;

#[async_trait]
impl LoadBatch<Postgres, GroupModel> for GroupRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<GroupModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM customer_group_def WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await?
        };

        let mut loaded: HashMap<Uuid, GroupModel> = HashMap::with_capacity(rows.len());
        for row in rows {
            let item = GroupModel::try_from_row(&row)?;
            loaded.insert(item.id, item);
        }

        Ok(ids.iter().map(|id| loaded.get(id).cloned()).collect())
    }
}
