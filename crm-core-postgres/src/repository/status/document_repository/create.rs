use crm_core_db::models::status::DocumentModel;
use std::error::Error;

use super::repo_impl::DocumentRepositoryImpl;

impl DocumentRepositoryImpl {
    pub async fn create(
        &self,
        document: &DocumentModel,
    ) -> Result<DocumentModel, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        sqlx::query(
            r#"
            INSERT INTO document (id, customer_id, user_id, notes, doc_type, url_file, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(document.id)
        .bind(document.customer_id)
        .bind(document.user_id)
        .bind(&document.notes)
        .bind(document.doc_type.as_str())
        .bind(&document.url_file)
        .bind(document.is_active)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&mut **transaction)
        .await?;

        Ok(document.clone())
    }
}
