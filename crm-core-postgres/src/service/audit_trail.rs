use crm_core_api::{CrmError, CrmResult};
use crm_core_db::models::audit::HistoryCustomerModel;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::load_history::LoadHistory;
use crm_core_db::repository::pagination::{Page, PageRequest};
use crm_core_db::utils::{allocate_id, now_micros};
use std::fmt::Display;
use uuid::Uuid;

use super::persist;
use crate::postgres_repositories::{PostgresRepositories, RepositorySession};

fn audit_failed(err: impl Display) -> CrmError {
    CrmError::Audit(err.to_string())
}

/// Appends history records after a mutation has committed and reads them back.
pub struct AuditTrailRecorder {
    repos: PostgresRepositories,
}

impl AuditTrailRecorder {
    pub fn new(repos: PostgresRepositories) -> Self {
        Self { repos }
    }

    /// Appends one history record in its own transaction. The record carries
    /// a snapshot of the customer row as it is now, soft-deleted or not.
    pub async fn record(
        &self,
        customer_id: Uuid,
        acting_user_id: Uuid,
        label: &str,
        notes: Option<String>,
    ) -> CrmResult<HistoryCustomerModel> {
        let session = self.repos.begin().await.map_err(audit_failed)?;
        let customer = session
            .customer
            .customer_repository
            .load(customer_id)
            .await
            .map_err(audit_failed)?
            .ok_or_else(|| CrmError::not_found(format!("customer {customer_id}")))?;

        let record = HistoryCustomerModel::for_customer(
            allocate_id(),
            &customer,
            acting_user_id,
            label,
            notes,
            now_micros(),
        )
        .map_err(CrmError::Audit)?;

        session
            .audit
            .history_customer_repository
            .create(&record)
            .await
            .map_err(audit_failed)?;
        session.commit().await.map_err(audit_failed)?;

        tracing::info!(%customer_id, %acting_user_id, label, "history recorded");
        Ok(record)
    }

    /// [`Self::record`] for callers whose mutation already committed: a
    /// failure is logged and pushed onto `warnings` instead of returned.
    pub async fn record_or_warn(
        &self,
        customer_id: Uuid,
        acting_user_id: Uuid,
        label: &str,
        notes: Option<String>,
        warnings: &mut Vec<String>,
    ) -> Option<HistoryCustomerModel> {
        match self.record(customer_id, acting_user_id, label, notes).await {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::error!(%customer_id, label, error = %err, "history append failed after commit");
                warnings.push(format!("history record '{label}' was not written: {err}"));
                None
            }
        }
    }

    /// Every history record of the customer, oldest first
    pub async fn history_for(&self, customer_id: Uuid) -> CrmResult<Vec<HistoryCustomerModel>> {
        let session = self.begin_read(customer_id).await?;
        session
            .audit
            .history_customer_repository
            .load_history(customer_id)
            .await
            .map_err(|e| persist("load history", e))
    }

    pub async fn history_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> CrmResult<Page<HistoryCustomerModel>> {
        let session = self.begin_read(customer_id).await?;
        session
            .audit
            .history_customer_repository
            .load_history_page(customer_id, page.clamped())
            .await
            .map_err(|e| persist("load history page", e))
    }

    /// Read-only session for a customer that exists, deleted or not.
    async fn begin_read(&self, customer_id: Uuid) -> CrmResult<RepositorySession> {
        let session = self
            .repos
            .begin()
            .await
            .map_err(|e| persist("begin transaction", e))?;
        let exists = session
            .customer
            .customer_repository
            .load(customer_id)
            .await
            .map_err(|e| persist("load customer", e))?
            .is_some();
        if !exists {
            return Err(CrmError::not_found(format!("customer {customer_id}")));
        }
        Ok(session)
    }
}
