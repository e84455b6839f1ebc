use crm_core_api::{CrmError, CrmResult, StatusChangeRequest, UploadedFile};
use crm_core_db::models::audit::HISTORY_STATUS_CHANGED;
use crm_core_db::models::customer::{CustomerModel, CustomerStatus};
use crm_core_db::models::status::{DocumentModel, StatusReasonModel, DOCUMENT_TYPE_STATUS_CHANGE};
use crm_core_db::repository::load::Load;
use crm_core_db::repository::update_batch::UpdateBatch;
use crm_core_db::utils::{allocate_id, now_micros};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    commit_failed, parse_status, persist, within_deadline, AuditTrailRecorder, FileStore,
    ServiceConfig,
};
use crate::postgres_repositories::PostgresRepositories;
use crate::utils::to_heapless;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeOutcome {
    pub customer: CustomerModel,
    pub previous_status: CustomerStatus,
    pub reason: StatusReasonModel,
    pub document: Option<DocumentModel>,
    pub warnings: Vec<String>,
}

/// A customer with the reasons and documents behind its status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    pub customer: CustomerModel,
    pub status_reasons: Vec<StatusReasonModel>,
    pub documents: Vec<DocumentModel>,
}

/// Storage path of a status change document
pub fn document_path(customer_id: Uuid, document_id: Uuid, file: &UploadedFile) -> String {
    format!(
        "documents/{customer_id}_{document_id}_{}",
        file.sanitized_file_name()
    )
}

fn audit_notes(previous: CustomerStatus, next: CustomerStatus, notes: Option<&str>) -> String {
    match notes {
        Some(notes) => format!("Status changed from {previous} to {next}. {notes}"),
        None => format!("Status changed from {previous} to {next}"),
    }
}

/// The only writer of `customer.status` after creation.
///
/// Status, reason row and optional document row commit together. The
/// customer row is locked for the duration, so concurrent changes to the
/// same customer apply one after the other.
pub struct StatusTransitionEngine {
    repos: PostgresRepositories,
    audit_trail: Arc<AuditTrailRecorder>,
    file_store: Arc<dyn FileStore>,
    config: ServiceConfig,
}

impl StatusTransitionEngine {
    pub fn new(
        repos: PostgresRepositories,
        audit_trail: Arc<AuditTrailRecorder>,
        file_store: Arc<dyn FileStore>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repos,
            audit_trail,
            file_store,
            config,
        }
    }

    pub async fn change_status(
        &self,
        customer_id: Uuid,
        request: StatusChangeRequest,
        file: Option<UploadedFile>,
        acting_user_id: Uuid,
    ) -> CrmResult<StatusChangeOutcome> {
        let new_status = parse_status(&request.status)?;
        let reason_text = request.reason.trim();
        if reason_text.is_empty() {
            return Err(CrmError::validation("reason is required"));
        }
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let now = now_micros();

        let (session, customer, previous_status, reason, document) =
            within_deadline(self.config.tx_timeout, async {
                let session = self
                    .repos
                    .begin()
                    .await
                    .map_err(|e| persist("begin transaction", e))?;

                let mut customer = session
                    .customer
                    .customer_repository
                    .lock_for_update(customer_id)
                    .await
                    .map_err(|e| persist("lock customer", e))?
                    .ok_or_else(|| CrmError::not_found(format!("customer {customer_id}")))?;

                let previous_status = customer.status;
                customer.status = new_status;
                customer.updated_at = now;
                session
                    .customer
                    .customer_repository
                    .update_batch(vec![customer.clone()])
                    .await
                    .map_err(|e| persist("update customer status", e))?;

                let reason = StatusReasonModel {
                    id: allocate_id(),
                    customer_id,
                    reason: reason_text.to_string(),
                    status: new_status,
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                };
                session
                    .status
                    .status_reason_repository
                    .create(&reason)
                    .await
                    .map_err(|e| persist("insert status reason", e))?;

                let document = match &file {
                    None => None,
                    Some(file) => {
                        let id = allocate_id();
                        let document = DocumentModel {
                            id,
                            customer_id,
                            user_id: acting_user_id,
                            notes: notes.map(str::to_string),
                            doc_type: to_heapless(DOCUMENT_TYPE_STATUS_CHANGE, "doc_type")
                                .map_err(|e| persist("build document", e))?,
                            url_file: document_path(customer_id, id, file),
                            is_active: true,
                            created_at: now,
                            updated_at: now,
                        };
                        session
                            .status
                            .document_repository
                            .create(&document)
                            .await
                            .map_err(|e| persist("insert document", e))?;
                        Some(document)
                    }
                };

                Ok((session, customer, previous_status, reason, document))
            })
            .await?;

        session.commit().await.map_err(commit_failed)?;
        tracing::info!(
            %customer_id,
            from = %previous_status,
            to = %new_status,
            with_document = document.is_some(),
            "customer status changed"
        );

        let mut warnings = Vec::new();
        if let (Some(document), Some(file)) = (&document, &file) {
            if let Err(err) = self.file_store.store(&document.url_file, &file.bytes).await {
                tracing::error!(%customer_id, path = %document.url_file, error = %err, "document write failed after commit");
                warnings.push(format!("document file was not stored: {err}"));
            }
        }

        self.audit_trail
            .record_or_warn(
                customer_id,
                acting_user_id,
                HISTORY_STATUS_CHANGED,
                Some(audit_notes(previous_status, new_status, notes)),
                &mut warnings,
            )
            .await;

        Ok(StatusChangeOutcome {
            customer,
            previous_status,
            reason,
            document,
            warnings,
        })
    }

    pub async fn status_details(&self, customer_id: Uuid) -> CrmResult<StatusDetails> {
        let session = self
            .repos
            .begin()
            .await
            .map_err(|e| persist("begin transaction", e))?;

        let customer = session
            .customer
            .customer_repository
            .load(customer_id)
            .await
            .map_err(|e| persist("load customer", e))?
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| CrmError::not_found(format!("customer {customer_id}")))?;
        let status_reasons = session
            .status
            .status_reason_repository
            .find_active_by_customer_id(customer_id)
            .await
            .map_err(|e| persist("load status reasons", e))?;
        let documents = session
            .status
            .document_repository
            .find_active_by_customer_id(customer_id)
            .await
            .map_err(|e| persist("load documents", e))?;

        Ok(StatusDetails {
            customer,
            status_reasons,
            documents,
        })
    }
}
