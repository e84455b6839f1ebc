use chrono::{DateTime, Utc};
use crm_core_api::{CrmError, CrmResult, UpdateCustomerRequest, UploadedFile};
use crm_core_db::models::audit::{HISTORY_DELETED, HISTORY_LOGO_UPLOADED, HISTORY_UPDATED};
use crm_core_db::models::customer::{CustomerAggregate, CustomerModel};
use crm_core_db::repository::update_batch::UpdateBatch;
use crm_core_db::utils::now_micros;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::aggregate_reader::read_aggregate;
use super::{commit_failed, persist, within_deadline, AuditTrailRecorder, FileStore, ServiceConfig};
use crate::postgres_repositories::PostgresRepositories;
use crate::utils::{is_unique_violation, to_heapless};

pub const LOGO_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".svg"];

/// Customer row after a committed mutation, plus post-commit warnings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMutation {
    pub customer: CustomerModel,
    pub warnings: Vec<String>,
}

pub fn logo_path(customer_id: Uuid, extension: &str, at: DateTime<Utc>) -> String {
    format!(
        "logos/logo_{customer_id}_{}{extension}",
        at.format("%Y%m%d%H%M%S")
    )
}

/// Copies the present fields of `request` onto `customer`.
fn apply_update(
    customer: &mut CustomerModel,
    request: &UpdateCustomerRequest,
    now: DateTime<Utc>,
) -> CrmResult<()> {
    if let Some(name) = &request.name {
        customer.name = name.trim().to_string();
    }
    if let Some(brand_name) = &request.brand_name {
        customer.brand_name = Some(brand_name.clone());
    }
    if let Some(code) = &request.code {
        let code = code.trim();
        customer.code = if code.is_empty() {
            None
        } else {
            Some(to_heapless(code, "code").map_err(|e| CrmError::validation(e.to_string()))?)
        };
    }
    if let Some(account_manager_id) = &request.account_manager_id {
        customer.account_manager_id = Some(account_manager_id.clone());
    }
    if let Some(logo_small) = &request.logo_small {
        customer.logo_small = Some(logo_small.clone());
    }
    if let Some(category) = &request.category {
        customer.category = Some(category.clone());
    }
    if let Some(rating) = request.rating {
        customer.rating = rating;
    }
    if let Some(average_cost) = request.average_cost {
        customer.average_cost = average_cost;
    }
    customer.updated_at = now;
    Ok(())
}

/// Reads and the non-status mutations of a single customer.
pub struct CustomerMaintenance {
    repos: PostgresRepositories,
    audit_trail: Arc<AuditTrailRecorder>,
    file_store: Arc<dyn FileStore>,
    config: ServiceConfig,
}

impl CustomerMaintenance {
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

    pub async fn load_aggregate(&self, customer_id: Uuid) -> CrmResult<CustomerAggregate> {
        let session = self
            .repos
            .begin()
            .await
            .map_err(|e| persist("begin transaction", e))?;
        read_aggregate(&session, customer_id)
            .await?
            .ok_or_else(|| CrmError::not_found(format!("customer {customer_id}")))
    }

    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerRequest,
        acting_user_id: Uuid,
    ) -> CrmResult<CustomerMutation> {
        request.validate_request()?;
        if request.is_empty() {
            return Err(CrmError::validation("no fields to update"));
        }
        let now = now_micros();

        let customer = self
            .mutate(customer_id, "update customer", |customer| {
                apply_update(customer, &request, now)
            })
            .await?;

        let mut warnings = Vec::new();
        self.audit_trail
            .record_or_warn(customer_id, acting_user_id, HISTORY_UPDATED, None, &mut warnings)
            .await;
        Ok(CustomerMutation { customer, warnings })
    }

    /// Soft delete: the row stays for the history but is hidden from reads.
    pub async fn delete_customer(
        &self,
        customer_id: Uuid,
        acting_user_id: Uuid,
    ) -> CrmResult<CustomerMutation> {
        let now = now_micros();
        let customer = self
            .mutate(customer_id, "delete customer", |customer| {
                customer.deleted_at = Some(now);
                customer.updated_at = now;
                Ok(())
            })
            .await?;

        let mut warnings = Vec::new();
        self.audit_trail
            .record_or_warn(customer_id, acting_user_id, HISTORY_DELETED, None, &mut warnings)
            .await;
        Ok(CustomerMutation { customer, warnings })
    }

    pub async fn upload_logo(
        &self,
        customer_id: Uuid,
        file: UploadedFile,
        acting_user_id: Uuid,
    ) -> CrmResult<CustomerMutation> {
        let extension = file
            .extension()
            .filter(|ext| LOGO_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                CrmError::validation(format!(
                    "logo must be one of {}, got '{}'",
                    LOGO_EXTENSIONS.join(", "),
                    file.file_name
                ))
            })?;
        if file.bytes.is_empty() {
            return Err(CrmError::validation("logo file is empty"));
        }
        let now = now_micros();
        let path = logo_path(customer_id, &extension, now);

        let customer = self
            .mutate(customer_id, "update logo", |customer| {
                customer.logo = Some(path.clone());
                customer.updated_at = now;
                Ok(())
            })
            .await?;

        let mut warnings = Vec::new();
        if let Err(err) = self.file_store.store(&path, &file.bytes).await {
            tracing::error!(%customer_id, %path, error = %err, "logo write failed after commit");
            warnings.push(format!("logo file was not stored: {err}"));
        }
        self.audit_trail
            .record_or_warn(
                customer_id,
                acting_user_id,
                HISTORY_LOGO_UPLOADED,
                Some(path),
                &mut warnings,
            )
            .await;
        Ok(CustomerMutation { customer, warnings })
    }

    /// Locks the live customer, applies `change`, writes it back and commits.
    async fn mutate(
        &self,
        customer_id: Uuid,
        context: &str,
        change: impl FnOnce(&mut CustomerModel) -> CrmResult<()>,
    ) -> CrmResult<CustomerModel> {
        let (session, customer) = within_deadline(self.config.tx_timeout, async {
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

            change(&mut customer)?;
            session
                .customer
                .customer_repository
                .update_batch(vec![customer.clone()])
                .await
                .map_err(|e| {
                    if is_unique_violation(e.as_ref()) {
                        CrmError::validation("customer code is already in use")
                    } else {
                        persist(context, e)
                    }
                })?;
            Ok((session, customer))
        })
        .await?;

        session.commit().await.map_err(commit_failed)?;
        tracing::info!(%customer_id, "{context} committed");
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crm_core_db::models::customer::CustomerStatus;
    use rust_decimal::Decimal;

    fn customer() -> CustomerModel {
        let now = now_micros();
        CustomerModel {
            id: Uuid::nil(),
            name: "Acme".to_string(),
            brand_name: None,
            code: None,
            account_manager_id: None,
            logo: None,
            logo_small: None,
            status: CustomerStatus::Blocked,
            category: None,
            rating: Decimal::ZERO,
            average_cost: Decimal::ZERO,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_logo_path_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            logo_path(Uuid::nil(), ".png", at),
            "logos/logo_00000000-0000-0000-0000-000000000000_20250102030405.png"
        );
    }

    #[test]
    fn test_apply_update_touches_only_present_fields() {
        let mut model = customer();
        let request = UpdateCustomerRequest {
            category: Some("Technology".to_string()),
            rating: Some(Decimal::new(45, 1)),
            code: Some(" NEW ".to_string()),
            ..Default::default()
        };
        let later = now_micros();
        apply_update(&mut model, &request, later).unwrap();

        assert_eq!(model.name, "Acme");
        assert_eq!(model.category.as_deref(), Some("Technology"));
        assert_eq!(model.rating, Decimal::new(45, 1));
        assert_eq!(model.code.as_ref().map(|c| c.as_str()), Some("NEW"));
        assert_eq!(model.status, CustomerStatus::Blocked);
        assert_eq!(model.updated_at, later);
    }

    #[test]
    fn test_apply_update_blank_code_clears_it() {
        let mut model = customer();
        model.code = to_heapless("OLD", "code").ok();
        let request = UpdateCustomerRequest {
            code: Some("  ".to_string()),
            ..Default::default()
        };
        apply_update(&mut model, &request, now_micros()).unwrap();
        assert!(model.code.is_none());
    }
}
