use chrono::{DateTime, Utc};
use crm_core_api::{CreateCustomerRequest, CrmError, CrmResult, GroupDirective};
use crm_core_db::models::audit::HISTORY_CREATED;
use crm_core_db::models::customer::{
    AddressModel, ContactModel, CustomerAggregate, CustomerModel, CustomerStatus, OtherModel,
    SosmedModel,
};
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_db::repository::load_batch::LoadBatch;
use crm_core_db::utils::{allocate_id, now_micros};
use rust_decimal::Decimal;
use serde::Serialize;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use super::aggregate_reader::read_aggregate;
use super::hierarchy_resolver::resolve_hierarchy;
use super::{commit_failed, parse_status, persist, within_deadline, AuditTrailRecorder, ServiceConfig};
use crate::postgres_repositories::PostgresRepositories;
use crate::repository::customer::CustomerRepositories;
use crate::utils::{is_unique_violation, to_heapless};

/// A group reference from the request that was not linked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAssociation {
    pub directive: GroupDirective,
    pub reference: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutcome {
    pub aggregate: CustomerAggregate,
    pub skipped_associations: Vec<SkippedAssociation>,
    /// Post-commit problems; the aggregate exists regardless
    pub warnings: Vec<String>,
}

/// The rows of one aggregate, built and validated before any transaction opens.
struct AggregateRows {
    customer: CustomerModel,
    addresses: Vec<AddressModel>,
    sosmeds: Vec<SosmedModel>,
    contacts: Vec<ContactModel>,
    others: Vec<OtherModel>,
}

/// Creates a customer and all of its dependent rows as one atomic unit.
pub struct AggregateWriter {
    repos: PostgresRepositories,
    audit_trail: Arc<AuditTrailRecorder>,
    config: ServiceConfig,
}

impl AggregateWriter {
    pub fn new(
        repos: PostgresRepositories,
        audit_trail: Arc<AuditTrailRecorder>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repos,
            audit_trail,
            config,
        }
    }

    pub async fn create_customer_aggregate(
        &self,
        request: CreateCustomerRequest,
        acting_user_id: Uuid,
    ) -> CrmResult<CreateOutcome> {
        request.validate_request()?;
        let now = now_micros();
        let customer_id = allocate_id();

        let hierarchy = resolve_hierarchy(customer_id, &request.structures, now)?;
        let rows = build_rows(customer_id, &request, now)?;
        let group_refs = request
            .groups
            .as_ref()
            .map(|groups| groups.requested())
            .unwrap_or_default();

        let (session, skipped_associations) = within_deadline(self.config.tx_timeout, async {
            let session = self
                .repos
                .begin()
                .await
                .map_err(|e| persist("begin transaction", e))?;
            let repos = &session.customer;

            repos
                .customer_repository
                .create_batch(vec![rows.customer.clone()])
                .await
                .map_err(|e| customer_insert_failed(&rows.customer, e))?;
            repos
                .address_repository
                .create_batch(rows.addresses.clone())
                .await
                .map_err(|e| persist("insert addresses", e))?;
            repos
                .sosmed_repository
                .create_batch(rows.sosmeds.clone())
                .await
                .map_err(|e| persist("insert social accounts", e))?;
            repos
                .contact_repository
                .create_batch(rows.contacts.clone())
                .await
                .map_err(|e| persist("insert contacts", e))?;
            repos
                .other_repository
                .create_batch(rows.others.clone())
                .await
                .map_err(|e| persist("insert attributes", e))?;
            repos
                .structure_repository
                .create_batch(hierarchy.nodes.clone())
                .await
                .map_err(|e| persist("insert structures", e))?;

            let skipped = link_groups(repos, customer_id, &group_refs, now).await?;
            Ok((session, skipped))
        })
        .await?;

        session.commit().await.map_err(commit_failed)?;
        tracing::info!(
            %customer_id,
            structures = hierarchy.nodes.len(),
            skipped = skipped_associations.len(),
            "customer aggregate created"
        );

        let aggregate = self.reload(customer_id).await?;
        let mut warnings = Vec::new();
        self.audit_trail
            .record_or_warn(customer_id, acting_user_id, HISTORY_CREATED, None, &mut warnings)
            .await;

        Ok(CreateOutcome {
            aggregate,
            skipped_associations,
            warnings,
        })
    }

    async fn reload(&self, customer_id: Uuid) -> CrmResult<CustomerAggregate> {
        let session = self
            .repos
            .begin()
            .await
            .map_err(|e| persist("begin transaction", e))?;
        read_aggregate(&session, customer_id)
            .await?
            .ok_or_else(|| CrmError::Persist(format!("customer {customer_id} missing after commit")))
    }
}

fn customer_insert_failed(customer: &CustomerModel, err: Box<dyn Error + Send + Sync>) -> CrmError {
    if is_unique_violation(err.as_ref()) {
        let code = customer.code.as_ref().map(|c| c.as_str()).unwrap_or_default();
        return CrmError::validation(format!("customer code '{code}' is already in use"));
    }
    persist("insert customer", err)
}

fn build_rows(
    customer_id: Uuid,
    request: &CreateCustomerRequest,
    now: DateTime<Utc>,
) -> CrmResult<AggregateRows> {
    let status = match request.status.as_deref().map(str::trim) {
        None | Some("") => CustomerStatus::default(),
        Some(label) => parse_status(label)?,
    };
    let code = request
        .normalized_code()
        .map(|code| to_heapless(code, "code"))
        .transpose()
        .map_err(|e| CrmError::validation(e.to_string()))?;

    let customer = CustomerModel {
        id: customer_id,
        name: request.name.trim().to_string(),
        brand_name: request.brand_name.clone(),
        code,
        account_manager_id: request.account_manager_id.clone(),
        logo: request.logo.clone(),
        logo_small: request.logo_small.clone(),
        status,
        category: request.category.clone(),
        rating: request.rating.unwrap_or(Decimal::ZERO),
        average_cost: request.average_cost.unwrap_or(Decimal::ZERO),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let addresses = request
        .addresses
        .iter()
        .map(|a| AddressModel {
            id: allocate_id(),
            customer_id,
            name: a.name.clone(),
            address: a.address.clone(),
            is_main: a.is_main,
            is_active: a.active,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let sosmeds = request
        .socials
        .iter()
        .map(|s| {
            Ok(SosmedModel {
                id: allocate_id(),
                customer_id,
                name: s.platform.clone(),
                platform: to_heapless(&s.platform, "platform")?,
                handle: s.handle.clone(),
                is_active: s.active,
                created_at: now,
                updated_at: now,
            })
        })
        .collect::<Result<Vec<_>, Box<dyn Error + Send + Sync>>>()
        .map_err(|e| CrmError::validation(e.to_string()))?;

    let contacts = request
        .contacts
        .iter()
        .map(|c| {
            Ok(ContactModel {
                id: allocate_id(),
                customer_id,
                name: c.name.clone(),
                birthdate: c.parsed_birthdate()?,
                job_position: c.job_position.clone(),
                email: c.email.clone(),
                phone: c.phone.clone(),
                mobile: c.mobile.clone(),
                is_main: c.is_main,
                is_active: c.active,
                created_at: now,
                updated_at: now,
            })
        })
        .collect::<CrmResult<Vec<_>>>()?;

    let others = request
        .others
        .iter()
        .map(|o| {
            Ok(OtherModel {
                id: allocate_id(),
                customer_id,
                key: to_heapless(&o.key, "key")?,
                value: o.value.clone(),
                is_active: o.active,
                created_at: now,
                updated_at: now,
            })
        })
        .collect::<Result<Vec<_>, Box<dyn Error + Send + Sync>>>()
        .map_err(|e| CrmError::validation(e.to_string()))?;

    Ok(AggregateRows {
        customer,
        addresses,
        sosmeds,
        contacts,
        others,
    })
}

/// Links every requested group that exists. Unparseable and unknown group
/// ids are returned as skipped rather than failing the create.
async fn link_groups(
    repos: &CustomerRepositories,
    customer_id: Uuid,
    group_refs: &[(GroupDirective, &str)],
    now: DateTime<Utc>,
) -> CrmResult<Vec<SkippedAssociation>> {
    let mut skipped = Vec::new();
    let mut candidates = Vec::with_capacity(group_refs.len());

    for (directive, reference) in group_refs {
        match Uuid::parse_str(reference) {
            Ok(group_id) => candidates.push((*directive, *reference, group_id)),
            Err(_) => skipped.push(SkippedAssociation {
                directive: *directive,
                reference: reference.to_string(),
                reason: "malformed group id".to_string(),
            }),
        }
    }
    if candidates.is_empty() {
        return Ok(skipped);
    }

    let ids: Vec<Uuid> = candidates.iter().map(|(_, _, id)| *id).collect();
    let groups = repos
        .group_repository
        .load_batch(&ids)
        .await
        .map_err(|e| persist("load groups", e))?;

    for ((directive, reference, group_id), group) in candidates.into_iter().zip(groups) {
        if group.is_none() {
            tracing::warn!(%customer_id, %group_id, ?directive, "group not found, skipping link");
            skipped.push(SkippedAssociation {
                directive,
                reference: reference.to_string(),
                reason: "group not found".to_string(),
            });
            continue;
        }
        repos
            .group_repository
            .link_customer(customer_id, group_id, now)
            .await
            .map_err(|e| persist("link group", e))?;
    }

    Ok(skipped)
}
