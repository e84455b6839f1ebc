use crm_core_api::CrmResult;
use crm_core_db::models::customer::CustomerAggregate;
use crm_core_db::repository::{find_by_customer_id::FindByCustomerId, load::Load};
use uuid::Uuid;

use super::persist;
use crate::postgres_repositories::RepositorySession;

/// Reads a customer with every dependent collection inside `session`.
///
/// Returns `None` for unknown and soft-deleted customers.
pub(crate) async fn read_aggregate(
    session: &RepositorySession,
    customer_id: Uuid,
) -> CrmResult<Option<CustomerAggregate>> {
    let repos = &session.customer;
    let customer = match repos
        .customer_repository
        .load(customer_id)
        .await
        .map_err(|e| persist("load customer", e))?
    {
        Some(customer) if !customer.is_deleted() => customer,
        _ => return Ok(None),
    };

    let addresses = repos
        .address_repository
        .find_by_customer_id(customer_id)
        .await
        .map_err(|e| persist("load addresses", e))?;
    let sosmeds = repos
        .sosmed_repository
        .find_by_customer_id(customer_id)
        .await
        .map_err(|e| persist("load social accounts", e))?;
    let contacts = repos
        .contact_repository
        .find_by_customer_id(customer_id)
        .await
        .map_err(|e| persist("load contacts", e))?;
    let structures = repos
        .structure_repository
        .find_by_customer_id(customer_id)
        .await
        .map_err(|e| persist("load structures", e))?;
    let groups = repos
        .group_repository
        .find_by_customer_id(customer_id)
        .await
        .map_err(|e| persist("load groups", e))?;
    let others = repos
        .other_repository
        .find_by_customer_id(customer_id)
        .await
        .map_err(|e| persist("load attributes", e))?;

    Ok(Some(CustomerAggregate {
        customer,
        addresses,
        sosmeds,
        contacts,
        structures,
        groups,
        others,
    }))
}
